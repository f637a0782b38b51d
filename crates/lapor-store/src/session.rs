//! Admin session context, persisted across restarts.

use tracing::info;

use crate::StoreError;
use crate::slot::LocalStore;

/// Slot key holding the bearer credential.
const TOKEN_SLOT: &str = "admin_token";

/// The admin session: one optional opaque credential.
///
/// Presence is derived from non-emptiness of the credential — there is no
/// separate logged-in flag to fall out of sync. The credential is only ever
/// replaced after a successful login; a failed login never touches it.
#[derive(Debug)]
pub struct Session {
    token: Option<String>,
    store: LocalStore,
}

impl Session {
    /// Restore the session from its durable slot. An empty persisted string
    /// counts as no session.
    pub fn load(store: LocalStore) -> Result<Self, StoreError> {
        let token = store.read(TOKEN_SLOT)?.filter(|token| !token.is_empty());
        Ok(Self { token, store })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Store the credential issued by a successful login. The slot is written
    /// before memory so a failed write leaves the previous session intact.
    pub fn set_token(&mut self, token: String) -> Result<(), StoreError> {
        self.store.write(TOKEN_SLOT, &token)?;
        self.token = Some(token);
        info!("admin session opened");
        Ok(())
    }

    /// Forget the credential unconditionally. No remote call is involved.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.remove(TOKEN_SLOT)?;
        self.token = None;
        info!("admin session closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unauthenticated() {
        let tmp = tempfile::TempDir::new().unwrap();
        let session = Session::load(LocalStore::open(tmp.path()).unwrap()).unwrap();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[test]
    fn token_survives_restart() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = LocalStore::open(tmp.path()).unwrap();
        {
            let mut session = Session::load(store.clone()).unwrap();
            session.set_token("tok-abc".into()).unwrap();
        }
        let session = Session::load(store).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok-abc"));
    }

    #[test]
    fn clear_is_unconditional() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = LocalStore::open(tmp.path()).unwrap();
        let mut session = Session::load(store.clone()).unwrap();
        session.set_token("tok".into()).unwrap();
        session.clear().unwrap();
        assert!(!session.is_authenticated());

        // Clearing an already-empty session is fine too.
        session.clear().unwrap();
        assert!(Session::load(store).unwrap().token().is_none());
    }

    #[test]
    fn empty_persisted_token_counts_as_absent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = LocalStore::open(tmp.path()).unwrap();
        store.write(TOKEN_SLOT, "").unwrap();
        let session = Session::load(store).unwrap();
        assert!(!session.is_authenticated());
    }
}
