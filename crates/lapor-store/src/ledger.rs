//! Write-through notification ledger.

use chrono::Utc;
use lapor_core::{Notification, NotificationStatus};
use tracing::warn;

use crate::StoreError;
use crate::slot::LocalStore;

/// Slot key holding the serialized notification list.
const LEDGER_SLOT: &str = "notifications";

/// Locally persisted list of transient admin events, newest first.
///
/// Seeded from the durable slot at load, falling back to the built-in
/// default set when the slot is empty, absent, or unreadable. Every mutation
/// rewrites the full list to the slot before returning — write-through, no
/// batching. Nothing here ever round-trips to the remote store.
#[derive(Debug)]
pub struct NotificationLedger {
    notifications: Vec<Notification>,
    store: LocalStore,
}

impl NotificationLedger {
    pub fn load(store: LocalStore) -> Result<Self, StoreError> {
        let notifications = match store.read(LEDGER_SLOT)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(list) => list,
                Err(err) => {
                    warn!(%err, "notification slot unreadable, reseeding defaults");
                    default_notifications()
                }
            },
            None => default_notifications(),
        };
        Ok(Self {
            notifications,
            store,
        })
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Insert at the head and persist.
    pub fn add(&mut self, notification: Notification) -> Result<(), StoreError> {
        self.notifications.insert(0, notification);
        self.persist()
    }

    /// Remove one entry by id and persist. Dismissing an id that is not in
    /// the ledger is a no-op, not an error.
    pub fn dismiss(&mut self, id: i64) -> Result<(), StoreError> {
        self.notifications.retain(|notification| notification.id != id);
        self.persist()
    }

    /// Drop everything and persist the empty list.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.notifications.clear();
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.notifications)?;
        self.store.write(LEDGER_SLOT, &raw)
    }
}

/// Seed entries shown before any real event has fired.
fn default_notifications() -> Vec<Notification> {
    let now = Utc::now();
    vec![
        Notification {
            id: 1,
            title: "Selamat Datang".into(),
            message: "Panel admin desa siap digunakan.".into(),
            status: NotificationStatus::Done,
            time: now,
        },
        Notification {
            id: 2,
            title: "Info".into(),
            message: "Laporan baru dari warga akan muncul di sini.".into(),
            status: NotificationStatus::InProgress,
            time: now,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(id: i64, title: &str) -> Notification {
        Notification {
            id,
            title: title.into(),
            message: "m".into(),
            status: NotificationStatus::InProgress,
            time: Utc::now(),
        }
    }

    #[test]
    fn empty_slot_seeds_the_default_set() {
        let tmp = tempfile::TempDir::new().unwrap();
        let ledger = NotificationLedger::load(LocalStore::open(tmp.path()).unwrap()).unwrap();
        assert!(!ledger.is_empty());
        assert_eq!(ledger.notifications()[0].title, "Selamat Datang");
    }

    #[test]
    fn unreadable_slot_reseeds_the_default_set() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = LocalStore::open(tmp.path()).unwrap();
        store.write(LEDGER_SLOT, "{not json").unwrap();
        let ledger = NotificationLedger::load(store).unwrap();
        assert_eq!(ledger.len(), default_notifications().len());
    }

    #[test]
    fn add_inserts_at_the_head_and_writes_through() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = LocalStore::open(tmp.path()).unwrap();
        let mut ledger = NotificationLedger::load(store.clone()).unwrap();
        ledger.add(notification(100, "first")).unwrap();
        ledger.add(notification(101, "second")).unwrap();
        assert_eq!(ledger.notifications()[0].id, 101);

        // A fresh load sees exactly what the mutating instance saw.
        let reloaded = NotificationLedger::load(store).unwrap();
        assert_eq!(reloaded.notifications(), ledger.notifications());
    }

    #[test]
    fn add_then_dismiss_restores_prior_content_and_order() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut ledger = NotificationLedger::load(LocalStore::open(tmp.path()).unwrap()).unwrap();
        let before = ledger.notifications().to_vec();

        ledger.add(notification(999, "transient")).unwrap();
        ledger.dismiss(999).unwrap();
        assert_eq!(ledger.notifications(), before);
    }

    #[test]
    fn dismissing_an_unknown_id_changes_nothing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut ledger = NotificationLedger::load(LocalStore::open(tmp.path()).unwrap()).unwrap();
        let before = ledger.notifications().to_vec();
        ledger.dismiss(424242).unwrap();
        assert_eq!(ledger.notifications(), before);
    }

    #[test]
    fn clear_persists_the_empty_list() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = LocalStore::open(tmp.path()).unwrap();
        let mut ledger = NotificationLedger::load(store.clone()).unwrap();
        ledger.clear().unwrap();
        assert!(ledger.is_empty());

        // The cleared state is durable: no default reseed on reload.
        let reloaded = NotificationLedger::load(store).unwrap();
        assert!(reloaded.is_empty());
    }
}
