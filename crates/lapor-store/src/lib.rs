//! Durable local storage: keyed string slots, the admin session, and the
//! notification ledger.

mod error;
pub use error::StoreError;

mod slot;
pub use slot::LocalStore;

mod session;
pub use session::Session;

mod ledger;
pub use ledger::NotificationLedger;
