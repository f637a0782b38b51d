//! Remote resource client and portal state composition.

pub mod http;
pub mod portal;

pub use http::{ApiClient, ApiError};
pub use portal::{Portal, PortalError, Refresh};
