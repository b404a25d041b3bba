//! State management module.
//!
//! Contains the Catalog (shared, read-only), per-connection Sessions and the
//! SessionStore that binds them to connection ids.

mod catalog;
mod dashmap_ext;
mod session;
mod store;
mod uid;

pub use catalog::{Catalog, CatalogError, catalog_problems};
pub use session::{Cart, ConnectionId, History, Session};
pub use store::SessionStore;
pub use uid::UidGenerator;
