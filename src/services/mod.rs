pub mod account_service;
pub mod catalog_service;
pub mod session;
pub mod validation;

pub use account_service::AccountService;
pub use catalog_service::CatalogService;
pub use session::{AuthContext, FileStore, MemoryStore, Session, SessionFlags, SessionStore};
