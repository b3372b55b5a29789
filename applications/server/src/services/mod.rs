/// Server services
pub mod auth;
pub mod import;

pub use auth::AuthService;
pub use import::{import_catalog, CatalogFile, ImportSummary};
