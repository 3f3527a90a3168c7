//! Infrastructure Layer
//!
//! Token storage, the HTTP identity client and navigation recording.

pub mod cookie_store;
pub mod http_identity;
pub mod memory_store;
pub mod navigator;

pub use cookie_store::CookieJarStore;
pub use http_identity::HttpIdentityClient;
pub use memory_store::InMemorySessionStore;
pub use navigator::HistoryNavigator;
