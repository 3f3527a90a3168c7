//! Domain Layer
//!
//! Contains entities, value objects, the session state machine and
//! repository traits.

pub mod entity;
pub mod repository;
pub mod state;
pub mod value_object;

// Re-exports
pub use entity::{identity::Identity, user_info::UserInfo};
pub use repository::{IdentityGateway, Navigator, SessionStore};
pub use state::{SessionEvent, SessionState};
