//! Application Layer
//!
//! Session lifecycle and configuration.

pub mod config;
pub mod session_context;

// Re-exports
pub use config::SessionConfig;
pub use session_context::SessionContext;
