//! Shared Kernel - Vocabulary shared by every console crate
//!
//! This crate contains the "smallest core" used across the client:
//! - Common error types and result aliases
//! - Typed numeric IDs for backend records
//!
//! **Design Principle**: Only include things that have the same meaning
//! in every crate of the workspace.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
