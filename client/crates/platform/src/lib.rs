//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations for the console client:
//! - Cookie jar persistence (session token storage)
//! - HTTP client construction and bearer credentials
//! - Retry with exponential backoff for transient failures
//! - Hashing utilities (log-safe token fingerprints)

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod retry;
