//! Entity Module

pub mod access;
pub mod credentials;
pub mod identity;
pub mod user_info;
