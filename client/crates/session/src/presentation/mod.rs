//! Presentation Layer
//!
//! Page routes and the guard that gates them on session state.

pub mod route_guard;
pub mod routes;

pub use route_guard::{GuardDecision, GuardView, RouteGuard};
pub use routes::{Route, RoutePolicy};
