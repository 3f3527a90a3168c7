use kernel::id::{Id, markers};

/// Numeric ID of a backend user account
pub type UserId = Id<markers::User>;
