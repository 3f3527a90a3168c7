//! Common ID Types
//!
//! Type-safe numeric ID wrappers for records issued by the HR backend.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// Generic typed ID wrapper over the backend's numeric primary keys
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
///
/// let id = UserId::new(42);
/// assert_eq!(id.value(), 42);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub const fn new(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub const fn value(&self) -> i64 {
        self.value
    }
}

// Manual impls so `T` itself doesn't need the traits.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::new)
    }
}

/// Marker types for typed IDs
pub mod markers {
    /// Backend user account
    pub struct User;
}

#[cfg(test)]
mod tests {
    use super::*;

    type UserId = Id<markers::User>;

    #[test]
    fn test_json_is_a_bare_number() {
        let id: UserId = serde_json::from_str("17").unwrap();
        assert_eq!(id, UserId::new(17));
        assert_eq!(serde_json::to_string(&id).unwrap(), "17");
    }

    #[test]
    fn test_display() {
        assert_eq!(UserId::new(3).to_string(), "3");
        assert_eq!(format!("{:?}", UserId::new(3)), "Id(3)");
    }
}
