//! Permissions Value Object
//!
//! Capability flags reported by `GET /roles/check-permissions`.

use serde::{Deserialize, Serialize};

/// Role capabilities
///
/// Missing flags in a response default to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Permissions {
    pub can_access_admin: bool,
    pub can_access_employee: bool,
    pub can_access_manager: bool,
    pub can_manage_users: bool,
    pub can_manage_employees: bool,
    pub can_manage_team: bool,
}

impl Permissions {
    /// Names of the granted capabilities, in wire form
    pub fn granted(&self) -> Vec<&'static str> {
        [
            (self.can_access_admin, "canAccessAdmin"),
            (self.can_access_employee, "canAccessEmployee"),
            (self.can_access_manager, "canAccessManager"),
            (self.can_manage_users, "canManageUsers"),
            (self.can_manage_employees, "canManageEmployees"),
            (self.can_manage_team, "canManageTeam"),
        ]
        .into_iter()
        .filter_map(|(granted, name)| granted.then_some(name))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial() {
        let perms: Permissions =
            serde_json::from_str(r#"{"canAccessEmployee":true,"canManageTeam":true}"#).unwrap();
        assert!(perms.can_access_employee);
        assert!(perms.can_manage_team);
        assert!(!perms.can_access_admin);
    }

    #[test]
    fn test_granted() {
        let perms = Permissions {
            can_access_employee: true,
            can_manage_team: true,
            ..Default::default()
        };
        assert_eq!(perms.granted(), vec!["canAccessEmployee", "canManageTeam"]);
    }
}
