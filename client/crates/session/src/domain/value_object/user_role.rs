use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::value_object::permissions::Permissions;

/// Role carried by an HR account.
///
/// Wire form is upper case (`"ADMIN"`), matching the identity service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Employee,
    Manager,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Admin, UserRole::Employee, UserRole::Manager];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Admin => "ADMIN",
            Employee => "EMPLOYEE",
            Manager => "MANAGER",
        }
    }

    /// Path segment of the role-specific dashboard endpoint (`/roles/{segment}`)
    #[inline]
    pub const fn endpoint_segment(&self) -> &'static str {
        use UserRole::*;
        match self {
            Admin => "admin",
            Employee => "employee",
            Manager => "manager",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Whether this role may open the dashboard of `target`
    ///
    /// Admins may open every dashboard; everyone else only their own.
    #[inline]
    pub fn can_open_dashboard(&self, target: UserRole) -> bool {
        self.is_admin() || *self == target
    }

    /// Capability table mirrored from the identity service
    pub const fn permissions(&self) -> Permissions {
        use UserRole::*;
        match self {
            Admin => Permissions {
                can_access_admin: true,
                can_access_employee: true,
                can_access_manager: true,
                can_manage_users: true,
                can_manage_employees: true,
                can_manage_team: true,
            },
            Employee => Permissions {
                can_access_admin: false,
                can_access_employee: true,
                can_access_manager: false,
                can_manage_users: false,
                can_manage_employees: false,
                can_manage_team: false,
            },
            Manager => Permissions {
                can_access_admin: false,
                can_access_employee: true,
                can_access_manager: true,
                can_manage_users: false,
                can_manage_employees: true,
                can_manage_team: true,
            },
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error for an unrecognised role code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserRole::ALL
            .into_iter()
            .find(|role| {
                role.code().eq_ignore_ascii_case(s) || role.endpoint_segment().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_str() {
        assert_eq!("ADMIN".parse::<UserRole>(), Ok(UserRole::Admin));
        assert_eq!("employee".parse::<UserRole>(), Ok(UserRole::Employee));
        assert_eq!("Manager".parse::<UserRole>(), Ok(UserRole::Manager));
        assert!("SUPER_ADMIN".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_user_role_serde() {
        assert_eq!(serde_json::to_string(&UserRole::Manager).unwrap(), "\"MANAGER\"");
        let role: UserRole = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, UserRole::Admin);
        assert!(serde_json::from_str::<UserRole>("\"admin\"").is_err());
    }

    #[test]
    fn test_user_role_display() {
        assert_eq!(UserRole::Employee.to_string(), "EMPLOYEE");
    }

    #[test]
    fn test_dashboard_access() {
        assert!(UserRole::Admin.can_open_dashboard(UserRole::Manager));
        assert!(UserRole::Manager.can_open_dashboard(UserRole::Manager));
        assert!(!UserRole::Manager.can_open_dashboard(UserRole::Admin));
        assert!(!UserRole::Employee.can_open_dashboard(UserRole::Manager));
    }

    #[test]
    fn test_permission_table() {
        let admin = UserRole::Admin.permissions();
        assert!(admin.can_manage_users);

        let manager = UserRole::Manager.permissions();
        assert!(manager.can_manage_team && manager.can_manage_employees);
        assert!(!manager.can_access_admin);

        let employee = UserRole::Employee.permissions();
        assert!(employee.can_access_employee);
        assert!(!employee.can_manage_employees);
    }
}
