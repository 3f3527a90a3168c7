//! Access Entities
//!
//! Role and capability reports from the `/roles` endpoints.

use serde::Deserialize;

use crate::domain::value_object::{permissions::Permissions, user_role::UserRole};

/// `GET /roles/check-permissions` response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PermissionReport {
    pub role: UserRole,
    #[serde(default)]
    pub permissions: Permissions,
}

/// `GET /roles/{admin|employee|manager}` response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleDashboard {
    pub message: String,
    /// Email of the caller as echoed by the backend
    pub user: String,
    pub role: UserRole,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_report() {
        let json = r#"{"role":"MANAGER","permissions":{"canAccessManager":true,"canManageTeam":true}}"#;
        let report: PermissionReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.role, UserRole::Manager);
        assert!(report.permissions.can_access_manager);
        assert!(!report.permissions.can_manage_users);
    }

    #[test]
    fn test_role_dashboard() {
        let json = r#"{"message":"Welcome to the manager dashboard","user":"m@x.com","role":"MANAGER","permissions":["manage_team","view_reports"]}"#;
        let dashboard: RoleDashboard = serde_json::from_str(json).unwrap();
        assert_eq!(dashboard.user, "m@x.com");
        assert_eq!(dashboard.permissions.len(), 2);
    }
}
