//! Route Table
//!
//! Pages of the HR dashboard and the access policy of each.

/// Access policy of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display)]
pub enum RoutePolicy {
    /// Anonymous only; signed-in users are sent to the dashboard
    #[default]
    #[display("public")]
    Public,
    /// Signed-in only; anonymous users are sent to the login page
    #[display("protected")]
    Protected,
    /// Never renders; forwards to the dashboard or the login page
    #[display("entry")]
    Entry,
}

impl RoutePolicy {
    /// Policy of a guard declared with a `require_auth` flag
    #[inline]
    pub const fn from_require_auth(require_auth: bool) -> Self {
        if require_auth {
            RoutePolicy::Protected
        } else {
            RoutePolicy::Public
        }
    }

    #[inline]
    pub const fn requires_auth(&self) -> bool {
        matches!(self, RoutePolicy::Protected)
    }
}

/// Known pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Dashboard,
    Employees,
    Departments,
    Manager,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Home,
        Route::Login,
        Route::Dashboard,
        Route::Employees,
        Route::Departments,
        Route::Manager,
    ];

    pub const fn path(&self) -> &'static str {
        use Route::*;
        match self {
            Home => "/",
            Login => "/login",
            Dashboard => "/dashboard",
            Employees => "/employees",
            Departments => "/departments",
            Manager => "/manager",
        }
    }

    pub const fn policy(&self) -> RoutePolicy {
        use Route::*;
        match self {
            Home => RoutePolicy::Entry,
            Login => RoutePolicy::Public,
            Dashboard | Employees | Departments | Manager => RoutePolicy::Protected,
        }
    }

    /// Resolve a request path, ignoring query, fragment and trailing slash
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        let path = if path.is_empty() { "/" } else { path };

        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Policy for any path; unknown pages are protected
    pub fn policy_for(path: &str) -> RoutePolicy {
        Route::from_path(path)
            .map(|route| route.policy())
            .unwrap_or(RoutePolicy::Protected)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
