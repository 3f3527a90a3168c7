use std::path::PathBuf;

use clap::{Parser, Subcommand};
use session::domain::value_object::user_role::UserRole;

#[derive(Parser)]
#[command(name = "hr-console")]
#[command(about = "HR dashboard session client")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Identity service base URL (overrides HR_API_BASE_URL)
    #[arg(long, global = true)]
    pub(crate) api: Option<String>,

    /// Cookie jar file (overrides HR_COOKIE_JAR)
    #[arg(long, global = true)]
    pub(crate) jar: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub(crate) json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "HR_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "HR_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },

    /// Forget the stored session token
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Open a page and report what the route guard decides
    Visit {
        /// Page path, e.g. /dashboard
        path: String,
    },

    /// Show the capability flags of the current role
    Permissions,

    /// Open a role dashboard (admin, employee, manager)
    Role { role: UserRole },

    /// Call the protected probe endpoint
    Protected,
}
