//! hr-console - HR dashboard session client
//!
//! Command-line host for the session subsystem. Every invocation mounts a
//! session from the cookie jar, runs one command, and exits.
//!
//! # Examples
//!
//! ```bash
//! hr-console login --email admin@company.com --password secret
//! hr-console visit /employees
//! hr-console role manager
//! hr-console logout
//! ```
//!
//! Uses `anyhow` for startup errors; session errors are shown through
//! `kernel::error::AppError`.

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use kernel::error::app_error::AppError;
use serde_json::json;
use session::domain::entity::credentials::RegisterInput;
use session::{
    CookieJarStore, GuardView, HistoryNavigator, HttpIdentityClient, RouteGuard, SessionConfig,
    SessionContext, SessionError,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

type Context = SessionContext<CookieJarStore, HttpIdentityClient<CookieJarStore>, HistoryNavigator>;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hr_console=info,session=info,platform=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = SessionConfig::from_env()?;
    if let Some(api) = cli.api {
        config.api_base_url = api.trim_end_matches('/').to_string();
    }
    let jar = cli
        .jar
        .or_else(|| config.cookie_jar_path.clone())
        .unwrap_or_else(|| PathBuf::from(".hr-console/cookies.jar"));
    config.cookie_jar_path = Some(jar.clone());
    let config = Arc::new(config);

    tracing::debug!(api = %config.api_base_url, jar = %jar.display(), "Session configuration loaded");

    let store = Arc::new(CookieJarStore::new(jar, config.cookie.clone()));
    let gateway = Arc::new(HttpIdentityClient::new(&config, store.clone())?);
    let navigator = Arc::new(HistoryNavigator::new());
    let ctx = SessionContext::new(store, gateway, navigator.clone(), config.clone());

    ctx.mount().await;

    let output = run(&ctx, &navigator, &config, cli.command).await;

    match output {
        Ok(Output { text, value }) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}", text);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let app_err: AppError = err.to_app_error();
            if cli.json {
                let body = json!({
                    "error": {
                        "kind": app_err.kind().as_str(),
                        "message": app_err.message(),
                        "action": app_err.action(),
                    }
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                eprintln!("{}", app_err);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Command result in both text and JSON form
struct Output {
    text: String,
    value: serde_json::Value,
}

async fn run(
    ctx: &Context,
    navigator: &Arc<HistoryNavigator>,
    config: &SessionConfig,
    command: Commands,
) -> Result<Output, SessionError> {
    match command {
        Commands::Login { email, password } => {
            let identity = ctx.login(&email, &password).await?;
            Ok(Output {
                text: format!("Signed in as {} ({})", identity.display_name(), identity.role),
                value: json!({ "email": identity.email.as_str(), "role": identity.role }),
            })
        }

        Commands::Register {
            email,
            password,
            first_name,
            last_name,
        } => {
            let input = RegisterInput::new(email, password, first_name, last_name)?;
            let identity = ctx.register(input).await?;
            Ok(Output {
                text: format!("Registered and signed in as {}", identity.email),
                value: json!({ "email": identity.email.as_str(), "role": identity.role }),
            })
        }

        Commands::Logout => {
            ctx.logout()?;
            Ok(Output {
                text: "Signed out".to_string(),
                value: json!({ "signedIn": false }),
            })
        }

        Commands::Whoami => match ctx.identity() {
            Some(identity) => Ok(Output {
                text: format!(
                    "{} <{}> {}",
                    identity.display_name(),
                    identity.email,
                    identity.role
                ),
                value: json!({
                    "id": identity.user_id.map(|id| id.value()),
                    "email": identity.email.as_str(),
                    "firstName": identity.first_name,
                    "lastName": identity.last_name,
                    "role": identity.role,
                    "permissions": identity.permissions(),
                }),
            }),
            None => Err(SessionError::Unauthorized),
        },

        Commands::Visit { path } => {
            let guard = RouteGuard::for_path(&path, navigator.clone(), config);
            let view = guard.resolve(&mut ctx.subscribe()).await;
            let policy = guard.policy();
            let (text, mut value) = match &view {
                GuardView::Render => (
                    format!("{} renders", path),
                    json!({ "path": path, "view": "render" }),
                ),
                GuardView::Redirecting { to } => (
                    format!("{} redirects to {}", path, to),
                    json!({ "path": path, "view": "redirect", "to": to }),
                ),
                GuardView::Loading => (
                    format!("{} is still loading", path),
                    json!({ "path": path, "view": "loading" }),
                ),
            };
            value["policy"] = json!(policy.to_string());
            value["requiresAuth"] = json!(policy.requires_auth());
            Ok(Output {
                text: format!("{} ({} page)", text, policy),
                value,
            })
        }

        Commands::Permissions => {
            let report = ctx.check_permissions().await?;
            Ok(Output {
                text: format!(
                    "{}: {}",
                    report.role,
                    report.permissions.granted().join(", ")
                ),
                value: json!({ "role": report.role, "permissions": report.permissions }),
            })
        }

        Commands::Role { role } => {
            if let Some(identity) = ctx.identity()
                && !identity.role.can_open_dashboard(role)
            {
                tracing::warn!(
                    role = %identity.role,
                    requested = %role,
                    "Dashboard is outside this role, the service will likely refuse"
                );
            }
            let dashboard = ctx.role_dashboard(role).await?;
            Ok(Output {
                text: format!("{} [{}]", dashboard.message, dashboard.permissions.join(", ")),
                value: json!({
                    "message": dashboard.message,
                    "user": dashboard.user,
                    "role": dashboard.role,
                    "permissions": dashboard.permissions,
                }),
            })
        }

        Commands::Protected => {
            let message = ctx.protected_message().await?;
            Ok(Output {
                value: json!({ "message": message }),
                text: message,
            })
        }
    }
}
