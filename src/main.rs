use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use istc_admin::api::config::BackendConfig;
use istc_admin::auth::file::{FileCredentialStore, FileSessionProvider};
use istc_admin::auth::gate::{require_admin, require_authenticated};
use istc_admin::auth::signout::CredentialStore;
use istc_admin::dashboard::{DashboardStats, fetch_dashboard};
use istc_admin::{AccessError, BackendClient, ClientError, SessionReader, SignOutCoordinator};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("sign-out failed: {0}")]
    SignOut(#[from] istc_admin::auth::session::SessionError),
    #[error("credential cache error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "istc-admin", about = "ISTC admin dashboard CLI")]
struct Cli {
    #[arg(long, env = "ISTC_SESSION_FILE", default_value = ".istc/session.json")]
    session_file: PathBuf,

    #[arg(long, env = "ISTC_TOKEN_FILE", default_value = ".istc/token")]
    token_file: PathBuf,

    #[arg(long, env = "ISTC_SIGN_OUT_REDIRECT", default_value = "/login")]
    sign_out_redirect: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the signed-in principal.
    Whoami,
    /// Print the bearer token and cache it locally.
    Token,
    /// Dashboard stats cards (admin only).
    Stats,
    /// List users (admin only).
    Users,
    /// List testimonials (admin only).
    Testimonials,
    /// List contact submissions (admin only).
    Contacts,
    /// Clear the cached token and end the session.
    SignOut {
        #[arg(long, default_value_t = false)]
        redirect: bool,
        /// Redirect target for this sign-out; implies `--redirect`.
        #[arg(long)]
        to: Option<String>,
    },
}

struct App {
    session: SessionReader,
    provider: Arc<FileSessionProvider>,
    store: Arc<FileCredentialStore>,
    sign_out_redirect: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsOutput {
    #[serde(flatten)]
    stats: DashboardStats,
    degraded: Vec<&'static str>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let provider = Arc::new(FileSessionProvider::new(cli.session_file));
    let app = App {
        session: SessionReader::new(provider.clone()),
        provider,
        store: Arc::new(FileCredentialStore::new(cli.token_file)),
        sign_out_redirect: cli.sign_out_redirect,
    };

    match run(&app, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Access(e)) => {
            eprintln!("{e}; go to {}", e.kind.redirect_path());
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(app: &App, command: Command) -> Result<(), CliError> {
    match command {
        Command::Whoami => {
            let principal = require_authenticated(&app.session).await?;
            print_json(&serde_json::json!({
                "id": principal.id(),
                "email": principal.email(),
                "name": principal.name(),
                "role": principal.role(),
            }))
        }
        Command::Token => {
            let principal = require_authenticated(&app.session).await?;
            app.store.store(principal.access_token())?;
            println!("{}", principal.access_token());
            Ok(())
        }
        Command::Stats => {
            let client = admin_client(app).await?;
            let data = fetch_dashboard(&client).await;
            let output = StatsOutput { stats: DashboardStats::from_data(&data), degraded: data.degraded };
            print_json(&output)
        }
        Command::Users => {
            let client = admin_client(app).await?;
            print_json(&client.list_users().await?)
        }
        Command::Testimonials => {
            let client = admin_client(app).await?;
            print_json(&client.list_testimonials().await?)
        }
        Command::Contacts => {
            let client = admin_client(app).await?;
            print_json(&client.list_contacts().await?)
        }
        Command::SignOut { redirect, to } => {
            let coordinator = SignOutCoordinator::new(app.store.clone(), app.provider.clone())
                .with_default_redirect(app.sign_out_redirect.clone());
            let redirect = redirect || to.is_some();
            coordinator.sign_out_to(to.as_deref(), redirect).await?;
            if redirect {
                let target = to.as_deref().unwrap_or(coordinator.default_redirect());
                println!("signed out; continue at {target}");
            } else {
                println!("signed out");
            }
            Ok(())
        }
    }
}

async fn admin_client(app: &App) -> Result<BackendClient, CliError> {
    require_admin(&app.session).await?;
    let config = BackendConfig::from_env();
    tracing::debug!(origin = %config.origin, "using backend");
    Ok(BackendClient::new(config, app.session.clone())?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
