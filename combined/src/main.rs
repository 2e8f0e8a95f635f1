//! Session login server: web pages, migrations and user seeding in one binary.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth_service_lib::config::AuthServiceConfig;
use domain::UserType;
use web_lib::config::WebConfig;

#[derive(Parser)]
#[command(name = "session-auth")]
#[command(about = "Session-based login server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "WEB_HOST")]
        host: Option<String>,
        #[arg(long, env = "WEB_PORT")]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Create an active user
    Seed {
        #[arg(long)]
        account: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
        /// panel or dashboard
        #[arg(long, default_value = "panel", value_parser = parse_user_type)]
        user_type: UserType,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

impl From<MigrateAction> for auth_service_lib::MigrateAction {
    fn from(action: MigrateAction) -> Self {
        match action {
            MigrateAction::Up => Self::Up,
            MigrateAction::Down => Self::Down,
            MigrateAction::Status => Self::Status,
            MigrateAction::Fresh => Self::Fresh,
        }
    }
}

fn parse_user_type(s: &str) -> Result<UserType, String> {
    UserType::parse(s).ok_or_else(|| format!("unknown user type '{}'", s))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let auth_config = AuthServiceConfig::from_env();

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = WebConfig::from_env();
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            info!(backend = ?config.session.backend, "Starting session-auth");
            let auth = auth_service_lib::connect(&auth_config).await?;
            web_lib::run_server(config, auth).await?;
        }
        Commands::Migrate { action } => {
            auth_service_lib::run_migrations(action.into(), &auth_config).await?;
        }
        Commands::Seed {
            account,
            password,
            name,
            user_type,
        } => {
            auth_service_lib::seed(&auth_config, &account, &password, &name, user_type).await?;
        }
    }

    Ok(())
}
