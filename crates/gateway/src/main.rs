//! Account API gateway entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::AppResult;
use gateway_lib::cli::{Cli, Commands, MigrateArgs, ServeArgs};
use gateway_lib::config::GatewayConfig;
use user_service_lib::{run_migrations, MigrateAction};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match GatewayConfig::from_env() {
        Ok(config) => match cli.command {
            Commands::Serve(args) => serve(args, config).await,
            Commands::Migrate(args) => migrate(args, config).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

async fn serve(args: ServeArgs, mut config: GatewayConfig) -> AppResult<()> {
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    gateway_lib::run_server(config).await
}

async fn migrate(args: MigrateArgs, config: GatewayConfig) -> AppResult<()> {
    let action = MigrateAction::from(args.action);
    let status = run_migrations(&config.service, action).await?;

    if let MigrateAction::Status = action {
        println!("Migration Status:");
        println!("{:-<60}", "");
        for migration in status {
            let mark = if migration.applied { "applied" } else { "pending" };
            println!("  [{}] {}", mark, migration.name);
        }
    }

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
