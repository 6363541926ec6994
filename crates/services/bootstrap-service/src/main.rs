//! Bootstrap Service - seeds a translation server database.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bootstrap_service_lib::config::BootstrapServiceConfig;
use bootstrap_service_lib::MigrateAction;
use common::AppResult;

#[derive(Parser)]
#[command(name = "bootstrap-service")]
#[command(about = "Create the default records of a translation server")]
struct Cli {
    /// Log every created and skipped record
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Migrate the database and create missing default records
    Seed {
        /// Do not create the terminology and tutorial projects
        #[arg(long)]
        no_projects: bool,
        /// JSON language catalog to import instead of the builtin one
        #[arg(long, value_name = "PATH")]
        catalog: Option<PathBuf>,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = BootstrapServiceConfig::from_env();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "debug,sqlx=warn".to_string()
    } else {
        config.service.log_level.clone()
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(service = %config.service.service_name, "Starting");

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = e.code(), "{}", e);
            if e.is_transient() {
                error!("The database was unreachable; run the command again once it is up");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, mut config: BootstrapServiceConfig) -> AppResult<()> {
    match command {
        Commands::Seed {
            no_projects,
            catalog,
        } => {
            if no_projects {
                config.create_projects = false;
            }
            if catalog.is_some() {
                config.language_catalog = catalog;
            }

            let report = bootstrap_service_lib::run_seed(&config).await?;
            info!(
                users = report.users.created,
                directories = report.directories.created,
                languages = report.languages.created + report.language_import.created,
                projects = report.projects.created,
                permissions = report.permissions.created,
                permission_sets = report.permission_sets.created,
                "Created default records"
            );
            for skipped in &report.language_import.skipped {
                info!(code = %skipped.code, reason = %skipped.reason, "Language skipped");
            }
        }
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            bootstrap_service_lib::run_migrations(&config, migrate_action).await?;
        }
    }

    Ok(())
}
