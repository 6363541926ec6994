//! Bootstrap Service Library
//!
//! Seeds a translation server database with the records every installation
//! needs: service users, the directory tree root, the templates and English
//! languages, directory permissions and their default grants, the default
//! projects, and the default language list.

pub mod catalog;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing::info;

use common::AppResult;

use crate::catalog::{BuiltinCatalog, JsonCatalog, LanguageCatalog};
use crate::config::BootstrapServiceConfig;
use crate::infra::Database;
use crate::repository::BootstrapStore;
use crate::service::{SeedOptions, SeedReport, Seeder};

/// Migrate the configured database and seed it.
pub async fn run_seed(config: &BootstrapServiceConfig) -> AppResult<SeedReport> {
    let catalog = load_catalog(config)?;

    let db = Database::connect(&config.database).await?;
    let repo = Arc::new(BootstrapStore::new(db.get_connection()));
    let seeder = Seeder::new(repo, catalog);

    seeder
        .seed(SeedOptions {
            create_projects: config.create_projects,
        })
        .await
}

/// Language catalog named by the configuration, the builtin one otherwise.
pub fn load_catalog(config: &BootstrapServiceConfig) -> AppResult<Arc<dyn LanguageCatalog>> {
    match &config.language_catalog {
        Some(path) => {
            let catalog = JsonCatalog::from_path(path)?;
            info!(path = %path.display(), languages = catalog.len(), "Loaded language catalog");
            Ok(Arc::new(catalog))
        }
        None => Ok(Arc::new(BuiltinCatalog::new())),
    }
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &BootstrapServiceConfig,
    action: MigrateAction,
) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
