//! Kid-O Service Library
//!
//! Storage, accounts, child intake and godparent messaging for Kid-O.
//! The binary only drives migrations and health checks; callers embed the
//! services through [`AppServices`].

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing::info;

use crate::config::KidoServiceConfig;
use crate::infra::Database;
use crate::repository::{ChildStore, GodparentStore, GuardianStore, MessageStore, UserStore};
use crate::service::{
    AccountManager, AccountService, ChildManager, ChildService, MessageManager, MessageService,
};

/// Services wired over one database pool.
#[derive(Clone)]
pub struct AppServices {
    pub accounts: Arc<dyn AccountService>,
    pub children: Arc<dyn ChildService>,
    pub messages: Arc<dyn MessageService>,
}

impl AppServices {
    pub fn new(db: &Database) -> Self {
        let conn = db.get_connection();

        let users = Arc::new(UserStore::new(conn.clone()));
        let children = Arc::new(ChildStore::new(conn.clone()));
        let guardians = Arc::new(GuardianStore::new(conn.clone()));
        let godparents = Arc::new(GodparentStore::new(conn.clone()));
        let messages = Arc::new(MessageStore::new(conn));

        Self {
            accounts: Arc::new(AccountManager::new(users)),
            children: Arc::new(ChildManager::new(children, guardians, godparents)),
            messages: Arc::new(MessageManager::new(messages)),
        }
    }

    /// Connect with the environment configuration, migrate, and wire services.
    pub async fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = KidoServiceConfig::from_env();
        let db = Database::connect(&config.database).await?;
        Ok(Self::new(&db))
    }
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = KidoServiceConfig::from_env();
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
            for state in db.migration_status().await? {
                let marker = if state.applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, state.name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Check that the configured database answers.
pub async fn ping() -> Result<(), Box<dyn std::error::Error>> {
    let config = KidoServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;
    db.ping().await?;
    info!(service = %config.service.service_name, "Database reachable");
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
