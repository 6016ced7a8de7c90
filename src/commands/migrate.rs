//! Migrate command - schema management without starting the server.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::open(&config).await?;

    match args.action {
        MigrateAction::Up => {
            db.migrate_up().await?;
            tracing::info!("Migrations applied");
        }
        MigrateAction::Down => {
            db.migrate_down().await?;
            tracing::info!("Rolled back the last migration");
        }
        MigrateAction::Status => {
            for state in db.migration_states().await? {
                let label = if state.applied { "applied" } else { "pending" };
                println!("{:<50} {}", state.name, label);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables and re-running every migration");
            db.reset().await?;
            tracing::info!("Fresh migrations completed");
        }
    }

    Ok(())
}
