//! Seed command - loads default accounts and the catalog.

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::services::bootstrap;

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let report = bootstrap(&Persistence::new(db.handle())).await?;

    if report.is_noop() {
        println!("Nothing to seed: users and products already exist");
    } else {
        println!(
            "Seeded {} user(s) and {} product(s)",
            report.users_created, report.products_created
        );
    }

    Ok(())
}
