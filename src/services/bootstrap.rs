//! Idempotent first-run data: default accounts and the grocery catalog.
//!
//! Each part only runs against an empty table, so invoking the bootstrap on
//! every start (or through `grocify seed`) never duplicates rows.

use crate::config::{
    SEED_ADMIN_PASSWORD, SEED_ADMIN_USERNAME, SEED_USER_PASSWORD, SEED_USER_USERNAME,
};
use crate::domain::{NewProduct, Password, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Catalog bundled into the binary
const CATALOG_JSON: &str = include_str!("../../data/catalog.json");

/// What a bootstrap run created
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub users_created: usize,
    pub products_created: usize,
}

impl BootstrapReport {
    pub fn is_noop(&self) -> bool {
        self.users_created == 0 && self.products_created == 0
    }
}

/// Parse the bundled catalog.
pub fn default_catalog() -> AppResult<Vec<NewProduct>> {
    serde_json::from_str(CATALOG_JSON)
        .map_err(|e| AppError::internal(format!("Bundled catalog is invalid: {}", e)))
}

/// Seed default users and products into empty tables.
pub async fn bootstrap<U: UnitOfWork + ?Sized>(uow: &U) -> AppResult<BootstrapReport> {
    let mut report = BootstrapReport::default();

    if uow.users().count().await? == 0 {
        for (username, password, role) in [
            (SEED_ADMIN_USERNAME, SEED_ADMIN_PASSWORD, UserRole::Admin),
            (SEED_USER_USERNAME, SEED_USER_PASSWORD, UserRole::User),
        ] {
            let hash = Password::new(password)?.into_string();
            uow.users().create(username.to_string(), hash, role).await?;
            report.users_created += 1;
        }
        tracing::info!(count = report.users_created, "Seeded default users");
    }

    if uow.products().count().await? == 0 {
        // One batch, so a failed run leaves the table empty and the next run retries
        let written = uow.products().create_many(default_catalog()?).await?;
        report.products_created = written as usize;
        tracing::info!(count = report.products_created, "Seeded product catalog");
    }

    Ok(report)
}
