pub mod models;
pub mod repos;

pub use sqlx::postgres::PgPool;

use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

/// Connect to the hosted PostgreSQL store.
///
/// The pool connects lazily: the API keeps serving pages while the store is
/// unreachable and surfaces the failure per request instead.
pub fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .connect_lazy(database_url)?;
    tracing::debug!("PostgreSQL pool configured");
    Ok(pool)
}
