use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{error, info};

use crate::config::DatabaseConfig;

/// Open the shared connection pool, retrying a fixed number of times before
/// giving up. Exhausting the attempts is fatal to startup.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let mut attempt = 0;

    loop {
        attempt += 1;
        info!(attempt, "trying to connect to the database");

        match options(config).connect(&config.url).await {
            Ok(pool) => {
                info!("the database is connected");
                return Ok(pool);
            }
            Err(err) => {
                error!(error = %err, "database connection failed");
                if attempt >= config.connect_attempts {
                    return Err(err);
                }
            }
        }

        tokio::time::sleep(config.connect_retry_delay).await;
    }
}

/// Pool handle that defers the first connection until it is needed. Used by
/// router-level tests that never reach the database.
pub fn connect_lazy(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    options(config).connect_lazy(&config.url)
}

fn options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .max_lifetime(config.max_lifetime)
        .acquire_timeout(config.acquire_timeout)
}
