//! Async PostgreSQL connection pool for the Diesel adapters.
//!
//! Built on `diesel-async`'s native async connections behind a `bb8` pool;
//! no `spawn_blocking` is involved. Checkout failures are mapped by each
//! repository to its port's connection error.

use std::time::Duration;

use diesel_async::pooled_connection::bb8::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;

/// Shared async connection pool.
pub type PgPool = Pool<AsyncPgConnection>;

/// Failure to construct the pool at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to build connection pool: {message}")]
pub struct PoolBuildError {
    /// Driver-provided description.
    pub message: String,
}

/// Build a connection pool against the given database URL.
pub async fn build_pool(database_url: &str, max_size: u32) -> Result<PgPool, PoolBuildError> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .connection_timeout(Duration::from_secs(30))
        .build(manager)
        .await
        .map_err(|err| PoolBuildError {
            message: err.to_string(),
        })
}
