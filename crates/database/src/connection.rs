use crate::error::DbError;
use crate::schema::SchemaContext;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Executor;
use std::env;
use std::time::Duration;

/// Pool sizing and the connection URL.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    /// When `None`, `DATABASE_URL` is read from the environment.
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

/// Establishes a connection pool to the PostgreSQL database.
///
/// Every pooled connection gets a `search_path` that puts the API schema's
/// compatibility views ahead of the internal tables.
pub async fn connect(settings: &PoolSettings, ctx: &SchemaContext) -> Result<PgPool, DbError> {
    let database_url = database_url(settings)?;
    let pool = pool_options(settings, ctx).connect(&database_url).await?;
    tracing::info!(
        max_connections = settings.max_connections,
        api_schema = ctx.api_schema(),
        "Database pool connected."
    );
    Ok(pool)
}

/// Like [`connect`], but no connection is opened until the pool is first used.
pub fn connect_lazy(settings: &PoolSettings, ctx: &SchemaContext) -> Result<PgPool, DbError> {
    let database_url = database_url(settings)?;
    Ok(pool_options(settings, ctx).connect_lazy(&database_url)?)
}

fn database_url(settings: &PoolSettings) -> Result<String, DbError> {
    match &settings.url {
        Some(url) => Ok(url.clone()),
        None => env::var("DATABASE_URL")
            .map_err(|_e| DbError::ConnectionConfigError("DATABASE_URL must be set.".to_string())),
    }
}

fn pool_options(settings: &PoolSettings, ctx: &SchemaContext) -> PgPoolOptions {
    let search_path = ctx.api_search_path();
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .after_connect(move |conn, _meta| {
            let search_path = search_path.clone();
            Box::pin(async move {
                conn.execute(search_path.as_str()).await?;
                Ok(())
            })
        })
}
