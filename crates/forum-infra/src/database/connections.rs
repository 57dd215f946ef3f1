use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Connection pool settings for the primary store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Pool options. Statements are logged at debug so `RUST_LOG` can mute them.
pub(crate) fn connect_options(config: &DatabaseConfig) -> ConnectOptions {
    ConnectOptions::new(&config.url)
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug)
        .to_owned()
}

/// Open the connection pool.
///
/// # Example
/// ```ignore
/// let db = connect(&config).await?;
/// let uow = UnitOfWork::begin(&db).await?;
/// ```
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!("Initializing database connection pool...");

    let db = Database::connect(connect_options(config)).await?;
    tracing::info!(
        "Database connected (pool: {}-{})",
        config.min_connections,
        config.max_connections
    );

    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statements_are_logged_at_debug() {
        let opts = connect_options(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 4,
            min_connections: 2,
        });

        assert!(opts.get_sqlx_logging());
        assert_eq!(opts.get_sqlx_logging_level(), log::LevelFilter::Debug);
        assert_eq!(opts.get_max_connections(), Some(4));
        assert_eq!(opts.get_min_connections(), Some(2));
    }
}
