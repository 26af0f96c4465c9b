//! Common test infrastructure for database integration tests.

use std::sync::Arc;
use tally_config::DatabaseConfig;
use tally_repository::DatabasePool;
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;

/// Test database container wrapper.
///
/// Manages a Postgres testcontainer lifecycle and provides a database pool.
pub struct TestDatabase {
    _container: ContainerAsync<Postgres>,
    pool: Arc<DatabasePool>,
}

impl TestDatabase {
    /// Creates a new test database with a fresh Postgres container.
    ///
    /// Runs migrations automatically after container startup.
    pub async fn new() -> Self {
        let container = Postgres::default()
            .with_env_var("POSTGRES_USER", "tally")
            .with_env_var("POSTGRES_PASSWORD", "tally")
            .with_env_var("POSTGRES_DB", "tally_test")
            .start()
            .await
            .expect("Failed to start Postgres container");

        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get Postgres port");

        let config = DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port,
            username: "tally".to_string(),
            password: "tally".to_string(),
            database: "tally_test".to_string(),
            min_connections: 1,
            max_connections: 5,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        };

        // Wait for Postgres to be ready and connect
        let pool = Self::connect_with_retry(&config, 30).await;

        pool.run_migrations()
            .await
            .expect("Failed to run migrations");

        Self {
            _container: container,
            pool: Arc::new(pool),
        }
    }

    /// Returns a reference to the database pool.
    pub fn pool(&self) -> Arc<DatabasePool> {
        Arc::clone(&self.pool)
    }

    /// Connects to the database with retry logic.
    async fn connect_with_retry(config: &DatabaseConfig, max_attempts: u32) -> DatabasePool {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match DatabasePool::connect(config).await {
                Ok(pool) => return pool,
                Err(e) => {
                    if attempts >= max_attempts {
                        panic!(
                            "Failed to connect to database after {} attempts: {}",
                            max_attempts, e
                        );
                    }
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                }
            }
        }
    }
}
