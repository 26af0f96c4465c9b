//! Dependency injection module using Shaku.

use deadpool_redis::Runtime;
use std::sync::Arc;
use tally_config::RedisConfig;
use tally_core::{module, TallyError, TallyResult};
use tally_repository::{DatabasePool, DatabasePoolParameters, PgTodoRepository};
use tally_service::{RedisCacheService, RedisCacheServiceParameters, TodoServiceComponent};

// Single-process deployment module wiring the database pool, repository,
// cache, and todo service.
module! {
    pub AppModule {
        components = [
            DatabasePool,
            PgTodoRepository,
            RedisCacheService,
            TodoServiceComponent,
        ],
        providers = [],
    }
}

/// Builds the application module around an established database pool.
///
/// The Redis pool is created here when caching is enabled; with Redis
/// disabled the cache service runs in its no-op mode and reads degrade to
/// store-only.
pub fn build_app_module(
    db_pool: &DatabasePool,
    redis_config: &RedisConfig,
) -> TallyResult<Arc<AppModule>> {
    let cache_pool = if redis_config.enabled {
        let redis_cfg = deadpool_redis::Config::from_url(redis_config.url());
        let pool = redis_cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| TallyError::Cache(format!("Failed to create Redis pool: {}", e)))?;
        Some(Arc::new(pool))
    } else {
        None
    };

    let module = AppModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.inner().clone(),
        })
        .with_component_parameters::<RedisCacheService>(RedisCacheServiceParameters {
            pool: cache_pool,
        })
        .build();

    Ok(Arc::new(module))
}
