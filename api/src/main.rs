use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;

use ms_api::{create_app, AppState};
use ms_core::services::{AccountService, AccountServiceConfig};
use ms_infra::cache::{RedisClient, RedisSessionStore};
use ms_infra::database::{DatabasePool, MySqlUserRepository};
use ms_infra::services::BcryptAuthenticationService;
use ms_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.logging.level.as_str()));
    info!("Starting MySite API server ({})", config.environment);

    let database = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to MySQL")?;
    database
        .ensure_schema()
        .await
        .context("failed to apply the users schema")?;
    info!("Database ready: {}", database.statistics());

    let redis = RedisClient::new(config.cache.clone())
        .await
        .context("failed to connect to Redis")?;

    let users = Arc::new(MySqlUserRepository::new(database.pool().clone()));
    let sessions = Arc::new(RedisSessionStore::new(redis.clone(), config.session.timeout));
    let auth = Arc::new(BcryptAuthenticationService::new(users.clone()));
    let account_service = Arc::new(AccountService::new(
        users,
        sessions,
        auth,
        AccountServiceConfig {
            code_ttl_seconds: config.session.code_ttl as i64,
        },
    ));

    let state = web::Data::new(
        AppState::new(account_service, config.environment)
            .with_health_check(Arc::new(database))
            .with_health_check(Arc::new(redis)),
    );
    let bind_address = config.server.bind_address();
    info!("Listening on {}", bind_address);

    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), &app_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
