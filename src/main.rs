use tokio::net::TcpListener;
use tracing::{info, warn};
use training_log::api::create_routes;
use training_log::config::{run_migrations, AppConfig, DatabaseConfig, DatabaseSeeder};
use training_log::logging::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing(&config.log_level);

    if config.is_production() && config.uses_default_jwt_secret() {
        warn!("JWT_SECRET is not set; tokens are signed with the development secret");
    }

    let db_config = DatabaseConfig::from_env()?;
    let pool = db_config.create_pool().await?;
    run_migrations(&pool).await?;

    DatabaseSeeder::new(pool.clone()).seed_all(&config).await?;

    let app = create_routes(pool, &config);

    let address = config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!(environment = %config.environment, "Training log server starting on http://{}", address);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
