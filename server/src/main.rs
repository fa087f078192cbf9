use anyhow::Context;
use restaurant_server::config::Config;
use restaurant_server::{api, app, db, telemetry, AppState};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        println!("{}", api::openapi().to_pretty_json()?);
        return Ok(());
    }

    // A missing .env file is fine; real environment variables still apply
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    telemetry::init_telemetry(&config);

    let pool = db::create_pool(&config.database_url, config.pool_size)
        .with_context(|| format!("failed to open database at {}", config.database_url))?;
    tracing::info!(
        database_url = %config.database_url,
        pool_size = config.pool_size,
        "database ready"
    );

    let router = app(AppState::new(pool));

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;

    let local_addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", local_addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", local_addr);
    tracing::info!(
        "OpenAPI spec available at http://{}/api-docs/openapi.json",
        local_addr
    );

    axum::serve(listener, router).await?;
    Ok(())
}
