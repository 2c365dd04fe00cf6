use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use sauktiniai_web::api::{MockRegistry, RegistryApi, RegistryClient};
use sauktiniai_web::catalog::Catalog;
use sauktiniai_web::config::AppConfig;
use sauktiniai_web::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let catalog = Arc::new(Catalog::builtin()?);

    match &config.mock_dir {
        Some(dir) => {
            let mock = MockRegistry::from_dir(dir)?;
            info!(
                dir = %dir.display(),
                regions = mock.available_regions().await.len(),
                "serving mock registry data"
            );
            serve(mock, catalog, &config).await
        }
        None => {
            info!(base_url = %config.registry.base_url, "using registry API");
            let client = RegistryClient::new(config.registry.clone())?;
            serve(client, catalog, &config).await
        }
    }
}

async fn serve<A: RegistryApi>(
    api: A,
    catalog: Arc<Catalog>,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(api, catalog, &config.sessions);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        addr = %config.bind_addr,
        session_ttl_secs = config.sessions.ttl.as_secs(),
        "Šauktiniai listening on http://{}",
        config.bind_addr
    );

    axum::serve(listener, app).await?;
    Ok(())
}
