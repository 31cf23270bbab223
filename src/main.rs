use std::env;
use std::sync::Arc;

use recipe_finder::client::{CatalogConfig, RecipeCatalogClient};
use recipe_finder::server::RecipeFinderMcpServer;
use recipe_finder::session::SearchSessionStore;
use rmcp::transport::sse_server::{SseServer, SseServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match CatalogConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid catalog configuration: {}", e);
            tracing::error!("Please verify:");
            tracing::error!("  - SPOONACULAR_API_KEY is set");
            tracing::error!("  - SPOONACULAR_BASE_URL, if set, is an http(s) URL");
            tracing::error!("  - SPOONACULAR_TIMEOUT_SECS, if set, is a whole number");
            std::process::exit(1);
        }
    };
    tracing::info!("Using recipe catalog at {}", config.base_url());

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3001".to_string());

    // One session for the whole process, shared by every connection
    let client = RecipeCatalogClient::new(config)?;
    let store = Arc::new(SearchSessionStore::new(Arc::new(client)));

    let config = SseServerConfig {
        bind: bind_addr.parse()?,
        sse_path: "/sse".to_string(),
        post_path: "/message".to_string(),
        ct: tokio_util::sync::CancellationToken::new(),
        sse_keep_alive: None,
    };

    tracing::info!("Recipe finder MCP server listening on {}", config.bind);

    let sse_server = SseServer::serve_with_config(config).await?;
    let ct = sse_server.with_service(move || RecipeFinderMcpServer::new(store.clone()));

    tracing::info!("Recipe finder MCP server started successfully");

    // Wait for Ctrl+C
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");
    ct.cancel();

    Ok(())
}
