use actor_framework::tracing::setup_tracing;
use order_service::config::ServerConfig;
use order_service::http::router;
use order_service::lifecycle::{seed_demo, OrderSystem};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => e.exit(),
    };

    setup_tracing(&config.log_level);

    info!(addr = %config.socket_addr(), "Starting order service");

    let system = OrderSystem::new(&config);

    if config.seed_demo {
        match seed_demo(&system).await {
            Ok(demo) => info!(
                user_id = %demo.user_id,
                products = demo.product_ids.len(),
                "Demo data ready"
            ),
            Err(e) => warn!(error = %e, "Demo data not created"),
        }
    }

    let listener = TcpListener::bind(config.socket_addr())
        .await
        .map_err(|e| format!("Failed to bind {}: {e}", config.socket_addr()))?;
    info!(addr = %config.socket_addr(), "Listening");

    axum::serve(listener, router(system.app_state()))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {e}"))?;

    system.shutdown().await?;

    info!("Order service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
