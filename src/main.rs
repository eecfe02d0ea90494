use churn_insight::{
    api::{build_router, AppState},
    config::Config,
    context::ServiceContext,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "churn_insight={},tower_http=info",
            config.observability.log_level
        )
        .into()
    });

    let fmt_layer = if config.observability.json_logs {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();

    tracing::info!(
        service = %config.observability.service_name,
        "Starting Churn Insight v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Startup phase: load and validate all artifacts before accepting
    // traffic. Any failure here is fatal.
    let context = ServiceContext::initialize(&config.artifacts).map_err(|e| {
        tracing::error!("Artifact initialization failed: {}", e);
        anyhow::anyhow!(e)
    })?;
    tracing::info!("✅ All artifacts loaded and validated");

    let state = AppState::new(Arc::new(context));

    // Build HTTP router with REST API
    let app = build_router(state).layer(TimeoutLayer::new(Duration::from_secs(
        config.server.request_timeout_secs,
    )));

    // Start HTTP server
    let http_addr = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("🚀 HTTP API server listening on http://{}", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);
    tracing::info!("   Predict: http://{}/api/churn/predict", http_addr);
    tracing::info!("   Analytics: http://{}/api/churn/analytics", http_addr);
    tracing::info!("   Customers: http://{}/api/churn/customers", http_addr);

    let http_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(http_listener, app).await {
            tracing::error!("HTTP server error: {}", e);
        }
    });

    tokio::select! {
        _ = http_handle => {
            tracing::warn!("HTTP server stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("Shutting down gracefully...");
    Ok(())
}
