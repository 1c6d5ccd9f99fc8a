use anyhow::Result;
use arc_swap::ArcSwap;
use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::{config::Config, handlers, handlers::AppState, metrics, signals::setup_signal_handlers};

/// Estimate forms are tiny; anything larger is not a trip request
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Start the fare estimation server
///
/// This function:
/// 1. Initializes metrics (when enabled)
/// 2. Sets up signal handlers for graceful shutdown and config reload
/// 3. Creates the Axum application
/// 4. Binds to the configured address
/// 5. Serves requests with graceful shutdown support
pub async fn start_server(config: Config, config_path: PathBuf) -> Result<()> {
    let metrics_handle = if config.metrics.enabled {
        info!("Initializing Prometheus metrics...");
        Some(Arc::new(metrics::init_metrics()?))
    } else {
        None
    };

    // Wrap config in ArcSwap for atomic reload support
    let config_swap = Arc::new(ArcSwap::from_pointee(config.clone()));

    // SIGTERM, SIGINT for shutdown; SIGHUP for reload
    let (shutdown_tx, signal_handle) = setup_signal_handlers(config_swap.clone(), config_path);
    let mut shutdown_rx = shutdown_tx.subscribe();

    let app = create_router(
        AppState::new(config_swap),
        metrics_handle.map(|handle| (config.metrics.endpoint.clone(), handle)),
    );

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting coach fare service on {}", addr);
    info!(
        "Configuration: {} buses, daily allowance {}, long-trip threshold {} km, multi-day floor {} km/day",
        config.fleet.len(),
        config.pricing.daily_allowance,
        config.pricing.long_trip_threshold_km,
        config.pricing.min_km_per_day
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
///
/// `metrics` carries the scrape path and exporter handle; the route is only
/// mounted when it is present.
pub fn create_router(
    app_state: AppState,
    metrics: Option<(String, Arc<PrometheusHandle>)>,
) -> Router {
    let api_routes = Router::new()
        .route("/v1/estimate", post(handlers::estimate::handle_estimate))
        .route("/v1/fleet", get(handlers::fleet::list_fleet))
        .route("/ready", get(handlers::health::readiness_check))
        .with_state(app_state);

    let mut router = Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(api_routes);

    if let Some((endpoint, handle)) = metrics {
        router = router.merge(
            Router::new()
                .route(&endpoint, get(handlers::metrics_handler::metrics))
                .with_state(handle),
        );
    }

    // The estimate form is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    router
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
