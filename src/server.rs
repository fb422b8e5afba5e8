use axum::{
    Router, middleware,
    routing::get,
};
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::time::Duration;
use tracing::{info, warn};

use crate::admission::AdmissionController;
use crate::clock::{SharedClock, SystemClock};
use crate::config::{Args, TlsPaths};
use crate::error::GatewayError;
use crate::handlers::{
    cache_get_handler, cache_post_handler, health_handler, metrics_handler, not_found_handler,
    server_data_get_handler, server_data_post_handler, stop_handler,
};
use crate::middleware::{access_log, admission_guard};
use crate::models::ServerData;
use crate::state::AppState;
use crate::sweeper::sweeper;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Build the router with all routes, admission applied to server_data.php.
pub fn router(state: Arc<AppState>) -> Router {
    let guarded = Router::new()
        .route(
            "/growtopia/server_data.php",
            get(server_data_get_handler).post(server_data_post_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admission_guard,
        ));

    let mut app = Router::new()
        .merge(guarded)
        .route("/cache", get(cache_get_handler).post(cache_post_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler));

    if state.stop_enabled {
        app = app.route("/stop", get(stop_handler));
    }

    // a known path with an unhandled method is answered like an unknown path
    app.fallback(not_found_handler)
        .method_not_allowed_fallback(not_found_handler)
        .layer(middleware::from_fn(access_log))
        .with_state(state)
}

/// Serve plain HTTP on an already bound listener until shutdown.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<(), GatewayError> {
    let shutdown = state.shutdown.clone();
    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(shutdown))
    .await
    .map_err(GatewayError::Serve)
}

/// Serve HTTPS on `addr` until shutdown.
pub async fn serve_tls(
    addr: SocketAddr,
    tls: &TlsPaths,
    state: Arc<AppState>,
) -> Result<(), GatewayError> {
    let config = RustlsConfig::from_pem_file(&tls.cert, &tls.key)
        .await
        .map_err(GatewayError::Tls)?;

    let handle = axum_server::Handle::new();
    let shutdown_handle = handle.clone();
    let shutdown = state.shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal(shutdown).await;
        shutdown_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
    });

    let listener = bind_std(addr)?;
    axum_server::from_tcp_rustls(listener, config)
        .handle(handle)
        .serve(router(state).into_make_service_with_connect_info::<SocketAddr>())
        .await
        .map_err(GatewayError::Serve)
}

/// Wire everything up from the command line and run until shutdown.
pub async fn run(args: Args) -> Result<(), GatewayError> {
    let tls = args.tls()?;
    let addr = SocketAddr::new(args.bind, args.port);

    let clock: SharedClock = Arc::new(SystemClock);
    let admission = Arc::new(AdmissionController::new(args.admission(), clock));
    let state = Arc::new(
        AppState::new(
            admission.clone(),
            ServerData::new(args.game_host.clone(), args.game_port),
        )
        .with_stop_route(args.enable_stop),
    );

    if args.sweep_interval > 0 {
        tokio::spawn(sweeper(
            admission,
            Duration::from_secs(args.sweep_interval),
        ));
    } else {
        warn!("Sweeper disabled, client records are never evicted");
    }

    let scheme = if tls.is_some() { "https" } else { "http" };
    info!("Gateway running on {}://{}", scheme, addr);
    info!("Advertising game server {}:{}", args.game_host, args.game_port);
    info!(
        "Limits: {} requests per {} seconds, {} concurrent connections per client",
        args.rate_limit, args.rate_window, args.max_connections
    );

    match tls {
        Some(tls) => serve_tls(addr, &tls, state).await,
        None => {
            let listener = TcpListener::bind(addr)
                .await
                .map_err(|source| GatewayError::Bind { addr, source })?;
            serve(listener, state).await
        }
    }
}

// listener for axum-server, bound up front so failures read the same as
// on the plain HTTP path
fn bind_std(addr: SocketAddr) -> Result<std::net::TcpListener, GatewayError> {
    let listener =
        std::net::TcpListener::bind(addr).map_err(|source| GatewayError::Bind { addr, source })?;
    listener
        .set_nonblocking(true)
        .map_err(|source| GatewayError::Bind { addr, source })?;
    Ok(listener)
}

// resolves on Ctrl-C or when /stop notifies
async fn shutdown_signal(stop: Arc<Notify>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = ctrl_c => info!("Ctrl-C received"),
        _ = stop.notified() => {},
    }
}
