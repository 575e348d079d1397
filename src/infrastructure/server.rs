// Server module - Static asset server for the browser build
// Used by the binary (main.rs) and by the integration tests

use axum::Router;
use std::net::SocketAddr;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::infrastructure::config::Config;

/// Build the router serving `config.dist_dir`
///
/// Existing files are served as-is. Any other path, including paths that try
/// to leave the output directory, gets the entry document with a 200 so the
/// client-side router can take over.
pub fn build_router(config: &Config) -> Router {
    let entry = ServeFile::new(config.entry_path());
    let assets = ServeDir::new(&config.dist_dir)
        .append_index_html_on_directories(true)
        .fallback(entry);

    Router::new()
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
}

/// Start the server on a background task
/// Returns the address actually bound (port 0 picks a free one)
pub async fn start_server(config: &Config) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], config.port))).await?;
    let addr = listener.local_addr()?;
    let app = build_router(config);

    tracing::info!(
        "Static server started on {} serving {:?}",
        addr,
        config.dist_dir
    );

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("HTTP server error: {}", e);
        }
    });

    Ok(addr)
}

/// Serve in the foreground until Ctrl-C / SIGTERM
pub async fn serve(config: &Config) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    if !config.entry_path().is_file() {
        tracing::warn!(
            "Entry document {:?} not found, unknown paths will 404",
            config.entry_path()
        );
    }

    tracing::info!("fcschool static server listening on {}", addr);
    axum::serve(listener, build_router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received, stopping static server");
}
