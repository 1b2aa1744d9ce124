use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::broadcast;

use atelier_content::{ContentFacade, ContentService, DeliveryClient};
use atelier_core::{AtelierConfig, DeliveryMode};

use crate::error::{io_err, ServerError};
use crate::routes::{create_router, AppState};

/// Start the server and block the current thread until it exits.
pub fn start_blocking(config: &AtelierConfig, mode: DeliveryMode) -> Result<(), ServerError> {
    init_tracing();
    let client = DeliveryClient::from_config(config, mode)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| io_err("tokio-runtime", e))?;
    runtime.block_on(run(config.bind, Arc::new(client)))
}

/// Serve the content routes on `addr` until Ctrl-C.
pub async fn run(addr: SocketAddr, service: Arc<dyn ContentService>) -> Result<(), ServerError> {
    let (shutdown_tx, _) = broadcast::channel::<()>(4);

    let signal_handle = {
        let shutdown = shutdown_tx.clone();
        tokio::spawn(async move {
            let result = match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("received ctrl-c, shutting down server");
                    Ok(())
                }
                Err(err) => Err(ServerError::Signal(err.to_string())),
            };
            let _ = shutdown.send(());
            result
        })
    };

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let app = create_router(AppState {
        facade: ContentFacade::new(service),
    });
    tracing::info!(%addr, "content server listening");

    let mut shutdown_rx = shutdown_tx.subscribe();
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await
        .map_err(|e| io_err("serve", e));

    signal_handle.abort();
    served?;
    if let Ok(Err(err)) = signal_handle.await {
        return Err(err);
    }
    tracing::info!("content server stopped");
    Ok(())
}

pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
