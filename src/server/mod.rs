pub mod api;

use axum_server::Handle;
use log::{ error, info };
use std::error::Error;
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use crate::config::TlsSettings;
use self::api::AppState;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

pub struct Server {
    addr: String,
    state: AppState,
    tls: Option<TlsSettings>,
}

impl Server {
    pub fn new(addr: String, state: AppState, tls: Option<TlsSettings>) -> Self {
        Self { addr, state, tls }
    }

    pub async fn run(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let addr = self.addr.parse::<SocketAddr>()?;
        let app = api::router(self.state);

        match self.tls {
            Some(tls) => {
                let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                    &tls.cert_path,
                    &tls.key_path
                ).await?;
                let handle = Handle::new();
                tokio::spawn(shutdown_with(handle.clone(), shutdown_signal()));
                info!("Starting HTTPS server on: https://{}", addr);
                axum_server::bind_rustls(addr, tls_config)
                    .handle(handle)
                    .serve(app.into_make_service()).await?;
            }
            None => {
                let listener = match tokio::net::TcpListener::bind(addr).await {
                    Ok(listener) => listener,
                    Err(e) => {
                        error!("Failed to bind HTTP server to {}: {}. Try a different port.", addr, e);
                        return Err(e.into());
                    }
                };
                info!("Starting HTTP server on: http://{}", addr);
                axum::serve(listener, app.into_make_service())
                    .with_graceful_shutdown(shutdown_signal()).await?;
            }
        }

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Drains in-flight connections on `handle` once `signal` resolves.
async fn shutdown_with(handle: Handle, signal: impl Future<Output = ()>) {
    signal.await;
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}
