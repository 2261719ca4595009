//! HTTP server: accept loop and per-connection tasks.

use crate::api::router::route_request;
use crate::api::types::AppState;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// Reflector HTTP server
pub struct ReflectorServer {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl ReflectorServer {
    /// Bind the listening socket. Port `0` picks an ephemeral port.
    pub async fn bind(addr: SocketAddr, state: Arc<AppState>) -> Result<Self, anyhow::Error> {
        debug!("Starting server");
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener, state })
    }

    /// Address the server is actually listening on
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until the process is stopped
    pub async fn run(self) -> Result<(), anyhow::Error> {
        self.run_until(std::future::pending()).await
    }

    /// Serve until `shutdown` resolves. In-flight connections keep running.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), anyhow::Error>
    where
        F: Future<Output = ()>,
    {
        let addr = self.local_addr()?;
        info!("Albedo listening on http://{}", addr);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            let io = TokioIo::new(stream);
                            let state = Arc::clone(&self.state);

                            tokio::spawn(async move {
                                let service = service_fn(move |req| {
                                    let state = Arc::clone(&state);
                                    async move { route_request(req, state).await }
                                });

                                if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                                    warn!("Failed to serve connection from {}: {}", peer, e);
                                }
                            });
                        }
                        Err(e) => {
                            error!("Accept error on {}: {}", addr, e);
                        }
                    }
                }
                _ = &mut shutdown => {
                    info!("Server stopped");
                    return Ok(());
                }
            }
        }
    }
}
