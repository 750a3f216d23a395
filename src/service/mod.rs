pub mod delivery;
pub mod error;
pub mod render;
pub mod shutdown;
pub mod upstream;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

pub use delivery::DeliveryService;
pub use error::{DeliveryError, ServerError};
pub use render::RenderService;

use crate::service::shutdown::ShutdownManager;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}

/// A bound listener waiting for a router to serve.
pub struct Server {
    name: &'static str,
    addr: SocketAddr,
    /// Bound in [`Server::bind`] so the port is reserved before `run`.
    listener: TcpListener,
    shutdown: Arc<ShutdownManager>,
}

impl Server {
    pub async fn bind(name: &'static str, bind_addr: &str) -> Result<Self, ServerError> {
        let addr: SocketAddr = bind_addr.parse().map_err(|e| ServerError::InvalidAddr {
            addr: bind_addr.to_string(),
            source: e,
        })?;
        let listener = TcpListener::bind(addr).await.map_err(|e| ServerError::Bind {
            addr: bind_addr.to_string(),
            source: e,
        })?;
        let addr = listener.local_addr()?;
        tracing::info!("{} service bound to {}", name, addr);

        Ok(Self {
            name,
            addr,
            listener,
            shutdown: Arc::new(ShutdownManager::new()),
        })
    }

    /// Actual bound address (resolves port 0).
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn handle(&self) -> ServerHandle {
        ServerHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    pub async fn run(self, app: Router) -> Result<(), ServerError> {
        tracing::info!("Starting {} service on {}", self.name, self.addr);

        let shutdown = self.shutdown.clone();
        axum::serve(self.listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.wait_for_shutdown().await;
            })
            .await?;

        tracing::info!("{} service stopped", self.name);
        Ok(())
    }
}

#[derive(Clone)]
pub struct ServerHandle {
    shutdown: Arc<ShutdownManager>,
}

impl ServerHandle {
    pub fn shutdown(&self) {
        self.shutdown.signal_shutdown();
    }
}
