//! Integration tests for the ERP dashboard server.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p erp-dashboard-integration-tests
//! ```
//!
//! Each test boots its own server on an ephemeral `127.0.0.1` port via
//! [`TestServer::start`]; no external services are needed.

use std::net::SocketAddr;

use erp_dashboard_core::AddressCatalog;
use erp_dashboard_server::config::ServerConfig;
use erp_dashboard_server::state::AppState;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A running server plus an HTTP client pointed at it.
///
/// The server shuts down gracefully when the value is dropped.
pub struct TestServer {
    pub client: reqwest::Client,
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    /// Start a server with the bundled address dataset.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        Self::start_with(ServerConfig::default()).await
    }

    /// Start a server whose address dataset failed to load.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start_without_dataset() -> Self {
        Self::spawn(AppState::new(ServerConfig::default(), None)).await
    }

    /// Start a server with an explicit catalog.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start_with_catalog(catalog: AddressCatalog) -> Self {
        Self::spawn(AppState::new(ServerConfig::default(), Some(catalog))).await
    }

    /// Start a server from configuration, loading the dataset it names.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start_with(config: ServerConfig) -> Self {
        Self::spawn(AppState::load(config).await).await
    }

    async fn spawn(state: AppState) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no local address");
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let shutdown = async {
                let _ = rx.await;
            };
            erp_dashboard_server::serve(listener, state, shutdown)
                .await
                .expect("Test server failed");
        });

        Self {
            client: reqwest::Client::new(),
            addr,
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }

    /// Absolute URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Stop the server and wait for it to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
