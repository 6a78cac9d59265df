//! Device simulator: the counter controller the panel talks to.
//!
//! [`DeviceServer::start`] binds the web port (control page and health)
//! and the WebSocket port, then starts the tick and broadcast tasks.
//! [`DeviceServer::shutdown`] closes every open socket and waits for all
//! tasks to finish.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::DeviceState;
use crate::config::DeviceConfig;
use crate::domain::EventBus;
use crate::service::CounterService;
use crate::service::counter_service::{spawn_broadcaster, spawn_ticker};
use crate::ws::handler::ws_handler;

/// A running device simulator.
#[derive(Debug)]
pub struct DeviceServer {
    http_addr: SocketAddr,
    ws_addr: SocketAddr,
    state: DeviceState,
    shutdown: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl DeviceServer {
    /// Binds both listeners and starts serving.
    ///
    /// Port `0` in either address picks an ephemeral port; the bound
    /// addresses are available from [`http_addr`](Self::http_addr) and
    /// [`ws_addr`](Self::ws_addr).
    ///
    /// # Errors
    ///
    /// Returns an I/O error if either listener cannot be bound.
    pub async fn start(config: &DeviceConfig) -> std::io::Result<Self> {
        let http_listener = tokio::net::TcpListener::bind(config.http_listen_addr).await?;
        let ws_listener = tokio::net::TcpListener::bind(config.ws_listen_addr).await?;
        let http_addr = http_listener.local_addr()?;
        let ws_addr = ws_listener.local_addr()?;

        let (shutdown, shutdown_rx) = watch::channel(false);
        let counter = Arc::new(CounterService::new(
            config.count_limit,
            EventBus::new(config.event_bus_capacity),
        ));
        let state = DeviceState {
            counter: Arc::clone(&counter),
            shutdown: shutdown_rx.clone(),
        };

        let http_app = api::build_router()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state.clone());
        let ws_app = Router::new()
            .route("/", get(ws_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state.clone());

        let tasks = vec![
            spawn_server("http", http_listener, http_app, shutdown_rx.clone()),
            spawn_server("websocket", ws_listener, ws_app, shutdown_rx.clone()),
            spawn_ticker(Arc::clone(&counter), config.tick_interval, shutdown_rx.clone()),
            spawn_broadcaster(counter, config.broadcast_interval, shutdown_rx),
        ];

        tracing::info!(%http_addr, %ws_addr, "device listening");

        Ok(Self {
            http_addr,
            ws_addr,
            state,
            shutdown,
            tasks,
        })
    }

    /// Returns the bound web address.
    #[must_use]
    pub const fn http_addr(&self) -> SocketAddr {
        self.http_addr
    }

    /// Returns the bound WebSocket address.
    #[must_use]
    pub const fn ws_addr(&self) -> SocketAddr {
        self.ws_addr
    }

    /// Returns the shared device state.
    #[must_use]
    pub const fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Closes every client socket, stops both listeners and the
    /// background tasks, and waits for them to finish.
    pub async fn shutdown(self) {
        self.shutdown.send_replace(true);
        for task in self.tasks {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "device task failed");
            }
        }
        tracing::info!("device stopped");
    }
}

fn spawn_server(
    name: &'static str,
    listener: tokio::net::TcpListener,
    app: Router,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.wait_for(|stop| *stop).await;
            })
            .await;
        if let Err(e) = result {
            tracing::error!(server = name, error = %e, "server failed");
        }
    })
}
