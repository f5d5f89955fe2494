use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::board::messages::{element_key, BoardUpdate};
use crate::core::{
    errors::{ErrorListener, FeedError, FeedErrorType},
    scheduler::Scheduler,
    state::{ConnectionState, ConnectionStateChangeListener},
};
use crate::render::RenderSink;
use crate::websocket_client::{config::FeedClientConfig, connector::WebSocketConnector};

const RECONNECT_KEY: &str = "reconnect";

/// Live-feed client for a scoreboard display.
///
/// Owns one logical connection to the update endpoint, routes parsed update
/// frames to the render sink, and re-establishes the connection on any
/// failure after a fixed delay. Every failure class is treated identically
/// and every failure is retried; there is no attempt cap and no terminal
/// state. A stale scoreboard during an outage is the accepted cost.
///
/// Each connection handle carries a generation number. Events from a handle
/// that has been superseded are dropped, which keeps handler deregistration
/// idempotent and guarantees a single scheduled reconnect per failure.
pub struct LiveFeedClient {
    config: FeedClientConfig,
    sink: Arc<dyn RenderSink>,
    connector: Arc<Mutex<Option<WebSocketConnector>>>,
    connection_state: Arc<Mutex<ConnectionState>>,
    generation: Arc<AtomicU64>,
    reconnect_attempts: Arc<Mutex<u32>>,
    scheduler: Arc<Scheduler>,
    state_listeners: Arc<Mutex<HashMap<Uuid, ConnectionStateChangeListener>>>,
    error_listeners: Arc<Mutex<HashMap<Uuid, ErrorListener>>>,
}

impl LiveFeedClient {
    pub fn new(config: FeedClientConfig, sink: Arc<dyn RenderSink>) -> Self {
        Self {
            config,
            sink,
            connector: Arc::new(Mutex::new(None)),
            connection_state: Arc::new(Mutex::new(ConnectionState::Connecting)),
            generation: Arc::new(AtomicU64::new(0)),
            reconnect_attempts: Arc::new(Mutex::new(0)),
            scheduler: Arc::new(Scheduler::new()),
            state_listeners: Arc::new(Mutex::new(HashMap::new())),
            error_listeners: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Start the connection loop by making the first attempt.
    ///
    /// A failed attempt is not an error to the caller; it is absorbed into
    /// the retry cycle like any later connection loss.
    pub async fn connect(&self) {
        self.open().await;
    }

    pub async fn connection_state(&self) -> ConnectionState {
        *self.connection_state.lock().await
    }

    /// Number of connection attempts made after the initial one
    pub async fn reconnect_attempts(&self) -> u32 {
        *self.reconnect_attempts.lock().await
    }

    pub async fn add_connection_state_listener(
        &self,
        listener: ConnectionStateChangeListener,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.state_listeners.lock().await.insert(id, listener);
        id
    }

    pub async fn remove_connection_state_listener(&self, id: Uuid) {
        self.state_listeners.lock().await.remove(&id);
    }

    pub async fn add_error_listener(&self, listener: ErrorListener) -> Uuid {
        let id = Uuid::new_v4();
        self.error_listeners.lock().await.insert(id, listener);
        id
    }

    pub async fn remove_error_listener(&self, id: Uuid) {
        self.error_listeners.lock().await.remove(&id);
    }

    /// Make one connection attempt with a fresh handle generation.
    ///
    /// Returns a boxed future because the reconnect path makes this
    /// indirectly recursive, which an `async fn`'s opaque type cannot express.
    fn open(&self) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send + '_>> {
        Box::pin(self.open_inner())
    }

    async fn open_inner(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_connection_state(ConnectionState::Connecting).await;

        let url = self.config.url();
        debug!("Connecting to {} (generation {})", url, generation);
        let connector = WebSocketConnector::new(url);

        let client = self.clone();
        connector
            .set_open_listener(Box::new(move || {
                let client = client.clone();
                tokio::spawn(async move {
                    client.process_transport_open(generation).await;
                });
            }))
            .await;

        let client = self.clone();
        connector
            .set_message_listener(Box::new(move |text| {
                let client = client.clone();
                tokio::spawn(async move {
                    client.process_frame(generation, text).await;
                });
            }))
            .await;

        let client = self.clone();
        connector
            .set_close_listener(Box::new(move |reason, is_error| {
                let client = client.clone();
                tokio::spawn(async move {
                    client
                        .process_transport_close(generation, reason, is_error)
                        .await;
                });
            }))
            .await;

        match connector.start().await {
            Ok(()) => {
                *self.connector.lock().await = Some(connector);
            }
            Err(e) => {
                // Failed dials join the same retry cycle as dropped sessions.
                self.process_transport_close(generation, e.to_string(), true)
                    .await;
            }
        }
    }

    async fn process_transport_open(&self, generation: u64) {
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Ignoring open event from superseded handle {}", generation);
            return;
        }

        debug!("Connection opened (generation {})", generation);
        self.set_connection_state(ConnectionState::Open).await;
    }

    /// Parse one update frame and route its entries to the render sink.
    ///
    /// A malformed payload is reported to error listeners and dropped; the
    /// connection itself stays up.
    async fn process_frame(&self, generation: u64, text: String) {
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Ignoring frame from superseded handle {}", generation);
            return;
        }

        let update: BoardUpdate = match serde_json::from_str(&text) {
            Ok(update) => update,
            Err(e) => {
                warn!("Discarding malformed update frame: {}", e);
                self.publish_error(FeedError::from(e)).await;
                return;
            }
        };

        debug!(
            "Update for board {}: {} entries",
            update.sbid,
            update.players.len()
        );
        for entry in &update.players {
            self.sink
                .set_text(&element_key(update.sbid, entry.pid), &entry.display)
                .await;
        }
    }

    /// React to a transport failure or clean close: retire the handle and
    /// schedule exactly one reconnect after the fixed delay.
    async fn process_transport_close(&self, generation: u64, reason: String, is_error: bool) {
        // Retiring the generation here is what makes a second failure
        // signal from the same handle a no-op.
        if self
            .generation
            .compare_exchange(generation, generation + 1, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Ignoring close event from superseded handle {}", generation);
            return;
        }

        debug!(
            "Connection lost (generation {}): {} (error: {})",
            generation, reason, is_error
        );
        if is_error {
            self.publish_error(FeedError::new(FeedErrorType::Transport, reason))
                .await;
        }

        if let Some(connector) = self.connector.lock().await.take() {
            connector.stop().await;
        }

        self.set_connection_state(ConnectionState::Closed).await;
        *self.reconnect_attempts.lock().await += 1;

        let client = self.clone();
        self.scheduler
            .schedule(
                move || {
                    tokio::spawn(async move {
                        client.open().await;
                    });
                },
                self.config.reconnect_delay,
                RECONNECT_KEY.to_string(),
            )
            .await;
    }

    async fn set_connection_state(&self, new_state: ConnectionState) {
        let mut state = self.connection_state.lock().await;
        if *state == new_state {
            return;
        }

        let old_state = *state;
        *state = new_state;
        drop(state);

        for listener in self.state_listeners.lock().await.values() {
            listener(&new_state, &old_state);
        }
    }

    async fn publish_error(&self, err: FeedError) {
        let listeners = self.error_listeners.lock().await;
        if listeners.is_empty() {
            error!("Unhandled feed error: {:?} - {}", err.error_type, err.message);
            return;
        }

        for listener in listeners.values() {
            listener(&err);
        }
    }
}

impl Clone for LiveFeedClient {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            sink: self.sink.clone(),
            connector: self.connector.clone(),
            connection_state: self.connection_state.clone(),
            generation: self.generation.clone(),
            reconnect_attempts: self.reconnect_attempts.clone(),
            scheduler: self.scheduler.clone(),
            state_listeners: self.state_listeners.clone(),
            error_listeners: self.error_listeners.clone(),
        }
    }
}
