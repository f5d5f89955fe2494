use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::{
    connect_async, tungstenite::protocol::Message as WsMessage, MaybeTlsStream, WebSocketStream,
};
use tracing::{debug, error, warn};

type WebSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

type OpenListener = Box<dyn Fn() + Send + Sync>;
type CloseListener = Box<dyn Fn(String, bool) + Send + Sync>;
type MessageListener = Box<dyn Fn(String) + Send + Sync>;

/// One WebSocket session to the update endpoint.
///
/// A connector is the connection handle of the client: created per attempt,
/// never reused. Incoming text frames are handed to the message listener
/// verbatim; interpreting them is the client's job.
#[derive(Clone)]
pub struct WebSocketConnector {
    url: String,
    write_stream: Arc<Mutex<Option<SplitSink<WebSocket, WsMessage>>>>,
    read_stream: Arc<Mutex<Option<futures_util::stream::SplitStream<WebSocket>>>>,
    open_listener: Arc<Mutex<Option<OpenListener>>>,
    close_listener: Arc<Mutex<Option<CloseListener>>>,
    message_listener: Arc<Mutex<Option<MessageListener>>>,
}

impl WebSocketConnector {
    /// Create a new WebSocket connector
    pub fn new(url: String) -> Self {
        Self {
            url,
            write_stream: Arc::new(Mutex::new(None)),
            read_stream: Arc::new(Mutex::new(None)),
            open_listener: Arc::new(Mutex::new(None)),
            close_listener: Arc::new(Mutex::new(None)),
            message_listener: Arc::new(Mutex::new(None)),
        }
    }

    /// Start the WebSocket connection.
    ///
    /// Returns an error if the session cannot be established; once it is,
    /// a background task owns the read loop until the connection dies.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.write_stream.lock().await.is_some() {
            return Ok(());
        }

        let (ws_stream, _) = connect_async(&self.url).await?;
        let (write, read) = ws_stream.split();

        *self.write_stream.lock().await = Some(write);
        *self.read_stream.lock().await = Some(read);

        let connector = self.clone();
        tokio::spawn(async move {
            connector.handle_connection().await;
        });

        Ok(())
    }

    /// Close the session by sending a Close frame.
    ///
    /// Safe to call on a connection that is already gone.
    pub async fn stop(&self) {
        if let Some(mut write) = self.write_stream.lock().await.take() {
            if let Err(e) = write.send(WsMessage::Close(None)).await {
                debug!("Error closing WebSocket: {}", e);
            }
        }
    }

    /// Set the listener for connection open events
    pub async fn set_open_listener(&self, listener: OpenListener) {
        *self.open_listener.lock().await = Some(listener);
    }

    /// Set the listener for connection close events
    pub async fn set_close_listener(&self, listener: CloseListener) {
        *self.close_listener.lock().await = Some(listener);
    }

    /// Set the listener for incoming text frames
    pub async fn set_message_listener(&self, listener: MessageListener) {
        *self.message_listener.lock().await = Some(listener);
    }

    /// Get the WebSocket URL
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn pong(&self, payload: Vec<u8>) {
        if let Some(write) = self.write_stream.lock().await.as_mut() {
            if let Err(e) = write.send(WsMessage::Pong(payload)).await {
                warn!("Failed to send pong: {}", e);
            }
        }
    }

    async fn handle_connection(&self) {
        if let Some(listener) = self.open_listener.lock().await.as_ref() {
            debug!("Notifying open listener");
            listener();
        }

        let mut reason = "connection closed".to_string();
        let mut is_error = false;

        loop {
            // Take the next frame without holding the read lock across
            // listener callbacks.
            let next = {
                let mut read_guard = self.read_stream.lock().await;
                match read_guard.as_mut() {
                    Some(read) => read.next().await,
                    None => break,
                }
            };

            match next {
                Some(Ok(WsMessage::Text(text))) => {
                    debug!("Received WebSocket frame: {}", text);
                    if let Some(listener) = self.message_listener.lock().await.as_ref() {
                        listener(text);
                    }
                }
                Some(Ok(WsMessage::Ping(payload))) => {
                    self.pong(payload).await;
                }
                Some(Ok(WsMessage::Close(frame))) => {
                    debug!("Received close frame: {:?}", frame);
                    break;
                }
                Some(Ok(other)) => {
                    debug!("Ignoring non-text WebSocket message: {:?}", other);
                }
                Some(Err(e)) => {
                    error!("WebSocket error: {}", e);
                    reason = e.to_string();
                    is_error = true;
                    break;
                }
                None => break,
            }
        }

        *self.write_stream.lock().await = None;
        *self.read_stream.lock().await = None;

        if let Some(listener) = self.close_listener.lock().await.as_ref() {
            listener(reason, is_error);
        }
    }
}
