//! Socket connection manager
//!
//! [`SocketManager`] owns at most one live [`Socket`]. Repeated
//! [`SocketManager::get_socket`] calls hand out the same instance until
//! [`SocketManager::disconnect`] tears it down.
//!
//! Each socket runs a driver task that walks the state machine
//! `Disconnected -> Connecting -> Connected`, falling back to `Disconnected`
//! on network loss and retrying with a fixed delay until the policy is
//! exhausted. The wire protocol is behind [`Transport`] and [`Link`].

use super::message::{NewMessage, NEW_MESSAGE_EVENT};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const EVENT_BUFFER: usize = 64;

/// Frame received from the socket server
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEvent {
    pub name: String,
    pub payload: serde_json::Value,
}

/// Opens connections to the socket server
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn connect(&self, url: &str, path: &str) -> anyhow::Result<Box<dyn Link>>;
}

/// One established connection
#[async_trait]
pub trait Link: Send {
    /// Next frame from the server. `None` means the connection was lost.
    async fn next_event(&mut self) -> Option<InboundEvent>;

    async fn emit(&mut self, event: &str, payload: serde_json::Value) -> anyhow::Result<()>;

    async fn close(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Lifecycle and message notifications, in the order they happen
#[derive(Debug, Clone, PartialEq)]
pub enum SocketEvent {
    Connect,
    Disconnect,
    ConnectError(String),
    NewMessage(NewMessage),
}

/// Fixed-delay retry budget. The attempt counter resets after every
/// successful connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Retries after a failed attempt, not counting the first one
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SocketConfig {
    pub url: String,
    pub path: String,
    pub reconnect: ReconnectPolicy,
}

impl SocketConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            path: "/api/socket".to_string(),
            reconnect: ReconnectPolicy::default(),
        }
    }
}

/// Handle to a managed connection
pub struct Socket {
    id: u64,
    state: watch::Receiver<ConnectionState>,
    events: broadcast::Sender<SocketEvent>,
    outbound: mpsc::UnboundedSender<NewMessage>,
    cancel: CancellationToken,
    driver: parking_lot::Mutex<Option<JoinHandle<()>>>,
}

impl Socket {
    fn spawn<T: Transport>(id: u64, transport: Arc<T>, config: SocketConfig) -> Self {
        let (state_tx, state_rx) = watch::channel(ConnectionState::Disconnected);
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        let (outbound, outbound_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let driver = Driver {
            id,
            transport,
            config,
            state: state_tx,
            events: events.clone(),
            outbound: outbound_rx,
            cancel: cancel.clone(),
        };
        let handle = tokio::spawn(driver.run());

        Self {
            id,
            state: state_rx,
            events,
            outbound,
            cancel,
            driver: parking_lot::Mutex::new(Some(handle)),
        }
    }

    /// Instance identifier, unique per manager
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Receive events emitted from now on
    pub fn subscribe(&self) -> broadcast::Receiver<SocketEvent> {
        self.events.subscribe()
    }

    /// Wait until the socket reaches `target`. Returns `false` if the
    /// driver stopped first.
    pub async fn wait_for_state(&self, target: ConnectionState) -> bool {
        let mut state = self.state.clone();
        let reached = state.wait_for(|s| *s == target).await.is_ok();
        reached
    }

    /// Queue a message for the server. Messages sent while reconnecting
    /// are delivered once the connection is back.
    pub fn emit_new_message(&self, message: NewMessage) -> anyhow::Result<()> {
        self.outbound
            .send(message)
            .map_err(|_| anyhow::anyhow!("socket {} is closed", self.id))
    }

    async fn shutdown(&self) {
        self.cancel.cancel();
        let handle = self.driver.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::warn!(socket_id = self.id, error = %e, "Socket driver ended abnormally");
            }
        }
    }
}

impl Drop for Socket {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct Driver<T> {
    id: u64,
    transport: Arc<T>,
    config: SocketConfig,
    state: watch::Sender<ConnectionState>,
    events: broadcast::Sender<SocketEvent>,
    outbound: mpsc::UnboundedReceiver<NewMessage>,
    cancel: CancellationToken,
}

enum LinkEnd {
    Cancelled,
    Lost,
}

impl<T: Transport> Driver<T> {
    async fn run(mut self) {
        let policy = self.config.reconnect;
        let mut failures: u32 = 0;

        loop {
            self.state.send_replace(ConnectionState::Connecting);

            let attempt = tokio::select! {
                _ = self.cancel.cancelled() => break,
                result = self.transport.connect(&self.config.url, &self.config.path) => result,
            };

            match attempt {
                Ok(link) => {
                    failures = 0;
                    self.state.send_replace(ConnectionState::Connected);
                    self.notify(SocketEvent::Connect);
                    tracing::info!(socket_id = self.id, url = %self.config.url, "Socket connected");

                    let end = self.pump(link).await;

                    self.state.send_replace(ConnectionState::Disconnected);
                    self.notify(SocketEvent::Disconnect);
                    match end {
                        LinkEnd::Cancelled => {
                            tracing::info!(socket_id = self.id, "Socket disconnected");
                            return;
                        }
                        LinkEnd::Lost => {
                            tracing::warn!(socket_id = self.id, "Socket connection lost, reconnecting");
                        }
                    }
                }
                Err(e) => {
                    failures += 1;
                    self.state.send_replace(ConnectionState::Disconnected);
                    self.notify(SocketEvent::ConnectError(e.to_string()));

                    if failures > policy.max_attempts {
                        tracing::warn!(socket_id = self.id, attempts = failures, error = %e, "Socket gave up reconnecting");
                        return;
                    }
                    tracing::debug!(socket_id = self.id, attempt = failures, error = %e, "Socket connect failed");
                }
            }

            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = tokio::time::sleep(policy.delay) => {}
            }
        }

        self.state.send_replace(ConnectionState::Disconnected);
    }

    async fn pump(&mut self, mut link: Box<dyn Link>) -> LinkEnd {
        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    link.close().await;
                    return LinkEnd::Cancelled;
                }
                inbound = link.next_event() => match inbound {
                    Some(event) => self.dispatch(event),
                    None => return LinkEnd::Lost,
                },
                Some(message) = self.outbound.recv() => {
                    let payload = match serde_json::to_value(&message) {
                        Ok(payload) => payload,
                        Err(e) => {
                            tracing::warn!(socket_id = self.id, error = %e, "Dropping unserializable message");
                            continue;
                        }
                    };
                    if let Err(e) = link.emit(NEW_MESSAGE_EVENT, payload).await {
                        tracing::warn!(socket_id = self.id, error = %e, "Failed to emit message");
                    }
                }
            }
        }
    }

    fn dispatch(&self, event: InboundEvent) {
        if event.name != NEW_MESSAGE_EVENT {
            tracing::debug!(socket_id = self.id, event = %event.name, "Ignoring socket event");
            return;
        }
        match serde_json::from_value::<NewMessage>(event.payload) {
            Ok(message) => self.notify(SocketEvent::NewMessage(message)),
            Err(e) => tracing::warn!(socket_id = self.id, error = %e, "Malformed new-message payload"),
        }
    }

    fn notify(&self, event: SocketEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

/// Owns the single live socket for one client context
pub struct SocketManager<T: Transport> {
    transport: Arc<T>,
    config: SocketConfig,
    current: Mutex<Option<Arc<Socket>>>,
    next_id: AtomicU64,
}

impl<T: Transport> SocketManager<T> {
    pub fn new(transport: T, config: SocketConfig) -> Self {
        Self {
            transport: Arc::new(transport),
            config,
            current: Mutex::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    /// The live socket, connecting a new one if none exists
    pub async fn get_socket(&self) -> Arc<Socket> {
        let mut current = self.current.lock().await;
        if let Some(socket) = current.as_ref() {
            return socket.clone();
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let socket = Arc::new(Socket::spawn(id, self.transport.clone(), self.config.clone()));
        tracing::debug!(socket_id = id, "Socket created");
        *current = Some(socket.clone());
        socket
    }

    /// Tear down the live socket. The next `get_socket` creates a fresh one.
    pub async fn disconnect(&self) {
        let taken = self.current.lock().await.take();
        if let Some(socket) = taken {
            socket.shutdown().await;
        }
    }

    pub async fn has_socket(&self) -> bool {
        self.current.lock().await.is_some()
    }
}
