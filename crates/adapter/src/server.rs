//! TCP server for the control adapter
//!
//! Accepts connections, performs the hello/welcome handshake, enforces the
//! controller role and per-client sequencing, and forwards validated commands
//! to the game loop over a bounded channel.

use std::net::SocketAddr;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot, watch, RwLock};
use tracing::{debug, info, warn};

use crate::protocol::*;
use crate::runtime::{InboundCommand, InboundPayload, OutboundMessage};

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("invalid adapter address {addr}: {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_pending_commands: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            max_pending_commands: 16,
        }
    }
}

impl ServerConfig {
    /// Read `MEMORY_AI_HOST`, `MEMORY_AI_PORT` and `MEMORY_AI_MAX_PENDING`.
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let host = get("MEMORY_AI_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = get("MEMORY_AI_PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);
        let max_pending_commands = get("MEMORY_AI_MAX_PENDING")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_pending_commands);

        Self {
            host,
            port,
            max_pending_commands,
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AdapterError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|source| AdapterError::InvalidAddress { addr, source })
    }

    /// The adapter only runs when `MEMORY_AI_ENABLED` is set and
    /// `MEMORY_AI_DISABLED` is not.
    pub fn is_enabled() -> bool {
        env_flag("MEMORY_AI_ENABLED") && !env_flag("MEMORY_AI_DISABLED")
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Connection summary shown by the terminal view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdapterStatus {
    pub client_count: u16,
    pub controller_id: Option<usize>,
}

struct ClientHandle {
    id: usize,
    addr: SocketAddr,
    handshaken: bool,
    stream_observations: bool,
    last_seq: Option<u64>,
    tx: mpsc::UnboundedSender<String>,
}

#[derive(Default)]
struct Registry {
    clients: Vec<ClientHandle>,
    controller: Option<usize>,
}

impl Registry {
    fn get(&self, id: usize) -> Option<&ClientHandle> {
        self.clients.iter().find(|c| c.id == id)
    }

    fn get_mut(&mut self, id: usize) -> Option<&mut ClientHandle> {
        self.clients.iter_mut().find(|c| c.id == id)
    }

    fn status(&self) -> AdapterStatus {
        AdapterStatus {
            client_count: self.clients.len().min(u16::MAX as usize) as u16,
            controller_id: self.controller,
        }
    }
}

/// Shared server state
struct ServerState {
    registry: RwLock<Registry>,
    status_tx: Option<watch::Sender<AdapterStatus>>,
}

impl ServerState {
    fn publish(&self, registry: &Registry) {
        if let Some(tx) = &self.status_tx {
            let _ = tx.send(registry.status());
        }
    }

    async fn is_handshaken(&self, client_id: usize) -> bool {
        self.registry
            .read()
            .await
            .get(client_id)
            .map(|c| c.handshaken)
            .unwrap_or(false)
    }

    /// Accept `seq` only if it is strictly greater than the last one seen.
    async fn check_and_update_seq(&self, client_id: usize, seq: u64) -> bool {
        let mut registry = self.registry.write().await;
        let Some(client) = registry.get_mut(client_id) else {
            return false;
        };
        match client.last_seq {
            Some(prev) if seq <= prev => false,
            _ => {
                client.last_seq = Some(seq);
                true
            }
        }
    }

    async fn is_controller(&self, client_id: usize) -> bool {
        self.registry.read().await.controller == Some(client_id)
    }
}

fn send_json<T: Serialize>(tx: &mpsc::UnboundedSender<String>, msg: &T) {
    match serde_json::to_string(msg) {
        Ok(line) => {
            let _ = tx.send(line);
        }
        Err(e) => warn!(error = %e, "failed to encode adapter message"),
    }
}

fn send_error(tx: &mpsc::UnboundedSender<String>, seq: u64, code: ErrorCode, message: &str) {
    send_json(tx, &create_error(seq, code, message));
}

/// Start the TCP server and serve until the listener fails.
///
/// `ready_tx` receives the bound address (useful with port 0), and
/// `status_tx` receives a fresh [`AdapterStatus`] whenever clients or the
/// controller change.
pub async fn run_server(
    config: ServerConfig,
    command_tx: mpsc::Sender<InboundCommand>,
    mut out_rx: mpsc::UnboundedReceiver<OutboundMessage>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
    status_tx: Option<watch::Sender<AdapterStatus>>,
) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    let bound = listener.local_addr()?;
    info!(addr = %bound, "adapter listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let state = Arc::new(ServerState {
        registry: RwLock::new(Registry::default()),
        status_tx,
    });

    // Outbound dispatcher.
    {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                let registry = state.registry.read().await;
                match msg {
                    OutboundMessage::Ack { client_id, ack } => {
                        if let Some(c) = registry.get(client_id) {
                            send_json(&c.tx, &ack);
                        }
                    }
                    OutboundMessage::Error { client_id, err } => {
                        if let Some(c) = registry.get(client_id) {
                            send_json(&c.tx, &err);
                        }
                    }
                    OutboundMessage::Observation { client_id, obs } => {
                        if let Some(c) = registry.get(client_id) {
                            send_json(&c.tx, &obs);
                        }
                    }
                    OutboundMessage::BroadcastObservation { obs } => {
                        let line = match serde_json::to_string(&obs) {
                            Ok(line) => line,
                            Err(e) => {
                                warn!(error = %e, "failed to encode observation");
                                continue;
                            }
                        };
                        for c in registry
                            .clients
                            .iter()
                            .filter(|c| c.handshaken && c.stream_observations)
                        {
                            let _ = c.tx.send(line.clone());
                        }
                    }
                }
            }
        });
    }

    let mut client_id_counter = 0usize;
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        info!(client_id, %addr, "client connected");

        let state = Arc::clone(&state);
        let command_tx = command_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, addr, client_id, &state, command_tx).await {
                warn!(client_id, error = %e, "client error");
            }
            release_client(&state, client_id).await;
            info!(client_id, "client disconnected");
        });
    }
}

async fn release_client(state: &ServerState, client_id: usize) {
    let mut registry = state.registry.write().await;
    if let Some(c) = registry.get(client_id) {
        debug!(client_id, addr = %c.addr, "removing client");
    }
    registry.clients.retain(|c| c.id != client_id);
    if registry.controller == Some(client_id) {
        registry.controller = None;
        info!(client_id, "controller released");
    }
    state.publish(&registry);
}

/// Handle a single client connection
async fn handle_client(
    socket: TcpStream,
    addr: SocketAddr,
    client_id: usize,
    state: &ServerState,
    command_tx: mpsc::Sender<InboundCommand>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    {
        let mut registry = state.registry.write().await;
        registry.clients.push(ClientHandle {
            id: client_id,
            addr,
            handshaken: false,
            stream_observations: false,
            last_seq: None,
            tx: tx.clone(),
        });
        state.publish(&registry);
    }

    // Ends once every sender is gone, after queued replies are flushed.
    tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if writer.write_all(line.as_bytes()).await.is_err()
                || writer.write_all(b"\n").await.is_err()
                || writer.flush().await.is_err()
            {
                break;
            }
        }
    });

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        debug!(client_id, line = trimmed, "inbound");

        match parse_message(trimmed) {
            Ok(ParsedMessage::Hello(hello)) => {
                if state.is_handshaken(client_id).await
                    && !state.check_and_update_seq(client_id, hello.seq).await
                {
                    send_error(&tx, hello.seq, ErrorCode::StaleSeq, "seq must be strictly increasing");
                    continue;
                }

                if !hello.protocol_version.starts_with("1.") {
                    send_error(
                        &tx,
                        hello.seq,
                        ErrorCode::ProtocolMismatch,
                        &format!("protocol version {} not supported", hello.protocol_version),
                    );
                    break;
                }

                let wants_control = hello.role.unwrap_or(RequestedRole::Auto) != RequestedRole::Observer;
                let (role, controller_id) = {
                    let mut registry = state.registry.write().await;
                    if let Some(client) = registry.get_mut(client_id) {
                        client.handshaken = true;
                        client.last_seq = Some(hello.seq);
                        client.stream_observations = hello.stream_observations;
                    }
                    let role = if registry.controller == Some(client_id)
                        || (wants_control && registry.controller.is_none())
                    {
                        registry.controller = Some(client_id);
                        AssignedRole::Controller
                    } else {
                        AssignedRole::Observer
                    };
                    state.publish(&registry);
                    (role, registry.controller)
                };
                info!(client_id, client = %hello.client.name, ?role, "handshake complete");

                send_json(
                    &tx,
                    &create_welcome(hello.seq, client_id as u64, role, controller_id.map(|id| id as u64)),
                );

                if hello.stream_observations {
                    match command_tx.try_send(InboundCommand {
                        client_id,
                        seq: hello.seq,
                        payload: InboundPayload::SnapshotRequest,
                    }) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => {
                            send_error(
                                &tx,
                                hello.seq,
                                ErrorCode::Backpressure,
                                "command queue is full; no initial observation",
                            );
                        }
                        Err(TrySendError::Closed(_)) => break,
                    }
                }
            }

            Ok(ParsedMessage::Command(cmd)) => {
                if !state.is_handshaken(client_id).await {
                    send_error(&tx, cmd.seq, ErrorCode::HandshakeRequired, "send hello before command");
                    continue;
                }
                if !state.check_and_update_seq(client_id, cmd.seq).await {
                    send_error(&tx, cmd.seq, ErrorCode::StaleSeq, "seq must be strictly increasing");
                    continue;
                }
                if !state.is_controller(client_id).await {
                    send_error(&tx, cmd.seq, ErrorCode::NotController, "only the controller may send commands");
                    continue;
                }

                let action = match map_command(&cmd.action) {
                    Ok(action) => action,
                    Err((code, message)) => {
                        send_error(&tx, cmd.seq, code, &message);
                        continue;
                    }
                };

                match command_tx.try_send(InboundCommand {
                    client_id,
                    seq: cmd.seq,
                    payload: InboundPayload::Command(action),
                }) {
                    // The game loop acks once the command is applied.
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        send_error(&tx, cmd.seq, ErrorCode::Backpressure, "command queue is full");
                    }
                    Err(TrySendError::Closed(_)) => break,
                }
            }

            Ok(ParsedMessage::Unknown(unknown)) => {
                send_error(&tx, unknown.seq, ErrorCode::InvalidCommand, "unknown message type");
            }

            Err(e) => {
                let seq = extract_seq_best_effort(trimmed).unwrap_or(0);
                send_error(&tx, seq, ErrorCode::InvalidCommand, &format!("parse error: {e}"));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn config_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_addr().unwrap().port(), 7878);
    }

    #[test]
    fn config_overrides_and_bad_values() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("MEMORY_AI_HOST", "0.0.0.0"),
            ("MEMORY_AI_PORT", "9000"),
            ("MEMORY_AI_MAX_PENDING", "nope"),
        ]));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_pending_commands, 16);
    }

    #[test]
    fn invalid_host_is_reported() {
        let config = ServerConfig {
            host: "not a host".into(),
            ..ServerConfig::default()
        };
        assert!(matches!(
            config.socket_addr(),
            Err(AdapterError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn registry_status_tracks_controller() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut registry = Registry::default();
        registry.clients.push(ClientHandle {
            id: 1,
            addr: "127.0.0.1:1".parse().unwrap(),
            handshaken: true,
            stream_observations: false,
            last_seq: None,
            tx,
        });
        registry.controller = Some(1);
        assert_eq!(
            registry.status(),
            AdapterStatus {
                client_count: 1,
                controller_id: Some(1)
            }
        );
    }
}
