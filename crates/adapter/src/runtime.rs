//! Adapter runtime integration.
//!
//! Bridges the synchronous game loop with the async TCP server. The server
//! runs on its own tokio runtime; the engine stays on the loop thread and
//! only sees commands through [`Adapter::try_recv`].

use anyhow::Result;
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

use crate::core::{GameEvent, GameSnapshot, MemoryGame};
use crate::protocol::{
    build_observation, create_ack, create_error, AckMessage, ErrorCode, ErrorMessage,
    ObservationMessage,
};
use crate::server::{run_server, AdapterStatus, ServerConfig};
use crate::types::GameAction;

/// Command delivered to the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundCommand {
    pub client_id: usize,
    pub seq: u64,
    pub payload: InboundPayload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundPayload {
    Command(GameAction),
    /// A streaming client just completed its handshake.
    SnapshotRequest,
}

/// Outbound message to be delivered by the server.
#[derive(Debug, Clone)]
pub enum OutboundMessage {
    Ack { client_id: usize, ack: AckMessage },
    Error { client_id: usize, err: ErrorMessage },
    Observation { client_id: usize, obs: ObservationMessage },
    BroadcastObservation { obs: ObservationMessage },
}

/// Apply one inbound command to the engine and build the reply.
///
/// `obs_seq` numbers the observation sent back for snapshot requests.
pub fn process_command(game: &mut MemoryGame, cmd: &InboundCommand, obs_seq: u64) -> OutboundMessage {
    match cmd.payload {
        InboundPayload::Command(action) => match game.apply_action(action) {
            Ok(applied) => OutboundMessage::Ack {
                client_id: cmd.client_id,
                ack: create_ack(cmd.seq, applied),
            },
            Err(e) => {
                warn!(client_id = cmd.client_id, error = %e, "adapter command failed");
                OutboundMessage::Error {
                    client_id: cmd.client_id,
                    err: create_error(cmd.seq, ErrorCode::ConfigError, &e.to_string()),
                }
            }
        },
        InboundPayload::SnapshotRequest => OutboundMessage::Observation {
            client_id: cmd.client_id,
            obs: build_observation(obs_seq, &game.snapshot(), None),
        },
    }
}

/// Running adapter instance.
pub struct Adapter {
    _rt: Runtime,
    cmd_rx: mpsc::Receiver<InboundCommand>,
    out_tx: mpsc::UnboundedSender<OutboundMessage>,
    status_rx: watch::Receiver<AdapterStatus>,
    obs_seq: u64,
}

impl Adapter {
    /// Start the adapter from environment variables.
    ///
    /// Returns `Ok(None)` unless the adapter is enabled.
    pub fn start_from_env() -> Result<Option<Self>> {
        if !ServerConfig::is_enabled() {
            info!("adapter disabled");
            return Ok(None);
        }
        Self::start(ServerConfig::from_env()).map(Some)
    }

    pub fn start(config: ServerConfig) -> Result<Self> {
        // Fail fast on a bad address instead of inside the server task.
        config.socket_addr()?;

        let max_pending = config.max_pending_commands.max(1);
        let (cmd_tx, cmd_rx) = mpsc::channel::<InboundCommand>(max_pending);
        let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();
        let (status_tx, status_rx) = watch::channel(AdapterStatus::default());

        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("memory-adapter")
            .enable_all()
            .build()?;
        rt.spawn(async move {
            if let Err(e) = run_server(config, cmd_tx, out_rx, None, Some(status_tx)).await {
                warn!(error = %e, "adapter server stopped");
            }
        });

        Ok(Self {
            _rt: rt,
            cmd_rx,
            out_tx,
            status_rx,
            obs_seq: 0,
        })
    }

    pub fn try_recv(&mut self) -> Option<InboundCommand> {
        self.cmd_rx.try_recv().ok()
    }

    pub fn send(&self, msg: OutboundMessage) {
        let _ = self.out_tx.send(msg);
    }

    pub fn status(&self) -> AdapterStatus {
        *self.status_rx.borrow()
    }

    fn next_obs_seq(&mut self) -> u64 {
        self.obs_seq += 1;
        self.obs_seq
    }

    /// Apply a command from a client and queue the reply.
    pub fn handle(&mut self, game: &mut MemoryGame, cmd: &InboundCommand) {
        let seq = self.next_obs_seq();
        let reply = process_command(game, cmd, seq);
        self.send(reply);
    }

    /// Send an observation to every streaming client.
    pub fn broadcast(&mut self, snap: &GameSnapshot, last_event: Option<GameEvent>) {
        let seq = self.next_obs_seq();
        self.send(OutboundMessage::BroadcastObservation {
            obs: build_observation(seq, snap, last_event),
        });
    }
}
