//! Protocol module - JSON message types for the control adapter
//!
//! Line-delimited JSON. Every message carries `type` and `seq`; `ts` is a
//! wall-clock timestamp in milliseconds and is optional on inbound messages.

use serde::{Deserialize, Serialize};

use crate::core::{GameEvent, GameSnapshot};
use crate::types::{CardId, DifficultyLevel, GameAction, Language};

pub const PROTOCOL_VERSION: &str = "1.0.0";
pub const GAME_ID: &str = "tui-memory";

// ============== Client -> Game Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HelloType {
    #[default]
    #[serde(rename = "hello")]
    Hello,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CommandType {
    #[default]
    #[serde(rename = "command")]
    Command,
}

/// Client hello message (first message on a connection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: HelloType,
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
    pub client: ClientInfo,
    pub protocol_version: String,
    #[serde(default)]
    pub stream_observations: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RequestedRole>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestedRole {
    Auto,
    Controller,
    Observer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignedRole {
    Controller,
    Observer,
}

/// Command message (controller only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: CommandType,
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
    #[serde(flatten)]
    pub action: CommandAction,
}

/// Wire form of a game command, tagged by `action`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum CommandAction {
    Select { card: u32 },
    NewGame,
    PlayAgain,
    SetDifficulty { difficulty: String },
    SetLanguage { language: String },
}

// ============== Game -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "handshake_required")]
    HandshakeRequired,
    #[serde(rename = "protocol_mismatch")]
    ProtocolMismatch,
    #[serde(rename = "not_controller")]
    NotController,
    #[serde(rename = "invalid_command")]
    InvalidCommand,
    #[serde(rename = "stale_seq")]
    StaleSeq,
    #[serde(rename = "config_error")]
    ConfigError,
    #[serde(rename = "backpressure")]
    Backpressure,
}

/// Welcome message (response to hello)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub seq: u64,
    pub ts: u64,
    pub protocol_version: String,
    pub client_id: u64,
    pub role: AssignedRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller_id: Option<u64>,
    pub game_id: String,
}

/// Acknowledgment sent once the game loop has applied a command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub seq: u64,
    pub ts: u64,
    /// False when the engine ignored the command (e.g. a face-up card).
    pub applied: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

/// Session observation.
///
/// Face-down cards carry only their id: content, icon and category are
/// withheld so the wire never reveals a hidden card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub seq: u64,
    pub ts: u64,
    pub generation: u32,
    pub difficulty: String,
    pub language: String,
    pub phase: String,
    pub grid: GridSize,
    pub cards: Vec<CardObservation>,
    pub moves: u32,
    pub elapsed_ms: u64,
    pub elapsed: String,
    pub started: bool,
    pub flipped_count: u8,
    pub matched_count: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_event: Option<LastEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub cols: u8,
    pub rows: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardObservation {
    pub id: u32,
    pub face_up: bool,
    pub matched: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastEvent {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cards: Vec<u32>,
}

impl From<GameEvent> for LastEvent {
    fn from(ev: GameEvent) -> Self {
        let (kind, cards) = match ev {
            GameEvent::NewGame { .. } => ("newGame", vec![]),
            GameEvent::Flipped(id) => ("flipped", vec![id.0]),
            GameEvent::Matched(a, b) => ("matched", vec![a.0, b.0]),
            GameEvent::Mismatched(a, b) => ("mismatched", vec![a.0, b.0]),
            GameEvent::FlippedBack => ("flippedBack", vec![]),
            GameEvent::Won { .. } => ("won", vec![]),
        };
        Self {
            kind: kind.to_string(),
            cards,
        }
    }
}

// ============== Message Parsing ==============

/// Parsed incoming message
#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Hello(HelloMessage),
    Command(CommandMessage),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
}

/// Parse one inbound line.
///
/// An unrecognized `type` is not a parse error; it comes back as
/// [`ParsedMessage::Unknown`] so the server can answer with the right `seq`.
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "hello")]
        Hello(HelloMessage),
        #[serde(rename = "command")]
        Command(CommandMessage),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Hello(m)) => Ok(ParsedMessage::Hello(m)),
        Ok(InboundMessage::Command(m)) => Ok(ParsedMessage::Command(m)),
        Err(e) => {
            #[derive(Debug, Deserialize)]
            struct Header {
                #[serde(rename = "type")]
                msg_type: Option<String>,
                seq: Option<u64>,
            }
            let header = serde_json::from_str::<Header>(json)?;
            match header.msg_type.as_deref() {
                Some("hello") | Some("command") => Err(e),
                _ => Ok(ParsedMessage::Unknown(UnknownMessage {
                    seq: header.seq.unwrap_or(0),
                })),
            }
        }
    }
}

/// Best-effort `seq` extraction from a line that failed to parse.
pub fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let start = s.find("\"seq\"")?;
    let after_key = &s[start + 5..];
    let colon = after_key.find(':')?;
    let rest = after_key[colon + 1..].trim_start();
    let end = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if end == 0 {
        return None;
    }
    rest[..end].parse::<u64>().ok()
}

/// Map a wire command onto an engine action.
pub fn map_command(action: &CommandAction) -> Result<GameAction, (ErrorCode, String)> {
    match action {
        CommandAction::Select { card } => Ok(GameAction::SelectCard(CardId(*card))),
        CommandAction::NewGame => Ok(GameAction::NewGame),
        CommandAction::PlayAgain => Ok(GameAction::PlayAgain),
        CommandAction::SetDifficulty { difficulty } => DifficultyLevel::from_str(difficulty)
            .map(GameAction::SetDifficulty)
            .ok_or_else(|| {
                (
                    ErrorCode::InvalidCommand,
                    format!("unknown difficulty: {difficulty}"),
                )
            }),
        CommandAction::SetLanguage { language } => Language::from_str(language)
            .map(GameAction::SetLanguage)
            .ok_or_else(|| {
                (
                    ErrorCode::InvalidCommand,
                    format!("unknown language: {language}"),
                )
            }),
    }
}

// ============== Utility Functions ==============

pub fn create_command(seq: u64, action: CommandAction) -> CommandMessage {
    CommandMessage {
        msg_type: CommandType::Command,
        seq,
        ts: current_timestamp_ms(),
        action,
    }
}

pub fn create_hello(seq: u64, client_name: &str, role: Option<RequestedRole>) -> HelloMessage {
    HelloMessage {
        msg_type: HelloType::Hello,
        seq,
        ts: current_timestamp_ms(),
        client: ClientInfo {
            name: client_name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        protocol_version: PROTOCOL_VERSION.to_string(),
        stream_observations: true,
        role,
    }
}

pub fn create_welcome(
    seq: u64,
    client_id: u64,
    role: AssignedRole,
    controller_id: Option<u64>,
) -> WelcomeMessage {
    WelcomeMessage {
        msg_type: "welcome".to_string(),
        seq,
        ts: current_timestamp_ms(),
        protocol_version: PROTOCOL_VERSION.to_string(),
        client_id,
        role,
        controller_id,
        game_id: GAME_ID.to_string(),
    }
}

pub fn create_ack(seq: u64, applied: bool) -> AckMessage {
    AckMessage {
        msg_type: "ack".to_string(),
        seq,
        ts: current_timestamp_ms(),
        applied,
    }
}

pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: "error".to_string(),
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Build an observation from a snapshot, hiding face-down cards.
pub fn build_observation(
    seq: u64,
    snap: &GameSnapshot,
    last_event: Option<GameEvent>,
) -> ObservationMessage {
    let cards = snap
        .cards
        .iter()
        .map(|c| {
            let visible = c.face_up || c.matched;
            CardObservation {
                id: c.id.0,
                face_up: c.face_up,
                matched: c.matched,
                content: visible.then(|| c.content.clone()),
                icon: if visible { c.icon.clone() } else { None },
                category: visible.then(|| c.category.as_str().to_string()),
            }
        })
        .collect();

    ObservationMessage {
        msg_type: "observation".to_string(),
        seq,
        ts: current_timestamp_ms(),
        generation: snap.generation,
        difficulty: snap.difficulty.as_str().to_string(),
        language: snap.language.as_str().to_string(),
        phase: snap.phase.as_str().to_string(),
        grid: GridSize {
            cols: snap.grid_cols,
            rows: snap.grid_rows,
        },
        cards,
        moves: snap.moves,
        elapsed_ms: snap.elapsed_ms,
        elapsed: snap.elapsed_label(),
        started: snap.started,
        flipped_count: snap.flipped_count,
        matched_count: snap.matched_count,
        last_event: last_event.map(LastEvent::from),
    }
}

fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
