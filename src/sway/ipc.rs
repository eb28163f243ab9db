//! Low-level i3-compatible IPC transport.
//!
//! Communicates directly with sway through the Unix socket named by
//! `$SWAYSOCK` (falling back to `$I3SOCK`), avoiding any `swaymsg` child
//! process or third-party client crate.
//!
//! # Wire format
//!
//! Every message and reply is framed the same way:
//!
//! ```text
//! "i3-ipc" <payload length: u32> <message type: u32> <payload>
//! ```
//!
//! with both integers in native byte order.  The switcher only uses two
//! message types: [`RUN_COMMAND`] (payload is the command text, reply is a
//! JSON array of per-command results) and [`GET_TREE`] (empty payload,
//! reply is the layout tree as JSON).

use crate::tree::Node;
use serde::Deserialize;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Magic bytes opening every IPC frame.
pub const MAGIC: &[u8; 6] = b"i3-ipc";
/// Frame header length: magic + payload length + message type.
pub const HEADER_LEN: usize = 14;

/// Message type: run one or more commands.
pub const RUN_COMMAND: u32 = 0;
/// Message type: query the layout tree.
pub const GET_TREE: u32 = 4;

/// Errors that can occur when talking to sway.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("neither SWAYSOCK nor I3SOCK is set")]
    SocketPathUnset,
    #[error("connect to {}: {}", .path.display(), .source)]
    Connect {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed reply: {0}")]
    Protocol(String),
    #[error("command rejected: {0}")]
    CommandRejected(String),
}

/// Resolve the IPC socket path from the environment.
fn socket_path() -> Result<PathBuf, IpcError> {
    std::env::var("SWAYSOCK")
        .or_else(|_| std::env::var("I3SOCK"))
        .map(PathBuf::from)
        .map_err(|_| IpcError::SocketPathUnset)
}

/// Frame a payload into a complete IPC message.
pub fn encode_message(message_type: u32, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN + payload.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&(payload.len() as u32).to_ne_bytes());
    buf.extend_from_slice(&message_type.to_ne_bytes());
    buf.extend_from_slice(payload);
    buf
}

/// Parse a reply header into `(payload length, message type)`.
pub fn decode_header(header: &[u8; HEADER_LEN]) -> Result<(u32, u32), IpcError> {
    if &header[..MAGIC.len()] != MAGIC {
        return Err(IpcError::Protocol("bad magic".into()));
    }
    let length = u32::from_ne_bytes([header[6], header[7], header[8], header[9]]);
    let message_type = u32::from_ne_bytes([header[10], header[11], header[12], header[13]]);
    Ok((length, message_type))
}

/// Send one request and return the raw reply payload.
///
/// Each request opens a short-lived connection; sway replies with a frame
/// of the same message type.
pub fn request(message_type: u32, payload: &[u8]) -> Result<Vec<u8>, IpcError> {
    let path = socket_path()?;
    let mut stream =
        UnixStream::connect(&path).map_err(|source| IpcError::Connect { path, source })?;

    stream.write_all(&encode_message(message_type, payload))?;

    let mut header = [0u8; HEADER_LEN];
    stream.read_exact(&mut header)?;
    let (length, reply_type) = decode_header(&header)?;
    if reply_type != message_type {
        return Err(IpcError::Protocol(format!(
            "expected reply type {}, got {}",
            message_type, reply_type
        )));
    }

    let mut reply = vec![0u8; length as usize];
    stream.read_exact(&mut reply)?;
    Ok(reply)
}

/// Query the layout tree.
pub fn get_tree() -> Result<Node, IpcError> {
    let reply = request(GET_TREE, b"")?;
    Ok(serde_json::from_slice(&reply)?)
}

/// Per-command result inside a `RUN_COMMAND` reply.
#[derive(Deserialize)]
struct CommandOutcome {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Run a command and check every per-command result for success.
pub fn run_command(command: &str) -> Result<(), IpcError> {
    let reply = request(RUN_COMMAND, command.as_bytes())?;
    let outcomes: Vec<CommandOutcome> = serde_json::from_slice(&reply)?;
    for outcome in outcomes {
        if !outcome.success {
            return Err(IpcError::CommandRejected(
                outcome.error.unwrap_or_else(|| command.to_string()),
            ));
        }
    }
    Ok(())
}

//  Tests
