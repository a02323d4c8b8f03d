//! Stdio transport to the host process.
//!
//! - Reader thread: JSON lines on stdin → `HostMessage`s for the run loop
//! - Writer thread: command strings from the panel → stdout, one per line
//!
//! Both ends are blocking, so they live on their own threads and the panel
//! only ever touches channels.

use crate::host::HostMessage;
use crossbeam_channel::{Receiver, Sender};
use deck_bridge::{BridgeKind, CommandChannel, InvokeBridge, MessageHandlerBridge};
use log::{debug, error, info, warn};
use std::io::{self, BufRead, Write};
use std::thread;
use tokio::sync::mpsc;

/// Parse one inbound line. Blank lines are skipped, malformed ones logged.
pub fn parse_line(line: &str) -> Option<HostMessage> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str(line) {
        Ok(msg) => Some(msg),
        Err(e) => {
            warn!("Ignoring malformed host message ({}): {}", e, line);
            None
        }
    }
}

/// Forward every message in `reader` until EOF or until the panel goes away.
pub fn forward_messages<R: BufRead>(reader: R, tx: &mpsc::Sender<HostMessage>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read from host: {}", e);
                break;
            }
        };
        if let Some(msg) = parse_line(&line) {
            if tx.blocking_send(msg).is_err() {
                debug!("Panel stopped, no longer reading host input");
                break;
            }
        }
    }
}

/// Read host messages from stdin on a background thread. Dropping the
/// sender at EOF tells the run loop the host is gone.
pub fn spawn_reader(tx: mpsc::Sender<HostMessage>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdin = io::stdin();
        forward_messages(stdin.lock(), &tx);
        info!("Host input closed");
    })
}

/// Write outbound messages until every sender is dropped.
pub fn write_messages<W: Write>(mut out: W, rx: &Receiver<String>) -> io::Result<()> {
    for message in rx.iter() {
        writeln!(out, "{}", message)?;
        out.flush()?;
    }
    Ok(())
}

pub fn spawn_writer(rx: Receiver<String>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdout = io::stdout();
        if let Err(e) = write_messages(stdout.lock(), &rx) {
            error!("Failed to write to host: {}", e);
        }
    })
}

/// Build the command channel for the configured host binding. Sending
/// never blocks; if the writer is gone the message is dropped.
pub fn command_channel(kind: BridgeKind, handler: &str, tx: Sender<String>) -> CommandChannel {
    let forward = move |message: &str| {
        if tx.send(message.to_string()).is_err() {
            debug!("Host writer closed, dropping '{}'", message);
        }
    };
    match kind {
        BridgeKind::Invoke => CommandChannel::new(InvokeBridge::new(forward)),
        BridgeKind::MessageHandler => {
            CommandChannel::new(MessageHandlerBridge::new(handler, forward))
        }
    }
}
