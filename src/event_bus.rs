//! Channels between the host transport threads and the panel.
//!
//! - Inbound: tokio mpsc, stdin reader thread → frame loop
//! - Outbound: crossbeam, command channel → stdout writer thread
//!
//! The panel itself is single-threaded; these are the only crossings.

/// Inbound channel capacity.
/// The reader blocks when the frame loop falls this far behind.
pub const CHANNEL_CAPACITY: usize = 64;
