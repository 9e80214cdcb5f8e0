//! Type definitions for the queue system
//!
//! Diagnostic snapshots returned by the queue. Values are only accurate at
//! the instant they are taken.

/// Activity counters for a single queue
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct QueueStats {
    /// Messages currently waiting in the queue
    pub pending: usize,
    /// Messages accepted by send operations
    pub sent: u64,
    /// Messages removed by receive operations
    pub received: u64,
    /// Messages discarded by `clear_msg_type`
    pub cleared: u64,
    /// Whether the queue has been closed
    pub closed: bool,
}
