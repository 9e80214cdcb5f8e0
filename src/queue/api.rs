//! Public API for the queue system
//!
//! This module provides the complete public API for the blocking message queue.
//! External modules should import from here rather than directly from internal modules.
//! See module documentation for complete usage examples and architecture details.

// Core queue component
pub use crate::queue::internal::MessageQueue;

// Message type
pub use crate::queue::message::Message;

// Error handling
pub use crate::queue::error::{QueueError, QueueResult};

// Diagnostics
pub use crate::queue::types::QueueStats;
