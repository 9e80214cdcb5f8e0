//! Blocking Message Queue Component
//!
//! A thread-safe, unbounded FIFO queue for passing small fixed-shape messages
//! between threads. Producers never block; receivers block until a message
//! is available or the queue is closed.
//!
//! # Overview
//!
//! - **Multiple Producers**: Any number of threads can send concurrently
//! - **Multiple Consumers**: Each message is delivered to exactly one receiver
//! - **Strict FIFO**: Messages are received in the order they were sent
//! - **Tag Filtering**: Pending messages can be removed by tag (`what`)
//! - **Graceful Shutdown**: Closing the queue wakes every blocked receiver
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐  ┌────────────┐
//! │ Producer A │  │ Producer B │
//! └─────┬──────┘  └─────┬──────┘
//!       │ send          │ send
//!       ▼               ▼
//! ┌──────────────────────────────────────┐
//! │ MessageQueue                         │
//! │  Mutex ┌───┬───┬───┬───┬───┐         │
//! │        │ 1 │ 2 │ 3 │ 4 │...│ ◀─ back │
//! │        └───┴───┴───┴───┴───┘         │
//! │  Condvar (not empty)   ▲ front       │
//! └────────────────────────┼─────────────┘
//!          receive │       │ receive
//!        ┌─────────┴┐    ┌─┴─────────┐
//!        │Consumer A│    │Consumer B │  (each message goes to one)
//!        └──────────┘    └───────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use msgpass::queue::{MessageQueue, QueueError};
//!
//! let queue = MessageQueue::new();
//! queue.send(1, 10, 20, ()).unwrap();
//! queue.send(2, 30, 40, ()).unwrap();
//!
//! // Peek does not remove anything
//! assert_eq!(queue.peek().unwrap().map(|m| m.what), Some(1));
//! assert_eq!(queue.count().unwrap(), 2);
//!
//! // Drop every message tagged 1
//! assert_eq!(queue.clear_msg_type(1).unwrap(), 1);
//!
//! let message = queue.receive().unwrap();
//! assert_eq!((message.what, message.arg1, message.arg2), (2, 30, 40));
//!
//! queue.close().unwrap();
//! assert_eq!(queue.receive(), Err(QueueError::Closed));
//! ```

pub mod api;
mod error;
mod internal;
mod message;
mod types;

pub use error::{QueueError, QueueResult};
pub use internal::MessageQueue;
pub use message::Message;
pub use types::QueueStats;

#[cfg(test)]
mod tests;
