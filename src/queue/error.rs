//! Queue Error Types

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// The queue was closed; no further messages will be accepted or delivered
    #[error("Queue is closed")]
    Closed,

    /// The lock or condition variable guarding the queue is unusable
    #[error("Synchronisation failure: {message}")]
    SynchronizationFailure { message: String },
}

impl crate::core::error_handling::ContextualError for QueueError {
    fn is_user_actionable(&self) -> bool {
        false // Queue errors are internal to the process
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
