//! Generic error handling utilities
//!
//! Provides unified error handling across the queue, demo and configuration
//! error types while keeping one logging pattern for fatal failures.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// Generic error handling functions use this to decide whether to show the
/// error's own message or a generic context line with debug details.
///
/// # Implementation Consistency
/// When `is_user_actionable()` returns `true`, `user_message()` should return
/// `Some(message)` with a helpful, actionable message. When it returns
/// `false`, `user_message()` should return `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error contains a specific, user-actionable message
    /// that should be displayed directly to the user
    ///
    /// Examples of user-actionable errors:
    /// - Malformed configuration files
    /// - Invalid argument values
    ///
    /// Examples of system errors:
    /// - Poisoned queue locks
    /// - Failure writing demo output
    fn is_user_actionable(&self) -> bool;

    /// Returns the specific user message if this is a user-actionable error
    fn user_message(&self) -> Option<&str>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// - User-actionable errors log their own message
/// - System errors log `operation_context` only
/// - Full details always go to debug level
///
/// # Examples
/// ```rust,no_run
/// # use msgpass::core::error_handling::log_error_with_context;
/// # use msgpass::queue::QueueError;
/// let error = QueueError::SynchronizationFailure { message: "poisoned".to_string() };
/// log_error_with_context(&error, "Relaying ping-pong messages");
/// // Logs: "FATAL: Relaying ping-pong messages"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    log::error!("FATAL: {}", fatal_line(error, operation_context));
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

/// Pick the primary line shown for a fatal error
fn fatal_line<'a, E: ContextualError>(error: &'a E, operation_context: &'a str) -> &'a str {
    if error.is_user_actionable() {
        error.user_message().unwrap_or(operation_context)
    } else {
        operation_context
    }
}
