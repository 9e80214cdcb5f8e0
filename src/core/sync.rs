//! Lock poisoning helpers
//!
//! A panic while a queue lock is held poisons it. These helpers turn the
//! resulting `PoisonError` into the caller's own error type, so the queue can
//! report `SynchronizationFailure` instead of panicking in turn.

use std::sync::{LockResult, PoisonError};

/// Convert a poisoned `Mutex::lock` result into an application error
///
/// # Examples
/// ```
/// use std::sync::Mutex;
/// use msgpass::core::sync::handle_mutex_poison;
/// use msgpass::queue::QueueError;
///
/// let mutex = Mutex::new(42);
/// let guard = handle_mutex_poison(
///     mutex.lock(),
///     |message| QueueError::SynchronizationFailure { message }
/// ).unwrap();
/// assert_eq!(*guard, 42);
/// ```
pub fn handle_mutex_poison<T, E>(
    result: LockResult<T>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<T, E> {
    result.map_err(|poison_err| error_constructor(describe("mutex poisoned", &poison_err)))
}

/// Convert a poisoned condition variable wait into an application error
///
/// `Condvar::wait` re-acquires the mutex before returning, so it reports
/// poisoning like `Mutex::lock`. Works for both the plain guard and the
/// `(guard, WaitTimeoutResult)` pair from `wait_timeout`.
pub fn handle_condvar_wait<T, E>(
    result: LockResult<T>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<T, E> {
    result.map_err(|poison_err| {
        error_constructor(describe(
            "mutex poisoned while waiting on condition variable",
            &poison_err,
        ))
    })
}

fn describe<T>(what: &str, poison_err: &PoisonError<T>) -> String {
    format!(
        "Internal synchronisation error ({}). A thread panicked while holding the queue lock: {}",
        what, poison_err
    )
}
