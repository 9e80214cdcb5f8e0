//! Internal MessageQueue implementation
//!
//! This module provides the core queue functionality with:
//! - Strict FIFO ordering across all producers
//! - Blocking receive built on a mutex and a "not empty" condition variable
//! - Non-blocking peek, try-receive and tag-filtered removal
//! - A terminal closed state that wakes every blocked receiver

use crate::core::sync::{handle_condvar_wait, handle_mutex_poison};
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::message::Message;
use crate::queue::types::QueueStats;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Everything guarded by the queue lock
#[derive(Debug)]
struct QueueState<P> {
    messages: VecDeque<Message<P>>,
    closed: bool,
    sent: u64,
    received: u64,
    cleared: u64,
}

impl<P> QueueState<P> {
    fn new() -> Self {
        Self {
            messages: VecDeque::new(),
            closed: false,
            sent: 0,
            received: 0,
            cleared: 0,
        }
    }

    fn pop_front(&mut self) -> Option<Message<P>> {
        let message = self.messages.pop_front();
        if message.is_some() {
            self.received += 1;
        }
        message
    }
}

/// Thread-safe, unbounded, blocking FIFO message queue
///
/// Any number of threads may send to and receive from the same queue through
/// a shared reference (`Arc<MessageQueue<P>>` or a scoped borrow). Messages
/// are delivered in exactly the order they were sent; with several
/// receivers each message goes to exactly one of them.
///
/// Only the receive family blocks. Callbacks passed to `receive_with` and
/// `peek_with` run after the lock is released, so they may use the queue
/// themselves.
///
/// # Example
///
/// ```rust
/// use msgpass::queue::MessageQueue;
/// use std::sync::Arc;
/// use std::thread;
///
/// let queue = Arc::new(MessageQueue::new());
///
/// let producer = {
///     let queue = Arc::clone(&queue);
///     thread::spawn(move || queue.send(1, 2, 3, "hello"))
/// };
///
/// let message = queue.receive().unwrap();
/// assert_eq!(message.into_parts(), (1, 2, 3, "hello"));
/// producer.join().unwrap().unwrap();
/// ```
#[derive(Debug)]
pub struct MessageQueue<P = ()> {
    state: Mutex<QueueState<P>>,
    not_empty: Condvar,
}

impl<P> MessageQueue<P> {
    /// Create an empty, open queue
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState::new()),
            not_empty: Condvar::new(),
        }
    }

    fn lock(&self) -> QueueResult<MutexGuard<'_, QueueState<P>>> {
        handle_mutex_poison(self.state.lock(), |message| {
            QueueError::SynchronizationFailure { message }
        })
    }

    /// Append a message built from the four fields to the back of the queue
    ///
    /// Wakes at most one blocked receiver. Never blocks on capacity; fails
    /// only once the queue has been closed.
    pub fn send(&self, what: i32, arg1: i32, arg2: i32, payload: P) -> QueueResult<()> {
        self.send_message(Message::new(what, arg1, arg2, payload))
    }

    /// Append an already built message to the back of the queue
    pub fn send_message(&self, message: Message<P>) -> QueueResult<()> {
        {
            let mut state = self.lock()?;
            if state.closed {
                return Err(QueueError::Closed);
            }
            log::trace!(
                "send what={} arg1={} arg2={} (pending={})",
                message.what,
                message.arg1,
                message.arg2,
                state.messages.len() + 1
            );
            state.messages.push_back(message);
            state.sent += 1;
        }

        // Lock released before notifying so the woken receiver can take it
        self.not_empty.notify_one();
        Ok(())
    }

    /// Remove and return the front message, blocking while the queue is empty
    ///
    /// Messages still queued when the queue is closed are delivered first;
    /// after that every call returns `QueueError::Closed`.
    pub fn receive(&self) -> QueueResult<Message<P>> {
        let mut state = self.lock()?;

        // Re-check after every wake: wakeups may be spurious, and another
        // receiver may have taken the message we were woken for.
        loop {
            if let Some(message) = state.pop_front() {
                log::trace!("receive what={} (pending={})", message.what, state.messages.len());
                return Ok(message);
            }
            if state.closed {
                return Err(QueueError::Closed);
            }
            state = handle_condvar_wait(self.not_empty.wait(state), |message| {
                QueueError::SynchronizationFailure { message }
            })?;
        }
    }

    /// Blocking receive that hands the message to `handler` outside the lock
    ///
    /// Returns whatever the handler returns. The handler may call any
    /// operation on this or another queue.
    pub fn receive_with<F, R>(&self, handler: F) -> QueueResult<R>
    where
        F: FnOnce(Message<P>) -> R,
    {
        let message = self.receive()?;
        Ok(handler(message))
    }

    /// Receive with an upper bound on how long to wait
    ///
    /// Returns `Ok(None)` if no message arrived before `timeout` elapsed. A
    /// timeout too large to represent as a deadline waits like `receive`.
    pub fn receive_timeout(&self, timeout: Duration) -> QueueResult<Option<Message<P>>> {
        let deadline = Instant::now().checked_add(timeout);
        let mut state = self.lock()?;

        loop {
            if let Some(message) = state.pop_front() {
                return Ok(Some(message));
            }
            if state.closed {
                return Err(QueueError::Closed);
            }

            let Some(deadline) = deadline else {
                state = handle_condvar_wait(self.not_empty.wait(state), |message| {
                    QueueError::SynchronizationFailure { message }
                })?;
                continue;
            };

            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }

            let (guard, _) = handle_condvar_wait(
                self.not_empty.wait_timeout(state, deadline - now),
                |message| QueueError::SynchronizationFailure { message },
            )?;
            state = guard;
        }
    }

    /// Remove and return the front message without blocking
    ///
    /// Returns `Ok(None)` when the queue is empty but still open.
    pub fn try_receive(&self) -> QueueResult<Option<Message<P>>> {
        let mut state = self.lock()?;
        match state.pop_front() {
            Some(message) => Ok(Some(message)),
            None if state.closed => Err(QueueError::Closed),
            None => Ok(None),
        }
    }

    /// Remove every message tagged `what`, keeping the rest in order
    ///
    /// Returns the number of messages removed. Does not wake receivers.
    pub fn clear_msg_type(&self, what: i32) -> QueueResult<usize> {
        let mut state = self.lock()?;
        let original_len = state.messages.len();

        state.messages.retain(|message| message.what != what);

        let removed = original_len - state.messages.len();
        state.cleared += removed as u64;
        if removed > 0 {
            log::debug!("cleared {} message(s) with what={}", removed, what);
        }
        Ok(removed)
    }

    /// Number of messages currently queued
    pub fn count(&self) -> QueueResult<usize> {
        Ok(self.lock()?.messages.len())
    }

    pub fn is_empty(&self) -> QueueResult<bool> {
        Ok(self.lock()?.messages.is_empty())
    }

    /// Close the queue and wake every blocked receiver
    ///
    /// Returns `true` if this call closed the queue, `false` if it was
    /// already closed. Closing cannot be undone.
    pub fn close(&self) -> QueueResult<bool> {
        let newly_closed = {
            let mut state = self.lock()?;
            let newly_closed = !state.closed;
            state.closed = true;
            if newly_closed {
                log::debug!("queue closed with {} pending message(s)", state.messages.len());
            }
            newly_closed
        };

        self.not_empty.notify_all();
        Ok(newly_closed)
    }

    pub fn is_closed(&self) -> QueueResult<bool> {
        Ok(self.lock()?.closed)
    }

    /// Snapshot of the queue's counters
    pub fn stats(&self) -> QueueResult<QueueStats> {
        let state = self.lock()?;
        Ok(QueueStats {
            pending: state.messages.len(),
            sent: state.sent,
            received: state.received,
            cleared: state.cleared,
            closed: state.closed,
        })
    }
}

impl<P: Clone> MessageQueue<P> {
    /// Copy of the front message, or `None` if the queue is empty
    ///
    /// Never removes anything. The answer may be stale by the time it is
    /// returned if other threads are receiving.
    pub fn peek(&self) -> QueueResult<Option<Message<P>>> {
        Ok(self.lock()?.messages.front().cloned())
    }

    /// Pass a copy of the front message to `handler`, outside the lock
    ///
    /// Returns `true` if a message was present and the handler ran.
    pub fn peek_with<F>(&self, handler: F) -> QueueResult<bool>
    where
        F: FnOnce(Message<P>),
    {
        match self.peek()? {
            Some(message) => {
                handler(message);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl<P> Default for MessageQueue<P> {
    fn default() -> Self {
        Self::new()
    }
}
