//! Ping-pong demo
//!
//! Two printer threads bounce a single message between a pair of queues.
//! Each printer blocks on its inbox, prints its text when the message
//! arrives, then forwards the message to the other printer's inbox. With the
//! default texts the output is an endless stream of `Hello World!` lines.
//!
//! ```text
//!        to_hello                    to_world
//!   +----------------+  forward  +----------------+
//!   | hello printer  | --------> | world printer  |
//!   +----------------+ <-------- +----------------+
//!                       forward
//! ```
//!
//! Closing either queue stops both printers.

use crate::app::cli::config::Settings;
use crate::queue::api::{Message, MessageQueue, QueueError, QueueStats};
use std::io::Write;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Tag of the message passed between the printers
pub const PING: i32 = 1;

/// Errors that stop the demo
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("Queue failure in {label} printer: {source}")]
    Queue {
        label: String,
        #[source]
        source: QueueError,
    },
    #[error("Failed to write output in {label} printer: {source}")]
    Output {
        label: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to start {label} printer thread: {source}")]
    Spawn {
        label: String,
        #[source]
        source: std::io::Error,
    },
    #[error("The {label} printer thread panicked")]
    ThreadPanicked { label: String },
}

impl crate::core::error_handling::ContextualError for DemoError {
    fn is_user_actionable(&self) -> bool {
        // A broken stdout pipe is the user's doing; everything else is internal
        matches!(self, DemoError::Output { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            DemoError::Output { .. } => Some("Could not write demo output"),
            _ => None,
        }
    }
}

/// What one printer does
#[derive(Debug, Clone, PartialEq)]
pub struct PrinterConfig {
    pub label: String,
    pub text: String,
    /// Stop after handling this many messages; `None` runs until closed
    pub rounds: Option<u64>,
    /// Pause after printing, before forwarding
    pub interval: Option<Duration>,
}

/// Run one printer until its round limit or until a queue closes
///
/// Returns the number of messages handled. A closed inbox or outbox is a
/// normal stop, not an error.
pub fn run_printer<P, W>(
    config: &PrinterConfig,
    inbox: &MessageQueue<P>,
    outbox: &MessageQueue<P>,
    out: &mut W,
) -> Result<u64, DemoError>
where
    W: Write + ?Sized,
{
    let mut handled = 0u64;
    log::debug!("{} printer started", config.label);

    while config.rounds.is_none_or(|limit| handled < limit) {
        let step = inbox.receive_with(|message| -> Result<bool, DemoError> {
            out.write_all(config.text.as_bytes())
                .and_then(|_| out.flush())
                .map_err(|source| DemoError::Output {
                    label: config.label.clone(),
                    source,
                })?;

            if let Some(interval) = config.interval {
                thread::sleep(interval);
            }

            match outbox.send_message(message) {
                Ok(()) => Ok(true),
                Err(QueueError::Closed) => Ok(false),
                Err(source) => Err(DemoError::Queue {
                    label: config.label.clone(),
                    source,
                }),
            }
        });

        match step {
            Ok(Ok(forwarded)) => {
                handled += 1;
                if !forwarded {
                    log::debug!("{} printer: peer queue closed", config.label);
                    break;
                }
            }
            Ok(Err(e)) => return Err(e),
            Err(QueueError::Closed) => {
                log::debug!("{} printer: inbox closed", config.label);
                break;
            }
            Err(source) => {
                return Err(DemoError::Queue {
                    label: config.label.clone(),
                    source,
                })
            }
        }
    }

    log::debug!("{} printer finished after {} messages", config.label, handled);
    Ok(handled)
}

/// Messages handled by each printer, with the final state of each inbox
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct PingPongReport {
    pub hello_handled: u64,
    pub world_handled: u64,
    pub hello_queue: QueueStats,
    pub world_queue: QueueStats,
}

/// The pair of queues and the printer settings
pub struct PingPong {
    to_hello: Arc<MessageQueue<()>>,
    to_world: Arc<MessageQueue<()>>,
    hello: PrinterConfig,
    world: PrinterConfig,
}

impl PingPong {
    pub fn new(hello: PrinterConfig, world: PrinterConfig) -> Self {
        Self {
            to_hello: Arc::new(MessageQueue::new()),
            to_world: Arc::new(MessageQueue::new()),
            hello,
            world,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let printer = |label: &str, text: &str| PrinterConfig {
            label: label.to_string(),
            text: text.to_string(),
            rounds: settings.rounds,
            interval: settings.interval,
        };
        Self::new(
            printer("hello", &settings.hello_text),
            printer("world", &settings.world_text),
        )
    }

    /// Spawn both printers and seed the hello printer's inbox
    pub fn start<W>(self, hello_out: W, world_out: W) -> Result<PingPongHandle, DemoError>
    where
        W: Write + Send + 'static,
    {
        let stopper = PingPongStopper {
            queues: [self.to_hello.clone(), self.to_world.clone()],
        };

        let hello = spawn_printer(
            self.hello,
            self.to_hello.clone(),
            self.to_world.clone(),
            hello_out,
            stopper.clone(),
        )?;
        let world = match spawn_printer(
            self.world,
            self.to_world.clone(),
            self.to_hello.clone(),
            world_out,
            stopper.clone(),
        ) {
            Ok(world) => world,
            Err(e) => {
                stopper.stop();
                let _ = hello.1.join();
                return Err(e);
            }
        };

        let handle = PingPongHandle {
            hello,
            world,
            stopper,
        };
        if let Err(source) = self.to_hello.send_message(Message::new(PING, 2, 3, ())) {
            // Neither printer can ever be woken by a message now
            handle.stopper.stop();
            let _ = handle.join();
            return Err(DemoError::Queue {
                label: "main".to_string(),
                source,
            });
        }

        Ok(handle)
    }
}

type PrinterThread = (String, JoinHandle<Result<u64, DemoError>>);

fn spawn_printer<W>(
    config: PrinterConfig,
    inbox: Arc<MessageQueue<()>>,
    outbox: Arc<MessageQueue<()>>,
    mut out: W,
    stopper: PingPongStopper,
) -> Result<PrinterThread, DemoError>
where
    W: Write + Send + 'static,
{
    let label = config.label.clone();
    let handle = thread::Builder::new()
        .name(format!("{}-printer", label))
        .spawn(move || {
            let result = run_printer(&config, &inbox, &outbox, &mut out);
            if result.is_err() {
                // Otherwise the other printer waits forever
                stopper.stop();
            }
            result
        })
        .map_err(|source| DemoError::Spawn {
            label: label.clone(),
            source,
        })?;
    Ok((label, handle))
}

/// Closes both queues, which ends both printers
#[derive(Clone)]
pub struct PingPongStopper {
    queues: [Arc<MessageQueue<()>>; 2],
}

impl PingPongStopper {
    fn stats(&self) -> Result<[QueueStats; 2], DemoError> {
        let [to_hello, to_world] = &self.queues;
        let stats = |queue: &Arc<MessageQueue<()>>| {
            queue.stats().map_err(|source| DemoError::Queue {
                label: "main".to_string(),
                source,
            })
        };
        Ok([stats(to_hello)?, stats(to_world)?])
    }

    pub fn stop(&self) {
        for queue in &self.queues {
            if let Err(e) = queue.close() {
                log::warn!("Could not close ping-pong queue: {}", e);
            }
        }
    }
}

/// Running demo
pub struct PingPongHandle {
    hello: PrinterThread,
    world: PrinterThread,
    stopper: PingPongStopper,
}

impl PingPongHandle {
    pub fn stopper(&self) -> PingPongStopper {
        self.stopper.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.hello.1.is_finished() && self.world.1.is_finished()
    }

    /// Wait for both printers and collect their counts
    pub fn join(self) -> Result<PingPongReport, DemoError> {
        let hello = join_printer(self.hello);
        let world = join_printer(self.world);
        let [hello_queue, world_queue] = self.stopper.stats()?;
        Ok(PingPongReport {
            hello_handled: hello?,
            world_handled: world?,
            hello_queue,
            world_queue,
        })
    }
}

fn join_printer((label, handle): PrinterThread) -> Result<u64, DemoError> {
    handle
        .join()
        .map_err(|_| DemoError::ThreadPanicked { label })?
}
