//! Generic Shutdown Coordination
//!
//! Turns OS termination signals into a broadcast shutdown notification that
//! blocking work (such as the ping-pong threads) can react to by closing its
//! queues.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Shared shutdown state: a flag plus a broadcast fired on every request
pub struct ShutdownCoordinator {
    tx: broadcast::Sender<()>,
    requested: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    pub fn new() -> (Self, broadcast::Receiver<()>) {
        // Room for a burst of signals before the first is consumed
        let (tx, rx) = broadcast::channel(8);
        let coordinator = Self {
            tx,
            requested: Arc::new(AtomicBool::new(false)),
        };
        (coordinator, rx)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Request shutdown without a signal
    pub fn trigger_shutdown(&self) {
        // Release pairs with the Acquire in is_shutdown_requested()
        self.requested.store(true, Ordering::Release);
        let _ = self.tx.send(());
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    /// Run `future_fn` with signal handling installed
    ///
    /// The closure receives the coordinator and a receiver that fires on the
    /// first signal. Must be called from within a tokio runtime.
    pub async fn guard<F, Fut, R, E>(future_fn: F) -> Result<R, E>
    where
        F: FnOnce(Self, broadcast::Receiver<()>) -> Fut,
        Fut: std::future::Future<Output = Result<R, E>>,
    {
        let (coordinator, rx) = Self::new();
        setup_signal_handlers(coordinator.tx.clone(), coordinator.requested.clone());
        future_fn(coordinator, rx).await
    }
}

/// Record a received signal; a second signal forces immediate exit
fn on_signal(
    tx: &broadcast::Sender<()>,
    requested: &AtomicBool,
    signal_count: &AtomicUsize,
    name: &str,
) {
    let prev = signal_count.fetch_add(1, Ordering::AcqRel);
    requested.store(true, Ordering::Release);
    let _ = tx.send(());
    if prev >= 1 {
        log::warn!("{} received again; exiting", name);
        std::process::exit(130);
    }
    log::info!("{} received; shutting down (repeat to force exit)", name);
}

/// Set up signal handlers for graceful shutdown
fn setup_signal_handlers(shutdown_tx: broadcast::Sender<()>, shutdown_requested: Arc<AtomicBool>) {
    let signal_count = Arc::new(AtomicUsize::new(0));

    #[cfg(unix)]
    {
        // Writing to a closed stdout pipe should end the process, not panic
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }

        use tokio::signal::unix::{signal, SignalKind};
        let signals = [
            (SignalKind::terminate(), "SIGTERM"),
            (SignalKind::hangup(), "SIGHUP"),
            (SignalKind::quit(), "SIGQUIT"),
        ];

        for (kind, name) in signals {
            let tx = shutdown_tx.clone();
            let requested = shutdown_requested.clone();
            let sig_ctr = signal_count.clone();

            tokio::spawn(async move {
                if let Ok(mut sig) = signal(kind) {
                    while sig.recv().await.is_some() {
                        on_signal(&tx, &requested, &sig_ctr, name);
                    }
                }
            });
        }
    }

    // Ctrl-C is handled the same way on every platform
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            on_signal(&shutdown_tx, &shutdown_requested, &signal_count, "Ctrl-C");
        }
    });
}
