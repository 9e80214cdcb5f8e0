//! Application startup
//!
//! Resolves settings, starts logging, then runs the ping-pong demo under the
//! shutdown coordinator until it finishes or a signal arrives.

use crate::app::cli::args::Args;
use crate::app::cli::config::Settings;
use crate::app::ping_pong::{DemoError, PingPong, PingPongReport};
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::{flush_logging, init_logging};
use crate::core::shutdown::ShutdownCoordinator;
use crate::core::version::long_version;
use clap::Parser;
use std::io::IsTerminal;

pub const EXIT_OK: i32 = 0;
pub const EXIT_CONFIG_ERROR: i32 = 1;
pub const EXIT_DEMO_FAILURE: i32 = 2;
pub const EXIT_INTERRUPTED: i32 = 130;

/// How a demo run ended
type Outcome = Result<(PingPongReport, bool), DemoError>;

/// Run the application and return the process exit code
pub fn startup() -> i32 {
    let args = Args::parse();

    // Logging is not running yet, so configuration problems go to stderr
    let settings = match Settings::resolve(&args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_CONFIG_ERROR;
        }
    };

    let use_color = settings
        .color
        .unwrap_or_else(|| std::io::stderr().is_terminal());
    colored::control::set_override(use_color);

    let log_file = settings.log_file.as_deref().and_then(|path| path.to_str());
    if let Err(e) = init_logging(
        settings.log_level.as_deref(),
        settings.log_format.as_deref(),
        log_file,
        use_color,
    ) {
        eprintln!("Error initialising logging: {}", e);
        return EXIT_CONFIG_ERROR;
    }

    log::info!("msgpass {} starting", long_version());
    if let Some(path) = &settings.config_file {
        log::debug!("Using configuration file {}", path.display());
    }
    for key in &settings.unknown_keys {
        log::warn!("Ignoring unknown configuration key '{}'", key);
    }

    let code = match run(&settings) {
        Ok(outcome) => exit_code(&outcome),
        Err(e) => {
            log::error!("Failed to start async runtime: {}", e);
            EXIT_DEMO_FAILURE
        }
    };

    flush_logging();
    code
}

fn run(settings: &Settings) -> std::io::Result<Outcome> {
    // Only signal handling and the join wait live on the runtime
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    Ok(runtime.block_on(ShutdownCoordinator::guard(
        |coordinator, mut shutdown_rx| async move {
            let handle =
                PingPong::from_settings(settings).start(std::io::stdout(), std::io::stdout())?;
            let stopper = handle.stopper();
            let mut joined = tokio::task::spawn_blocking(move || handle.join());

            let result = tokio::select! {
                result = &mut joined => result,
                _ = shutdown_rx.recv() => {
                    log::info!("Stopping printers");
                    stopper.stop();
                    (&mut joined).await
                }
            };

            let report = result.map_err(|_| DemoError::ThreadPanicked {
                label: "supervisor".to_string(),
            })??;
            Ok::<_, DemoError>((report, coordinator.is_shutdown_requested()))
        },
    )))
}

fn exit_code(outcome: &Outcome) -> i32 {
    match outcome {
        Ok((report, interrupted)) => {
            log::info!(
                "Printers handled {} and {} messages",
                report.hello_handled,
                report.world_handled
            );
            if let Ok(json) = serde_json::to_string(report) {
                log::debug!("Final report: {}", json);
            }
            if *interrupted {
                EXIT_INTERRUPTED
            } else {
                EXIT_OK
            }
        }
        Err(e) => {
            log_error_with_context(e, "Running the ping-pong demo");
            EXIT_DEMO_FAILURE
        }
    }
}
