//! Sitright device daemon
//!
//! Wires the hardware seams, the messaging gateway and the evaluation loop
//! together, then waits for an interrupt. Startup is strict about the
//! actuator: if it cannot be brought to a known-safe OFF state the process
//! refuses to monitor. Everything after that is per-tick recoverable.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use sitright_core::{time::MonotonicClock, Actuator, ImuSource, PostureClassifier};
use sitright_gateway::{BotClient, BotConfig, CommandListener};

use sitright_device::commands;
use sitright_device::config::{DeviceConfig, ImuKind};
use sitright_device::hardware::{LatchInput, LogActuator, ReplayImu, SyntheticImu};
use sitright_device::monitor::{self, MonitorLoop, MonitorState};

fn engine_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sitright.toml"));
    let config = if config_path.exists() {
        DeviceConfig::load(&config_path)?
    } else {
        tracing::warn!(path = %config_path.display(), "no config file, using defaults");
        DeviceConfig::default()
    };

    // Fatal if the actuator cannot reach a known-safe state before any
    // monitoring begins.
    let mut actuator = LogActuator::new();
    actuator
        .set(false)
        .context("bringing actuator to a safe initial state")?;

    let imu: Box<dyn ImuSource + Send> = match &config.imu {
        ImuKind::Synthetic => Box::new(SyntheticImu::new()),
        ImuKind::Replay { path } => Box::new(
            ReplayImu::from_csv(path)
                .with_context(|| format!("loading capture {}", path.display()))?,
        ),
    };

    let mut bot_config = BotConfig::new(config.bot_token.clone(), config.chat_id.clone());
    if let Some(base) = &config.api_base {
        bot_config = bot_config.api_base(base.clone());
    }
    let client = BotClient::new(bot_config);

    let state: monitor::SharedState = Arc::new(Mutex::new(MonitorState::new(engine_seed())));
    let shutdown = Arc::new(AtomicBool::new(false));

    let (_listener, command_rx) = CommandListener::spawn(client.clone(), Arc::clone(&shutdown));
    {
        let state = Arc::clone(&state);
        let client = client.clone();
        std::thread::Builder::new()
            .name("command-handler".into())
            .spawn(move || commands::run_handler(command_rx, state, client))
            .context("spawning command handler")?;
    }

    let toggle = LatchInput::new();
    if config.auto_start {
        // Rising edge on the first tick starts the session
        toggle.handle().store(true, Ordering::Relaxed);
    }

    let monitor_thread = {
        let state = Arc::clone(&state);
        let shutdown = Arc::clone(&shutdown);
        let classifier = PostureClassifier::new(config.profile());
        let interval = Duration::from_millis(config.tick_interval_ms);
        let recipient = config.chat_id.clone();
        let client = client.clone();

        std::thread::Builder::new()
            .name("monitor".into())
            .spawn(move || {
                MonitorLoop::new(
                    imu,
                    actuator,
                    toggle,
                    client,
                    MonotonicClock::new(),
                    recipient,
                    classifier,
                    state,
                )
                .run(interval, &shutdown);
            })
            .context("spawning monitor loop")?
    };

    tracing::info!("sitright {} running, Ctrl-C to stop", sitright_core::VERSION);
    tokio::signal::ctrl_c()
        .await
        .context("waiting for interrupt")?;
    tracing::info!("interrupt received, shutting down");

    shutdown.store(true, Ordering::Relaxed);
    if monitor_thread.join().is_err() {
        tracing::error!("monitor thread panicked");
    }
    // The listener may sit in a long poll; the process exits without
    // waiting it out once cleanup above has finished.

    Ok(())
}
