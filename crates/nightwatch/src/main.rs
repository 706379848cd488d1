//! Nightwatch binary entry point.
//!
//! Usage: nightwatch --token <long-lived-token> --entity-id <entity>
//!        [--url ws://host:8123/api/websocket] [--led-dir /sys/class/leds/...]
//!
//! Without --led-dir, LED commands are logged at debug level and dropped,
//! which is useful for dry runs against a live Home Assistant.

use backlight::{LedDriver, NightmodeController, NoopLed, SysfsLed};
use clap::Parser;
use nightwatch::{Config, NightwatchResult, Supervisor, DEFAULT_URL};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};

/// Nightwatch: keeps a monitor backlight in sync with Home Assistant.
#[derive(Parser, Debug)]
#[command(name = "nightwatch")]
#[command(about = "Home Assistant client that drives a monitor backlight LED")]
struct Args {
    /// Home Assistant WebSocket endpoint.
    #[arg(long, env = "HASS_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Long-lived access token for the auth handshake.
    #[arg(long, env = "HASS_TOKEN", hide_env_values = true)]
    token: String,

    /// Entity whose state drives the backlight, e.g. switch.monitor.
    #[arg(long, env = "NIGHTWATCH_ENTITY")]
    entity_id: String,

    /// Sysfs LED directory, e.g. /sys/class/leds/asus::kbd_backlight.
    /// If not provided, a no-op driver is used.
    #[arg(long, env = "NIGHTWATCH_LED_DIR")]
    led_dir: Option<PathBuf>,

    /// Delay between reconnect attempts in seconds.
    #[arg(long, env = "NIGHTWATCH_RECONNECT_SECS", default_value = "5")]
    reconnect_secs: u64,

    /// Settle delay between LED init and lights-out in milliseconds.
    #[arg(long, env = "NIGHTWATCH_SETTLE_MS", default_value = "500")]
    settle_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(true)
        .compact()
        .init();
}

fn select_driver(led_dir: Option<PathBuf>) -> Box<dyn LedDriver> {
    match led_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "Using sysfs LED driver");
            Box::new(SysfsLed::new(dir))
        }
        None => {
            warn!("No LED directory configured, lighting commands will be dropped");
            Box::new(NoopLed::new())
        }
    }
}

#[tokio::main]
async fn main() -> NightwatchResult<()> {
    let args = Args::parse();

    init_logging(&args.log_level);

    info!("Nightwatch starting...");

    // Build config
    let mut config = Config::new(args.url, args.token, args.entity_id);
    config.reconnect_delay = Duration::from_secs(args.reconnect_secs);
    config.settle_delay = Duration::from_millis(args.settle_ms);
    config.validate()?;

    info!(
        url = %config.url,
        entity_id = %config.entity_id,
        reconnect_secs = config.reconnect_delay.as_secs(),
        settle_ms = config.settle_delay.as_millis() as u64,
        "Configuration loaded"
    );

    let driver = select_driver(args.led_dir);
    let lights = NightmodeController::with_settle_delay(driver, config.settle_delay);
    let mut supervisor = Supervisor::new(config, lights);

    // Install signal handlers for graceful shutdown
    let ctrl_c = tokio::signal::ctrl_c();

    tokio::select! {
        result = supervisor.run() => {
            if let Err(e) = result {
                error!(error = %e, "Supervisor exited with error");
                return Err(e);
            }
        }
        _ = ctrl_c => {
            info!("Received shutdown signal, exiting...");
        }
    }

    Ok(())
}
