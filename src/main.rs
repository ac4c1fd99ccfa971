//! Signdesk CLI entrypoint.
//!
//! Replays filter edits against a list page in memory and prints every URL
//! the filter controller navigates to. Useful for checking how a list page's
//! query string evolves without a browser.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use ortho_config::OrthoConfig;
use signdesk::filter::{ControllerOptions, FilterSyncController};
use signdesk::telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetrySink};
use signdesk::{MemoryNavigator, SigndeskConfig, SigndeskError};
use tracing_subscriber::EnvFilter;

/// Extra wait after the debounce so the final navigation lands.
const SETTLE_GRACE: Duration = Duration::from_millis(50);

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), SigndeskError> {
    let config = load_config()?;
    init_tracing();

    let descriptors = config.descriptors()?;
    let edits = config.edits()?;
    let navigator = Arc::new(MemoryNavigator::new(config.path(), config.initial_query()));
    let options = ControllerOptions::default()
        .with_page_number(config.page)
        .with_debounce(config.debounce())
        .with_telemetry(telemetry_sink(&config));

    let mut controller = FilterSyncController::mount(descriptors, navigator.clone(), options)?;
    for (key, value) in edits {
        controller.set_filter_value(&key, value)?;
    }
    if let Some(page_index) = config.page_change {
        controller.on_page_change(page_index);
    }
    if controller.has_pending_navigation() {
        tokio::time::sleep(config.debounce() + SETTLE_GRACE).await;
    }
    controller.unmount();

    write_navigations(&navigator.history())
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`SigndeskError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<SigndeskConfig, SigndeskError> {
    SigndeskConfig::load().map_err(|error| SigndeskError::Configuration {
        message: error.to_string(),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ignored = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn telemetry_sink(config: &SigndeskConfig) -> Arc<dyn TelemetrySink> {
    if config.telemetry {
        Arc::new(StderrJsonlTelemetrySink)
    } else {
        Arc::new(NoopTelemetrySink)
    }
}

fn write_navigations(urls: &[String]) -> Result<(), SigndeskError> {
    let mut stdout = io::stdout().lock();
    let message = if urls.is_empty() {
        "no navigation".to_owned()
    } else {
        urls.join("\n")
    };

    writeln!(stdout, "{message}").map_err(|error| SigndeskError::Io {
        message: error.to_string(),
    })
}
