//! Front-ends for [`ota_client`]: `ota-update` asks a device to fetch firmware from a URL,
//! `ota-upload` pushes a local firmware binary to it.
//!
//! Both programs run a best-effort version check first and exit with `0` only when the device
//! accepted the update request.

pub mod cli;
mod report;
pub mod update;
pub mod upload;

use std::process::ExitCode;

use ota_client::{Device, OtaClient, Timeouts};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use report::Reporter;
use report::{CLIPBOARD, LOOKING_GLASS};

/// Outcome of an invocation, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

impl<T> From<&ota_client::Result<T>> for Status {
    fn from(value: &ota_client::Result<T>) -> Self {
        match value {
            Ok(_) => Self::Success,
            Err(_) => Self::Failure,
        }
    }
}

impl From<Status> for ExitCode {
    fn from(value: Status) -> Self {
        match value {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::FAILURE,
        }
    }
}

/// Print a clap error (or the help/version text it carries).
///
/// Usage mistakes exit with `1` rather than clap's default of `2`.
pub fn usage_error(e: clap::Error) -> Status {
    let _ = e.print();

    if e.use_stderr() {
        Status::Failure
    } else {
        Status::Success
    }
}

/// Log to stderr, `warn` and above unless `RUST_LOG` says otherwise.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn client(
    device_ip: &str,
    common: &cli::CommonArgs,
    timeouts: Timeouts,
) -> ota_client::Result<OtaClient> {
    let device = Device::with_port(device_ip, common.port)?;
    Ok(OtaClient::new(device)?.update_timeouts(timeouts))
}

/// Advisory version check. Never fails the invocation.
async fn check_version(client: &OtaClient, reporter: &Reporter, unreachable_hint: &str) {
    reporter.line(format!(
        "{LOOKING_GLASS}Checking device at {}...",
        client.device().host()
    ));

    match client.version().await {
        Ok(v) => {
            reporter.success("Device is reachable");
            reporter.line(format!("{CLIPBOARD}Current version: {v}"));
        }
        Err(e) => {
            tracing::warn!("Version check failed: {e}");
            match e.http_status() {
                Some((status, _)) => {
                    reporter.warn(format!("Device responded with status {status}"))
                }
                None => reporter.warn(format!("Could not get version info{unreachable_hint}")),
            }
        }
    }

    reporter.blank();
}
