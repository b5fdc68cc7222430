use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser};
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "ota-update",
    version,
    about = "Trigger an OTA update that the device downloads from a URL",
    after_help = "Example:\n  ota-update 192.168.1.100 http://example.com/firmware.bin\n\n\
                  The firmware binary must be reachable by the device over HTTP/HTTPS."
)]
pub struct UpdateOpt {
    /// IP address or hostname of the device.
    pub device_ip: String,

    /// URL the device downloads the firmware binary from.
    #[arg(value_parser = parse_firmware_url)]
    pub firmware_url: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser, Debug)]
#[command(
    name = "ota-upload",
    version,
    about = "Upload a firmware binary directly to the device",
    after_help = "Example:\n  ota-upload 192.168.1.100 build/firmware.bin"
)]
pub struct UploadOpt {
    /// IP address or hostname of the device.
    pub device_ip: String,

    /// Path to the firmware binary to upload.
    pub firmware_path: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct CommonArgs {
    #[arg(long, default_value_t = ota_client::DEFAULT_PORT)]
    /// Port of the device update service.
    pub port: u16,

    #[arg(long, value_name = "SECONDS", value_parser = parse_timeout)]
    /// Override the timeout of the update request.
    pub timeout: Option<Duration>,

    #[arg(long)]
    /// Suppress standard output messages for a quieter experience.
    pub quiet: bool,
}

/// Validate the URL but hand it to the device exactly as typed.
fn parse_firmware_url(s: &str) -> Result<String, String> {
    let url = Url::parse(s).map_err(|e| format!("invalid URL: {e}"))?;

    match url.scheme() {
        "http" | "https" => Ok(s.to_string()),
        x => Err(format!("unsupported scheme `{x}`, expected http or https")),
    }
}

fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("`{s}` is not a number of seconds"))?;

    if secs.is_finite() && secs > 0.0 {
        Ok(Duration::from_secs_f64(secs))
    } else {
        Err("timeout must be a positive number of seconds".to_string())
    }
}
