//! Error type for this library

use std::{path::PathBuf, time::Duration};

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
/// Errors for this crate
pub enum Error {
    /// Firmware file does not exist. Detected before any request is made.
    #[error("Firmware file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    /// Firmware file exists but has no content.
    #[error("Firmware file is empty: {}", .0.display())]
    EmptyFirmware(PathBuf),
    /// Device address cannot be turned into an HTTP endpoint.
    #[error("Invalid device address: {0}")]
    InvalidAddress(String),
    /// Could not connect to the device.
    #[error("Could not connect to {device}")]
    Connection {
        device: String,
        #[source]
        source: reqwest::Error,
    },
    /// Device did not answer within the request timeout.
    #[error("Request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),
    /// Device answered with anything other than 200.
    #[error("Device responded with status {status}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Sort a transport error into the kinds callers care about.
    ///
    /// Timeouts win over connection failures, so a connect attempt that hangs is reported as
    /// [`Error::Timeout`].
    pub(crate) fn from_transport(e: reqwest::Error, device: &str, timeout: Duration) -> Self {
        if e.is_timeout() {
            Self::Timeout(timeout)
        } else if e.is_connect() {
            Self::Connection {
                device: device.to_string(),
                source: e,
            }
        } else {
            Self::Other(e.to_string())
        }
    }

    /// Status code and body text of a rejected request.
    pub fn http_status(&self) -> Option<(reqwest::StatusCode, &str)> {
        match self {
            Self::Http { status, body } => Some((*status, body.as_str())),
            _ => None,
        }
    }
}
