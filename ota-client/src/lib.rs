//! A small client for the HTTP OTA update service found on networked embedded devices (ESP32
//! firmware in particular).
//!
//! # Protocol
//!
//! | Method | Path       | Body              | Content-Type               |
//! |--------|------------|-------------------|----------------------------|
//! | GET    | `/version` |                   |                            |
//! | POST   | `/ota`     | firmware URL      | `text/plain`               |
//! | POST   | `/upload`  | raw firmware      | `application/octet-stream` |
//!
//! The device answers 200 when it accepts a request. What happens afterwards (download, flashing,
//! reboot) is not observed by the client.
//!
//! # Usage
//!
//! ```no_run
//! use ota_client::{Device, OtaClient};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> ota_client::Result<()> {
//!     let client = OtaClient::new(Device::new("192.168.1.100")?)?;
//!
//!     if let Ok(v) = client.version().await {
//!         println!("Current version: {v}");
//!     }
//!
//!     client.trigger_url_update("http://example.com/firmware.bin").await?;
//!     Ok(())
//! }
//! ```

mod device;
mod error;
mod firmware;
mod request;
mod version;

use std::{path::Path, time::Duration};

pub use device::{DEFAULT_PORT, Device};
pub use error::{Error, Result};
pub use firmware::Firmware;
pub use request::{
    Accepted, OTA_PATH, SOFT_SIZE_LIMIT, Timeouts, UPLOAD_PATH, URL_CAPACITY, UpdateRequest,
    VERSION_PATH,
};
pub use version::VersionInfo;

use reqwest::{StatusCode, header::CONTENT_TYPE};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Client bound to a single device. Every operation is one request/response exchange.
#[derive(Debug, Clone)]
pub struct OtaClient {
    client: reqwest::Client,
    device: Device,
    timeouts: Timeouts,
}

impl OtaClient {
    pub fn new(device: Device) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            device,
            timeouts: Timeouts::default(),
        })
    }

    pub fn update_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub const fn device(&self) -> &Device {
        &self.device
    }

    pub const fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }

    /// Query the firmware version currently running on the device.
    ///
    /// Meant as an advisory check. Callers are expected to carry on when this fails.
    pub async fn version(&self) -> Result<VersionInfo> {
        let url = self.device.url(VERSION_PATH);
        let timeout = self.timeouts.version;
        tracing::debug!("GET {url}");

        let resp = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e, timeout))?;

        let body = self.accepted_body(resp, timeout).await?;
        Ok(VersionInfo::parse(&body))
    }

    /// Ask the device to download and flash the image at `url`.
    pub async fn trigger_url_update(&self, url: &str) -> Result<Accepted> {
        if url.len() > URL_CAPACITY {
            tracing::warn!(
                "Firmware URL is {} bytes, device only accepts {URL_CAPACITY}",
                url.len()
            );
        }

        self.send(UpdateRequest::Url(url.to_string())).await
    }

    /// Push a firmware image to the device. The device reboots once it is flashed.
    pub async fn upload_binary(&self, firmware: Vec<u8>) -> Result<Accepted> {
        self.send(UpdateRequest::Binary(firmware)).await
    }

    /// Read a firmware file and push it to the device.
    ///
    /// Missing and empty files are reported before any request is made.
    pub async fn upload_file(&self, path: &Path) -> Result<Accepted> {
        let firmware = Firmware::from_path(path).await?;
        self.send(firmware.into()).await
    }

    /// Send an update request and wait for the device to accept it.
    pub async fn send(&self, req: UpdateRequest) -> Result<Accepted> {
        let url = self.device.url(req.path());
        let timeout = req.timeout(&self.timeouts);
        tracing::debug!(
            "POST {url} ({}, {} bytes, timeout {timeout:?})",
            req.content_type(),
            req.len()
        );

        let resp = self
            .client
            .post(url)
            .header(CONTENT_TYPE, req.content_type())
            .timeout(timeout)
            .body(req.into_body())
            .send()
            .await
            .map_err(|e| self.transport_error(e, timeout))?;

        let body = self.accepted_body(resp, timeout).await?;
        tracing::info!("{} accepted the update request", self.device);

        Ok(Accepted { body })
    }

    /// Body of a 200 response. Anything else becomes [`Error::Http`].
    async fn accepted_body(&self, resp: reqwest::Response, timeout: Duration) -> Result<String> {
        let status = resp.status();

        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            tracing::debug!("{} answered {status}: {body}", self.device);
            return Err(Error::Http { status, body });
        }

        resp.text()
            .await
            .map_err(|e| self.transport_error(e, timeout))
    }

    fn transport_error(&self, e: reqwest::Error, timeout: Duration) -> Error {
        Error::from_transport(e, self.device.host(), timeout)
    }
}
