//! Requests understood by the device update service

use std::time::Duration;

/// Longest firmware URL the device accepts. It copies the body into a 256 byte buffer including
/// the terminating NUL and answers `414` for anything longer.
pub const URL_CAPACITY: usize = 255;

/// Images above this size may not fit the OTA partition. Only used for warnings.
pub const SOFT_SIZE_LIMIT: u64 = 1024 * 1024;

pub const VERSION_PATH: &str = "/version";
pub const OTA_PATH: &str = "/ota";
pub const UPLOAD_PATH: &str = "/upload";

/// Per-request time limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub version: Duration,
    pub trigger: Duration,
    pub upload: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            version: Duration::from_secs(5),
            trigger: Duration::from_secs(10),
            upload: Duration::from_secs(60),
        }
    }
}

impl Timeouts {
    pub const fn update_version(mut self, t: Duration) -> Self {
        self.version = t;
        self
    }

    pub const fn update_trigger(mut self, t: Duration) -> Self {
        self.trigger = t;
        self
    }

    pub const fn update_upload(mut self, t: Duration) -> Self {
        self.upload = t;
        self
    }
}

/// An update request. The variant decides endpoint, content type and timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateRequest {
    /// Device downloads and flashes the image at this URL on its own.
    Url(String),
    /// Raw image, flashed by the device before it reboots.
    Binary(Vec<u8>),
}

impl UpdateRequest {
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Url(_) => OTA_PATH,
            Self::Binary(_) => UPLOAD_PATH,
        }
    }

    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Url(_) => "text/plain",
            Self::Binary(_) => "application/octet-stream",
        }
    }

    pub const fn timeout(&self, timeouts: &Timeouts) -> Duration {
        match self {
            Self::Url(_) => timeouts.trigger,
            Self::Binary(_) => timeouts.upload,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Url(x) => x.len(),
            Self::Binary(x) => x.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn into_body(self) -> reqwest::Body {
        match self {
            Self::Url(x) => x.into(),
            Self::Binary(x) => x.into(),
        }
    }
}

/// A request the device answered with 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    pub body: String,
}

impl Accepted {
    /// Message sent back by the device, if any.
    pub fn message(&self) -> Option<&str> {
        let msg = self.body.trim();
        (!msg.is_empty()).then_some(msg)
    }
}
