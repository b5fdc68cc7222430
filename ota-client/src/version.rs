//! Firmware version reported by `GET /version`

use serde::Deserialize;

/// Current firmware version of a device.
///
/// Older firmware answers with a bare version string, newer firmware with a small JSON document
/// such as `{"version":"1.0.0","idf_version":"v5.3"}`. The raw body is always kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    raw: String,
    firmware: Option<String>,
    idf: Option<String>,
}

#[derive(Deserialize)]
struct VersionDoc {
    version: String,
    idf_version: Option<String>,
}

impl VersionInfo {
    pub fn parse(body: &str) -> Self {
        let raw = body.trim().to_string();

        match serde_json::from_str::<VersionDoc>(&raw) {
            Ok(doc) => Self {
                raw,
                firmware: Some(doc.version),
                idf: doc.idf_version,
            },
            Err(_) => Self {
                raw,
                firmware: None,
                idf: None,
            },
        }
    }

    /// Response body as received, minus surrounding whitespace.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Firmware version. Falls back to the raw body for plain text answers.
    pub fn firmware(&self) -> &str {
        self.firmware.as_deref().unwrap_or(&self.raw)
    }

    /// ESP-IDF version the firmware was built with, if reported.
    pub fn idf(&self) -> Option<&str> {
        self.idf.as_deref()
    }
}

impl std::fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.idf {
            Some(idf) => write!(f, "{} (IDF {idf})", self.firmware()),
            None => f.write_str(self.firmware()),
        }
    }
}
