//! Network address of the update service on a device

use std::net::Ipv6Addr;

use url::Url;

use crate::error::{Error, Result};

/// Port the device firmware serves its update endpoints on.
pub const DEFAULT_PORT: u16 = 8080;

/// A device endpoint. Constructed per invocation and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    host: Box<str>,
    port: u16,
    base: Url,
}

impl Device {
    /// Endpoint on [`DEFAULT_PORT`].
    pub fn new(host: &str) -> Result<Self> {
        Self::with_port(host, DEFAULT_PORT)
    }

    pub fn with_port(host: &str, port: u16) -> Result<Self> {
        let host = host.trim();
        if host.is_empty() {
            return Err(Error::InvalidAddress(host.to_string()));
        }

        // Bare IPv6 literals need brackets inside a URL
        let authority = match host.parse::<Ipv6Addr>() {
            Ok(_) => format!("[{host}]:{port}"),
            Err(_) => format!("{host}:{port}"),
        };

        let base = Url::parse(&format!("http://{authority}/"))
            .map_err(|_| Error::InvalidAddress(host.to_string()))?;

        // Reject anything that smuggles a path, query or credentials into the address
        if base.path() != "/"
            || base.query().is_some()
            || !base.username().is_empty()
            || base.port_or_known_default() != Some(port)
        {
            return Err(Error::InvalidAddress(host.to_string()));
        }

        Ok(Self {
            host: host.into(),
            port,
            base,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Full URL of an endpoint on the device, e.g. `http://10.0.0.5:8080/ota`.
    pub fn url(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(path);
        url
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
