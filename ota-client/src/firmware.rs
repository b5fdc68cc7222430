//! Firmware images read from the local filesystem

use std::{io, path::Path};

use crate::{
    error::{Error, Result},
    request::{SOFT_SIZE_LIMIT, UpdateRequest},
};

/// Raw firmware image along with the file it was read from.
#[derive(Debug, Clone)]
pub struct Firmware {
    path: Box<Path>,
    data: Vec<u8>,
}

impl Firmware {
    /// Read a firmware file. Fails without touching the network if the file is missing or empty.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let data = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
            _ => Error::Other(format!("Failed to read {}: {e}", path.display())),
        })?;

        if data.is_empty() {
            return Err(Error::EmptyFirmware(path.to_path_buf()));
        }

        if data.len() as u64 > SOFT_SIZE_LIMIT {
            tracing::warn!(
                "{} is {} bytes, larger than the {SOFT_SIZE_LIMIT} byte OTA partition hint",
                path.display(),
                data.len()
            );
        }

        Ok(Self {
            path: path.into(),
            data,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Size in MiB, for display.
    pub fn size_mib(&self) -> f64 {
        self.len() as f64 / (1024.0 * 1024.0)
    }

    /// Larger than [`SOFT_SIZE_LIMIT`]. Upload still proceeds.
    pub fn exceeds_soft_limit(&self) -> bool {
        self.len() > SOFT_SIZE_LIMIT
    }
}

impl From<Firmware> for UpdateRequest {
    fn from(value: Firmware) -> Self {
        Self::Binary(value.data)
    }
}
