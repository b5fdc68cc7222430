//! Common utilities for E2E tests
//!
//! [`MockDevice`] stands in for the update service of a real device. It answers configured
//! routes and records every request it receives.

use std::{
    collections::HashMap,
    io::Write,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use ota_client::{Device, OtaClient, Timeouts};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    task::JoinHandle,
};

/// Canned answer for one route.
#[derive(Debug, Clone)]
pub struct Reply {
    status: u16,
    body: Vec<u8>,
    delay: Duration,
}

impl Reply {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    /// Hold the answer back, used to trigger client timeouts.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A request as seen by the device.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

type Routes = HashMap<(String, String), Reply>;

pub struct MockDevice {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    task: JoinHandle<()>,
}

impl MockDevice {
    /// Start a device answering `(method, path, reply)` routes. Unknown routes get a 404.
    pub async fn start(routes: Vec<(&str, &str, Reply)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock device");
        let addr = listener.local_addr().expect("Mock device has no address");

        let routes: Arc<Routes> = Arc::new(
            routes
                .into_iter()
                .map(|(m, p, r)| ((m.to_string(), p.to_string()), r))
                .collect(),
        );
        let requests = Arc::new(Mutex::new(Vec::new()));

        let task = {
            let requests = requests.clone();
            tokio::spawn(async move {
                while let Ok((stream, _)) = listener.accept().await {
                    let routes = routes.clone();
                    let requests = requests.clone();
                    tokio::spawn(async move {
                        let _ = serve(stream, &routes, &requests).await;
                    });
                }
            })
        };

        Self {
            addr,
            requests,
            task,
        }
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn device(&self) -> Device {
        Device::with_port("127.0.0.1", self.port()).expect("Mock device address is valid")
    }

    pub fn client(&self) -> OtaClient {
        OtaClient::new(self.device()).expect("Failed to create client")
    }

    pub fn client_with(&self, timeouts: Timeouts) -> OtaClient {
        self.client().update_timeouts(timeouts)
    }
}

impl Drop for MockDevice {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(
    mut stream: TcpStream,
    routes: &Routes,
    requests: &Mutex<Vec<CapturedRequest>>,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let count = stream.read(&mut chunk).await?;
        if count == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..count]);

        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[header_end..].to_vec();
    while body.len() < content_length {
        let count = stream.read(&mut chunk).await?;
        if count == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..count]);
    }

    let reply = routes
        .get(&(method.clone(), path.clone()))
        .cloned()
        .unwrap_or_else(|| Reply::status(404, "Not Found"));

    requests.lock().unwrap().push(CapturedRequest {
        method,
        path,
        headers,
        body,
    });

    tokio::time::sleep(reply.delay).await;

    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        reply.status,
        reason(reply.status),
        reply.body.len()
    );
    stream.write_all(head.as_bytes()).await?;
    stream.write_all(&reply.body).await?;
    stream.shutdown().await
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        414 => "URI Too Long",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// A local port nothing is listening on.
pub fn refused_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind probe");
    listener.local_addr().expect("Probe has no address").port()
}

/// Create a firmware image with an ESP32 style header byte and a repeating pattern.
pub fn create_firmware(size: usize) -> std::io::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(".bin").tempfile()?;
    file.write_all(&firmware_bytes(size))?;
    file.flush()?;

    Ok(file)
}

/// Firmware bytes as written by [`create_firmware`].
pub fn firmware_bytes(size: usize) -> Vec<u8> {
    std::iter::once(0xe9)
        .chain((0..).map(|x: u32| x as u8))
        .take(size)
        .collect()
}
