//! Tokio TCP adapter driving a [`Download`] with transport events.

use std::io;
use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

use crate::core::{DEFAULT_ACK_TIMEOUT, DEFAULT_POLL_INTERVAL, VENDOR_PORT};
use crate::decoder::FrameStore;
use crate::download::{Download, TransportCommand, TransportEvent};

use super::request::DownloadRequest;

/// Read buffer size for inbound chunks.
const READ_BUFFER_SIZE: usize = 4096;

/// Plain-TCP transport adapter.
///
/// Connects, sends the download request, and translates socket activity
/// into the decoder's event vocabulary: data chunks, an ack timeout on the
/// request write, recurring idle polls, and the final disconnect. The
/// adapter stays agnostic to stream contents; all interpretation happens in
/// the [`Download`] it drives.
#[derive(Debug, Clone)]
pub struct TcpTransport {
    host: String,
    port: u16,
    ack_timeout: Duration,
    poll_interval: Duration,
}

impl TcpTransport {
    /// Adapter for the given host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ack_timeout: DEFAULT_ACK_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Adapter for the vendor file host.
    pub fn vendor(host: impl Into<String>) -> Self {
        Self::new(host, VENDOR_PORT)
    }

    /// Set the deadline for the server to accept the request bytes.
    pub fn ack_timeout(mut self, timeout: Duration) -> Self {
        self.ack_timeout = timeout;
        self
    }

    /// Set the idle-poll interval feeding the watchdog.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Run one download to its terminal state.
    ///
    /// Every outcome, including timeouts and skips, is reported through the
    /// download's callbacks; the `Err` return covers only the initial
    /// connection failing before any event could be delivered.
    pub async fn run(
        &self,
        request: &DownloadRequest,
        download: &mut Download,
        store: &mut FrameStore,
    ) -> io::Result<()> {
        let mut stream = TcpStream::connect((self.host.as_str(), self.port)).await?;
        debug!(host = %self.host, port = self.port, "connected");

        let request_bytes = request.to_bytes();
        let write = stream.write_all(&request_bytes);
        match tokio::time::timeout(self.ack_timeout, write).await {
            Ok(Ok(())) => {}
            Ok(Err(error)) => {
                self.fail(download, store, &error).await;
                return Ok(());
            }
            Err(_elapsed) => {
                download.handle_event(store, TransportEvent::AckTimeout, Instant::now());
                download.handle_event(store, TransportEvent::Disconnect, Instant::now());
                return Ok(());
            }
        }

        let mut poll = tokio::time::interval(self.poll_interval);
        let mut buf = vec![0u8; READ_BUFFER_SIZE];

        loop {
            tokio::select! {
                read = stream.read(&mut buf) => match read {
                    Ok(0) => {
                        download.handle_event(store, TransportEvent::Disconnect, Instant::now());
                        break;
                    }
                    Ok(n) => {
                        let event = TransportEvent::Data(buf[..n].to_vec());
                        if let Some(TransportCommand::Close) =
                            download.handle_event(store, event, Instant::now())
                        {
                            let _ = stream.shutdown().await;
                            download.handle_event(store, TransportEvent::Disconnect, Instant::now());
                            break;
                        }
                    }
                    Err(error) => {
                        self.fail(download, store, &error).await;
                        break;
                    }
                },
                _ = poll.tick() => {
                    if let Some(TransportCommand::Close) =
                        download.handle_event(store, TransportEvent::IdlePoll, Instant::now())
                    {
                        let _ = stream.shutdown().await;
                        download.handle_event(store, TransportEvent::Disconnect, Instant::now());
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    async fn fail(&self, download: &mut Download, store: &mut FrameStore, error: &io::Error) {
        let code = error.raw_os_error().map_or(-1, |c| c as i8);
        download.handle_event(store, TransportEvent::Error(code), Instant::now());
        download.handle_event(store, TransportEvent::Disconnect, Instant::now());
    }
}
