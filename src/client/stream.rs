//! Stream listener for `GET /api/chat`
//!
//! Opens the Server-Sent Events stream, decodes it incrementally and hands
//! every `chat.message` event to a callback. When the stream ends or errors
//! the listener waits for the server's `retry` hint and reconnects.
//!
//! The returned `StreamHandle` is the only way to stop it: `close()` is
//! idempotent, and dropping the handle closes it as well.

use crate::shared::message::CHAT_EVENT;
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Reconnect delay used until the server sends a `retry` field
pub const DEFAULT_RETRY: Duration = Duration::from_millis(10_000);

/// Longest line the decoder buffers before giving up on the frame
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// One decoded SSE event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// Last event id seen on the stream, if any
    pub id: Option<String>,
    /// Event name, `message` when the frame had no `event:` field
    pub event: String,
    /// Data lines joined with `\n`
    pub data: String,
}

/// Incremental SSE decoder
///
/// Accepts arbitrary chunks (frames and even UTF-8 sequences may be split
/// across them) and yields each complete event once its terminating blank
/// line arrives. LF and CRLF line endings are both accepted.
///
/// A line longer than `MAX_LINE_BYTES` drops the frame it belongs to;
/// decoding resumes after the next line break.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    discarding: bool,
    data: Vec<String>,
    event: Option<String>,
    last_id: Option<String>,
    retry: Option<Duration>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk, returning the events it completed
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|byte| *byte == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=newline).collect();
            if self.discarding {
                self.discarding = false;
                continue;
            }
            let line = String::from_utf8_lossy(&raw[..newline]);
            let line = line.trim_end_matches('\r');

            if let Some(event) = self.process_line(line) {
                events.push(event);
            }
        }

        if self.buffer.len() > MAX_LINE_BYTES || (self.discarding && !self.buffer.is_empty()) {
            if !self.discarding {
                tracing::warn!(
                    "[Client] Dropping frame with a line over {} bytes",
                    MAX_LINE_BYTES
                );
            }
            self.buffer.clear();
            self.data.clear();
            self.event = None;
            self.discarding = true;
        }
        events
    }

    /// Reconnect delay most recently requested by the server
    pub fn reconnect_delay(&self) -> Option<Duration> {
        self.retry
    }

    fn process_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            return self.dispatch();
        }

        // Comment (keep-alive)
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "data" => self.data.push(value.to_string()),
            "event" => self.event = Some(value.to_string()),
            "id" if !value.contains('\0') => self.last_id = Some(value.to_string()),
            "retry" => {
                if let Ok(ms) = value.parse::<u64>() {
                    self.retry = Some(Duration::from_millis(ms));
                }
            }
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }

        let data = std::mem::take(&mut self.data).join("\n");
        Some(SseEvent {
            id: self.last_id.clone(),
            event: event.unwrap_or_else(|| "message".to_string()),
            data,
        })
    }
}

/// Listener connection state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Retrying,
    Closed,
}

/// Update the status unless the listener was already closed
fn set_status(status: &watch::Sender<ConnectionStatus>, next: ConnectionStatus) {
    status.send_if_modified(|current| {
        if *current == ConnectionStatus::Closed || *current == next {
            false
        } else {
            *current = next;
            true
        }
    });
}

/// Opens stream subscriptions
#[derive(Debug, Clone, Default)]
pub struct StreamListener {
    http: Client,
}

impl StreamListener {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Start listening on `url`
    ///
    /// `callback` runs on the listener task for every `chat.message` event.
    /// Must be called from within a tokio runtime.
    pub fn open<F>(&self, url: impl Into<String>, callback: F) -> StreamHandle
    where
        F: Fn(SseEvent) + Send + Sync + 'static,
    {
        let url = url.into();
        let closed = Arc::new(AtomicBool::new(false));
        let (status_tx, status_rx) = watch::channel(ConnectionStatus::Connecting);
        let status_tx = Arc::new(status_tx);

        let task = tokio::spawn(listen(
            self.http.clone(),
            url,
            Arc::new(callback),
            closed.clone(),
            status_tx.clone(),
        ));

        StreamHandle {
            task,
            closed,
            status_tx,
            status_rx,
        }
    }
}

async fn listen(
    http: Client,
    url: String,
    callback: Arc<dyn Fn(SseEvent) + Send + Sync>,
    closed: Arc<AtomicBool>,
    status: Arc<watch::Sender<ConnectionStatus>>,
) {
    let mut delay = DEFAULT_RETRY;

    loop {
        set_status(&status, ConnectionStatus::Connecting);
        tracing::info!("[Client] Subscribing to {}", url);

        let request = http
            .get(&url)
            .header(ACCEPT, "text/event-stream")
            .header(CACHE_CONTROL, "no-cache");

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                set_status(&status, ConnectionStatus::Connected);
                tracing::info!("[Client] Stream connected");

                let mut decoder = SseDecoder::new();
                let mut body = response.bytes_stream();

                while let Some(chunk) = body.next().await {
                    let chunk = match chunk {
                        Ok(chunk) => chunk,
                        Err(e) => {
                            tracing::warn!("[Client] Stream read failed: {}", e);
                            break;
                        }
                    };

                    for event in decoder.feed(&chunk) {
                        if closed.load(Ordering::SeqCst) {
                            return;
                        }
                        if event.event == CHAT_EVENT {
                            callback(event);
                        } else {
                            tracing::debug!("[Client] Ignoring '{}' event", event.event);
                        }
                    }
                }

                if let Some(retry) = decoder.reconnect_delay() {
                    delay = retry;
                }
                tracing::info!("[Client] Stream ended");
            }
            Ok(response) => {
                tracing::warn!("[Client] Subscribe returned {}", response.status());
            }
            Err(e) => {
                tracing::warn!("[Client] Subscribe failed: {}", e);
            }
        }

        if closed.load(Ordering::SeqCst) {
            return;
        }
        set_status(&status, ConnectionStatus::Retrying);
        tracing::info!("[Client] Reconnecting in {:?}", delay);
        tokio::time::sleep(delay).await;
    }
}

/// Handle to a running stream listener
#[derive(Debug)]
pub struct StreamHandle {
    task: JoinHandle<()>,
    closed: Arc<AtomicBool>,
    status_tx: Arc<watch::Sender<ConnectionStatus>>,
    status_rx: watch::Receiver<ConnectionStatus>,
}

impl StreamHandle {
    /// Stop listening; later calls do nothing
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.task.abort();
        self.status_tx.send_replace(ConnectionStatus::Closed);
        tracing::info!("[Client] Stream listener closed");
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Receiver for connection status changes
    pub fn status(&self) -> watch::Receiver<ConnectionStatus> {
        self.status_rx.clone()
    }
}

impl Drop for StreamHandle {
    fn drop(&mut self) {
        self.close();
    }
}
