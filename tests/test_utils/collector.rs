//! Minimal stand-in for the collector agent.
//!
//! Each accepted connection is read until the client closes it, and the
//! bytes are kept as one envelope. Decoding is left to the tests.

use std::{
    io::{Cursor, Read},
    os::unix::net::UnixListener,
    path::{Path, PathBuf},
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

use serde::Deserialize;
use tempfile::TempDir;

/// Decoded form of one forward message.
#[derive(Debug, Deserialize)]
pub struct Envelope(pub String, pub u64, pub Body);

#[derive(Debug, Deserialize)]
pub struct Body {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    #[serde(rename = "contextId")]
    pub context_id: String,
    pub message: serde_json::Map<String, serde_json::Value>,
    #[serde(rename = "arcClass")]
    pub arc_class: String,
    #[serde(rename = "exportTimestamp")]
    pub export_timestamp: i64,
}

/// Listener accepting connections on a socket inside a temporary directory.
pub struct Collector {
    path: PathBuf,
    rx: mpsc::Receiver<Vec<u8>>,
}

impl Collector {
    /// Bind a collector at `path` and start accepting connections.
    pub fn bind(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let listener = UnixListener::bind(&path).expect("bind collector socket");
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else {
                    return;
                };
                let tx = tx.clone();
                thread::spawn(move || {
                    let mut buf = Vec::new();
                    let read = stream.read_to_end(&mut buf);
                    drop(stream);
                    if read.is_ok() {
                        let _ = tx.send(buf);
                    }
                });
            }
        });
        Self { path, rx }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wait until `count` envelopes have arrived.
    pub fn receive(&self, count: usize, timeout: Duration) -> Vec<Vec<u8>> {
        let deadline = Instant::now() + timeout;
        let mut frames = Vec::with_capacity(count);
        while frames.len() < count {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(frame) => frames.push(frame),
                Err(_) => panic!("received {} of {count} envelopes", frames.len()),
            }
        }
        frames
    }

    /// Collect whatever arrives within `window`.
    pub fn drain(&self, window: Duration) -> Vec<Vec<u8>> {
        let deadline = Instant::now() + window;
        let mut frames = Vec::new();
        while let Ok(frame) = self
            .rx
            .recv_timeout(deadline.saturating_duration_since(Instant::now()))
        {
            frames.push(frame);
        }
        frames
    }
}

/// Temporary directory holding collector sockets.
pub fn socket_dir() -> TempDir {
    tempfile::tempdir().expect("create socket directory")
}

/// Decode one envelope, panicking on malformed or trailing bytes.
pub fn decode(frame: &[u8]) -> Envelope {
    let mut cursor = Cursor::new(frame);
    let envelope = Envelope::deserialize(&mut rmp_serde::Deserializer::new(&mut cursor))
        .expect("decode envelope");
    assert_eq!(
        cursor.position(),
        frame.len() as u64,
        "envelope followed by trailing bytes"
    );
    envelope
}
