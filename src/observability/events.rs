//! Audit event stream.
//!
//! Discrete, typed events emitted while the server runs. Events are
//! serialized as newline-delimited JSON (JSONL) with a monotonically
//! increasing sequence number.

use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Event variants
// ---------------------------------------------------------------------------

/// How an item inside a list section was addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemRef {
    Id(u32),
    Index(usize),
}

/// Kind of item-level change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemAction {
    Added,
    Updated,
    Removed,
}

/// A discrete event emitted during operation.
///
/// Tagged with `"type"` when serialized so consumers can dispatch on kind.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The server is bound and accepting connections.
    ServerStarted {
        timestamp: DateTime<Utc>,
        /// Address actually bound.
        bind: String,
        /// Location of the content document.
        content: String,
    },

    /// The server has stopped.
    ServerStopped {
        timestamp: DateTime<Utc>,
        reason: String,
    },

    /// A whole section was replaced.
    SectionReplaced {
        timestamp: DateTime<Utc>,
        section: String,
    },

    /// One item of a list section changed.
    ItemChanged {
        timestamp: DateTime<Utc>,
        section: String,
        action: ItemAction,
        item: ItemRef,
    },

    /// Correct credentials were presented.
    LoginSucceeded {
        timestamp: DateTime<Utc>,
        username: String,
    },

    /// Wrong credentials were presented. The password is never recorded.
    LoginRejected {
        timestamp: DateTime<Utc>,
        username: String,
    },

    /// The session cookie was cleared.
    LoggedOut { timestamp: DateTime<Utc> },

    /// An image was stored.
    FileUploaded {
        timestamp: DateTime<Utc>,
        /// Public path returned to the caller.
        filepath: String,
        content_type: String,
        bytes: u64,
    },
}

// ---------------------------------------------------------------------------
// Envelope (adds sequence number via serde flatten)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct EventEnvelope {
    sequence: u64,
    #[serde(flatten)]
    event: Event,
}

// ---------------------------------------------------------------------------
// Emitter
// ---------------------------------------------------------------------------

/// Thread-safe, buffered JSONL event writer.
///
/// Each call to [`emit`](Self::emit) increments the sequence counter,
/// writes the event as one JSON line and flushes. Serialization or I/O
/// failures are dropped; request handling never depends on them.
pub struct EventEmitter {
    writer: Mutex<BufWriter<Box<dyn Write + Send>>>,
    sequence: AtomicU64,
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("sequence", &self.sequence.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::noop()
    }
}

impl EventEmitter {
    /// Creates an emitter that writes to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(BufWriter::new(writer)),
            sequence: AtomicU64::new(0),
        }
    }

    /// Creates an emitter that silently discards all events.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(Box::new(std::io::sink()))
    }

    /// Creates an emitter that appends to the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created or opened.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self::new(Box::new(file)))
    }

    /// Emits an event as a single JSONL line.
    pub fn emit(&self, event: Event) {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let envelope = EventEnvelope {
            sequence: seq,
            event,
        };

        if let Ok(mut w) = self.writer.lock()
            && let Ok(line) = serde_json::to_string(&envelope)
        {
            let _ = writeln!(w, "{line}");
            let _ = w.flush();
        }
    }

    /// Returns the number of events emitted so far.
    #[must_use]
    pub fn event_count(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }

    /// Records a whole-section replacement.
    pub fn section_replaced(&self, section: &str) {
        self.emit(Event::SectionReplaced {
            timestamp: Utc::now(),
            section: section.to_owned(),
        });
    }

    /// Records an item-level change.
    pub fn item_changed(&self, section: &str, action: ItemAction, item: ItemRef) {
        self.emit(Event::ItemChanged {
            timestamp: Utc::now(),
            section: section.to_owned(),
            action,
            item,
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
