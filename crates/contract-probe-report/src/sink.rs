// crates/contract-probe-report/src/sink.rs
// ============================================================================
// Module: Attachment Sinks
// Description: Memory, file, and null sinks for raw response bodies.
// Purpose: Deliver per-call attachments to concrete report stores.
// Dependencies: contract-probe-core, std
// ============================================================================

//! ## Overview
//! Sinks receive one opaque text attachment per executed call. The memory
//! sink keeps attachments for in-process inspection, the file sink writes
//! one numbered file per attachment into a report directory, and the null
//! sink discards everything. Sequence numbers are monotonic per sink so
//! attachment order survives into the store.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use contract_probe_core::AttachmentSink;
use contract_probe_core::ReportError;

// ============================================================================
// SECTION: Attachment Record
// ============================================================================

/// One recorded attachment.
///
/// # Invariants
/// - `seq` is monotonic within one sink, starting at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Monotonic sequence number.
    pub seq: u64,
    /// Attachment label, typically `METHOD url`.
    pub label: String,
    /// Raw attachment content.
    pub content: String,
}

// ============================================================================
// SECTION: Memory Sink
// ============================================================================

/// Sink keeping attachments in memory for in-process inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Recorded attachments in delivery order.
    attachments: Mutex<Vec<Attachment>>,
    /// Monotonic sequence counter.
    counter: AtomicU64,
}

impl MemorySink {
    /// Creates an empty memory sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the recorded attachments.
    #[must_use]
    pub fn attachments(&self) -> Vec<Attachment> {
        self.attachments.lock().map(|guard| guard.clone()).unwrap_or_default()
    }
}

impl AttachmentSink for MemorySink {
    fn attach(&self, label: &str, content: &str) -> Result<(), ReportError> {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let mut guard = self.attachments.lock().map_err(|_| ReportError::WriteFailed {
            reason: "attachment store poisoned".to_string(),
        })?;
        guard.push(Attachment {
            seq,
            label: label.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }
}

// ============================================================================
// SECTION: File Sink
// ============================================================================

/// Sink writing one numbered text file per attachment.
///
/// # Invariants
/// - Files are named `NNNN-<slug>.txt` where the slug is derived from the
///   label with non-alphanumeric runs collapsed to one dash.
#[derive(Debug)]
pub struct FileSink {
    /// Report directory receiving attachment files.
    directory: PathBuf,
    /// Monotonic sequence counter.
    counter: AtomicU64,
}

impl FileSink {
    /// Creates a file sink rooted at the given directory, creating it when
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when the directory cannot be created.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, ReportError> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|err| ReportError::WriteFailed {
            reason: format!("cannot create report directory: {err}"),
        })?;
        Ok(Self {
            directory,
            counter: AtomicU64::new(0),
        })
    }

    /// Returns the report directory.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl AttachmentSink for FileSink {
    fn attach(&self, label: &str, content: &str) -> Result<(), ReportError> {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let name = format!("{seq:04}-{}.txt", slugify(label));
        let path = self.directory.join(name);
        fs::write(&path, content).map_err(|err| ReportError::WriteFailed {
            reason: format!("cannot write `{}`: {err}", path.display()),
        })
    }
}

/// Collapses a label into a filesystem-safe slug.
fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut previous_dash = false;
    for ch in label.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            previous_dash = false;
        } else if !previous_dash && !slug.is_empty() {
            slug.push('-');
            previous_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() { "attachment".to_string() } else { slug }
}

// ============================================================================
// SECTION: Null Sink
// ============================================================================

/// Sink discarding every attachment.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AttachmentSink for NullSink {
    fn attach(&self, _label: &str, _content: &str) -> Result<(), ReportError> {
        Ok(())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions are permitted."
    )]

    use super::*;

    #[test]
    fn slugify_collapses_non_alphanumeric_runs() {
        assert_eq!(slugify("GET https://users.test/api/users?page=2"), "get-https-users-test-api-users-page-2");
    }

    #[test]
    fn slugify_of_empty_label_falls_back() {
        assert_eq!(slugify(""), "attachment");
        assert_eq!(slugify("???"), "attachment");
    }

    #[test]
    fn memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.attach("GET /one", "first").unwrap();
        sink.attach("GET /two", "second").unwrap();
        let attachments = sink.attachments();
        assert_eq!(attachments.len(), 2);
        assert_eq!(attachments[0].seq, 1);
        assert_eq!(attachments[0].content, "first");
        assert_eq!(attachments[1].seq, 2);
        assert_eq!(attachments[1].label, "GET /two");
    }
}
