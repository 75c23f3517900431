// crates/contract-probe-core/src/core/window.rs
// ============================================================================
// Module: Call Window and Server Timestamps
// Description: Time-window capture and strict server timestamp parsing.
// Purpose: Bracket mutating calls so server-generated timestamps can be validated.
// Dependencies: thiserror, time
// ============================================================================

//! ## Overview
//! A window assertion checks that a server-issued timestamp falls within a
//! client-observed interval bracketing the request. The window opens one
//! minute before the call and closes one minute after the response; the
//! slack on both sides tolerates clock skew between client and server
//! without weakening the guarantee that the timestamp was generated during
//! the call.
//!
//! Server timestamps are parsed against the fixed wire pattern
//! `YYYY-MM-DDTHH:MM:SS.mmmZ` (millisecond precision, UTC, literal trailing
//! `Z`). Any deviation is a format error, not a lenient parse.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use time::Duration;
use time::OffsetDateTime;
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

// ============================================================================
// SECTION: Wire Format
// ============================================================================

/// Fixed wire pattern for server-generated timestamps.
const SERVER_TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

/// Clock-skew slack applied on both sides of the window.
const WINDOW_SLACK: Duration = Duration::minutes(1);

/// Server timestamp parse errors.
///
/// # Invariants
/// - The rejected raw text is carried verbatim for diagnostics.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("timestamp `{raw}` does not match the pattern YYYY-MM-DDTHH:MM:SS.mmmZ")]
pub struct ServerTimestampError {
    /// Rejected wire text.
    pub raw: String,
}

/// Parses a server timestamp in the fixed millisecond-precision UTC pattern.
///
/// # Errors
///
/// Returns [`ServerTimestampError`] when the text deviates from the pattern
/// in any way, including missing padding, extra precision, or a numeric
/// offset in place of the literal `Z`.
pub fn parse_server_timestamp(raw: &str) -> Result<OffsetDateTime, ServerTimestampError> {
    PrimitiveDateTime::parse(raw, SERVER_TIMESTAMP_FORMAT)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|_| ServerTimestampError {
            raw: raw.to_string(),
        })
}

/// Formats an instant in the server wire pattern.
///
/// Truncates to millisecond precision; the wire format carries exactly three
/// subsecond digits.
#[must_use]
pub fn format_server_timestamp(instant: OffsetDateTime) -> String {
    let utc = instant.to_offset(time::UtcOffset::UTC);
    utc.format(SERVER_TIMESTAMP_FORMAT).unwrap_or_default()
}

// ============================================================================
// SECTION: Call Window
// ============================================================================

/// An open call window captured before a mutating request is issued.
///
/// # Invariants
/// - The lower bound is one minute before the instant of opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallWindow {
    /// Lower bound, slack already applied.
    lower: OffsetDateTime,
}

impl CallWindow {
    /// Opens a window at the current UTC instant, minus slack.
    #[must_use]
    pub fn open() -> Self {
        Self::open_at(OffsetDateTime::now_utc())
    }

    /// Opens a window at an explicit instant, minus slack.
    #[must_use]
    pub fn open_at(instant: OffsetDateTime) -> Self {
        Self {
            lower: instant - WINDOW_SLACK,
        }
    }

    /// Closes the window at the current UTC instant, plus slack.
    #[must_use]
    pub fn close(self) -> ClosedWindow {
        self.close_at(OffsetDateTime::now_utc())
    }

    /// Closes the window at an explicit instant, plus slack.
    #[must_use]
    pub fn close_at(self, instant: OffsetDateTime) -> ClosedWindow {
        ClosedWindow {
            lower: self.lower,
            upper: instant + WINDOW_SLACK,
        }
    }
}

/// A closed call window bracketing one request/response exchange.
///
/// # Invariants
/// - `lower <= upper` for any window closed after it was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosedWindow {
    /// Inclusive lower bound.
    lower: OffsetDateTime,
    /// Inclusive upper bound.
    upper: OffsetDateTime,
}

impl ClosedWindow {
    /// Returns true when the instant lies within the window, bounds included.
    #[must_use]
    pub fn contains(&self, instant: OffsetDateTime) -> bool {
        self.lower <= instant && instant <= self.upper
    }

    /// Returns the inclusive lower bound.
    #[must_use]
    pub const fn lower(&self) -> OffsetDateTime {
        self.lower
    }

    /// Returns the inclusive upper bound.
    #[must_use]
    pub const fn upper(&self) -> OffsetDateTime {
        self.upper
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
