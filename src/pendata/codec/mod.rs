//! Flat-text serialization of student records.
//!
//! Two formats exist in the wild and both are readable:
//!
//! - [`positional`]: the persisted format. A magic header line, then a
//!   fixed number of lines per record, one value per line. Robust to
//!   values containing spaces; this is what save writes.
//! - [`tagged`]: one record per line as space-separated `key:value`
//!   tokens. Files from the earlier revision of this tool use it, so
//!   load still accepts it.
//!
//! [`decode`] sniffs the first line and dispatches: the magic header
//! means positional, a recognized `key:` token means tagged, and
//! anything else is treated as a positional file with a bad header
//! (non-fatal; the offending line is consumed and flagged).
//!
//! Decoding is total: it never errors. A wrong header and malformed
//! records are reported through [`DecodeReport`], and a file that ends
//! mid-record is silently truncated at the last complete record.

use std::time::Duration;

use crate::model::{Contact, Student};

pub mod positional;
pub mod tagged;

/// Marker for an absent optional value on the wire.
pub const SENTINEL: &str = "-";

/// What a decode pass produced, with observability metadata.
#[derive(Debug)]
pub struct DecodeReport {
    /// Records in on-disk order.
    pub records: Vec<Student>,
    /// The file's header line was not the expected magic string.
    pub header_mismatch: bool,
    /// Complete record blocks that failed field validation.
    pub skipped: usize,
    pub elapsed: Duration,
}

#[derive(Debug)]
pub struct EncodeReport {
    pub written: usize,
    pub elapsed: Duration,
}

/// Decodes `input` in whichever format it is in.
pub fn decode(input: &str) -> DecodeReport {
    let first = input.lines().next().map(strip_cr).unwrap_or("");
    if first == positional::MAGIC {
        positional::decode(input)
    } else if tagged::is_record_line(first) {
        tagged::decode(input)
    } else {
        positional::decode(input)
    }
}

pub(crate) fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

pub(crate) fn encode_opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(SENTINEL)
}

pub(crate) fn decode_opt(raw: &str) -> Option<String> {
    if raw == SENTINEL {
        None
    } else {
        Some(raw.to_string())
    }
}

/// A sentinel name means no contact at all; any phone next to it is
/// dropped, keeping the phone-implies-name invariant on load.
pub(crate) fn contact_from(name: Option<String>, phone: Option<String>) -> Option<Contact> {
    name.map(|name| Contact { name, phone })
}
