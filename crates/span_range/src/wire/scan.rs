//! Top-level field scanning of encoded messages.
//!
//! Decoding through prost silently drops fields it does not know. The scanner
//! walks the same bytes beforehand and reports which field numbers were
//! present, so callers can tell data written under a retired schema revision
//! (reserved tags) from data written by a newer one (unknown tags).

use prost::encoding::{DecodeContext, decode_key, skip_field};

use crate::{error::RangeConfigError, wire::WireMessage};

/// Field numbers found at the top level of one encoded message, in wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldReport {
    pub known: Vec<u32>,
    pub reserved: Vec<u32>,
    pub unknown: Vec<u32>,
}

impl FieldReport {
    /// Every field number seen, known or not, in wire order per category.
    pub fn all_tags(&self) -> impl Iterator<Item = u32> + '_ {
        self.known.iter().chain(&self.reserved).chain(&self.unknown).copied()
    }

    pub fn has_foreign_fields(&self) -> bool {
        !self.reserved.is_empty() || !self.unknown.is_empty()
    }
}

/// Sorts the top-level fields of an encoded `M` by field number category.
///
/// Nested messages are skipped, not descended into.
///
/// # Errors
///
/// Returns `Decode` if a key or a field payload is malformed or truncated.
pub fn scan_fields<M: WireMessage>(mut buf: &[u8]) -> Result<FieldReport, RangeConfigError> {
    let mut report = FieldReport::default();

    while !buf.is_empty() {
        let (tag, wire_type) = decode_key(&mut buf)?;
        skip_field(wire_type, tag, &mut buf, DecodeContext::default())?;

        if M::KNOWN_TAGS.contains(&tag) {
            report.known.push(tag);
        } else if M::RESERVED_TAGS.contains(&tag) {
            report.reserved.push(tag);
        } else {
            report.unknown.push(tag);
        }
    }

    Ok(report)
}
