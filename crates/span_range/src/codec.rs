//! Binary encoding and decoding of span range messages.
//!
//! [`Codec`] is a small, copyable set of options applied on top of the
//! generated prost types:
//!
//! - **Framing**: bare messages, or messages behind a varint length prefix so
//!   several of them can be written back to back.
//! - **Wire scan**: look at the field numbers before decoding and log data that
//!   comes from another revision of the schema. Such fields are dropped by the
//!   decoder, never rejected.
//!
//! No range checks are made: an inverted or partially set range decodes as
//! written.

use prost::{Message, bytes::BufMut};
use tracing::{debug, trace, warn};

use crate::{
    error::RangeConfigError,
    wire::{WireMessage, scan::scan_fields},
};

/// How messages are delimited in a byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// The buffer holds exactly one message.
    #[default]
    Bare,
    /// A varint length prefix precedes the message.
    LengthDelimited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    framing: Framing,
    wire_scan: bool,
}

impl Default for Codec {
    fn default() -> Self {
        Self { framing: Framing::Bare, wire_scan: true }
    }
}

impl Codec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    /// Enables or disables field scanning before decoding.
    pub fn with_wire_scan(mut self, enable: bool) -> Self {
        self.wire_scan = enable;
        self
    }

    pub fn framing(&self) -> Framing {
        self.framing
    }

    pub fn wire_scan(&self) -> bool {
        self.wire_scan
    }

    pub fn encode<M: WireMessage>(&self, message: &M) -> Vec<u8> {
        let proto = M::Proto::from(message.clone());
        match self.framing {
            Framing::Bare => proto.encode_to_vec(),
            Framing::LengthDelimited => proto.encode_length_delimited_to_vec(),
        }
    }

    /// Encodes `message` into a caller provided buffer.
    ///
    /// # Errors
    ///
    /// Returns `Encode` if `buf` cannot hold the encoded message. Nothing is
    /// written in that case.
    pub fn encode_into<M: WireMessage>(
        &self,
        message: &M,
        buf: &mut impl BufMut,
    ) -> Result<(), RangeConfigError> {
        let proto = M::Proto::from(message.clone());
        match self.framing {
            Framing::Bare => proto.encode(buf)?,
            Framing::LengthDelimited => proto.encode_length_delimited(buf)?,
        }
        Ok(())
    }

    /// Decodes one message from `buf` according to the framing.
    ///
    /// With length-delimited framing, bytes after the announced length are
    /// left alone.
    ///
    /// # Errors
    ///
    /// Returns `Decode` on malformed data and `Truncated` when the length
    /// prefix points past the end of `buf`.
    pub fn decode<M: WireMessage>(&self, buf: &[u8]) -> Result<M, RangeConfigError> {
        let body = match self.framing {
            Framing::Bare => buf,
            Framing::LengthDelimited => split_frame(buf)?.0,
        };
        self.decode_body(body)
    }

    /// Decodes every length-delimited message in `buf`, in order.
    ///
    /// This always reads length prefixes, whatever the configured framing.
    pub fn decode_stream<M: WireMessage>(
        &self,
        mut buf: &[u8],
    ) -> Result<Vec<M>, RangeConfigError> {
        let mut messages = Vec::new();
        while !buf.is_empty() {
            let (body, rest) = split_frame(buf)?;
            messages.push(self.decode_body(body)?);
            buf = rest;
        }
        trace!(message_type = M::NAME, count = messages.len(), "Decoded message stream");
        Ok(messages)
    }

    fn decode_body<M: WireMessage>(&self, body: &[u8]) -> Result<M, RangeConfigError> {
        if self.wire_scan {
            let report = scan_fields::<M>(body)?;
            for tag in &report.reserved {
                warn!(
                    message_type = M::NAME,
                    tag,
                    "Ignoring field written under a retired field number"
                );
            }
            for tag in &report.unknown {
                debug!(message_type = M::NAME, tag, "Ignoring unknown field");
            }
        }
        let proto = M::Proto::decode(body)?;
        Ok(proto.into())
    }
}

/// Splits a length-delimited frame off the front of `buf`.
fn split_frame(mut buf: &[u8]) -> Result<(&[u8], &[u8]), RangeConfigError> {
    let len = prost::decode_length_delimiter(&mut buf)?;
    if len > buf.len() {
        return Err(RangeConfigError::Truncated { expected: len, available: buf.len() });
    }
    Ok(buf.split_at(len))
}
