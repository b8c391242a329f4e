//! Span range configuration messages.
//!
//! Two Protocol Buffer messages describe which spans (versioned partitions
//! of ingested data) a pipeline component works on:
//!
//! - `StaticRange`: an inclusive interval `start_span_number..=end_span_number`
//! - `RangeConfig`: a one-of over range kinds, currently only `static_range`
//!
//! [`range`] holds the value types, [`wire`] the generated messages and field
//! numbers, [`codec`] binary encoding, and [`range::text`] the text format.
//!
//! ```
//! use span_range::{codec::Codec, range::RangeConfig};
//!
//! let config = RangeConfig::from_static_range(0, 5);
//! let bytes = Codec::new().encode(&config);
//! assert_eq!(bytes, [0x0a, 0x02, 0x10, 0x05]);
//! assert_eq!(Codec::new().decode::<RangeConfig>(&bytes), Ok(config));
//! ```

pub mod codec;
pub mod error;
#[cfg(feature = "span_range_tracing")]
pub mod logging;
pub mod range;
pub mod wire;

pub use codec::{Codec, Framing};
pub use error::{RangeConfigError, TextErrorKind};
pub use range::{Range, RangeConfig, StaticRange};

#[cfg(test)]
mod tests;
