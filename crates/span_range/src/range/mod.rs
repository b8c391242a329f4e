//! Span range value types.
//!
//! A span is one unit of versioned data ingestion, numbered from 0 upwards.
//! These types describe which spans a pipeline component should look at.
//!
//! ## Types
//!
//! **StaticRange**: a fixed, inclusive interval of span numbers.
//!
//! **Range**: the kinds of range a configuration can carry. Only the static
//! kind exists today; the enum is non-exhaustive so further kinds can be added
//! under new wire tags.
//!
//! **RangeConfig**: holds at most one `Range`. An empty config means the
//! reader falls back to its own default.
//!
//! None of these types check that `start_span_number <= end_span_number`.
//! Interpreting an inverted range is left to whoever reads the config.

pub mod text;

/// An inclusive interval of span numbers.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct StaticRange {
    /// First span of the interval
    pub start_span_number: i32,
    /// Last span of the interval, included
    pub end_span_number: i32,
}

impl StaticRange {
    pub fn new(start_span_number: i32, end_span_number: i32) -> Self {
        Self { start_span_number, end_span_number }
    }
}

/// One way of describing a range of spans.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Range {
    /// Fixed interval, tag 1 on the wire
    Static(StaticRange),
}

/// Configuration carrying zero or one range description.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct RangeConfig {
    pub range: Option<Range>,
}

impl RangeConfig {
    /// Builds a config holding a static range over `start..=end`.
    pub fn from_static_range(start_span_number: i32, end_span_number: i32) -> Self {
        StaticRange::new(start_span_number, end_span_number).into()
    }

    /// Returns the static range if that is the variant set.
    pub fn static_range(&self) -> Option<&StaticRange> {
        match &self.range {
            Some(Range::Static(static_range)) => Some(static_range),
            None => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_none()
    }
}

impl From<StaticRange> for Range {
    fn from(static_range: StaticRange) -> Self {
        Range::Static(static_range)
    }
}

impl From<StaticRange> for RangeConfig {
    fn from(static_range: StaticRange) -> Self {
        RangeConfig { range: Some(Range::Static(static_range)) }
    }
}
