//! # Wire representation
//!
//! Generated Protocol Buffer types for the range configuration schema, the
//! field numbers they use, and conversions to and from the value types in
//! [`crate::range`].
//!
//! ## Field numbers
//!
//! | Message       | Field               | Tag |
//! |---------------|---------------------|-----|
//! | `StaticRange` | `start_span_number` | 1   |
//! | `StaticRange` | `end_span_number`   | 2   |
//! | `RangeConfig` | `static_range`      | 1   |
//!
//! Tags 2 to 5 of `RangeConfig` belonged to range kinds that were removed.
//! Configs written back then can still carry them, so they must never be
//! given a new meaning. New range kinds start at tag 6.

pub mod scan;

use crate::range::{Range, RangeConfig, StaticRange};

/// Protocol Buffer definitions generated from `proto/range_config.proto`.
pub mod proto {
    tonic::include_proto!("tfx.configs");
}

/// Compiled file descriptor set for `proto/range_config.proto`.
pub const DESCRIPTOR_SET: &[u8] =
    include_bytes!(concat!(env!("OUT_DIR"), "/range_config_descriptor.bin"));

/// Field numbers of the range configuration messages.
pub mod tags {
    pub const START_SPAN_NUMBER: u32 = 1;
    pub const END_SPAN_NUMBER: u32 = 2;
    pub const STATIC_RANGE: u32 = 1;

    /// Retired `RangeConfig` field numbers. Do not reuse.
    pub const RANGE_CONFIG_RESERVED: [u32; 4] = [2, 3, 4, 5];
}

/// Links a value type to its generated Protocol Buffer message.
pub trait WireMessage: Clone {
    type Proto: prost::Message + Default + From<Self> + Into<Self>;

    /// Fully qualified message name, as in the schema.
    const NAME: &'static str;
    /// Field numbers this revision of the schema understands.
    const KNOWN_TAGS: &'static [u32];
    /// Field numbers retired from the schema.
    const RESERVED_TAGS: &'static [u32];
}

impl WireMessage for StaticRange {
    type Proto = proto::StaticRange;

    const NAME: &'static str = "tfx.configs.StaticRange";
    const KNOWN_TAGS: &'static [u32] = &[tags::START_SPAN_NUMBER, tags::END_SPAN_NUMBER];
    const RESERVED_TAGS: &'static [u32] = &[];
}

impl WireMessage for RangeConfig {
    type Proto = proto::RangeConfig;

    const NAME: &'static str = "tfx.configs.RangeConfig";
    const KNOWN_TAGS: &'static [u32] = &[tags::STATIC_RANGE];
    const RESERVED_TAGS: &'static [u32] = &tags::RANGE_CONFIG_RESERVED;
}

impl From<proto::StaticRange> for StaticRange {
    fn from(proto_range: proto::StaticRange) -> Self {
        StaticRange {
            start_span_number: proto_range.start_span_number,
            end_span_number: proto_range.end_span_number,
        }
    }
}

impl From<StaticRange> for proto::StaticRange {
    fn from(static_range: StaticRange) -> Self {
        proto::StaticRange {
            start_span_number: static_range.start_span_number,
            end_span_number: static_range.end_span_number,
        }
    }
}

impl From<proto::RangeConfig> for RangeConfig {
    fn from(proto_config: proto::RangeConfig) -> Self {
        RangeConfig {
            range: proto_config.range.map(|range| match range {
                proto::range_config::Range::StaticRange(static_range) => {
                    Range::Static(static_range.into())
                }
            }),
        }
    }
}

impl From<RangeConfig> for proto::RangeConfig {
    fn from(config: RangeConfig) -> Self {
        proto::RangeConfig {
            range: config.range.map(|range| match range {
                Range::Static(static_range) => {
                    proto::range_config::Range::StaticRange(static_range.into())
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_range_conversion() {
        let proto_range = proto::StaticRange { start_span_number: -1, end_span_number: 12 };
        let static_range: StaticRange = proto_range.clone().into();
        assert_eq!(static_range, StaticRange::new(-1, 12));
        assert_eq!(proto::StaticRange::from(static_range), proto_range);
    }

    #[test]
    fn test_range_config_conversion() {
        let config = RangeConfig::from_static_range(0, 5);
        let proto_config = proto::RangeConfig::from(config);
        assert_eq!(
            proto_config.range,
            Some(proto::range_config::Range::StaticRange(proto::StaticRange {
                start_span_number: 0,
                end_span_number: 5,
            }))
        );
        assert_eq!(RangeConfig::from(proto_config), config);
    }

    #[test]
    fn test_unset_oneof_maps_to_empty_config() {
        let config: RangeConfig = proto::RangeConfig::default().into();
        assert!(config.is_empty());
        assert_eq!(proto::RangeConfig::from(RangeConfig::default()).range, None);
    }

    #[test]
    fn test_known_and_reserved_tags_are_disjoint() {
        for tag in RangeConfig::RESERVED_TAGS {
            assert!(!RangeConfig::KNOWN_TAGS.contains(tag));
        }
        assert!(RangeConfig::KNOWN_TAGS.iter().all(|tag| *tag < 6));
    }
}
