
use fixtures::{ConfigWriter, EDGE_SPAN_NUMBERS};

use crate::{
    codec::{Codec, Framing},
    range::{RangeConfig, StaticRange},
    wire::{scan::scan_fields, tags},
};

#[test]
fn integration_static_range_round_trip_edges() {
    #[cfg(feature = "span_range_tracing")]
    crate::logging::init();

    for codec in [Codec::new(), Codec::new().with_framing(Framing::LengthDelimited)] {
        for start in EDGE_SPAN_NUMBERS {
            for end in EDGE_SPAN_NUMBERS {
                assert_round_trip!(codec, StaticRange, StaticRange::new(start, end));
            }
        }
    }
}

#[test]
fn integration_range_config_round_trip_edges() {
    #[cfg(feature = "span_range_tracing")]
    crate::logging::init();

    let codec = Codec::new();
    assert_round_trip!(codec, RangeConfig, RangeConfig::default());
    for start in EDGE_SPAN_NUMBERS {
        for end in EDGE_SPAN_NUMBERS {
            assert_round_trip!(codec, RangeConfig, RangeConfig::from_static_range(start, end));
        }
    }
}

#[test]
fn integration_current_writer_never_emits_reserved_tags() {
    let codec = Codec::new();
    for start in EDGE_SPAN_NUMBERS {
        for end in EDGE_SPAN_NUMBERS {
            let bytes = codec.encode(&RangeConfig::from_static_range(start, end));
            assert_no_reserved_tags!(bytes);
            let report = scan_fields::<RangeConfig>(&bytes).unwrap();
            assert_eq!(report.known, vec![tags::STATIC_RANGE]);
        }
    }
    assert_no_reserved_tags!(codec.encode(&RangeConfig::default()));
}

#[test]
fn integration_newer_writer_is_tolerated() {
    #[cfg(feature = "span_range_tracing")]
    crate::logging::init();

    // A newer revision added a range kind under tag 6 next to static_range.
    let bytes = ConfigWriter::new()
        .current(&RangeConfig::from_static_range(0, 5))
        .nested(6, &[0x08, 0x03])
        .varint(7, 1)
        .build();

    let report = scan_fields::<RangeConfig>(&bytes).unwrap();
    assert_eq!(report.unknown, vec![6, 7]);

    for codec in [Codec::new(), Codec::new().with_wire_scan(false)] {
        assert_eq!(codec.decode::<RangeConfig>(&bytes), Ok(RangeConfig::from_static_range(0, 5)));
    }
}

#[test]
fn integration_older_writer_is_tolerated() {
    #[cfg(feature = "span_range_tracing")]
    crate::logging::init();

    // Configs written before tags 2 to 5 were retired.
    let bytes = ConfigWriter::new()
        .nested(2, &[0x08, 0x02, 0x10, 0x01])
        .varint(3, 4)
        .varint(4, 1)
        .nested(5, &[])
        .build();

    let report = scan_fields::<RangeConfig>(&bytes).unwrap();
    assert_eq!(report.reserved, vec![2, 3, 4, 5]);
    assert!(report.known.is_empty());

    let config = Codec::new().decode::<RangeConfig>(&bytes).unwrap();
    assert!(config.is_empty());

    let mixed = ConfigWriter::new()
        .varint(3, 4)
        .current(&RangeConfig::from_static_range(10, 12))
        .build();
    assert_eq!(
        Codec::new().decode::<RangeConfig>(&mixed),
        Ok(RangeConfig::from_static_range(10, 12))
    );
}

#[test]
fn integration_last_static_range_wins() {
    // Repeated singular message fields are merged, later scalars win.
    let bytes = ConfigWriter::new()
        .nested(tags::STATIC_RANGE, &[0x08, 0x01, 0x10, 0x09])
        .nested(tags::STATIC_RANGE, &[0x10, 0x04])
        .build();
    assert_eq!(
        Codec::new().decode::<RangeConfig>(&bytes),
        Ok(RangeConfig::from_static_range(1, 4))
    );
}

#[test]
fn integration_text_and_binary_agree() {
    let codec = Codec::new().with_framing(Framing::LengthDelimited);
    let texts = [
        "static_range { start_span_number: 0 end_span_number: 5 }",
        "static_range { }",
        "",
        "static_range: < start_span_number: -7, end_span_number: 0x7fffffff >",
    ];

    let mut stream = Vec::new();
    let mut expected = Vec::new();
    for text in texts {
        let config: RangeConfig = text.parse().unwrap();
        codec.encode_into(&config, &mut stream).unwrap();
        expected.push(config);
    }

    let decoded = codec.decode_stream::<RangeConfig>(&stream).unwrap();
    assert_eq!(decoded, expected);
    assert_eq!(decoded[0].to_string(), "static_range { end_span_number: 5 }");
    assert_eq!(decoded[3], RangeConfig::from_static_range(-7, i32::MAX));
}
