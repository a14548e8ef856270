//! Golden base64 vector validation, through the installed host functions

use serde::Deserialize;
use sodium_bridge::codec::Base64Variant;
use sodium_bridge::{Globals, HostValue};

#[derive(Debug, Deserialize)]
struct GoldenVector {
    bytes_hex: String,
    original: String,
    original_no_padding: String,
    urlsafe: String,
    urlsafe_no_padding: String,
    comment: String,
}

impl GoldenVector {
    fn expected(&self, variant: Base64Variant) -> &str {
        match variant {
            Base64Variant::Original => &self.original,
            Base64Variant::OriginalNoPadding => &self.original_no_padding,
            Base64Variant::UrlSafe => &self.urlsafe,
            Base64Variant::UrlSafeNoPadding => &self.urlsafe_no_padding,
        }
    }
}

fn load_golden_vectors() -> Vec<GoldenVector> {
    let json_data = include_str!("../testdata/base64-vectors.json");
    serde_json::from_str(json_data).expect("failed to parse golden vectors")
}

fn installed() -> Globals {
    let mut globals = Globals::new();
    sodium_bridge::install(&mut globals);
    globals
}

#[test]
fn test_golden_vectors() {
    let globals = installed();
    let vectors = load_golden_vectors();
    assert!(!vectors.is_empty(), "No golden vectors were loaded");

    let mut failed = 0;
    for (i, vector) in vectors.iter().enumerate() {
        let bytes = hex::decode(&vector.bytes_hex).expect("failed to decode bytes_hex");

        for variant in Base64Variant::ALL {
            let tag = HostValue::Number(variant as u8 as f64);
            let expected = vector.expected(variant);

            let encoded = globals
                .call(
                    "to_base64_from_uint8_array",
                    &[HostValue::ArrayBuffer(bytes.clone()), tag.clone()],
                )
                .expect("encode failed");
            if encoded != HostValue::from(expected) {
                eprintln!("Vector {} ({:?}): FAILED - encoding mismatch", i, variant);
                eprintln!("  Comment: {}", vector.comment);
                eprintln!("  Expected: {}", expected);
                eprintln!("  Actual:   {:?}", encoded);
                failed += 1;
                continue;
            }

            let decoded = globals
                .call(
                    "from_base64_to_arraybuffer",
                    &[HostValue::from(expected), tag],
                )
                .expect("decode failed");
            if decoded != HostValue::ArrayBuffer(bytes.clone()) {
                eprintln!("Vector {} ({:?}): FAILED - decoding mismatch", i, variant);
                eprintln!("  Comment: {}", vector.comment);
                failed += 1;
            }
        }
    }

    assert_eq!(failed, 0, "Some golden vectors failed validation");
}

#[test]
fn test_string_encoder_matches_buffer_encoder() {
    let globals = installed();
    for vector in load_golden_vectors() {
        let bytes = hex::decode(&vector.bytes_hex).unwrap();
        let Ok(text) = String::from_utf8(bytes.clone()) else {
            continue;
        };

        for variant in Base64Variant::ALL {
            let tag = HostValue::Number(variant as u8 as f64);
            let from_string = globals
                .call("to_base64_from_string", &[HostValue::from(text.as_str()), tag.clone()])
                .unwrap();
            let from_buffer = globals
                .call("to_base64_from_uint8_array", &[HostValue::ArrayBuffer(bytes.clone()), tag])
                .unwrap();
            assert_eq!(from_string, from_buffer, "{}", vector.comment);
        }
    }
}
