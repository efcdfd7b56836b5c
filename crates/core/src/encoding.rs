//! Legacy code page normalization.
//!
//! The shop database stores free text in Windows-1251. Everything past the
//! store boundary (records, documents, logs) is UTF-8.

use encoding_rs::{Encoding, WINDOWS_1251};

use crate::error::{DecodingError, EncodingError};

/// Code page used by the source store for text columns.
pub fn legacy_code_page() -> &'static Encoding {
    WINDOWS_1251
}

/// Byte left undefined by the Windows-1251 code page.
///
/// The WHATWG table used by `encoding_rs` maps it to the C1 control U+0098;
/// the code page itself has no character there.
pub const UNDEFINED_LEGACY_BYTE: u8 = 0x98;

/// Decode legacy-encoded bytes into UTF-8 text.
///
/// Never substitutes anything: a byte without a mapping in the code page
/// fails the whole field.
pub fn decode_legacy(bytes: &[u8]) -> Result<String, DecodingError> {
    if let Some(offset) = bytes.iter().position(|&b| b == UNDEFINED_LEGACY_BYTE) {
        return Err(DecodingError {
            code_page: legacy_code_page().name(),
            offset,
            byte: UNDEFINED_LEGACY_BYTE,
        });
    }

    let (text, _) = legacy_code_page().decode_without_bom_handling(bytes);
    Ok(text.into_owned())
}

/// Encode UTF-8 text into the legacy code page.
pub fn encode_legacy(text: &str) -> Result<Vec<u8>, EncodingError> {
    let unmappable = |c: char| {
        let mut buf = [0u8; 4];
        c == char::from(UNDEFINED_LEGACY_BYTE)
            || legacy_code_page().encode(c.encode_utf8(&mut buf)).2
    };

    match text.chars().find(|&c| unmappable(c)) {
        Some(ch) => Err(EncodingError {
            code_page: legacy_code_page().name(),
            ch,
        }),
        None => Ok(legacy_code_page().encode(text).0.into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through_unchanged() {
        assert_eq!(decode_legacy(b"A100").unwrap(), "A100");
        assert_eq!(decode_legacy(b"").unwrap(), "");
    }

    #[test]
    fn cyrillic_bytes_decode_to_utf8() {
        // "Напитки" in Windows-1251.
        let bytes = [0xCD, 0xE0, 0xEF, 0xE8, 0xF2, 0xEA, 0xE8];
        assert_eq!(decode_legacy(&bytes).unwrap(), "Напитки");
    }

    #[test]
    fn yo_and_mixed_scripts_decode() {
        // "Ёж-5" in Windows-1251.
        let bytes = [0xA8, 0xE6, b'-', b'5'];
        assert_eq!(decode_legacy(&bytes).unwrap(), "Ёж-5");
    }

    #[test]
    fn encode_produces_single_byte_per_cyrillic_char() {
        let bytes = encode_legacy("Кола").unwrap();
        assert_eq!(bytes, vec![0xCA, 0xEE, 0xEB, 0xE0]);
    }

    #[test]
    fn undefined_byte_fails_with_its_offset() {
        let err = decode_legacy(&[b'A', 0x98]).unwrap_err();
        assert_eq!(
            err,
            DecodingError {
                code_page: "windows-1251",
                offset: 1,
                byte: 0x98
            }
        );
    }

    #[test]
    fn undefined_byte_is_reported_at_first_occurrence() {
        // "Кола" with the undefined byte in the middle and at the end.
        let err = decode_legacy(&[0xCA, 0xEE, 0x98, 0xEB, 0xE0, 0x98]).unwrap_err();
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn every_other_byte_has_a_mapping() {
        for byte in (0u8..=255).filter(|&b| b != UNDEFINED_LEGACY_BYTE) {
            let text = decode_legacy(&[byte]).unwrap();
            assert_eq!(text.chars().count(), 1, "byte 0x{byte:02X}");
        }
    }

    #[test]
    fn encode_rejects_the_undefined_position() {
        let err = encode_legacy("A\u{98}").unwrap_err();
        assert_eq!(err.ch, '\u{98}');
    }

    #[test]
    fn encode_rejects_characters_outside_code_page() {
        let err = encode_legacy("Cola 日本").unwrap_err();
        assert_eq!(err.ch, '日');
        assert_eq!(err.code_page, "windows-1251");
    }

    mod prop {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: printable Cyrillic/Latin text survives encode then decode.
            #[test]
            fn legacy_round_trip_is_lossless(
                text in "[А-Яа-яЁёA-Za-z0-9 .,()-]{0,64}"
            ) {
                let bytes = encode_legacy(&text).unwrap();
                prop_assert_eq!(bytes.len(), text.chars().count());
                prop_assert_eq!(decode_legacy(&bytes).unwrap(), text);
            }

            /// Property: decoding is deterministic, failures included.
            #[test]
            fn decode_is_deterministic(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
                prop_assert_eq!(decode_legacy(&bytes), decode_legacy(&bytes));
            }

            /// Property: any field containing the undefined byte is rejected.
            #[test]
            fn undefined_byte_anywhere_is_rejected(
                prefix in prop::collection::vec(0x20u8..0x7f, 0..32),
                suffix in prop::collection::vec(any::<u8>(), 0..32)
            ) {
                let mut bytes = prefix.clone();
                bytes.push(UNDEFINED_LEGACY_BYTE);
                bytes.extend(suffix);
                let err = decode_legacy(&bytes).unwrap_err();
                prop_assert_eq!(err.offset, prefix.len());
            }
        }
    }
}
