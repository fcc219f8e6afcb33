//! Fixed-length Shift-JIS string fields.
//!
//! Marble archives store member names and key material as Shift-JIS
//! (code page 932) text. Name fields have a fixed on-disk width and are
//! null-padded; text past the first null byte belongs to the next logical
//! field, never to the string itself.

use encoding_rs::SHIFT_JIS;

/// Decodes a null-padded Shift-JIS field, stopping at the first null byte.
///
/// Undecodable byte sequences are replaced, never treated as UTF-8.
pub fn decode_fixed(field: &[u8]) -> String {
	let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
	let (text, _encoding, _had_errors) = SHIFT_JIS.decode(&field[..end]);
	text.into_owned()
}

/// Encodes `text` into a fixed-width Shift-JIS field of `len` bytes.
///
/// The encoded text is truncated to `len - 1` bytes so that at least one
/// trailing null remains; the rest of the field is zero-padded.
pub fn encode_fixed(text: &str, len: usize) -> Vec<u8> {
	let (encoded, _encoding, _had_errors) = SHIFT_JIS.encode(text);
	let mut field = vec![0u8; len];
	let used = encoded.len().min(len.saturating_sub(1));
	field[..used].copy_from_slice(&encoded[..used]);
	field
}

/// Encodes `text` as raw Shift-JIS bytes without padding or truncation.
pub fn encode(text: &str) -> Vec<u8> {
	let (encoded, _encoding, _had_errors) = SHIFT_JIS.encode(text);
	encoded.into_owned()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_decode_stops_at_null() {
		assert_eq!(decode_fixed(b"ABC\0DEF\0\0"), "ABC");
		assert_eq!(decode_fixed(b"ABC"), "ABC");
		assert_eq!(decode_fixed(b"\0\0\0"), "");
	}

	#[test]
	fn test_decode_shift_jis_text() {
		// "あ" in Shift-JIS is 0x82 0xA0
		assert_eq!(decode_fixed(&[0x82, 0xA0, 0x00, 0x00]), "あ");
	}

	#[test]
	fn test_encode_fixed_pads_and_truncates() {
		assert_eq!(encode_fixed("AB", 4), vec![b'A', b'B', 0, 0]);
		// Truncated to len - 1 bytes, final byte stays null
		assert_eq!(encode_fixed("ABCDEF", 4), vec![b'A', b'B', b'C', 0]);
	}

	#[test]
	fn test_encode_round_trip() {
		let field = encode_fixed("あい", 8);
		assert_eq!(field.len(), 8);
		assert_eq!(decode_fixed(&field), "あい");
	}

	#[test]
	fn test_encode_raw() {
		assert_eq!(encode("あ"), vec![0x82, 0xA0]);
		assert_eq!(encode("key"), b"key".to_vec());
	}
}
