//! Lowercase hexadecimal helpers for binary content.

use std::fmt;

use crate::errors::HexError;

/// Displays a byte slice as lowercase hexadecimal without allocating.
#[derive(Debug, Clone, Copy)]
pub struct Hex<'a>(pub &'a [u8]);

impl fmt::Display for Hex<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(formatter, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Encodes bytes as lowercase hexadecimal.
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
    Hex(bytes).to_string()
}

/// Decodes hexadecimal text. Both upper and lower case digits are accepted.
///
/// # Errors
///
/// Returns [`HexError::OddLength`] when the digit count is odd and
/// [`HexError::InvalidDigit`] for any character outside `[0-9a-fA-F]`.
pub fn from_hex(text: &str) -> Result<Vec<u8>, HexError> {
    let digits = text.as_bytes();
    if !digits.len().is_multiple_of(2) {
        return Err(HexError::OddLength { len: digits.len() });
    }

    let mut out = Vec::with_capacity(digits.len() >> 1);
    for (index, pair) in digits.chunks_exact(2).enumerate() {
        let offset = index * 2;
        let high = digit_value(pair.first().copied(), offset)?;
        let low = digit_value(pair.get(1).copied(), offset + 1)?;
        out.push((high << 4) | low);
    }
    Ok(out)
}

fn digit_value(digit: Option<u8>, offset: usize) -> Result<u8, HexError> {
    match digit {
        Some(b @ b'0'..=b'9') => Ok(b - b'0'),
        Some(b @ b'a'..=b'f') => Ok(10 + (b - b'a')),
        Some(b @ b'A'..=b'F') => Ok(10 + (b - b'A')),
        _ => Err(HexError::InvalidDigit { offset }),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn encodes_lowercase() {
        assert_eq!(to_hex(&[0x00, 0x0f, 0xab, 0xff]), "000fabff");
        assert_eq!(to_hex(&[]), "");
    }

    #[rstest]
    #[case("000fabff", vec![0x00, 0x0f, 0xab, 0xff])]
    #[case("DEADbeef", vec![0xde, 0xad, 0xbe, 0xef])]
    #[case("", Vec::new())]
    fn decodes_mixed_case(#[case] text: &str, #[case] expected: Vec<u8>) {
        assert_eq!(from_hex(text).expect("valid hex"), expected);
    }

    #[rstest]
    #[case("a", 1)]
    #[case("abc", 3)]
    #[case("0123456789a", 11)]
    fn rejects_odd_length(#[case] text: &str, #[case] len: usize) {
        assert_eq!(from_hex(text), Err(HexError::OddLength { len }));
    }

    #[test]
    fn decoded_length_is_half_the_digit_count() {
        let digits = "ab".repeat(257);
        assert_eq!(from_hex(&digits).expect("valid hex").len(), 257);
    }

    #[rstest]
    #[case("zz", 0)]
    #[case("0g", 1)]
    #[case("00 1", 2)]
    fn rejects_non_hex_digits(#[case] text: &str, #[case] offset: usize) {
        assert_eq!(from_hex(text), Err(HexError::InvalidDigit { offset }));
    }
}
