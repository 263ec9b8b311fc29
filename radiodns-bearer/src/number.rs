//! Integer coercion for values that arrive either as numbers or as text.
//!
//! Text must be hexadecimal-shaped (optionally `0x` prefixed) before it is
//! parsed, so `"1234x"` is rejected instead of being truncated to `0x1234`.

use crate::error::NumberError;

/// A value to be coerced: already numeric, or textual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberInput<'a> {
    Int(i64),
    Text(&'a str),
}

impl From<i64> for NumberInput<'_> {
    fn from(value: i64) -> Self {
        NumberInput::Int(value)
    }
}

impl From<u32> for NumberInput<'_> {
    fn from(value: u32) -> Self {
        NumberInput::Int(value as i64)
    }
}

impl From<u16> for NumberInput<'_> {
    fn from(value: u16) -> Self {
        NumberInput::Int(value as i64)
    }
}

impl From<u8> for NumberInput<'_> {
    fn from(value: u8) -> Self {
        NumberInput::Int(value as i64)
    }
}

impl<'a> From<&'a str> for NumberInput<'a> {
    fn from(value: &'a str) -> Self {
        NumberInput::Text(value)
    }
}

impl<'a> From<&'a String> for NumberInput<'a> {
    fn from(value: &'a String) -> Self {
        NumberInput::Text(value.as_str())
    }
}

/// Returns true if `value` is made only of hexadecimal digits.
pub fn is_hex(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Like [`is_hex`], but also accepts a leading `0x`.
pub fn is_hex_with_prefix(value: &str) -> bool {
    is_hex(value.strip_prefix("0x").unwrap_or(value))
}

/// Returns true if `value` is made only of decimal digits.
pub fn is_decimal(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Coerce a number or numeric string to an integer.
///
/// Numbers are returned unchanged and `radix` is ignored. Text must pass the
/// hexadecimal pattern and then parse completely in `radix`; a `0x` prefix
/// is only meaningful in radix 16.
///
/// ```
/// use radiodns_bearer::number::coerce;
///
/// assert_eq!(coerce("0xab", 16), Ok(0xab));
/// assert_eq!(coerce("12", 10), Ok(12));
/// assert_eq!(coerce(0xf_u8, 10), Ok(15));
/// assert!(coerce("2345x1", 16).is_err());
/// ```
pub fn coerce<'a>(value: impl Into<NumberInput<'a>>, radix: u32) -> Result<i64, NumberError> {
    match value.into() {
        NumberInput::Int(n) => Ok(n),
        NumberInput::Text(text) => {
            if !is_hex_with_prefix(text) {
                return Err(NumberError::new(text));
            }
            let digits = match (radix, text.strip_prefix("0x")) {
                (16, Some(rest)) => rest,
                _ => text,
            };
            i64::from_str_radix(digits, radix).map_err(|_| NumberError::new(text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce(1_i64, 16), Ok(1));
        assert_eq!(coerce(0xf_u32, 10), Ok(15));
    }

    #[test]
    fn test_coerce_string() {
        assert_eq!(coerce("1", 10), Ok(1));
        assert_eq!(coerce("f", 16), Ok(0xf));
        assert_eq!(coerce("0xab", 16), Ok(0xab));
        assert_eq!(coerce("E1", 16), Ok(0xe1));
    }

    #[test]
    fn test_coerce_rejects_invalid() {
        assert_eq!(coerce("x", 16), Err(NumberError::new("x")));
        assert_eq!(coerce("2345x1", 16), Err(NumberError::new("2345x1")));
        assert_eq!(coerce("", 16), Err(NumberError::new("")));
        assert_eq!(coerce("0x", 16), Err(NumberError::new("0x")));
        // hex-shaped but not decimal
        assert_eq!(coerce("ab", 10), Err(NumberError::new("ab")));
        assert!(coerce("ffffffffffffffffff", 16).is_err());
    }

    #[test]
    fn test_shape_predicates() {
        assert!(is_hex("c586"));
        assert!(!is_hex("0xc586"));
        assert!(is_hex_with_prefix("0xc586"));
        assert!(!is_hex("g1"));
        assert!(is_decimal("09580"));
        assert!(!is_decimal("0958a"));
    }
}
