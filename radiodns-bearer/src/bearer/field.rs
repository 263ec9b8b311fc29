//! Shape and range checks shared by the bearer variants.

use std::fmt::LowerHex;
use std::ops::RangeInclusive;

use crate::bearer::Scheme;
use crate::error::{BearerError, FieldError, Form, FormError};
use crate::form::render_uri;
use crate::number::{coerce, is_decimal, is_hex};

/// Check that a textual parameter is a hexadecimal number of one of the
/// given widths, then parse it.
pub(crate) fn hex_param(
    field: &'static str,
    value: &str,
    digits: &[usize],
) -> Result<u32, BearerError> {
    if !digits.contains(&value.len()) || !is_hex(value) {
        let widths: Vec<String> = digits.iter().map(usize::to_string).collect();
        return Err(FieldError::new(
            field,
            format!("a {} digit hexadecimal number", widths.join(" or ")),
            value,
        )
        .into());
    }
    // at most eight hex digits, always fits
    Ok(coerce(value, 16)? as u32)
}

/// Like [`hex_param`] for zero-padded decimal parameters.
pub(crate) fn decimal_param(
    field: &'static str,
    value: &str,
    digits: usize,
) -> Result<u32, BearerError> {
    if value.len() != digits || !is_decimal(value) {
        return Err(FieldError::new(
            field,
            format!("a {} digit number with zero padding", digits),
            value,
        )
        .into());
    }
    Ok(coerce(value, 10)? as u32)
}

pub(crate) fn check_range<T>(
    field: &'static str,
    value: T,
    range: RangeInclusive<T>,
) -> Result<T, FieldError>
where
    T: PartialOrd + LowerHex + Copy,
{
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(FieldError::new(
            field,
            format!(
                "a number between {:#x} and {:#x}",
                range.start(),
                range.end()
            ),
            format!("{:#x}", value),
        ))
    }
}

/// `from_params` was handed a parameter count the scheme does not accept.
pub(crate) fn arity_mismatch(scheme: Scheme, params: &[String]) -> BearerError {
    FormError::new(Form::Uri, render_uri(scheme, params)).into()
}
