//! Error types for bearer parsing, validation and rendering.

use std::fmt;

use thiserror::Error;

/// Textual form a bearer was being parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Form {
    /// `<scheme>:<param1>.<param2>...`
    Uri,
    /// `<paramN>...<param1>.<scheme>[.<suffix>]`
    Fqdn,
    /// `<scheme>/<param1>/<param2>/...`
    ServiceIdentifier,
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Form::Uri => "URI",
            Form::Fqdn => "FQDN",
            Form::ServiceIdentifier => "Service Identifier",
        })
    }
}

/// A value could not be coerced to an integer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Value is not a number: {input:?}")]
pub struct NumberError {
    /// The offending value.
    pub input: String,
}

impl NumberError {
    pub fn new(input: impl Into<String>) -> Self {
        Self { input: input.into() }
    }
}

/// The scheme or component count of a textual form did not match.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {form}: {input:?}")]
pub struct FormError {
    /// Which textual form was being parsed.
    pub form: Form,
    /// The rejected text.
    pub input: String,
}

impl FormError {
    pub fn new(form: Form, input: impl Into<String>) -> Self {
        Self {
            form,
            input: input.into(),
        }
    }
}

/// A single bearer field has the wrong shape or is out of range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} must be {expected}, got {input:?}")]
pub struct FieldError {
    /// Field name, e.g. `eid` or `frequency`.
    pub field: &'static str,
    /// Human readable description of what was expected.
    pub expected: String,
    /// The offending value as text.
    pub input: String,
}

impl FieldError {
    pub fn new(field: &'static str, expected: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            field,
            expected: expected.into(),
            input: input.into(),
        }
    }
}

/// Why a country input could not be turned into an ECC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountryErrorReason {
    /// Not an ECC, not a GCC and not a known ISO code for this PI/SId.
    Unrecognised,
    /// The GCC nibble disagrees with the country nibble of `pi` or `sid`.
    NibbleMismatch { field: &'static str },
}

impl fmt::Display for CountryErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountryErrorReason::Unrecognised => f.write_str(
                "country parameter not recognised as ECC or GCC or valid ISO country code",
            ),
            CountryErrorReason::NibbleMismatch { field } => write!(
                f,
                "gcc cannot start with a different nibble to the ECC nibble of {}",
                field
            ),
        }
    }
}

/// A country input was unresolvable or inconsistent with the PI/SId.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason} (country: {input:?})")]
pub struct CountryError {
    pub reason: CountryErrorReason,
    /// The country input as supplied.
    pub input: String,
}

impl CountryError {
    pub fn unrecognised(input: impl Into<String>) -> Self {
        Self {
            reason: CountryErrorReason::Unrecognised,
            input: input.into(),
        }
    }

    pub fn nibble_mismatch(field: &'static str, input: impl Into<String>) -> Self {
        Self {
            reason: CountryErrorReason::NibbleMismatch { field },
            input: input.into(),
        }
    }
}

/// Any failure surfaced by a bearer operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BearerError {
    /// Scheme or component-count mismatch in a URI, FQDN or service identifier.
    #[error(transparent)]
    InvalidForm(#[from] FormError),

    /// A field's string shape or numeric range is wrong.
    #[error(transparent)]
    InvalidField(#[from] FieldError),

    /// Country input unresolvable or inconsistent with the PI/SId.
    #[error(transparent)]
    InvalidCountry(#[from] CountryError),

    /// Input is not a well-formed integer.
    #[error(transparent)]
    InvalidNumber(#[from] NumberError),
}

impl BearerError {
    /// Returns true for the one kind the `can_parse_*` probes treat as "no".
    pub fn is_form_error(&self) -> bool {
        matches!(self, BearerError::InvalidForm(_))
    }

    /// Name of the offending field, for field errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            BearerError::InvalidField(e) => Some(e.field),
            _ => None,
        }
    }
}

/// Failure loading a country reference table.
#[derive(Error, Debug)]
pub enum CountryTableError {
    /// The JSON document did not match the table format.
    #[error("Failed to parse country table JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A line of the CSV source could not be parsed.
    #[error("Failed to parse country table CSV at line {line}: {reason}")]
    Csv { line: usize, reason: String },
}
