//! Parsing and rendering of the three textual bearer forms.
//!
//! ```text
//! URI                 fm:ce1.c586.09580
//! FQDN                09580.c586.ce1.fm.radiodns.org
//! Service identifier  fm/ce1/c586/09580
//! ```
//!
//! Parsers only check the scheme and the number of parameters; field shapes
//! and ranges are validated by the owning bearer.

use crate::bearer::Scheme;
use crate::error::{Form, FormError};

/// Suffix appended to generated FQDNs unless another is requested.
pub const DEFAULT_FQDN_SUFFIX: &str = "radiodns.org";

/// Accepted parameter counts for a scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    /// Schemes with optional trailing parameters.
    OneOf(&'static [usize]),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        self.counts().contains(&count)
    }

    pub fn counts(&self) -> &[usize] {
        match self {
            Arity::Exactly(n) => std::slice::from_ref(n),
            Arity::OneOf(counts) => counts,
        }
    }
}

/// Split `<scheme>:<p1>.<p2>...` into its parameters.
pub fn parse_uri(uri: &str, scheme: Scheme, arity: Arity) -> Result<Vec<String>, FormError> {
    let (found, path) = uri.split_once(':').unwrap_or((uri, ""));
    let params: Vec<String> = path.split('.').map(String::from).collect();

    if found != scheme.as_str() || !arity.accepts(params.len()) {
        return Err(FormError::new(Form::Uri, uri));
    }

    Ok(params)
}

/// Split `<pN>...<p1>.<scheme>[.<suffix>]` into parameters in URI order.
///
/// The scheme label is located by position: for each accepted parameter
/// count, widest first, the label right after that many components must be
/// the scheme. Anything after the scheme label is suffix and is discarded.
pub fn parse_fqdn(fqdn: &str, scheme: Scheme, arity: Arity) -> Result<Vec<String>, FormError> {
    let labels: Vec<&str> = fqdn.split('.').collect();

    let mut counts = arity.counts().to_vec();
    counts.sort_unstable_by(|a, b| b.cmp(a));

    for count in counts {
        if labels.get(count) != Some(&scheme.as_str()) {
            continue;
        }
        let components = &labels[..count];
        if components.iter().any(|label| label.is_empty()) {
            continue;
        }
        return Ok(components.iter().rev().map(|label| label.to_string()).collect());
    }

    Err(FormError::new(Form::Fqdn, fqdn))
}

/// Split `<scheme>/<p1>/<p2>...` into its parameters.
pub fn parse_service_identifier(
    service_identifier: &str,
    scheme: Scheme,
    arity: Arity,
) -> Result<Vec<String>, FormError> {
    let mut parts = service_identifier.split('/');
    let found = parts.next().unwrap_or_default();
    let params: Vec<String> = parts.map(String::from).collect();

    if found != scheme.as_str() || !arity.accepts(params.len()) {
        return Err(FormError::new(Form::ServiceIdentifier, service_identifier));
    }

    Ok(params)
}

pub fn render_uri(scheme: Scheme, params: &[String]) -> String {
    format!("{}:{}", scheme, params.join("."))
}

/// Parameters are reversed, then the scheme and suffix follow. An empty
/// suffix yields a bare name ending in the scheme.
pub fn render_fqdn(scheme: Scheme, params: &[String], suffix: &str) -> String {
    let mut labels: Vec<&str> = params.iter().rev().map(String::as_str).collect();
    labels.push(scheme.as_str());
    if !suffix.is_empty() {
        labels.push(suffix);
    }
    labels.join(".")
}

pub fn render_service_identifier(scheme: Scheme, params: &[String]) -> String {
    let mut parts = vec![scheme.as_str()];
    parts.extend(params.iter().map(String::as_str));
    parts.join("/")
}
