//! Bearer variants and the dispatcher that picks between them.
//!
//! Each variant implements [`BearerForm`], which supplies parsing from and
//! rendering to the three textual forms on top of `from_params` and
//! `to_params`. [`Bearer`] wraps whichever variant a piece of text turns
//! out to describe.

mod amss;
mod dab;
mod drm;
pub(crate) mod field;
mod fm;
mod iboc;

use std::fmt;
use std::str::FromStr;

use log::trace;
use serde::{Deserialize, Serialize};

pub use amss::AmssBearer;
pub use dab::DabBearer;
pub use drm::DrmBearer;
pub use fm::FmBearer;
pub use iboc::IbocBearer;

use crate::error::{BearerError, FieldError, Form, FormError};
use crate::form::{
    parse_fqdn, parse_service_identifier, parse_uri, render_fqdn, render_service_identifier,
    render_uri, Arity, DEFAULT_FQDN_SUFFIX,
};

/// Scheme token that leads a URI and service identifier and ends the
/// parameter labels of an FQDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Amss,
    Dab,
    Drm,
    Fm,
    /// IBOC / HD Radio.
    Hd,
}

impl Scheme {
    /// Every scheme, in the order the dispatcher tries them.
    pub const ALL: [Scheme; 5] = [Scheme::Amss, Scheme::Dab, Scheme::Drm, Scheme::Fm, Scheme::Hd];

    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Amss => "amss",
            Scheme::Dab => "dab",
            Scheme::Drm => "drm",
            Scheme::Fm => "fm",
            Scheme::Hd => "hd",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scheme::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == s)
            .ok_or_else(|| FieldError::new("scheme", "one of amss, dab, drm, fm or hd", s))
    }
}

/// The contract shared by every bearer variant.
///
/// Implementors provide the scheme, the accepted parameter counts and the
/// conversion to and from ordered string parameters; everything else is
/// derived from those.
pub trait BearerForm: Sized {
    const SCHEME: Scheme;
    const ARITY: Arity;

    /// Validate ordered URI parameters and build the bearer.
    fn from_params(params: &[String]) -> Result<Self, BearerError>;

    /// Fixed-width, lowercase parameters in URI order.
    fn to_params(&self) -> Vec<String>;

    /// Fails when the bearer cannot be rendered as an FQDN or service
    /// identifier.
    fn ensure_addressable(&self) -> Result<(), BearerError> {
        Ok(())
    }

    fn from_uri(uri: &str) -> Result<Self, BearerError> {
        Self::from_params(&parse_uri(uri, Self::SCHEME, Self::ARITY)?)
    }

    fn from_fqdn(fqdn: &str) -> Result<Self, BearerError> {
        Self::from_params(&parse_fqdn(fqdn, Self::SCHEME, Self::ARITY)?)
    }

    fn from_service_identifier(service_identifier: &str) -> Result<Self, BearerError> {
        Self::from_params(&parse_service_identifier(
            service_identifier,
            Self::SCHEME,
            Self::ARITY,
        )?)
    }

    fn to_uri(&self) -> String {
        render_uri(Self::SCHEME, &self.to_params())
    }

    /// FQDN under `radiodns.org`.
    fn to_fqdn(&self) -> Result<String, BearerError> {
        self.to_fqdn_with_suffix(DEFAULT_FQDN_SUFFIX)
    }

    fn to_fqdn_with_suffix(&self, suffix: &str) -> Result<String, BearerError> {
        self.ensure_addressable()?;
        Ok(render_fqdn(Self::SCHEME, &self.to_params(), suffix))
    }

    fn to_service_identifier(&self) -> Result<String, BearerError> {
        self.ensure_addressable()?;
        Ok(render_service_identifier(Self::SCHEME, &self.to_params()))
    }

    /// Parse `text` as this variant if it looks like one.
    ///
    /// Returns `Ok(None)` when the scheme prefix is absent or the text has
    /// the wrong shape for the scheme. Field and country errors are
    /// returned as errors: the text claims to be this variant but is
    /// invalid.
    fn probe(form: Form, text: &str) -> Result<Option<Self>, BearerError> {
        let scheme = Self::SCHEME.as_str();
        let prefixed = match form {
            Form::Uri => text.starts_with(&format!("{}:", scheme)),
            Form::Fqdn => text.contains(&format!(".{}", scheme)),
            Form::ServiceIdentifier => text.contains(&format!("{}/", scheme)),
        };
        if !prefixed {
            return Ok(None);
        }

        unless_form_error(match form {
            Form::Uri => Self::from_uri(text),
            Form::Fqdn => Self::from_fqdn(text),
            Form::ServiceIdentifier => Self::from_service_identifier(text),
        })
    }

    fn can_parse_uri(uri: &str) -> Result<bool, BearerError> {
        Ok(Self::probe(Form::Uri, uri)?.is_some())
    }

    fn can_parse_fqdn(fqdn: &str) -> Result<bool, BearerError> {
        Ok(Self::probe(Form::Fqdn, fqdn)?.is_some())
    }

    fn can_parse_service_identifier(service_identifier: &str) -> Result<bool, BearerError> {
        Ok(Self::probe(Form::ServiceIdentifier, service_identifier)?.is_some())
    }
}

/// Turn a form error into "no match", keeping every other error.
fn unless_form_error<T>(result: Result<T, BearerError>) -> Result<Option<T>, BearerError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_form_error() => Ok(None),
        Err(e) => Err(e),
    }
}

macro_rules! impl_display_as_uri {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.to_uri())
                }
            }
        )+
    };
}

impl_display_as_uri!(AmssBearer, DabBearer, DrmBearer, FmBearer, IbocBearer);

/// A bearer of any scheme.
///
/// Serialises as its URI.
///
/// ```
/// use radiodns_bearer::{Bearer, Scheme};
///
/// let bearer = Bearer::from_fqdn("09580.c586.ce1.fm.radiodns.org").unwrap();
/// assert_eq!(bearer.scheme(), Scheme::Fm);
/// assert_eq!(bearer.to_string(), "fm:ce1.c586.09580");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Bearer {
    Amss(AmssBearer),
    Dab(DabBearer),
    Drm(DrmBearer),
    Fm(FmBearer),
    Iboc(IbocBearer),
}

macro_rules! with_variant {
    ($bearer:expr, $inner:ident => $body:expr) => {
        match $bearer {
            Bearer::Amss($inner) => $body,
            Bearer::Dab($inner) => $body,
            Bearer::Drm($inner) => $body,
            Bearer::Fm($inner) => $body,
            Bearer::Iboc($inner) => $body,
        }
    };
}

type ProbeFn = fn(Form, &str) -> Result<Option<Bearer>, BearerError>;

struct Variant {
    scheme: Scheme,
    probe: ProbeFn,
}

fn probe_as<B>(form: Form, text: &str) -> Result<Option<Bearer>, BearerError>
where
    B: BearerForm + Into<Bearer>,
{
    Ok(B::probe(form, text)?.map(Into::into))
}

/// Variants in dispatch order.
const VARIANTS: [Variant; 5] = [
    Variant {
        scheme: Scheme::Amss,
        probe: probe_as::<AmssBearer>,
    },
    Variant {
        scheme: Scheme::Dab,
        probe: probe_as::<DabBearer>,
    },
    Variant {
        scheme: Scheme::Drm,
        probe: probe_as::<DrmBearer>,
    },
    Variant {
        scheme: Scheme::Fm,
        probe: probe_as::<FmBearer>,
    },
    Variant {
        scheme: Scheme::Hd,
        probe: probe_as::<IbocBearer>,
    },
];

impl Bearer {
    fn dispatch(form: Form, text: &str) -> Result<Bearer, BearerError> {
        for variant in &VARIANTS {
            if let Some(bearer) = (variant.probe)(form, text)? {
                trace!("{} {:?} parsed as {}", form, text, variant.scheme);
                return Ok(bearer);
            }
        }
        Err(FormError::new(form, text).into())
    }

    /// Parse a URI of any scheme.
    pub fn from_uri(uri: &str) -> Result<Bearer, BearerError> {
        Self::dispatch(Form::Uri, uri)
    }

    /// Parse an FQDN of any scheme, with any suffix.
    pub fn from_fqdn(fqdn: &str) -> Result<Bearer, BearerError> {
        Self::dispatch(Form::Fqdn, fqdn)
    }

    /// Parse a service identifier of any scheme.
    pub fn from_service_identifier(service_identifier: &str) -> Result<Bearer, BearerError> {
        Self::dispatch(Form::ServiceIdentifier, service_identifier)
    }

    /// Whether any scheme accepts `uri`. Field errors still propagate.
    pub fn can_parse_uri(uri: &str) -> Result<bool, BearerError> {
        Ok(unless_form_error(Self::from_uri(uri))?.is_some())
    }

    pub fn can_parse_fqdn(fqdn: &str) -> Result<bool, BearerError> {
        Ok(unless_form_error(Self::from_fqdn(fqdn))?.is_some())
    }

    pub fn can_parse_service_identifier(service_identifier: &str) -> Result<bool, BearerError> {
        Ok(unless_form_error(Self::from_service_identifier(service_identifier))?.is_some())
    }

    pub fn scheme(&self) -> Scheme {
        match self {
            Bearer::Amss(_) => AmssBearer::SCHEME,
            Bearer::Dab(_) => DabBearer::SCHEME,
            Bearer::Drm(_) => DrmBearer::SCHEME,
            Bearer::Fm(_) => FmBearer::SCHEME,
            Bearer::Iboc(_) => IbocBearer::SCHEME,
        }
    }

    pub fn to_params(&self) -> Vec<String> {
        with_variant!(self, bearer => bearer.to_params())
    }

    pub fn to_uri(&self) -> String {
        with_variant!(self, bearer => bearer.to_uri())
    }

    pub fn to_fqdn(&self) -> Result<String, BearerError> {
        with_variant!(self, bearer => bearer.to_fqdn())
    }

    pub fn to_fqdn_with_suffix(&self, suffix: &str) -> Result<String, BearerError> {
        with_variant!(self, bearer => bearer.to_fqdn_with_suffix(suffix))
    }

    pub fn to_service_identifier(&self) -> Result<String, BearerError> {
        with_variant!(self, bearer => bearer.to_service_identifier())
    }
}

impl fmt::Display for Bearer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}

impl FromStr for Bearer {
    type Err = BearerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Bearer::from_uri(s)
    }
}

impl TryFrom<String> for Bearer {
    type Error = BearerError;

    fn try_from(uri: String) -> Result<Self, Self::Error> {
        Bearer::from_uri(&uri)
    }
}

impl From<Bearer> for String {
    fn from(bearer: Bearer) -> Self {
        bearer.to_uri()
    }
}

impl From<AmssBearer> for Bearer {
    fn from(bearer: AmssBearer) -> Self {
        Bearer::Amss(bearer)
    }
}

impl From<DabBearer> for Bearer {
    fn from(bearer: DabBearer) -> Self {
        Bearer::Dab(bearer)
    }
}

impl From<DrmBearer> for Bearer {
    fn from(bearer: DrmBearer) -> Self {
        Bearer::Drm(bearer)
    }
}

impl From<FmBearer> for Bearer {
    fn from(bearer: FmBearer) -> Self {
        Bearer::Fm(bearer)
    }
}

impl From<IbocBearer> for Bearer {
    fn from(bearer: IbocBearer) -> Self {
        Bearer::Iboc(bearer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Known-valid bearers as (URI, FQDN, service identifier).
    const VALID: &[(&str, Option<&str>, Option<&str>)] = &[
        (
            "fm:ce1.c586.09580",
            Some("09580.c586.ce1.fm.radiodns.org"),
            Some("fm/ce1/c586/09580"),
        ),
        ("fm:ce1.c201.*", None, None),
        (
            "dab:ce1.c185.e1c00098.0.004",
            Some("004.0.e1c00098.c185.ce1.dab.radiodns.org"),
            Some("dab/ce1/c185/e1c00098/0/004"),
        ),
        (
            "dab:de0.100c.d220.0",
            Some("0.d220.100c.de0.dab.radiodns.org"),
            Some("dab/de0/100c/d220/0"),
        ),
        (
            "drm:f07256.1.00d",
            Some("00d.1.f07256.drm.radiodns.org"),
            Some("drm/f07256/1/00d"),
        ),
        (
            "drm:e1c238",
            Some("e1c238.drm.radiodns.org"),
            Some("drm/e1c238"),
        ),
        (
            "drm:a13002",
            Some("a13002.drm.radiodns.org"),
            Some("drm/a13002"),
        ),
        (
            "amss:e1c238",
            Some("e1c238.amss.radiodns.org"),
            Some("amss/e1c238"),
        ),
        (
            "hd:292.07a26.2",
            Some("2.07a26.292.hd.radiodns.org"),
            Some("hd/292/07a26/2"),
        ),
        (
            "hd:292.07a26",
            Some("07a26.292.hd.radiodns.org"),
            Some("hd/292/07a26"),
        ),
    ];

    #[test]
    fn test_scheme() {
        assert_eq!("hd".parse::<Scheme>(), Ok(Scheme::Hd));
        assert_eq!(Scheme::Amss.to_string(), "amss");
        assert_eq!("iboc".parse::<Scheme>().unwrap_err().field, "scheme");
        assert_eq!(
            Scheme::ALL.map(Scheme::as_str),
            ["amss", "dab", "drm", "fm", "hd"]
        );
    }

    #[test]
    fn test_round_trip() {
        for &(uri, fqdn, service_identifier) in VALID {
            let bearer = Bearer::from_uri(uri).unwrap();
            assert_eq!(bearer.to_uri(), uri);
            assert_eq!(bearer.to_string(), uri);

            if let Some(fqdn) = fqdn {
                assert_eq!(bearer.to_fqdn().unwrap(), fqdn);
                assert_eq!(Bearer::from_fqdn(fqdn).unwrap(), bearer, "{fqdn}");
            }
            if let Some(service_identifier) = service_identifier {
                assert_eq!(bearer.to_service_identifier().unwrap(), service_identifier);
                assert_eq!(
                    Bearer::from_service_identifier(service_identifier).unwrap(),
                    bearer,
                    "{service_identifier}"
                );
            }
        }
    }

    #[test]
    fn test_dispatch_picks_variant() {
        let schemes: Vec<Scheme> = VALID
            .iter()
            .map(|(uri, ..)| Bearer::from_uri(uri).unwrap().scheme())
            .collect();
        assert_eq!(
            schemes,
            [
                Scheme::Fm,
                Scheme::Fm,
                Scheme::Dab,
                Scheme::Dab,
                Scheme::Drm,
                Scheme::Drm,
                Scheme::Drm,
                Scheme::Amss,
                Scheme::Hd,
                Scheme::Hd,
            ]
        );
        assert!(matches!(
            Bearer::from_uri("amss:e1c238").unwrap(),
            Bearer::Amss(ref b) if b.sid() == 0xe1c238
        ));
    }

    #[test]
    fn test_custom_suffix() {
        let bearer = Bearer::from_uri("fm:ce1.c586.09580").unwrap();
        let fqdn = bearer.to_fqdn_with_suffix("example.org").unwrap();
        assert_eq!(fqdn, "09580.c586.ce1.fm.example.org");
        assert_eq!(Bearer::from_fqdn(&fqdn).unwrap(), bearer);
    }

    #[test]
    fn test_unrecognised() {
        let err = Bearer::from_uri("foo:bar").unwrap_err();
        assert_eq!(err, FormError::new(Form::Uri, "foo:bar").into());
        let err = Bearer::from_fqdn("bar.foo.radiodns.org").unwrap_err();
        assert_eq!(err, FormError::new(Form::Fqdn, "bar.foo.radiodns.org").into());
        let err = Bearer::from_service_identifier("foo/bar").unwrap_err();
        assert_eq!(err, FormError::new(Form::ServiceIdentifier, "foo/bar").into());

        // right scheme, wrong arity
        assert!(Bearer::from_uri("fm:ce1.c586").unwrap_err().is_form_error());

        assert_eq!(Bearer::can_parse_uri("foo:bar"), Ok(false));
        assert_eq!(Bearer::can_parse_fqdn("bar.foo.radiodns.org"), Ok(false));
        assert_eq!(Bearer::can_parse_service_identifier("foo/bar"), Ok(false));
        assert_eq!(Bearer::can_parse_uri("dab:de0.100c.d220.0"), Ok(true));
    }

    #[test]
    fn test_field_errors_propagate() {
        let err = Bearer::from_uri("dab:ce1.c12.c456.0").unwrap_err();
        assert_eq!(err.field(), Some("eid"));
        assert!(Bearer::can_parse_uri("dab:ce1.c12.c456.0").is_err());
        assert!(Bearer::can_parse_fqdn("0.c456.c12.ce1.dab.radiodns.org").is_err());
        let err = Bearer::can_parse_service_identifier("dab/ce1/c12/c456/0").unwrap_err();
        assert_eq!(err.field(), Some("eid"));
        assert!(matches!(
            Bearer::from_uri("fm:de1.c586.09580").unwrap_err(),
            BearerError::InvalidCountry(_)
        ));
    }

    #[test]
    fn test_wildcard_fm() {
        let bearer: Bearer = "fm:ce1.c201.*".parse().unwrap();
        assert_eq!(bearer.to_uri(), "fm:ce1.c201.*");
        assert_eq!(bearer.to_fqdn().unwrap_err().field(), Some("frequency"));
        assert_eq!(
            bearer.to_service_identifier().unwrap_err().field(),
            Some("frequency")
        );
    }

    #[test]
    fn test_serde() {
        let bearer = Bearer::from(IbocBearer::new(0x292, 0x07a26, Some(0x2)).unwrap());
        let json = serde_json::to_string(&bearer).unwrap();
        assert_eq!(json, "\"hd:292.07a26.2\"");
        assert_eq!(serde_json::from_str::<Bearer>(&json).unwrap(), bearer);

        assert!(serde_json::from_str::<Bearer>("\"dab:ce1.c12.c456.0\"").is_err());
        assert_eq!(
            serde_json::to_string(&Scheme::Hd).unwrap(),
            "\"hd\""
        );
    }
}
