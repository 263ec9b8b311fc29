//! RadioDNS bearer identifiers.
//!
//! A bearer identifies one radio transmission: an FM/RDS programme, a DAB
//! service component, a DRM or AMSS service, or an IBOC (HD Radio) station.
//! Every bearer has three textual forms.
//!
//! # Forms
//!
//! ```text
//! URI                 <scheme>:<p1>.<p2>...<pN>        fm:ce1.c586.09580
//! FQDN                <pN>...<p1>.<scheme>.<suffix>    09580.c586.ce1.fm.radiodns.org
//! Service identifier  <scheme>/<p1>/<p2>/.../<pN>      fm/ce1/c586/09580
//! ```
//!
//! # Example
//!
//! ```rust
//! use radiodns_bearer::{Bearer, BearerForm, CountryInput, FmBearer};
//!
//! // Parse any scheme
//! let bearer = Bearer::from_uri("dab:ce1.c185.e1c00098.0.004").unwrap();
//! assert_eq!(bearer.to_fqdn().unwrap(), "004.0.e1c00098.c185.ce1.dab.radiodns.org");
//!
//! // Or build one, giving the country as an ISO code
//! let fm = FmBearer::new(CountryInput::Iso("fr".into()), 0xc586, Some(95.8)).unwrap();
//! assert_eq!(fm.gcc(), 0xce1);
//! assert_eq!(fm.to_service_identifier().unwrap(), "fm/ce1/c586/09580");
//!
//! // Wildcard FM bearers have a URI only
//! let wildcard = FmBearer::from_uri("fm:ce1.c201.*").unwrap();
//! assert!(wildcard.to_fqdn().is_err());
//! ```
//!
//! # Country codes
//!
//! FM and DAB bearers accept their country as an ECC, a GCC or an ISO code;
//! see [`country`] for how the three are reconciled against the PI or SId.

pub mod bearer;
pub mod country;
pub mod error;
pub mod form;
pub mod number;

pub use bearer::{AmssBearer, Bearer, BearerForm, DabBearer, DrmBearer, FmBearer, IbocBearer, Scheme};
pub use country::{resolve_ecc, Comparison, CountryEntry, CountryInput, CountryTable};
pub use error::{
    BearerError, CountryError, CountryErrorReason, CountryTableError, FieldError, Form, FormError,
    NumberError,
};
pub use form::{Arity, DEFAULT_FQDN_SUFFIX};
