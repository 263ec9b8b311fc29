//! Authoritative FQDN resolution for RadioDNS bearers.
//!
//! Builds on `radiodns-bearer`: a bearer (or a URI, or a loose parameter
//! object) is turned into its FQDN, and the FQDN is looked up as a CNAME
//! through a caller-supplied DNS client.
//!
//! # Example
//!
//! ```rust
//! use radiodns_resolver::{lookup_fn, LookupError, Resolver};
//!
//! let resolver = Resolver::new(lookup_fn(|fqdn: String| async move {
//!     // a real client would query DNS here
//!     Ok::<_, LookupError>((fqdn == "09580.c586.ce1.fm.radiodns.org")
//!         .then(|| "rdns.musicradio.com".to_string()))
//! }));
//!
//! let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! let fqdn = runtime.block_on(resolver.resolve_uri("fm:ce1.c586.09580")).unwrap();
//! assert_eq!(fqdn.as_deref(), Some("rdns.musicradio.com"));
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod params;
pub mod resolve;

pub use config::ResolverConfig;
pub use error::{ConfigError, LookupError, ResolveError};
pub use params::{BearerParams, ParamValue};
pub use resolve::{lookup_fn, CnameLookup, LookupFn, Resolver};
