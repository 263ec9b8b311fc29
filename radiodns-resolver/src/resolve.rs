//! Authoritative FQDN resolution.
//!
//! A bearer's FQDN is looked up as a CNAME; the target is the authoritative
//! FQDN of the broadcaster's RadioDNS services. The DNS client is supplied
//! by the caller through [`CnameLookup`].

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use radiodns_bearer::{Bearer, CountryTable, DEFAULT_FQDN_SUFFIX};
use tracing::debug;

use crate::config::ResolverConfig;
use crate::error::{ConfigError, LookupError, ResolveError};
use crate::params::BearerParams;

/// A DNS client able to look up CNAME records.
#[async_trait]
pub trait CnameLookup: Send + Sync {
    /// Returns the CNAME target of `fqdn`, or `Ok(None)` if there is no record.
    async fn resolve_cname(&self, fqdn: &str) -> Result<Option<String>, LookupError>;
}

#[async_trait]
impl<T: CnameLookup + ?Sized> CnameLookup for Arc<T> {
    async fn resolve_cname(&self, fqdn: &str) -> Result<Option<String>, LookupError> {
        (**self).resolve_cname(fqdn).await
    }
}

/// [`CnameLookup`] backed by an async closure. See [`lookup_fn`].
#[derive(Clone)]
pub struct LookupFn<F>(F);

/// Use an async closure as the CNAME lookup.
pub fn lookup_fn<F, Fut>(f: F) -> LookupFn<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Option<String>, LookupError>> + Send + 'static,
{
    LookupFn(f)
}

#[async_trait]
impl<F, Fut> CnameLookup for LookupFn<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Option<String>, LookupError>> + Send + 'static,
{
    async fn resolve_cname(&self, fqdn: &str) -> Result<Option<String>, LookupError> {
        (self.0)(fqdn.to_string()).await
    }
}

/// Resolves bearers to authoritative FQDNs.
pub struct Resolver<L> {
    lookup: L,
    suffix: String,
    country_table: Cow<'static, CountryTable>,
}

impl<L: CnameLookup> Resolver<L> {
    /// Resolver using the `radiodns.org` suffix and the builtin country table.
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            suffix: DEFAULT_FQDN_SUFFIX.to_string(),
            country_table: Cow::Borrowed(CountryTable::builtin()),
        }
    }

    pub fn from_config(config: &ResolverConfig, lookup: L) -> Result<Self, ConfigError> {
        Ok(Self {
            lookup,
            suffix: config.suffix().to_string(),
            country_table: config.country_table()?,
        })
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Country table used by [`resolve_params`](Self::resolve_params).
    pub fn with_country_table(mut self, table: CountryTable) -> Self {
        self.country_table = Cow::Owned(table);
        self
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn country_table(&self) -> &CountryTable {
        &self.country_table
    }

    /// Look up the authoritative FQDN of `bearer`.
    ///
    /// `Ok(None)` means the bearer's FQDN has no CNAME record.
    pub async fn resolve(&self, bearer: &Bearer) -> Result<Option<String>, ResolveError> {
        let fqdn = bearer.to_fqdn_with_suffix(&self.suffix)?;
        debug!("Resolving {} via {}", bearer, fqdn);

        let authoritative = self.lookup.resolve_cname(&fqdn).await?;
        match &authoritative {
            Some(target) => debug!("{} is served by {}", fqdn, target),
            None => debug!("No CNAME record for {}", fqdn),
        }
        Ok(authoritative)
    }

    /// Parse a URI of any scheme and resolve it.
    pub async fn resolve_uri(&self, uri: &str) -> Result<Option<String>, ResolveError> {
        let bearer = Bearer::from_uri(uri)?;
        self.resolve(&bearer).await
    }

    /// Build a bearer from loose parameters and resolve it.
    pub async fn resolve_params(
        &self,
        params: &BearerParams,
    ) -> Result<Option<String>, ResolveError> {
        let bearer = params.to_bearer(&self.country_table)?;
        self.resolve(&bearer).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use radiodns_bearer::{BearerError, FmBearer};

    /// Answers from a fixed record set and remembers every query.
    #[derive(Default)]
    struct MockLookup {
        records: HashMap<String, String>,
        queries: Mutex<Vec<String>>,
    }

    impl MockLookup {
        fn with_record(mut self, fqdn: &str, target: &str) -> Self {
            self.records.insert(fqdn.to_string(), target.to_string());
            self
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CnameLookup for MockLookup {
        async fn resolve_cname(&self, fqdn: &str) -> Result<Option<String>, LookupError> {
            self.queries.lock().unwrap().push(fqdn.to_string());
            if fqdn.ends_with(".invalid") {
                return Err(LookupError::new(fqdn, "SERVFAIL"));
            }
            Ok(self.records.get(fqdn).cloned())
        }
    }

    fn lookup() -> Arc<MockLookup> {
        Arc::new(
            MockLookup::default()
                .with_record("09580.c586.ce1.fm.radiodns.org", "rdns.musicradio.com")
                .with_record("0.d220.100c.de0.dab.radiodns.org", "radiodns.example.de"),
        )
    }

    #[tokio::test]
    async fn test_resolve() {
        let lookup = lookup();
        let resolver = Resolver::new(lookup.clone());

        let bearer = Bearer::from(FmBearer::new(0xe1_u8, 0xc586, Some(95.8)).unwrap());
        let fqdn = resolver.resolve(&bearer).await.unwrap();
        assert_eq!(fqdn.as_deref(), Some("rdns.musicradio.com"));
        assert_eq!(lookup.queries(), ["09580.c586.ce1.fm.radiodns.org"]);
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let resolver = Resolver::new(lookup());
        let fqdn = resolver.resolve_uri("amss:e1c238").await.unwrap();
        assert_eq!(fqdn, None);
    }

    #[tokio::test]
    async fn test_resolve_uri() {
        let resolver = Resolver::new(lookup());
        let fqdn = resolver.resolve_uri("dab:de0.100c.d220.0").await.unwrap();
        assert_eq!(fqdn.as_deref(), Some("radiodns.example.de"));

        let err = resolver.resolve_uri("foo:bar").await.unwrap_err();
        assert!(matches!(err, ResolveError::Bearer(ref e) if e.is_form_error()));
    }

    #[tokio::test]
    async fn test_resolve_params() {
        let lookup = lookup();
        let resolver = Resolver::new(lookup.clone());
        let params: BearerParams = serde_json::from_str(
            r#"{"platform": "fm", "country": "gb", "pi": "c586", "frequency": 95.8}"#,
        )
        .unwrap();

        let fqdn = resolver.resolve_params(&params).await.unwrap();
        assert_eq!(fqdn.as_deref(), Some("rdns.musicradio.com"));
    }

    #[tokio::test]
    async fn test_resolve_params_custom_table() {
        let table = CountryTable::from_json_str(r#"{"zz": {"gcc": [3297], "nearby": {}}}"#)
            .unwrap();
        let resolver = Resolver::new(lookup()).with_country_table(table);
        let params: BearerParams = serde_json::from_str(
            r#"{"platform": "fm", "country": "zz", "pi": "c586", "frequency": 95.8}"#,
        )
        .unwrap();
        assert_eq!(
            resolver.resolve_params(&params).await.unwrap().as_deref(),
            Some("rdns.musicradio.com")
        );

        let params: BearerParams = serde_json::from_str(
            r#"{"platform": "fm", "country": "fr", "pi": "c586", "frequency": 95.8}"#,
        )
        .unwrap();
        let err = resolver.resolve_params(&params).await.unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Bearer(BearerError::InvalidCountry(_))
        ));
    }

    #[tokio::test]
    async fn test_custom_suffix() {
        let lookup = lookup();
        let resolver = Resolver::new(lookup.clone()).with_suffix("radiodns.invalid");
        let err = resolver.resolve_uri("drm:e1c238").await.unwrap_err();
        assert!(matches!(err, ResolveError::Lookup(ref e) if e.fqdn == "e1c238.drm.radiodns.invalid"));
        assert_eq!(lookup.queries(), ["e1c238.drm.radiodns.invalid"]);
    }

    #[tokio::test]
    async fn test_wildcard_is_not_looked_up() {
        let lookup = lookup();
        let resolver = Resolver::new(lookup.clone());
        let err = resolver.resolve_uri("fm:ce1.c201.*").await.unwrap_err();
        assert!(matches!(err, ResolveError::Bearer(ref e) if e.field() == Some("frequency")));
        assert!(lookup.queries().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_fn() {
        let resolver = Resolver::new(lookup_fn(|fqdn: String| async move {
            Ok::<_, LookupError>(Some(format!("auth.{}", fqdn)))
        }));
        let fqdn = resolver.resolve_uri("hd:292.07a26").await.unwrap();
        assert_eq!(fqdn.as_deref(), Some("auth.07a26.292.hd.radiodns.org"));
    }

    #[tokio::test]
    async fn test_from_config() {
        let config = ResolverConfig::from_toml_str("[fqdn]\nsuffix = \"example.org\"").unwrap();
        let resolver = Resolver::from_config(&config, lookup_fn(|fqdn: String| async move {
            Ok::<_, LookupError>(Some(fqdn))
        }))
        .unwrap();
        assert_eq!(resolver.suffix(), "example.org");
        assert!(resolver.country_table().get("fr").is_some());
        assert_eq!(
            resolver.resolve_uri("amss:e1c238").await.unwrap().as_deref(),
            Some("e1c238.amss.example.org")
        );
    }
}
