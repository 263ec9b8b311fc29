use crate::bearer::field::{arity_mismatch, check_range, hex_param};
use crate::bearer::{BearerForm, Scheme};
use crate::error::BearerError;
use crate::form::Arity;

/// Amplitude Modulation Signalling System (AMSS) bearer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AmssBearer {
    sid: u32,
}

impl AmssBearer {
    pub fn new(sid: u32) -> Result<Self, BearerError> {
        let sid = check_range("sid", sid, 0..=0xff_ffff)?;
        Ok(Self { sid })
    }

    /// Service Identifier (SId), 24 bits.
    pub fn sid(&self) -> u32 {
        self.sid
    }

    pub fn with_sid(&self, sid: u32) -> Result<Self, BearerError> {
        Self::new(sid)
    }
}

impl BearerForm for AmssBearer {
    const SCHEME: Scheme = Scheme::Amss;
    const ARITY: Arity = Arity::Exactly(1);

    fn from_params(params: &[String]) -> Result<Self, BearerError> {
        let [sid] = params else {
            return Err(arity_mismatch(Self::SCHEME, params));
        };
        Self::new(hex_param("sid", sid, &[6])?)
    }

    fn to_params(&self) -> Vec<String> {
        vec![format!("{:06x}", self.sid)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Form;

    #[test]
    fn test_new() {
        assert_eq!(AmssBearer::new(0xe1c238).unwrap().sid(), 0xe1c238);
        assert_eq!(AmssBearer::new(0).unwrap().sid(), 0);

        let err = AmssBearer::new(0x100_0000).unwrap_err();
        assert_eq!(err.field(), Some("sid"));
    }

    #[test]
    fn test_from_uri() {
        let bearer = AmssBearer::from_uri("amss:e1c238").unwrap();
        assert_eq!(bearer.sid(), 0xe1c238);

        let err = AmssBearer::from_uri("amss:e1c23").unwrap_err();
        assert_eq!(err.field(), Some("sid"));
        let err = AmssBearer::from_uri("amss:e1c2380").unwrap_err();
        assert_eq!(err.field(), Some("sid"));
        let err = AmssBearer::from_uri("foo:bar").unwrap_err();
        assert!(err.is_form_error());
    }

    #[test]
    fn test_render() {
        let bearer = AmssBearer::new(0xe1c238).unwrap();
        assert_eq!(bearer.to_uri(), "amss:e1c238");
        assert_eq!(bearer.to_fqdn().unwrap(), "e1c238.amss.radiodns.org");
        assert_eq!(bearer.to_service_identifier().unwrap(), "amss/e1c238");
        assert_eq!(bearer.to_string(), "amss:e1c238");

        let padded = AmssBearer::new(0x238).unwrap();
        assert_eq!(padded.to_uri(), "amss:000238");
    }

    #[test]
    fn test_can_parse() {
        assert_eq!(AmssBearer::can_parse_uri("amss:e1c238"), Ok(true));
        assert_eq!(AmssBearer::can_parse_uri("foo:bar"), Ok(false));
        assert_eq!(AmssBearer::can_parse_uri("amss:e1c238.1"), Ok(false));
        assert_eq!(
            AmssBearer::can_parse_fqdn("e1c238.amss.radiodns.org"),
            Ok(true)
        );
        assert_eq!(AmssBearer::can_parse_service_identifier("amss/e1c238"), Ok(true));
        // a field error is not a "no"
        assert!(AmssBearer::can_parse_uri("amss:xyz").is_err());
    }

    #[test]
    fn test_from_params_arity() {
        let err = AmssBearer::from_params(&[]).unwrap_err();
        assert!(matches!(err, BearerError::InvalidForm(ref e) if e.form == Form::Uri));
    }
}
