use crate::bearer::field::{arity_mismatch, check_range, hex_param};
use crate::bearer::{BearerForm, Scheme};
use crate::error::{BearerError, FieldError};
use crate::form::Arity;

/// Digital Radio Mondiale (DRM) bearer.
///
/// A data component is addressed by giving both `appdomain` and `uatype`;
/// otherwise neither is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrmBearer {
    sid: u32,
    appdomain: Option<u8>,
    uatype: Option<u16>,
}

impl DrmBearer {
    pub fn new(sid: u32, appdomain: Option<u8>, uatype: Option<u16>) -> Result<Self, BearerError> {
        let sid = check_range("sid", sid, 0..=0xff_ffff)?;
        let appdomain = appdomain
            .map(|appdomain| check_range("appdomain", appdomain, 0..=0xf))
            .transpose()?;
        let uatype = uatype
            .map(|uatype| check_range("uatype", uatype, 0..=0xfff))
            .transpose()?;

        match (appdomain, uatype) {
            (Some(_), None) => Err(FieldError::new("uatype", "set when appdomain is set", "none").into()),
            (None, Some(uatype)) => Err(FieldError::new(
                "appdomain",
                "set when uatype is set",
                format!("none (uatype {:#x})", uatype),
            )
            .into()),
            _ => Ok(Self {
                sid,
                appdomain,
                uatype,
            }),
        }
    }

    /// Service Identifier (SId), 24 bits.
    pub fn sid(&self) -> u32 {
        self.sid
    }

    /// Application domain of the data component.
    pub fn appdomain(&self) -> Option<u8> {
        self.appdomain
    }

    /// User Application type of the data component.
    pub fn uatype(&self) -> Option<u16> {
        self.uatype
    }

    pub fn with_sid(&self, sid: u32) -> Result<Self, BearerError> {
        Self::new(sid, self.appdomain, self.uatype)
    }

    /// Replace the data component; pass `None` to address the service itself.
    pub fn with_data_component(&self, component: Option<(u8, u16)>) -> Result<Self, BearerError> {
        let (appdomain, uatype) = component.unzip();
        Self::new(self.sid, appdomain, uatype)
    }
}

impl BearerForm for DrmBearer {
    const SCHEME: Scheme = Scheme::Drm;
    const ARITY: Arity = Arity::OneOf(&[1, 3]);

    fn from_params(params: &[String]) -> Result<Self, BearerError> {
        let (sid, component) = match params {
            [sid] => (sid, None),
            [sid, appdomain, uatype] => (sid, Some((appdomain, uatype))),
            _ => return Err(arity_mismatch(Self::SCHEME, params)),
        };

        let sid = hex_param("sid", sid, &[6])?;
        let (appdomain, uatype) = match component {
            Some((appdomain, uatype)) => (
                Some(hex_param("appdomain", appdomain, &[1])? as u8),
                Some(hex_param("uatype", uatype, &[3])? as u16),
            ),
            None => (None, None),
        };

        Self::new(sid, appdomain, uatype)
    }

    fn to_params(&self) -> Vec<String> {
        let mut params = vec![format!("{:06x}", self.sid)];
        if let (Some(appdomain), Some(uatype)) = (self.appdomain, self.uatype) {
            params.push(format!("{:x}", appdomain));
            params.push(format!("{:03x}", uatype));
        }
        params
    }
}
