use crate::bearer::field::{arity_mismatch, check_range, hex_param};
use crate::bearer::{BearerForm, Scheme};
use crate::error::BearerError;
use crate::form::Arity;

/// In-band on-channel (IBOC) bearer, such as HD Radio. Uses the `hd` scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IbocBearer {
    cc: u16,
    tx: u32,
    mid: Option<u8>,
}

impl IbocBearer {
    pub fn new(cc: u16, tx: u32, mid: Option<u8>) -> Result<Self, BearerError> {
        let cc = check_range("cc", cc, 0..=0xfff)?;
        let tx = check_range("tx", tx, 0..=0xf_ffff)?;
        let mid = mid.map(|mid| check_range("mid", mid, 0..=0xf)).transpose()?;
        Ok(Self { cc, tx, mid })
    }

    /// Country code.
    pub fn cc(&self) -> u16 {
        self.cc
    }

    /// Transmitter identifier.
    pub fn tx(&self) -> u32 {
        self.tx
    }

    /// Multicast supplemental program service (SPS) channel.
    pub fn mid(&self) -> Option<u8> {
        self.mid
    }

    pub fn with_cc(&self, cc: u16) -> Result<Self, BearerError> {
        Self::new(cc, self.tx, self.mid)
    }

    pub fn with_tx(&self, tx: u32) -> Result<Self, BearerError> {
        Self::new(self.cc, tx, self.mid)
    }

    pub fn with_mid(&self, mid: Option<u8>) -> Result<Self, BearerError> {
        Self::new(self.cc, self.tx, mid)
    }
}

impl BearerForm for IbocBearer {
    const SCHEME: Scheme = Scheme::Hd;
    const ARITY: Arity = Arity::OneOf(&[2, 3]);

    fn from_params(params: &[String]) -> Result<Self, BearerError> {
        let (cc, tx, mid) = match params {
            [cc, tx] => (cc, tx, None),
            [cc, tx, mid] => (cc, tx, Some(mid)),
            _ => return Err(arity_mismatch(Self::SCHEME, params)),
        };

        let cc = hex_param("cc", cc, &[3])? as u16;
        let tx = hex_param("tx", tx, &[5])?;
        let mid = mid
            .map(|mid| hex_param("mid", mid, &[1]))
            .transpose()?
            .map(|mid| mid as u8);

        Self::new(cc, tx, mid)
    }

    fn to_params(&self) -> Vec<String> {
        let mut params = vec![format!("{:03x}", self.cc), format!("{:05x}", self.tx)];
        if let Some(mid) = self.mid {
            params.push(format!("{:x}", mid));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let bearer = IbocBearer::new(0x292, 0x07a26, Some(0x2)).unwrap();
        assert_eq!(bearer.cc(), 0x292);
        assert_eq!(bearer.tx(), 0x07a26);
        assert_eq!(bearer.mid(), Some(2));

        assert_eq!(IbocBearer::new(0x1000, 0x1, None).unwrap_err().field(), Some("cc"));
        assert_eq!(
            IbocBearer::new(0x292, 0x10_0000, None).unwrap_err().field(),
            Some("tx")
        );
        assert_eq!(
            IbocBearer::new(0x292, 0x07a26, Some(0x10)).unwrap_err().field(),
            Some("mid")
        );
    }

    #[test]
    fn test_with() {
        let bearer = IbocBearer::new(0x292, 0x07a26, None).unwrap();
        assert_eq!(bearer.with_mid(Some(0x2)).unwrap().to_uri(), "hd:292.07a26.2");
        assert!(bearer.with_cc(0xfff).is_ok());
        assert!(bearer.with_tx(0xf_ffff).is_ok());
    }

    #[test]
    fn test_from_uri() {
        let bearer = IbocBearer::from_uri("hd:292.07a26.2").unwrap();
        assert_eq!(bearer, IbocBearer::new(0x292, 0x07a26, Some(0x2)).unwrap());

        let bearer = IbocBearer::from_uri("hd:292.07a26").unwrap();
        assert_eq!(bearer.mid(), None);

        assert!(IbocBearer::from_uri("iboc:292.07a26").unwrap_err().is_form_error());
        assert!(IbocBearer::from_uri("hd:292").unwrap_err().is_form_error());
        for (uri, field) in [
            ("hd:29.07a26", "cc"),
            ("hd:292.7a26", "tx"),
            ("hd:292.07a26.12", "mid"),
        ] {
            assert_eq!(IbocBearer::from_uri(uri).unwrap_err().field(), Some(field), "{uri}");
        }
    }

    #[test]
    fn test_render() {
        let bearer = IbocBearer::new(0x292, 0x07a26, Some(0x2)).unwrap();
        assert_eq!(bearer.to_uri(), "hd:292.07a26.2");
        assert_eq!(bearer.to_fqdn().unwrap(), "2.07a26.292.hd.radiodns.org");
        assert_eq!(bearer.to_service_identifier().unwrap(), "hd/292/07a26/2");
    }
}
