use crate::bearer::field::{arity_mismatch, check_range, hex_param};
use crate::bearer::{BearerForm, Scheme};
use crate::country::{resolve_ecc, Comparison, CountryInput, CountryTable};
use crate::error::{BearerError, FieldError};
use crate::form::Arity;

/// Digital Audio Broadcasting (DAB/DAB+) bearer.
///
/// The SId is either the 4-digit form, or the 8-digit data-service form
/// whose first byte repeats the ECC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DabBearer {
    ecc: u8,
    eid: u16,
    sid: u32,
    scids: u8,
    uatype: Option<u16>,
}

impl DabBearer {
    /// Build a bearer, resolving `country` against the builtin country table.
    pub fn new(
        country: impl Into<CountryInput>,
        eid: u16,
        sid: u32,
        scids: u8,
        uatype: Option<u16>,
    ) -> Result<Self, BearerError> {
        Self::new_with_table(CountryTable::builtin(), country, eid, sid, scids, uatype)
    }

    pub fn new_with_table(
        table: &CountryTable,
        country: impl Into<CountryInput>,
        eid: u16,
        sid: u32,
        scids: u8,
        uatype: Option<u16>,
    ) -> Result<Self, BearerError> {
        let sid = check_sid(sid)?;
        let ecc = resolve_ecc(table, &country.into(), Comparison::Sid(sid))?;
        Self::from_parts(ecc, eid, sid, scids, uatype)
    }

    fn from_parts(
        ecc: u8,
        eid: u16,
        sid: u32,
        scids: u8,
        uatype: Option<u16>,
    ) -> Result<Self, BearerError> {
        let ecc = check_range("ecc", ecc, 0xa0..=0xf9)?;
        let eid = check_range("eid", eid, 0x1000..=0xfffe)?;
        let sid = check_sid(sid)?;
        if sid > 0xffff && (sid >> 24) as u8 != ecc {
            return Err(FieldError::new(
                "sid",
                format!("an 8 digit number starting with the ecc {:02x}", ecc),
                format!("{:#x}", sid),
            )
            .into());
        }
        let scids = check_range("scids", scids, 0..=0xf)?;
        let uatype = uatype
            .map(|uatype| check_range("uatype", uatype, 0..=0xfff))
            .transpose()?;

        Ok(Self {
            ecc,
            eid,
            sid,
            scids,
            uatype,
        })
    }

    /// Extended Country Code (ECC).
    pub fn ecc(&self) -> u8 {
        self.ecc
    }

    /// Global Country Code: the SId country nibble followed by the ECC.
    pub fn gcc(&self) -> u16 {
        // 8-digit SIds are ECC(8) | country(4) | reference(20)
        let high = if self.sid >= 0x1000_0000 {
            self.sid >> 12
        } else {
            self.sid >> 4
        };
        (high & 0xf00) as u16 | u16::from(self.ecc)
    }

    /// Ensemble Identifier (EId).
    pub fn eid(&self) -> u16 {
        self.eid
    }

    /// Service Identifier (SId).
    pub fn sid(&self) -> u32 {
        self.sid
    }

    /// Service Component Identifier within the Service (SCIdS).
    pub fn scids(&self) -> u8 {
        self.scids
    }

    /// User Application type of the data component.
    pub fn uatype(&self) -> Option<u16> {
        self.uatype
    }

    pub fn with_ecc(&self, ecc: u8) -> Result<Self, BearerError> {
        Self::from_parts(ecc, self.eid, self.sid, self.scids, self.uatype)
    }

    pub fn with_eid(&self, eid: u16) -> Result<Self, BearerError> {
        Self::from_parts(self.ecc, eid, self.sid, self.scids, self.uatype)
    }

    pub fn with_sid(&self, sid: u32) -> Result<Self, BearerError> {
        Self::from_parts(self.ecc, self.eid, sid, self.scids, self.uatype)
    }

    pub fn with_scids(&self, scids: u8) -> Result<Self, BearerError> {
        Self::from_parts(self.ecc, self.eid, self.sid, scids, self.uatype)
    }

    pub fn with_uatype(&self, uatype: Option<u16>) -> Result<Self, BearerError> {
        Self::from_parts(self.ecc, self.eid, self.sid, self.scids, uatype)
    }
}

fn check_sid(sid: u32) -> Result<u32, FieldError> {
    match sid {
        0x1000..=0xffff | 0xa0a0_0000..=0xf9ff_ffff => Ok(sid),
        _ => Err(FieldError::new(
            "sid",
            "a number between 0x1000 and 0xffff or 0xa0a00000 and 0xf9ffffff",
            format!("{:#x}", sid),
        )),
    }
}

impl BearerForm for DabBearer {
    const SCHEME: Scheme = Scheme::Dab;
    const ARITY: Arity = Arity::OneOf(&[4, 5]);

    fn from_params(params: &[String]) -> Result<Self, BearerError> {
        let (gcc, eid, sid, scids, uatype) = match params {
            [gcc, eid, sid, scids] => (gcc, eid, sid, scids, None),
            [gcc, eid, sid, scids, uatype] => (gcc, eid, sid, scids, Some(uatype)),
            _ => return Err(arity_mismatch(Self::SCHEME, params)),
        };

        let gcc = hex_param("gcc", gcc, &[3])?;
        let eid = hex_param("eid", eid, &[4])? as u16;
        let sid = hex_param("sid", sid, &[4, 8])?;
        let scids = hex_param("scids", scids, &[1])? as u8;
        let uatype = uatype
            .map(|uatype| hex_param("uatype", uatype, &[3]))
            .transpose()?
            .map(|uatype| uatype as u16);

        Self::new(gcc, eid, sid, scids, uatype)
    }

    fn to_params(&self) -> Vec<String> {
        let mut params = vec![
            format!("{:03x}", self.gcc()),
            format!("{:04x}", self.eid),
            if self.sid > 0xffff {
                format!("{:08x}", self.sid)
            } else {
                format!("{:04x}", self.sid)
            },
            format!("{:x}", self.scids),
        ];
        if let Some(uatype) = self.uatype {
            params.push(format!("{:03x}", uatype));
        }
        params
    }
}
