//! Loose parameter objects for building bearers from JSON or TOML data.
//!
//! Values may be given as numbers or as strings; strings are read as
//! hexadecimal, like the URI parameters they correspond to.
//!
//! ```
//! use radiodns_resolver::BearerParams;
//!
//! let params: BearerParams = serde_json::from_str(
//!     r#"{"platform": "fm", "country": "fr", "pi": "c586", "frequency": 95.8}"#,
//! ).unwrap();
//! let bearer = params.to_bearer(radiodns_bearer::CountryTable::builtin()).unwrap();
//! assert_eq!(bearer.to_string(), "fm:ce1.c586.09580");
//! ```

use std::fmt;

use radiodns_bearer::number::coerce;
use radiodns_bearer::{
    AmssBearer, Bearer, BearerError, CountryInput, CountryTable, DabBearer, DrmBearer,
    FieldError, FmBearer, IbocBearer, NumberError,
};
use serde::{Deserialize, Serialize};

/// A number, or a string holding one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    fn integer(&self) -> Result<i64, NumberError> {
        match self {
            ParamValue::Int(n) => coerce(*n, 16),
            ParamValue::Text(text) => coerce(text, 16),
            ParamValue::Float(_) => Err(NumberError::new(self.to_string())),
        }
    }

    fn country(&self) -> Result<CountryInput, BearerError> {
        match self {
            ParamValue::Text(text) => Ok(text.parse()?),
            _ => Ok(CountryInput::Numeric(self.field("country")?)),
        }
    }

    /// Coerce and narrow to the field's integer type.
    fn field<T: TryFrom<i64>>(&self, name: &'static str) -> Result<T, BearerError> {
        let value = self.integer()?;
        T::try_from(value).map_err(|_| {
            FieldError::new(
                name,
                format!(
                    "a non-negative number of at most {} bits",
                    std::mem::size_of::<T>() * 8
                ),
                self.to_string(),
            )
            .into()
        })
    }

    /// Frequency in MHz; `"*"` is the wildcard.
    fn frequency(&self) -> Result<Option<f32>, BearerError> {
        let invalid = || FieldError::new("frequency", "a number of MHz or \"*\"", self.to_string());
        match self {
            ParamValue::Int(n) => Ok(Some(*n as f32)),
            ParamValue::Float(n) => Ok(Some(*n as f32)),
            ParamValue::Text(text) if text == "*" => Ok(None),
            ParamValue::Text(text) => text
                .parse::<f32>()
                .map(Some)
                .map_err(|_| invalid().into()),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Float(n) => write!(f, "{}", n),
            ParamValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

/// Bearer fields by platform.
///
/// DAB and FM take their country from `ecc`, else `gcc`, else `country`
/// (which may also hold an ISO code).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "lowercase")]
pub enum BearerParams {
    Amss {
        sid: ParamValue,
    },
    Dab {
        ecc: Option<ParamValue>,
        gcc: Option<ParamValue>,
        country: Option<ParamValue>,
        eid: ParamValue,
        sid: ParamValue,
        scids: ParamValue,
        uatype: Option<ParamValue>,
    },
    Drm {
        sid: ParamValue,
        appdomain: Option<ParamValue>,
        uatype: Option<ParamValue>,
    },
    Fm {
        ecc: Option<ParamValue>,
        gcc: Option<ParamValue>,
        country: Option<ParamValue>,
        pi: ParamValue,
        frequency: Option<ParamValue>,
    },
    #[serde(alias = "iboc")]
    Hd {
        cc: ParamValue,
        tx: ParamValue,
        mid: Option<ParamValue>,
    },
}

fn pick_country(
    ecc: &Option<ParamValue>,
    gcc: &Option<ParamValue>,
    country: &Option<ParamValue>,
) -> Result<CountryInput, BearerError> {
    ecc.as_ref()
        .or(gcc.as_ref())
        .or(country.as_ref())
        .ok_or_else(|| FieldError::new("country", "given as ecc, gcc or country", "none"))?
        .country()
}

fn optional<T: TryFrom<i64>>(
    value: &Option<ParamValue>,
    name: &'static str,
) -> Result<Option<T>, BearerError> {
    value.as_ref().map(|value| value.field(name)).transpose()
}

impl BearerParams {
    /// Validate and build the bearer, resolving ISO country codes in `table`.
    pub fn to_bearer(&self, table: &CountryTable) -> Result<Bearer, BearerError> {
        let bearer = match self {
            BearerParams::Amss { sid } => AmssBearer::new(sid.field("sid")?)?.into(),
            BearerParams::Dab {
                ecc,
                gcc,
                country,
                eid,
                sid,
                scids,
                uatype,
            } => DabBearer::new_with_table(
                table,
                pick_country(ecc, gcc, country)?,
                eid.field("eid")?,
                sid.field("sid")?,
                scids.field("scids")?,
                optional(uatype, "uatype")?,
            )?
            .into(),
            BearerParams::Drm {
                sid,
                appdomain,
                uatype,
            } => DrmBearer::new(
                sid.field("sid")?,
                optional(appdomain, "appdomain")?,
                optional(uatype, "uatype")?,
            )?
            .into(),
            BearerParams::Fm {
                ecc,
                gcc,
                country,
                pi,
                frequency,
            } => {
                let frequency = match frequency {
                    Some(frequency) => frequency.frequency()?,
                    None => None,
                };
                FmBearer::new_with_table(
                    table,
                    pick_country(ecc, gcc, country)?,
                    pi.field("pi")?,
                    frequency,
                )?
                .into()
            }
            BearerParams::Hd { cc, tx, mid } => {
                IbocBearer::new(cc.field("cc")?, tx.field("tx")?, optional(mid, "mid")?)?.into()
            }
        };
        Ok(bearer)
    }
}
