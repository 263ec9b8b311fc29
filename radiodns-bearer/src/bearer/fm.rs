use crate::bearer::field::{arity_mismatch, check_range, decimal_param, hex_param};
use crate::bearer::{BearerForm, Scheme};
use crate::country::{resolve_ecc, Comparison, CountryInput, CountryTable};
use crate::error::{BearerError, FieldError};
use crate::form::Arity;

const FREQUENCY_RANGE: std::ops::RangeInclusive<u16> = 7600..=10800;

/// FM bearer with Radio Data System (RDS) support.
///
/// The frequency is kept in units of 10 kHz. A bearer without a frequency
/// is a wildcard covering every frequency the programme is broadcast on;
/// it has a URI but no FQDN or service identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FmBearer {
    ecc: u8,
    pi: u32,
    frequency: Option<u16>,
}

impl FmBearer {
    /// Build a bearer, resolving `country` against the builtin country table.
    ///
    /// `frequency` is in MHz; `None` is the wildcard.
    ///
    /// Extended PIs up to `0xfffff` are accepted and rendered with all five
    /// digits, but the textual forms only parse 4-digit PIs, so such a
    /// bearer cannot be read back from its own URI.
    pub fn new(
        country: impl Into<CountryInput>,
        pi: u32,
        frequency: Option<f32>,
    ) -> Result<Self, BearerError> {
        Self::new_with_table(CountryTable::builtin(), country, pi, frequency)
    }

    pub fn new_with_table(
        table: &CountryTable,
        country: impl Into<CountryInput>,
        pi: u32,
        frequency: Option<f32>,
    ) -> Result<Self, BearerError> {
        let pi = check_pi(pi)?;
        let ecc = resolve_ecc(table, &country.into(), Comparison::Pi(pi))?;
        let frequency = frequency.map(frequency_from_mhz).transpose()?;
        Self::from_parts(ecc, pi, frequency)
    }

    fn from_parts(ecc: u8, pi: u32, frequency: Option<u16>) -> Result<Self, BearerError> {
        let ecc = check_range("ecc", ecc, 0xa0..=0xf9)?;
        let pi = check_pi(pi)?;
        let frequency = frequency.map(check_frequency).transpose()?;
        Ok(Self { ecc, pi, frequency })
    }

    /// Extended Country Code (ECC).
    pub fn ecc(&self) -> u8 {
        self.ecc
    }

    /// Global Country Code: the PI country nibble followed by the ECC.
    pub fn gcc(&self) -> u16 {
        ((self.pi & 0xf000) >> 4) as u16 | u16::from(self.ecc)
    }

    /// RDS Programme Identifier (PI).
    pub fn pi(&self) -> u32 {
        self.pi
    }

    /// Frequency in MHz, `None` for a wildcard bearer.
    pub fn frequency_mhz(&self) -> Option<f32> {
        self.frequency.map(|frequency| f32::from(frequency) / 100.0)
    }

    /// Frequency in units of 10 kHz, as it appears in the URI.
    pub fn frequency(&self) -> Option<u16> {
        self.frequency
    }

    pub fn is_wildcard(&self) -> bool {
        self.frequency.is_none()
    }

    pub fn with_ecc(&self, ecc: u8) -> Result<Self, BearerError> {
        Self::from_parts(ecc, self.pi, self.frequency)
    }

    pub fn with_pi(&self, pi: u32) -> Result<Self, BearerError> {
        Self::from_parts(self.ecc, pi, self.frequency)
    }

    pub fn with_frequency(&self, frequency: Option<f32>) -> Result<Self, BearerError> {
        let frequency = frequency.map(frequency_from_mhz).transpose()?;
        Self::from_parts(self.ecc, self.pi, frequency)
    }
}

fn check_pi(pi: u32) -> Result<u32, FieldError> {
    let pi = check_range("pi", pi, 0x1000..=0xf_ffff)?;
    if matches!(pi & 0xff, 0x00 | 0xff) {
        return Err(FieldError::new(
            "pi",
            "a number whose low byte is not 0x00 or 0xff",
            format!("{:#x}", pi),
        ));
    }
    Ok(pi)
}

fn frequency_error(input: String) -> FieldError {
    FieldError::new("frequency", "a number between 76 and 108 (MHz)", input)
}

fn check_frequency(frequency: u16) -> Result<u16, FieldError> {
    if FREQUENCY_RANGE.contains(&frequency) {
        Ok(frequency)
    } else {
        Err(frequency_error(format!("{:.2}", f32::from(frequency) / 100.0)))
    }
}

fn frequency_from_mhz(mhz: f32) -> Result<u16, FieldError> {
    if !(76.0..=108.0).contains(&mhz) {
        return Err(frequency_error(mhz.to_string()));
    }
    Ok((mhz * 100.0).round() as u16)
}

impl BearerForm for FmBearer {
    const SCHEME: Scheme = Scheme::Fm;
    const ARITY: Arity = Arity::Exactly(3);

    fn from_params(params: &[String]) -> Result<Self, BearerError> {
        let [gcc, pi, frequency] = params else {
            return Err(arity_mismatch(Self::SCHEME, params));
        };

        let gcc = hex_param("gcc", gcc, &[3])?;
        let pi = check_pi(hex_param("pi", pi, &[4])?)?;
        let frequency = match frequency.as_str() {
            "*" => None,
            frequency => Some(check_frequency(
                decimal_param("frequency", frequency, 5)? as u16,
            )?),
        };

        let ecc = resolve_ecc(CountryTable::builtin(), &gcc.into(), Comparison::Pi(pi))?;
        Self::from_parts(ecc, pi, frequency)
    }

    fn to_params(&self) -> Vec<String> {
        vec![
            format!("{:03x}", self.gcc()),
            format!("{:04x}", self.pi),
            match self.frequency {
                Some(frequency) => format!("{:05}", frequency),
                None => "*".to_string(),
            },
        ]
    }

    fn ensure_addressable(&self) -> Result<(), BearerError> {
        if self.frequency.is_none() {
            return Err(FieldError::new(
                "frequency",
                "set to address a single station, wildcard bearers only have a URI",
                "*",
            )
            .into());
        }
        Ok(())
    }
}
