//! Country resolution for ECC-based bearers (FM and DAB).
//!
//! A broadcast country can be supplied three ways, and all of them are
//! normalised to an Extended Country Code (ECC):
//!
//! - **ECC** (`0xA0`-`0xF9`): used as-is.
//! - **GCC** (`0x1A0`-`0xFF9`): the country nibble of a PI/SId followed by
//!   the ECC byte. The nibble must agree with the PI/SId it accompanies.
//! - **ISO 3166 code** (`"fr"`): looked up in a [`CountryTable`]. Regions share
//!   PI nibbles, so when the country's own GCCs do not match the PI/SId the
//!   table's "nearby" entry for that nibble is tried instead.
//!
//! # GCC layout
//!
//! ```text
//! GCC = (country nibble of PI/SId) << 8 | ECC
//!
//!  PI   0xC586          -> nibble 0xC
//!  SId  0xE1C00098      -> ECC 0xE1, country id 0xC, service ref 0x00098
//!  GCC  0xCE1
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use log::{debug, error};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{CountryError, CountryTableError, NumberError};
use crate::number::{coerce, is_hex};

/// Valid Extended Country Code values.
pub const ECC_RANGE: RangeInclusive<u32> = 0xa0..=0xf9;

/// Valid Global Country Code values.
pub const GCC_RANGE: RangeInclusive<u32> = 0x1a0..=0xff9;

static BUILTIN: Lazy<CountryTable> = Lazy::new(|| {
    match CountryTable::from_json_str(include_str!("../res/country.json")) {
        Ok(table) => table,
        Err(e) => {
            error!("Failed to load builtin country table: {}", e);
            CountryTable::default()
        }
    }
});

/// One country of the reference table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryEntry {
    /// Every GCC in use in this country (empty for non-broadcast regions).
    #[serde(default)]
    pub gcc: Vec<u16>,
    /// PI/SId country nibble -> ISO code of the neighbouring country using it.
    #[serde(default)]
    pub nearby: BTreeMap<u8, String>,
}

impl CountryEntry {
    /// ECC of the first GCC whose country nibble equals `nibble`.
    fn matching_ecc(&self, nibble: u32) -> Option<u8> {
        self.gcc
            .iter()
            .find(|gcc| u32::from(**gcc) >> 8 == nibble)
            .map(|gcc| (gcc & 0xff) as u8)
    }
}

/// Read-only mapping from lowercase ISO country code to [`CountryEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryTable {
    entries: HashMap<String, CountryEntry>,
}

impl CountryTable {
    /// The table shipped with this crate, parsed once on first use.
    pub fn builtin() -> &'static CountryTable {
        &BUILTIN
    }

    /// Parse the resolved JSON format:
    /// `{"fr": {"gcc": [4065], "nearby": {"12": "gb"}}}`.
    ///
    /// Nearby keys are decimal nibble values.
    pub fn from_json_str(json: &str) -> Result<Self, CountryTableError> {
        let entries: HashMap<String, CountryEntry> = serde_json::from_str(json)?;
        Ok(entries.into_iter().collect())
    }

    /// Parse the upstream CSV format, one country per line:
    ///
    /// ```text
    /// name,iso,ecc,cc[;cc...],nibble:iso[;nibble:iso...]
    /// France,FR,E1,F,C:GB;6:BE
    /// ```
    ///
    /// A `cc` of `XXXX` marks a region without its own GCC.
    pub fn from_csv_str(csv: &str) -> Result<Self, CountryTableError> {
        let mut table = CountryTable::default();

        for (idx, line) in csv.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let csv_error = |reason: String| CountryTableError::Csv {
                line: idx + 1,
                reason,
            };

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() < 4 {
                return Err(csv_error(format!(
                    "expected at least 4 fields, got {}",
                    fields.len()
                )));
            }
            let (iso, ecc, cc) = (fields[1], fields[2], fields[3]);
            if ecc.len() != 2 || !is_hex(ecc) {
                return Err(csv_error(format!("invalid ECC {:?}", ecc)));
            }

            let mut entry = CountryEntry::default();
            if cc != "XXXX" {
                for cc in cc.split(';') {
                    if cc.len() != 1 || !is_hex(cc) {
                        return Err(csv_error(format!("invalid country code nibble {:?}", cc)));
                    }
                    let gcc = coerce(format!("{}{}", cc, ecc).as_str(), 16)
                        .map_err(|e| csv_error(e.to_string()))?;
                    entry.gcc.push(gcc as u16);
                }
            }

            let nearby = fields.get(4).copied().unwrap_or("");
            for pair in nearby.split(';').filter(|s| !s.is_empty()) {
                let (nibble, neighbour) = pair
                    .split_once(':')
                    .ok_or_else(|| csv_error(format!("invalid nearby entry {:?}", pair)))?;
                if nibble.len() != 1 || !is_hex(nibble) {
                    return Err(csv_error(format!("invalid nearby nibble {:?}", nibble)));
                }
                let nibble = coerce(nibble, 16).map_err(|e| csv_error(e.to_string()))?;
                entry
                    .nearby
                    .insert(nibble as u8, neighbour.to_ascii_lowercase());
            }

            table.insert(iso, entry);
        }

        Ok(table)
    }

    /// Look up a country, ignoring ASCII case.
    pub fn get(&self, iso: &str) -> Option<&CountryEntry> {
        self.entries.get(&iso.to_ascii_lowercase())
    }

    /// Add or replace a country. The code is stored lowercase.
    pub fn insert(&mut self, iso: impl AsRef<str>, entry: CountryEntry) -> Option<CountryEntry> {
        self.entries.insert(iso.as_ref().to_ascii_lowercase(), entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CountryEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, CountryEntry)> for CountryTable {
    fn from_iter<I: IntoIterator<Item = (String, CountryEntry)>>(iter: I) -> Self {
        let mut table = CountryTable::default();
        for (iso, entry) in iter {
            table.insert(iso, entry);
        }
        table
    }
}

/// A country as supplied when constructing an FM or DAB bearer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CountryInput {
    /// An ECC or a GCC.
    Numeric(u32),
    /// A two-letter ISO 3166 code.
    Iso(String),
}

impl FromStr for CountryInput {
    type Err = NumberError;

    /// Two ASCII letters are an ISO code, anything else must be hexadecimal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 2 && s.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Ok(CountryInput::Iso(s.to_string()));
        }
        let value = coerce(s, 16)?;
        u32::try_from(value)
            .map(CountryInput::Numeric)
            .map_err(|_| NumberError::new(s))
    }
}

impl From<u8> for CountryInput {
    fn from(value: u8) -> Self {
        CountryInput::Numeric(value.into())
    }
}

impl From<u16> for CountryInput {
    fn from(value: u16) -> Self {
        CountryInput::Numeric(value.into())
    }
}

impl From<u32> for CountryInput {
    fn from(value: u32) -> Self {
        CountryInput::Numeric(value)
    }
}

impl fmt::Display for CountryInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountryInput::Numeric(value) => write!(f, "{:#x}", value),
            CountryInput::Iso(code) => f.write_str(code),
        }
    }
}

/// The broadcast identifier a country input is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// RDS Programme Identifier (FM).
    Pi(u32),
    /// Service Identifier (DAB), 4 or 8 hex digits.
    Sid(u32),
}

impl Comparison {
    /// Field name used in error messages.
    pub fn field(&self) -> &'static str {
        match self {
            Comparison::Pi(_) => "pi",
            Comparison::Sid(_) => "sid",
        }
    }

    /// The value as a 4-digit PI/SId, so its country nibble sits at bits 12-15.
    ///
    /// An 8-digit SId drops its leading ECC byte and its service reference
    /// low byte.
    pub fn value(&self) -> u32 {
        match *self {
            Comparison::Pi(pi) => pi,
            Comparison::Sid(sid) if sid > 0xffff => (sid & 0xff_ffff) >> 8,
            Comparison::Sid(sid) => sid,
        }
    }
}

/// Resolve an ECC, GCC or ISO country code to an ECC.
///
/// ```
/// use radiodns_bearer::country::{resolve_ecc, Comparison, CountryInput, CountryTable};
///
/// let table = CountryTable::builtin();
/// let fr = CountryInput::Iso("fr".into());
/// assert_eq!(resolve_ecc(table, &fr, Comparison::Pi(0xc123)), Ok(0xe1));
/// assert_eq!(resolve_ecc(table, &0xce1_u16.into(), Comparison::Pi(0xc123)), Ok(0xe1));
/// assert!(resolve_ecc(table, &0xce1_u16.into(), Comparison::Pi(0xd123)).is_err());
/// ```
pub fn resolve_ecc(
    table: &CountryTable,
    country: &CountryInput,
    comparison: Comparison,
) -> Result<u8, CountryError> {
    let value = comparison.value();

    match *country {
        CountryInput::Iso(ref code) => resolve_iso(table, code, value),
        CountryInput::Numeric(ecc) if ECC_RANGE.contains(&ecc) => Ok(ecc as u8),
        CountryInput::Numeric(gcc) if GCC_RANGE.contains(&gcc) => {
            if (gcc & 0xf00) >> 8 != (value & 0xf000) >> 12 {
                return Err(CountryError::nibble_mismatch(
                    comparison.field(),
                    country.to_string(),
                ));
            }
            Ok((gcc & 0xff) as u8)
        }
        CountryInput::Numeric(_) => Err(CountryError::unrecognised(country.to_string())),
    }
}

fn resolve_iso(table: &CountryTable, code: &str, value: u32) -> Result<u8, CountryError> {
    let nibble = value >> 12;
    let entry = table
        .get(code)
        .ok_or_else(|| CountryError::unrecognised(code))?;

    if let Some(ecc) = entry.matching_ecc(nibble) {
        return Ok(ecc);
    }

    let nearby = u8::try_from(nibble)
        .ok()
        .and_then(|nibble| entry.nearby.get(&nibble))
        .ok_or_else(|| CountryError::unrecognised(code))?;
    debug!(
        "country {} does not use nibble {:X}, trying nearby country {}",
        code, nibble, nearby
    );

    table
        .get(nearby)
        .and_then(|entry| entry.matching_ecc(nibble))
        .ok_or_else(|| CountryError::unrecognised(code))
}
