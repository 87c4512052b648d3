//! CPE (Common Platform Enumeration) identifier handling.
//!
//! Implements the 2.3 formatted-string binding: a fixed 11-field
//! colon-delimited record. Parsing is a positional decomposition, not a
//! grammar engine, and equality is wildcard-aware per the NIST matching
//! rules (`*` = ANY, `-` = NA).

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{IdentifierErrorKind, ReconcileError};

/// The only CPE binding version this crate understands.
pub const CPE_VERSION: &str = "2.3";

/// ANY wildcard sentinel
const ANY: &str = "*";
/// NA wildcard sentinel
const NA: &str = "-";

/// Positional field names, used to build aggregate parse diagnostics.
const FIELD_NAMES: [&str; 11] = [
    "part",
    "vendor",
    "product",
    "version",
    "update",
    "edition",
    "language",
    "sw_edition",
    "target_sw",
    "target_hw",
    "other",
];

/// CPE part tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CpePart {
    Application,
    Hardware,
    OperatingSystem,
}

impl CpePart {
    /// The single-character tag used in the formatted string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "a",
            Self::Hardware => "h",
            Self::OperatingSystem => "o",
        }
    }
}

impl FromStr for CpePart {
    type Err = ReconcileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a" => Ok(Self::Application),
            "h" => Ok(Self::Hardware),
            "o" => Ok(Self::OperatingSystem),
            other => Err(ReconcileError::identifier(
                format!("CPE part '{other}'"),
                IdentifierErrorKind::InvalidCpePart {
                    part: other.to_string(),
                },
            )),
        }
    }
}

/// A parsed CPE 2.3 identifier.
///
/// Every attribute is present as either a literal value or a wildcard
/// sentinel; parsing never silently defaults a missing field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cpe {
    pub part: CpePart,
    pub vendor: String,
    pub product: String,
    pub version: String,
    pub update: String,
    pub edition: String,
    pub language: String,
    pub sw_edition: String,
    pub target_sw: String,
    pub target_hw: String,
    pub other: String,
}

impl Cpe {
    /// Create an application CPE from vendor and product, all other
    /// attributes ANY.
    #[must_use]
    pub fn application(vendor: &str, product: &str) -> Self {
        Self {
            part: CpePart::Application,
            vendor: vendor.to_string(),
            product: product.to_string(),
            version: ANY.to_string(),
            update: ANY.to_string(),
            edition: ANY.to_string(),
            language: ANY.to_string(),
            sw_edition: ANY.to_string(),
            target_sw: ANY.to_string(),
            target_hw: ANY.to_string(),
            other: ANY.to_string(),
        }
    }

    /// Create an application CPE from vendor, product, and version.
    #[must_use]
    pub fn application_with_version(vendor: &str, product: &str, version: &str) -> Self {
        let mut cpe = Self::application(vendor, product);
        cpe.version = version.to_string();
        cpe
    }

    /// Wildcard-aware equivalence: every attribute must match literally or
    /// be covered by a wildcard on either side.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        self.part == other.part
            && wildcard_eq(&self.vendor, &other.vendor)
            && wildcard_eq(&self.product, &other.product)
            && wildcard_eq(&self.version, &other.version)
            && wildcard_eq(&self.update, &other.update)
            && wildcard_eq(&self.edition, &other.edition)
            && wildcard_eq(&self.language, &other.language)
            && wildcard_eq(&self.sw_edition, &other.sw_edition)
            && wildcard_eq(&self.target_sw, &other.target_sw)
            && wildcard_eq(&self.target_hw, &other.target_hw)
            && wildcard_eq(&self.other, &other.other)
    }
}

/// Compare two attribute values, accounting for wildcard sentinels and
/// embedded `*` patterns (e.g. `1.0*` matches `1.0.2`).
#[must_use]
pub fn wildcard_eq(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    // Bare sentinels match any value
    if a == ANY || b == ANY || a == NA || b == NA {
        return true;
    }
    if a.contains('*') {
        return wildcard_matches(a, b);
    }
    if b.contains('*') {
        return wildcard_matches(b, a);
    }
    false
}

/// Match `value` against a pattern with embedded `*` wildcards.
/// Everything except `*` is taken literally; the match is anchored.
fn wildcard_matches(pattern: &str, value: &str) -> bool {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push('^');
    let mut first = true;
    for literal in pattern.split('*') {
        if !first {
            source.push_str(".*");
        }
        source.push_str(&regex::escape(literal));
        first = false;
    }
    source.push('$');

    Regex::new(&source).map(|re| re.is_match(value)).unwrap_or(false)
}

impl FromStr for Cpe {
    type Err = ReconcileError;

    /// Parse a CPE 2.3 formatted string. A failure reports *every* field
    /// that could not be extracted, not just the first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(rest) = s.strip_prefix("cpe:2.3:") else {
            return Err(ReconcileError::invalid_cpe(s, &FIELD_NAMES));
        };

        let mut fields: Vec<&str> = rest.split(':').collect();

        if fields.len() < FIELD_NAMES.len() {
            let missing: Vec<&str> = FIELD_NAMES[fields.len()..].to_vec();
            return Err(ReconcileError::invalid_cpe(s, &missing));
        }

        // Extra separators can only come from the trailing free-text
        // attribute; fold them back into `other`.
        let other = fields.split_off(FIELD_NAMES.len() - 1).join(":");

        let part = CpePart::from_str(fields[0])?;

        Ok(Self {
            part,
            vendor: fields[1].to_string(),
            product: fields[2].to_string(),
            version: fields[3].to_string(),
            update: fields[4].to_string(),
            edition: fields[5].to_string(),
            language: fields[6].to_string(),
            sw_edition: fields[7].to_string(),
            target_sw: fields[8].to_string(),
            target_hw: fields[9].to_string(),
            other,
        })
    }
}

impl fmt::Display for Cpe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cpe:{}:{}:{}:{}:{}:{}:{}:{}:{}:{}:{}:{}",
            CPE_VERSION,
            self.part.as_str(),
            self.vendor,
            self.product,
            self.version,
            self.update,
            self.edition,
            self.language,
            self.sw_edition,
            self.target_sw,
            self.target_hw,
            self.other
        )
    }
}
