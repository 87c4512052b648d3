//! Document-level metadata for SBOM documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Origin format of an SBOM document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SbomFormat {
    CycloneDx,
    Spdx,
    Other(String),
}

impl std::fmt::Display for SbomFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CycloneDx => write!(f, "CycloneDX"),
            Self::Spdx => write!(f, "SPDX"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Document-level metadata, treated as immutable input to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Origin format
    pub format: SbomFormat,
    /// Specification version (e.g. "1.4" for CycloneDX, "2.3" for SPDX)
    pub spec_version: String,
    /// The document's own version counter
    pub document_version: Option<String>,
    /// Supplier of the described product
    pub supplier: Option<String>,
    /// Serial number or document namespace
    pub serial_number: Option<String>,
    /// Creation timestamp
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            format: SbomFormat::CycloneDx,
            spec_version: String::new(),
            document_version: None,
            supplier: None,
            serial_number: None,
            timestamp: None,
        }
    }
}

impl DocumentMetadata {
    /// Metadata with just the origin format and spec version set.
    #[must_use]
    pub fn new(format: SbomFormat, spec_version: impl Into<String>) -> Self {
        Self {
            format,
            spec_version: spec_version.into(),
            ..Self::default()
        }
    }
}
