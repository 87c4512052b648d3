//! The identifier sum type and the equivalence predicate used by the
//! comparison and merge subsystems.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Cpe, Hash, Purl};

/// A structured string naming a software artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Identifier {
    Cpe(Cpe),
    Purl(Purl),
    Hash(Hash),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpe(cpe) => cpe.fmt(f),
            Self::Purl(purl) => purl.fmt(f),
            Self::Hash(hash) => hash.fmt(f),
        }
    }
}

/// The equivalence predicate: wildcard-aware for CPEs, structural for
/// PURLs, algorithm + value for hashes. Identifiers of different kinds are
/// never equivalent.
#[must_use]
pub fn identifiers_equivalent(a: &Identifier, b: &Identifier) -> bool {
    match (a, b) {
        (Identifier::Cpe(x), Identifier::Cpe(y)) => x.equivalent(y),
        (Identifier::Purl(x), Identifier::Purl(y)) => x.equivalent(y),
        (Identifier::Hash(x), Identifier::Hash(y)) => x.equivalent(y),
        _ => false,
    }
}
