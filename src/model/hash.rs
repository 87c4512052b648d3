//! Cryptographic hash identifiers.
//!
//! Many SBOM producers label hash algorithms inconsistently
//! (`SHA-256`, `sha256`, `SHA_256`), so labels are normalized before
//! matching and anything unrecognized degrades to [`HashAlgorithm::Unknown`]
//! rather than failing. Validity checking is a pure digest-length check;
//! nothing is ever recomputed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hash algorithms seen across SPDX and CycloneDX documents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum HashAlgorithm {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Blake2b256,
    Blake2b384,
    Blake2b512,
    Blake3,
    Md2,
    Md4,
    Md5,
    Md6,
    Adler32,
    Unknown,
}

/// Every concrete algorithm, for length-based candidate lookups.
const ALL_ALGORITHMS: [HashAlgorithm; 17] = [
    HashAlgorithm::Sha1,
    HashAlgorithm::Sha224,
    HashAlgorithm::Sha256,
    HashAlgorithm::Sha384,
    HashAlgorithm::Sha512,
    HashAlgorithm::Sha3_256,
    HashAlgorithm::Sha3_384,
    HashAlgorithm::Sha3_512,
    HashAlgorithm::Blake2b256,
    HashAlgorithm::Blake2b384,
    HashAlgorithm::Blake2b512,
    HashAlgorithm::Blake3,
    HashAlgorithm::Md2,
    HashAlgorithm::Md4,
    HashAlgorithm::Md5,
    HashAlgorithm::Md6,
    HashAlgorithm::Adler32,
];

impl HashAlgorithm {
    /// Normalize a producer label (case-fold, strip `-`/`_`) and map it to
    /// an algorithm. Unrecognized labels map to `Unknown`; they are logged
    /// but never an error.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let normalized: String = label
            .to_lowercase()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect();

        let algorithm = match normalized.as_str() {
            "sha1" => Self::Sha1,
            "sha224" => Self::Sha224,
            "sha256" => Self::Sha256,
            "sha384" => Self::Sha384,
            "sha512" => Self::Sha512,
            "sha3256" => Self::Sha3_256,
            "sha3384" => Self::Sha3_384,
            "sha3512" => Self::Sha3_512,
            "blake2b256" => Self::Blake2b256,
            "blake2b384" => Self::Blake2b384,
            "blake2b512" => Self::Blake2b512,
            "blake3" => Self::Blake3,
            "md2" => Self::Md2,
            "md4" => Self::Md4,
            "md5" => Self::Md5,
            "md6" => Self::Md6,
            "adler32" => Self::Adler32,
            _ => Self::Unknown,
        };

        if algorithm == Self::Unknown && !label.is_empty() {
            tracing::warn!(label, "unrecognized hash algorithm label");
        }

        algorithm
    }

    /// Canonical display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA-1",
            Self::Sha224 => "SHA-224",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_384 => "SHA3-384",
            Self::Sha3_512 => "SHA3-512",
            Self::Blake2b256 => "BLAKE2b-256",
            Self::Blake2b384 => "BLAKE2b-384",
            Self::Blake2b512 => "BLAKE2b-512",
            Self::Blake3 => "BLAKE3",
            Self::Md2 => "MD2",
            Self::Md4 => "MD4",
            Self::Md5 => "MD5",
            Self::Md6 => "MD6",
            Self::Adler32 => "ADLER32",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// True for algorithms only SPDX documents may carry.
    #[must_use]
    pub const fn is_spdx_exclusive(&self) -> bool {
        matches!(
            self,
            Self::Sha224 | Self::Blake2b512 | Self::Md2 | Self::Md4 | Self::Md6 | Self::Adler32
        )
    }

    /// True for algorithms CycloneDX documents may carry.
    #[must_use]
    pub const fn supported_by_cyclonedx(&self) -> bool {
        !self.is_spdx_exclusive() && !matches!(self, Self::Unknown)
    }

    /// Expected digest length in hex characters, where the algorithm has a
    /// fixed output size. `None` for variable-length (MD6) and `Unknown`.
    #[must_use]
    pub const fn expected_hex_len(&self) -> Option<usize> {
        match self {
            Self::Adler32 => Some(8),
            Self::Md2 | Self::Md4 | Self::Md5 => Some(32),
            Self::Sha1 => Some(40),
            Self::Sha224 => Some(56),
            Self::Sha256 | Self::Sha3_256 | Self::Blake2b256 | Self::Blake3 => Some(64),
            Self::Sha384 | Self::Sha3_384 | Self::Blake2b384 => Some(96),
            Self::Sha512 | Self::Sha3_512 | Self::Blake2b512 => Some(128),
            Self::Md6 | Self::Unknown => None,
        }
    }

    /// Propose candidate algorithms for an observed digest length. Used
    /// when the algorithm tag itself is unreliable.
    #[must_use]
    pub fn candidates_for_len(hex_len: usize) -> Vec<Self> {
        ALL_ALGORITHMS
            .iter()
            .copied()
            .filter(|alg| alg.expected_hex_len() == Some(hex_len))
            .collect()
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An algorithm tag plus a lowercase hex digest value.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Hash {
    pub algorithm: HashAlgorithm,
    pub value: String,
}

impl Hash {
    /// Create a new hash; the value is lowercased for comparison.
    #[must_use]
    pub fn new(algorithm: HashAlgorithm, value: &str) -> Self {
        Self {
            algorithm,
            value: value.to_lowercase(),
        }
    }

    /// Create a hash from a producer's algorithm label.
    #[must_use]
    pub fn from_label(label: &str, value: &str) -> Self {
        Self::new(HashAlgorithm::from_label(label), value)
    }

    /// Pure length check: does the value length match the algorithm's
    /// expected digest size? Algorithms without a fixed size always pass.
    #[must_use]
    pub fn matches_expected_len(&self) -> bool {
        self.algorithm
            .expected_hex_len()
            .map_or(true, |len| self.value.len() == len)
    }

    /// Candidate algorithms whose digest size matches this value's length.
    #[must_use]
    pub fn candidate_algorithms(&self) -> Vec<HashAlgorithm> {
        HashAlgorithm::candidates_for_len(self.value.len())
    }

    /// Same algorithm, same value.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        self == other
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.value)
    }
}
