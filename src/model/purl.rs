//! PURL (Package URL) identifier handling.
//!
//! Grammar: `scheme:type/[namespace/...]/name[@version][?qualifiers][#subpath]`.
//! Parsing is a structural decomposition of the string; qualifiers keep
//! their insertion order for round-tripping but compare as a map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{IdentifierErrorKind, ReconcileError};

/// A parsed Package URL.
///
/// Scheme, type, and name are mandatory; namespace is zero or more ordered
/// segments; version, qualifiers, and subpath are optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purl {
    pub scheme: String,
    #[serde(rename = "type")]
    pub package_type: String,
    pub namespace: Vec<String>,
    pub name: String,
    pub version: Option<String>,
    /// Ordered `key=value` qualifiers. Equality ignores order; Display
    /// preserves it.
    pub qualifiers: IndexMap<String, String>,
    pub subpath: Option<String>,
}

impl Purl {
    /// Create a minimal PURL with the `pkg` scheme.
    #[must_use]
    pub fn new(package_type: &str, name: &str) -> Self {
        Self {
            scheme: "pkg".to_string(),
            package_type: package_type.to_string(),
            namespace: Vec::new(),
            name: name.to_string(),
            version: None,
            qualifiers: IndexMap::new(),
            subpath: None,
        }
    }

    /// Create a versioned PURL with the `pkg` scheme.
    #[must_use]
    pub fn with_version(package_type: &str, name: &str, version: &str) -> Self {
        let mut purl = Self::new(package_type, name);
        purl.version = Some(version.to_string());
        purl
    }

    /// Structural equivalence over all parsed fields.
    ///
    /// This is plain `==`; the method exists so callers comparing
    /// [`Identifier`](super::Identifier) values read uniformly.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        self == other
    }
}

impl FromStr for Purl {
    type Err = ReconcileError;

    /// Parse a PURL string. A failure reports *every* missing mandatory
    /// field (scheme, type, name), not just the first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut missing: Vec<&str> = Vec::new();

        let (scheme, rest) = match s.split_once(':') {
            Some((scheme, rest)) if !scheme.is_empty() => (scheme, rest),
            Some((_, rest)) => {
                missing.push("scheme");
                ("", rest)
            }
            None => return Err(ReconcileError::invalid_purl(s, &["scheme", "type", "name"])),
        };

        // `pkg:/type/...` and `pkg://type/...` are tolerated per the purl spec
        let rest = rest.trim_start_matches('/');

        // Subpath is everything after the last '#'
        let (rest, subpath) = match rest.rsplit_once('#') {
            Some((head, sub)) if !sub.is_empty() => (head, Some(sub.to_string())),
            Some((head, _)) => (head, None),
            None => (rest, None),
        };

        // Qualifiers follow the first '?'
        let (rest, qualifier_str) = match rest.split_once('?') {
            Some((head, quals)) => (head, Some(quals)),
            None => (rest, None),
        };

        // Version is the tail after the last '@', provided that '@' sits in
        // the final path segment (npm scopes are percent-encoded, so a bare
        // '@' can only introduce a version).
        let last_slash = rest.rfind('/');
        let (path, version) = match rest.rfind('@') {
            Some(at) if last_slash.map_or(true, |slash| at > slash) => {
                let tail = &rest[at + 1..];
                let version = if tail.is_empty() {
                    None
                } else {
                    Some(tail.to_string())
                };
                (&rest[..at], version)
            }
            _ => (rest, None),
        };

        let segments: Vec<&str> = path.split('/').filter(|seg| !seg.is_empty()).collect();

        let (package_type, namespace, name) = match segments.as_slice() {
            [] => {
                missing.push("type");
                missing.push("name");
                (String::new(), Vec::new(), String::new())
            }
            [only] => {
                missing.push("name");
                ((*only).to_string(), Vec::new(), String::new())
            }
            [ty, middle @ .., last] => (
                (*ty).to_string(),
                middle.iter().map(|seg| (*seg).to_string()).collect(),
                (*last).to_string(),
            ),
        };

        if !missing.is_empty() {
            return Err(ReconcileError::invalid_purl(s, &missing));
        }

        let mut qualifiers = IndexMap::new();
        if let Some(quals) = qualifier_str {
            for pair in quals.split('&').filter(|pair| !pair.is_empty()) {
                match pair.split_once('=') {
                    Some((key, value)) => {
                        qualifiers.insert(key.to_string(), value.to_string());
                    }
                    None => {
                        return Err(ReconcileError::identifier(
                            format!("PURL '{s}'"),
                            IdentifierErrorKind::InvalidPurlQualifier {
                                input: s.to_string(),
                                qualifier: pair.to_string(),
                            },
                        ));
                    }
                }
            }
        }

        Ok(Self {
            scheme: scheme.to_string(),
            package_type,
            namespace,
            name,
            version,
            qualifiers,
            subpath,
        })
    }
}

impl fmt::Display for Purl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scheme, self.package_type)?;
        for segment in &self.namespace {
            write!(f, "/{segment}")?;
        }
        write!(f, "/{}", self.name)?;
        if let Some(version) = &self.version {
            write!(f, "@{version}")?;
        }
        if !self.qualifiers.is_empty() {
            let mut sep = '?';
            for (key, value) in &self.qualifiers {
                write!(f, "{sep}{key}={value}")?;
                sep = '&';
            }
        }
        if let Some(subpath) = &self.subpath {
            write!(f, "#{subpath}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple() {
        let purl = Purl::from_str("pkg:cargo/serde@1.0.200").unwrap();
        assert_eq!(purl.scheme, "pkg");
        assert_eq!(purl.package_type, "cargo");
        assert_eq!(purl.name, "serde");
        assert_eq!(purl.version.as_deref(), Some("1.0.200"));
        assert!(purl.namespace.is_empty());
    }

    #[test]
    fn parse_namespaced() {
        let purl =
            Purl::from_str("pkg:maven/org.apache.commons/commons-lang3@3.12.0").unwrap();
        assert_eq!(purl.namespace, vec!["org.apache.commons".to_string()]);
        assert_eq!(purl.name, "commons-lang3");
    }

    #[test]
    fn parse_qualifiers_and_subpath() {
        let purl = Purl::from_str(
            "pkg:deb/debian/curl@7.50.3-1?arch=i386&distro=jessie#usr/bin/curl",
        )
        .unwrap();
        assert_eq!(purl.qualifiers.get("arch").map(String::as_str), Some("i386"));
        assert_eq!(
            purl.qualifiers.get("distro").map(String::as_str),
            Some("jessie")
        );
        assert_eq!(purl.subpath.as_deref(), Some("usr/bin/curl"));
    }

    #[test]
    fn display_round_trip() {
        for input in [
            "pkg:cargo/serde@1.0.200",
            "pkg:maven/org.apache.commons/commons-lang3@3.12.0",
            "pkg:deb/debian/curl@7.50.3-1?arch=i386&distro=jessie#usr/bin/curl",
            "pkg:npm/%40angular/core@15.0.0",
        ] {
            let purl = Purl::from_str(input).unwrap();
            let reparsed = Purl::from_str(&purl.to_string()).unwrap();
            assert_eq!(purl, reparsed, "round trip failed for {input}");
        }
    }

    #[test]
    fn qualifier_order_is_ignored_by_equality() {
        let a = Purl::from_str("pkg:deb/debian/curl@7.50.3-1?arch=i386&distro=jessie").unwrap();
        let b = Purl::from_str("pkg:deb/debian/curl@7.50.3-1?distro=jessie&arch=i386").unwrap();
        assert_eq!(a, b);
        // but Display preserves each input's own order
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    fn missing_name_reported() {
        let err = Purl::from_str("pkg:cargo").unwrap_err();
        match err {
            ReconcileError::Identifier {
                source: IdentifierErrorKind::InvalidPurl { missing, .. },
                ..
            } => assert_eq!(missing, "name"),
            other => panic!("expected InvalidPurl, got {other:?}"),
        }
    }

    #[test]
    fn missing_type_and_name_reported_together() {
        let err = Purl::from_str("pkg:").unwrap_err();
        match err {
            ReconcileError::Identifier {
                source: IdentifierErrorKind::InvalidPurl { missing, .. },
                ..
            } => assert_eq!(missing, "type, name"),
            other => panic!("expected InvalidPurl, got {other:?}"),
        }
    }

    #[test]
    fn no_scheme_at_all() {
        assert!(Purl::from_str("not a purl").is_err());
    }

    #[test]
    fn bad_qualifier_rejected() {
        let err = Purl::from_str("pkg:cargo/serde@1.0?broken").unwrap_err();
        assert!(format!("{err}").contains("PURL"));
    }

    #[test]
    fn at_sign_before_final_segment_is_not_a_version() {
        let purl = Purl::from_str("pkg:golang/github.com/user@host/repo").unwrap();
        assert_eq!(purl.version, None);
        assert_eq!(
            purl.namespace,
            vec!["github.com".to_string(), "user@host".to_string()]
        );
        assert_eq!(purl.name, "repo");
    }
}
