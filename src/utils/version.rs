//! Version comparison utilities.

use semver::Version;
use std::cmp::Ordering;

/// Compare two version strings, semver-first with a lexicographic
/// fallback for strings that don't parse.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    if let (Ok(ver_a), Ok(ver_b)) = (Version::parse(a), Version::parse(b)) {
        return ver_a.cmp(&ver_b);
    }

    a.cmp(b)
}

/// Compare optional version strings; an absent version sorts first.
#[must_use]
pub fn compare_version_options(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_versions(a, b),
    }
}

/// Fuzzy version overlap used by the aggregation fold: equal, or a
/// substring of the other in either direction. This compensates for
/// producers that embed extra qualifiers in version strings
/// ("1.2" vs "1.2.0-r1").
///
/// Known ambiguity, preserved deliberately: short versions can
/// false-positive ("1" overlaps "10.1"), and an empty version overlaps
/// everything. Both sides absent also counts as an overlap.
#[must_use]
pub fn versions_overlap(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b || a.contains(b) || b.contains(a),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semver_ordering() {
        assert_eq!(compare_versions("1.0.0", "1.0.1"), Ordering::Less);
        assert_eq!(compare_versions("2.0.0", "10.0.0"), Ordering::Less);
        assert_eq!(compare_versions("1.0.0", "1.0.0"), Ordering::Equal);
    }

    #[test]
    fn lexicographic_fallback() {
        // not semver, falls back to string ordering
        assert_eq!(compare_versions("r10", "r9"), Ordering::Less);
    }

    #[test]
    fn option_ordering() {
        assert_eq!(compare_version_options(None, Some("1.0.0")), Ordering::Less);
        assert_eq!(compare_version_options(None, None), Ordering::Equal);
    }

    #[test]
    fn overlap_rules() {
        assert!(versions_overlap(Some("1.2.0"), Some("1.2.0")));
        assert!(versions_overlap(Some("1.2"), Some("1.2.0-r1")));
        assert!(versions_overlap(Some("1.2.0-r1"), Some("1.2")));
        assert!(!versions_overlap(Some("1.2.0"), Some("3.4.1")));
        assert!(versions_overlap(None, None));
        assert!(!versions_overlap(Some("1.0"), None));
        // the documented ambiguity
        assert!(versions_overlap(Some("1"), Some("10.1")));
    }
}
