//! Version ordering for maintainable artefacts
//!
//! SDMX versions are dot-separated ("1.0", "2.1.3", "1.0.0-draft"). Segments
//! are compared numerically when both sides parse as integers and as plain
//! strings otherwise. Missing trailing segments count as zero, so "1" and
//! "1.0" are equal.

use std::cmp::Ordering;

/// Three-way comparison of two version strings
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (l, r) => {
                let ordering = compare_segment(l.unwrap_or("0"), r.unwrap_or("0"));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

/// Like [`compare_versions`], with an absent version ordered below any present one
pub fn compare_optional_versions(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => compare_versions(a, b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

fn compare_segment(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}
