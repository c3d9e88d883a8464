//! Worksheet naming rules of the xlsx format
//!
//! Names are at most 31 characters, may not contain `[ ] : * ? / \`, may not
//! start or end with an apostrophe, and are compared case-insensitively.

use std::collections::HashSet;

pub const MAX_SHEET_NAME_LEN: usize = 31;

const INVALID_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Turn labels into distinct, valid worksheet names
///
/// `reserved` names are never produced. A label whose truncated form is
/// already taken gets a `~N` suffix, shortening the base to keep within
/// the length limit.
pub fn unique_sheet_names<'a, I>(labels: I, reserved: &[&str]) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut taken: HashSet<String> = reserved.iter().map(|r| r.to_lowercase()).collect();
    let mut names = Vec::new();

    for label in labels {
        let base = sanitize(label);
        let mut candidate = fit(&base, MAX_SHEET_NAME_LEN);
        let mut n = 2;
        while taken.contains(&candidate.to_lowercase()) {
            let suffix = format!("~{}", n);
            let keep = MAX_SHEET_NAME_LEN - suffix.chars().count();
            candidate = format!("{}{}", fit(&base, keep), suffix);
            n += 1;
        }
        taken.insert(candidate.to_lowercase());
        names.push(candidate);
    }

    names
}

fn sanitize(label: &str) -> String {
    let replaced: String = label
        .chars()
        .map(|c| if INVALID_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let trimmed = replaced.trim().trim_matches('\'');
    if trimmed.is_empty() {
        "Sheet".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Truncate to `max_len` characters; a cut may expose an apostrophe at the end
fn fit(s: &str, max_len: usize) -> String {
    let truncated: String = s.chars().take(max_len).collect();
    truncated.trim_end_matches('\'').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_names_unchanged() {
        let names = unique_sheet_names(["Footings & Slabs", "Ext. Walls"], &[]);
        assert_eq!(names, vec!["Footings & Slabs", "Ext. Walls"]);
    }

    #[test]
    fn test_long_name_truncated() {
        let label = "Structural Elements and Secondary Framing";
        let names = unique_sheet_names([label], &[]);
        assert_eq!(names[0].chars().count(), MAX_SHEET_NAME_LEN);
        assert!(label.starts_with(&names[0]));
    }

    #[test]
    fn test_truncation_collision_disambiguated() {
        let a = "Foundation Walls - North Elevation Basement";
        let b = "Foundation Walls - North Elevation Garage";
        let names = unique_sheet_names([a, b], &[]);
        assert_ne!(names[0], names[1]);
        assert_eq!(names[0], "Foundation Walls - North Elevat");
        assert_eq!(names[1], "Foundation Walls - North Elev~2");
        assert!(names.iter().all(|n| n.chars().count() <= MAX_SHEET_NAME_LEN));
    }

    #[test]
    fn test_many_collisions_stay_unique() {
        let labels: Vec<String> = (0..12)
            .map(|i| format!("Identical prefix that is far too long {}", i))
            .collect();
        let names = unique_sheet_names(labels.iter().map(String::as_str), &[]);
        let distinct: HashSet<_> = names.iter().map(|n| n.to_lowercase()).collect();
        assert_eq!(distinct.len(), labels.len());
        assert!(names.iter().all(|n| n.chars().count() <= MAX_SHEET_NAME_LEN));
    }

    #[test]
    fn test_reserved_and_case_insensitive() {
        let names = unique_sheet_names(["summary", "Roof", "ROOF"], &["Summary"]);
        assert_eq!(names, vec!["summary~2", "Roof", "ROOF~2"]);
    }

    #[test]
    fn test_truncation_never_ends_in_apostrophe() {
        let label = format!("{}'xyz", "A".repeat(30));
        let names = unique_sheet_names([label.as_str(), label.as_str()], &[]);
        assert_eq!(names[0], "A".repeat(30));
        assert_eq!(names[1], format!("{}~2", "A".repeat(29)));
        assert!(names.iter().all(|n| !n.ends_with('\'')));
    }

    #[test]
    fn test_invalid_characters_replaced() {
        let names = unique_sheet_names(["Walls [N/S]: 1*?", "'quoted'", "   "], &[]);
        assert_eq!(names, vec!["Walls _N_S__ 1__", "quoted", "Sheet"]);
    }
}
