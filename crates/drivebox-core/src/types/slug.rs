//! Display-name normalization for duplicate detection.

/// Convert a display name to its comparison slug.
///
/// Lowercases, trims, converts whitespace runs and underscores to single
/// hyphens, drops everything outside ASCII alphanumerics, hyphens, and
/// dots, collapses repeated hyphens, and trims hyphens from both ends.
/// Pure and total; idempotent by construction.
pub fn slugify(name: &str) -> String {
    let mut raw = String::with_capacity(name.len());
    for ch in name.trim().to_lowercase().chars() {
        if ch.is_whitespace() || ch == '_' {
            raw.push('-');
        } else if ch.is_ascii_alphanumeric() || ch == '-' || ch == '.' {
            raw.push(ch);
        }
    }

    let mut slug = String::with_capacity(raw.len());
    let mut previous_hyphen = false;
    for ch in raw.chars() {
        if ch == '-' {
            if !previous_hyphen {
                slug.push('-');
            }
            previous_hyphen = true;
        } else {
            slug.push(ch);
            previous_hyphen = false;
        }
    }

    slug.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_normalization() {
        assert_eq!(slugify("My Report.pdf"), "my-report.pdf");
        assert_eq!(slugify("  Annual_Budget 2024  "), "annual-budget-2024");
    }

    #[test]
    fn test_strips_special_characters() {
        assert_eq!(slugify("Q3 (final)!.xlsx"), "q3-final.xlsx");
        assert_eq!(slugify("héllo wörld"), "hllo-wrld");
    }

    #[test]
    fn test_collapses_and_trims_hyphens() {
        assert_eq!(slugify("--a  _  b--"), "a-b");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn test_idempotent() {
        for name in ["My Report.pdf", "  x__y  ", "Ünïcode & co", "a-b.c"] {
            let once = slugify(name);
            assert_eq!(slugify(&once), once, "slugify not idempotent for {name:?}");
        }
    }
}
