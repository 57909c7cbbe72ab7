//! LiveSplit comparisons
//!
//! A comparison is a named timing strategy tracked by LiveSplit ("Personal Best",
//! "Best Segments", ...). Chat users refer to them by short aliases; which ones
//! are enabled comes from the LiveSplit settings file, loaded once at startup.

pub mod activation;

pub use activation::{ActivationError, ActivationTable};

/// The built-in comparison. LiveSplit always tracks it, so it is always active.
pub const PERSONAL_BEST: &str = "Personal Best";

/// Sentinel comparison name. Resolving to it means "not a real comparison".
pub const NONE_COMPARISON: &str = "None";

/// Fixed shorthand → comparison display name mapping.
const SHORTHANDS: &[(&str, &str)] = &[
    ("pb", PERSONAL_BEST),
    ("best", "Best Segments"),
    ("bestsplits", "Best Split Times"),
    ("average", "Average Segments"),
    ("median", "Median Segments"),
    ("worst", "Worst Segments"),
    ("balanced", "Balanced PB"),
    ("latest", "Latest Run"),
    ("none", NONE_COMPARISON),
];

/// Result of resolving a user-typed shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shorthand {
    /// A queryable comparison, carrying its display name.
    Comparison(&'static str),
    /// The `none` sentinel.
    Sentinel,
}

/// Resolve a shorthand token (exact, case-sensitive match).
pub fn resolve_shorthand(token: &str) -> Option<Shorthand> {
    SHORTHANDS
        .iter()
        .find(|(short, _)| *short == token)
        .map(|(_, name)| {
            if *name == NONE_COMPARISON {
                Shorthand::Sentinel
            } else {
                Shorthand::Comparison(name)
            }
        })
}

/// All known shorthands, in table order.
pub fn shorthands() -> impl Iterator<Item = &'static str> {
    SHORTHANDS.iter().map(|(short, _)| *short)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_shorthands() {
        assert_eq!(
            resolve_shorthand("pb"),
            Some(Shorthand::Comparison("Personal Best"))
        );
        assert_eq!(
            resolve_shorthand("best"),
            Some(Shorthand::Comparison("Best Segments"))
        );
        assert_eq!(
            resolve_shorthand("latest"),
            Some(Shorthand::Comparison("Latest Run"))
        );
    }

    #[test]
    fn test_none_is_sentinel() {
        assert_eq!(resolve_shorthand("none"), Some(Shorthand::Sentinel));
    }

    #[test]
    fn test_unknown_and_case_sensitive() {
        assert_eq!(resolve_shorthand("PB"), None);
        assert_eq!(resolve_shorthand("sob"), None);
        assert_eq!(resolve_shorthand(""), None);
        assert_eq!(resolve_shorthand("pb "), None);
    }

    #[test]
    fn test_shorthands_listing() {
        let all: Vec<_> = shorthands().collect();
        assert_eq!(all.len(), 9);
        assert_eq!(all[0], "pb");
        assert!(all.contains(&"none"));
    }
}
