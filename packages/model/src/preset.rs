//! # Preset
//!
//! Named column-count/width splits for layout blocks.
//!
//! A preset identifier is a dash-separated list of percentage widths
//! ("50-50", "75-25", "33-33-33", …). The identifier alone determines
//! the column count, which keeps preset handling total over values
//! persisted by other editor versions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preset(String);

/// The splits offered by the layout settings panel.
pub const STOCK_PRESETS: [&str; 7] = [
    "100",
    "50-50",
    "75-25",
    "25-75",
    "33-33-33",
    "25-50-25",
    "25-25-25-25",
];

impl Preset {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Default split for a freshly created layout block.
    pub fn fifty_fifty() -> Self {
        Self::new("50-50")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of columns this preset declares.
    ///
    /// Counts dash-separated segments; never returns zero, so the
    /// preset engine stays total even for malformed identifiers.
    pub fn column_count(&self) -> usize {
        self.0.split('-').filter(|s| !s.is_empty()).count().max(1)
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_counts() {
        assert_eq!(Preset::new("100").column_count(), 1);
        assert_eq!(Preset::new("50-50").column_count(), 2);
        assert_eq!(Preset::new("33-33-33").column_count(), 3);
        assert_eq!(Preset::new("25-25-25-25").column_count(), 4);
    }

    #[test]
    fn malformed_identifier_still_counts_one() {
        assert_eq!(Preset::new("").column_count(), 1);
        assert_eq!(Preset::new("--").column_count(), 1);
    }

    #[test]
    fn stock_presets_parse() {
        for id in STOCK_PRESETS {
            assert!(Preset::new(id).column_count() >= 1);
        }
    }
}
