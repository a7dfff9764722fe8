//! The feed's visibility flag.

use serde::{Deserialize, Serialize};

/// Whether a feed row is published in the catalog.
///
/// The sheet stores this as free text. Only a case-insensitive `TRUE`
/// publishes a row; every other value, including an empty cell, hides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Visible,
    #[default]
    Hidden,
}

impl Visibility {
    /// Interpret a visibility cell.
    ///
    /// ```
    /// use sheetshop_core::Visibility;
    ///
    /// assert_eq!(Visibility::parse("true"), Visibility::Visible);
    /// assert_eq!(Visibility::parse(" TRUE "), Visibility::Visible);
    /// assert_eq!(Visibility::parse("yes"), Visibility::Hidden);
    /// assert_eq!(Visibility::parse(""), Visibility::Hidden);
    /// ```
    #[must_use]
    pub fn parse(cell: &str) -> Self {
        if cell.trim().eq_ignore_ascii_case("TRUE") {
            Self::Visible
        } else {
            Self::Hidden
        }
    }

    /// Returns `true` for [`Visibility::Visible`].
    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

impl From<bool> for Visibility {
    fn from(visible: bool) -> Self {
        if visible { Self::Visible } else { Self::Hidden }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        for cell in ["TRUE", "true", "True", "tRuE"] {
            assert_eq!(Visibility::parse(cell), Visibility::Visible, "{cell}");
        }
    }

    #[test]
    fn test_parse_rejects_everything_else() {
        for cell in ["", "FALSE", "false", "1", "yes", "TRUE!", "T R U E"] {
            assert_eq!(Visibility::parse(cell), Visibility::Hidden, "{cell}");
        }
    }

    #[test]
    fn test_default_is_hidden() {
        assert!(!Visibility::default().is_visible());
    }

    #[test]
    fn test_from_bool() {
        assert!(Visibility::from(true).is_visible());
        assert!(!Visibility::from(false).is_visible());
    }
}
