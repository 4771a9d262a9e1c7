//! Named board positions.

use serde::{Deserialize, Serialize};

/// A cell of the board, numbered 0-8 in row-major order.
///
/// ```text
/// 0 | 1 | 2
/// 3 | 4 | 5
/// 6 | 7 | 8
/// ```
///
/// Parses case-insensitively from its kebab-case name (`"top-left"`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::FromRepr,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum Position {
    /// Position 0.
    TopLeft = 0,
    /// Position 1.
    TopCenter = 1,
    /// Position 2.
    TopRight = 2,
    /// Position 3.
    MiddleLeft = 3,
    /// Position 4.
    Center = 4,
    /// Position 5.
    MiddleRight = 5,
    /// Position 6.
    BottomLeft = 6,
    /// Position 7.
    BottomCenter = 7,
    /// Position 8.
    BottomRight = 8,
}

impl Position {
    /// All positions in index order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Board index of this position.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Position for a board index, or `None` outside 0-8.
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index).ok().and_then(Self::from_repr)
    }

    /// True for the four corners.
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Position::TopLeft | Position::TopRight | Position::BottomLeft | Position::BottomRight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_index_roundtrip_for_every_cell() {
        for (i, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.index(), i);
            assert_eq!(Position::from_index(i), Some(*pos));
        }
        assert_eq!(Position::from_index(9), None);
        assert_eq!(Position::from_index(usize::MAX), None);
    }

    #[test]
    fn test_parse_names_case_insensitively() {
        assert_eq!(Position::from_str("center"), Ok(Position::Center));
        assert_eq!(Position::from_str("Bottom-Right"), Ok(Position::BottomRight));
        assert!(Position::from_str("middle").is_err());
    }

    #[test]
    fn test_display_uses_kebab_case() {
        assert_eq!(Position::TopCenter.to_string(), "top-center");
    }

    #[test]
    fn test_corners() {
        let corners: Vec<_> = Position::ALL.into_iter().filter(|p| p.is_corner()).collect();
        assert_eq!(corners.len(), 4);
        assert!(!Position::Center.is_corner());
    }
}
