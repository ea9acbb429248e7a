//! Compass directions used to describe a cell's neighbors

use bevy::math::IVec2;
use serde::{Deserialize, Serialize};

/// One of the eight neighbors of a cell.
///
/// The declaration order is the enumeration order used when building a
/// neighbor pattern, starting north and walking clockwise. Rows grow
/// downwards, so north is `y - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All directions in pattern order
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Single-letter code used in pattern strings (`A` = north ... `H` = north-west)
    pub const fn code(self) -> char {
        match self {
            Direction::North => 'A',
            Direction::NorthEast => 'B',
            Direction::East => 'C',
            Direction::SouthEast => 'D',
            Direction::South => 'E',
            Direction::SouthWest => 'F',
            Direction::West => 'G',
            Direction::NorthWest => 'H',
        }
    }

    /// Parse a pattern code back into a direction
    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.code() == code)
    }

    /// Cell offset of the neighbor in this direction
    pub const fn offset(self) -> IVec2 {
        match self {
            Direction::North => IVec2::new(0, -1),
            Direction::NorthEast => IVec2::new(1, -1),
            Direction::East => IVec2::new(1, 0),
            Direction::SouthEast => IVec2::new(1, 1),
            Direction::South => IVec2::new(0, 1),
            Direction::SouthWest => IVec2::new(-1, 1),
            Direction::West => IVec2::new(-1, 0),
            Direction::NorthWest => IVec2::new(-1, -1),
        }
    }
}

/// Join a neighbor pattern into its lookup string (e.g. `"CE"`)
pub fn pattern_string(pattern: &[Direction]) -> String {
    pattern.iter().map(|d| d.code()).collect()
}

/// Parse a pattern string; unknown codes yield `None`
pub fn parse_pattern(pattern: &str) -> Option<Vec<Direction>> {
    pattern.chars().map(Direction::from_code).collect()
}
