//! Hex coordinate system for the game map.
//!
//! Uses offset "odd-q" coordinates (vertical stagger): odd columns sit half a
//! hex lower than even columns, so the offset to each neighbour depends on
//! the parity of the source column.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Offset coordinate on the hex grid.
///
/// - `x` is the column
/// - `y` is the row
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct HexCoord {
    /// Column coordinate
    pub x: i32,
    /// Row coordinate
    pub y: i32,
}

impl PartialOrd for HexCoord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HexCoord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Column-major ordering, matching how the grid is populated
        (self.x, self.y).cmp(&(other.x, other.y))
    }
}

/// The six movement directions on the grid, clockwise from north.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
    NorthWest,
}

/// (dx, dy) per direction for sources in an even column.
const EVEN_COLUMN_OFFSETS: [(Direction, i32, i32); 6] = [
    (Direction::North, 0, -1),
    (Direction::NorthEast, 1, -1),
    (Direction::SouthEast, 1, 0),
    (Direction::South, 0, 1),
    (Direction::SouthWest, -1, 0),
    (Direction::NorthWest, -1, -1),
];

/// (dx, dy) per direction for sources in an odd column.
const ODD_COLUMN_OFFSETS: [(Direction, i32, i32); 6] = [
    (Direction::North, 0, -1),
    (Direction::NorthEast, 1, 0),
    (Direction::SouthEast, 1, 1),
    (Direction::South, 0, 1),
    (Direction::SouthWest, -1, 1),
    (Direction::NorthWest, -1, 0),
];

impl Direction {
    /// Get all directions in clockwise order starting from north.
    pub const fn all() -> &'static [Direction] {
        &[
            Direction::North,
            Direction::NorthEast,
            Direction::SouthEast,
            Direction::South,
            Direction::SouthWest,
            Direction::NorthWest,
        ]
    }

    /// Facing in degrees for a fleet travelling in this direction.
    pub const fn rotation(&self) -> u16 {
        match self {
            Direction::North => 0,
            Direction::NorthEast => 60,
            Direction::SouthEast => 120,
            Direction::South => 180,
            Direction::SouthWest => 240,
            Direction::NorthWest => 300,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::North => write!(f, "N"),
            Direction::NorthEast => write!(f, "NE"),
            Direction::SouthEast => write!(f, "SE"),
            Direction::South => write!(f, "S"),
            Direction::SouthWest => write!(f, "SW"),
            Direction::NorthWest => write!(f, "NW"),
        }
    }
}

impl HexCoord {
    /// Create a new hex coordinate.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether this hex sits in an even column.
    #[inline]
    pub const fn is_even_column(&self) -> bool {
        self.x % 2 == 0
    }

    fn offsets(&self) -> &'static [(Direction, i32, i32); 6] {
        if self.is_even_column() {
            &EVEN_COLUMN_OFFSETS
        } else {
            &ODD_COLUMN_OFFSETS
        }
    }

    /// Get the neighbouring coordinate in the given direction.
    pub fn neighbor(&self, direction: Direction) -> HexCoord {
        let index = Direction::all()
            .iter()
            .position(|d| *d == direction)
            .unwrap_or_default();
        let (_, dx, dy) = self.offsets()[index];
        HexCoord::new(self.x + dx, self.y + dy)
    }

    /// Get all 6 neighbouring hexes in clockwise order starting from north.
    ///
    /// Coordinates are not clipped to any grid.
    pub fn neighbors(&self) -> [HexCoord; 6] {
        let offsets = *self.offsets();
        offsets.map(|(_, dx, dy)| HexCoord::new(self.x + dx, self.y + dy))
    }

    /// Direction of an adjacent hex, or `None` if `other` is not a neighbour.
    pub fn direction_to(&self, other: &HexCoord) -> Option<Direction> {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        self.offsets()
            .iter()
            .find(|(_, ox, oy)| *ox == dx && *oy == dy)
            .map(|(d, _, _)| *d)
    }

    /// Check whether `other` is one of the six neighbours of this hex.
    pub fn is_adjacent(&self, other: &HexCoord) -> bool {
        self.direction_to(other).is_some()
    }

    /// Facing in degrees for a fleet moving from this hex to `to`.
    ///
    /// A non-adjacent destination faces north (0).
    pub fn rotation_towards(&self, to: &HexCoord) -> u16 {
        self.direction_to(to).map(|d| d.rotation()).unwrap_or(0)
    }

    /// Check if this coordinate is inside the inclusive range `[0, max_x] x [0, max_y]`.
    pub fn in_bounds(&self, max_x: i32, max_y: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x <= max_x && self.y <= max_y
    }
}

impl From<(i32, i32)> for HexCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Target angle reached by turning the shortest way from `current_rad`.
///
/// The returned value is `current_rad + delta` where `delta` lies in `[-PI, PI]`,
/// so a sprite tween never spins the long way around.
pub fn shortest_rotation(current_rad: f64, target_rad: f64) -> f64 {
    let mut diff = target_rad - current_rad;
    while diff > PI {
        diff -= 2.0 * PI;
    }
    while diff < -PI {
        diff += 2.0 * PI;
    }
    current_rad + diff
}
