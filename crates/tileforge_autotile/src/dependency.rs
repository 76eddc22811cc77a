//! Neighbor directions and per-neighbor dependencies

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tileforge_core::TileTypeId;

/// One of the eight neighbors of a cell.
///
/// Grid coordinates grow downwards: `Top*` neighbors are at `y - 1`,
/// `Bottom*` neighbors at `y + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Direction {
    /// All directions, top-left to bottom-right in reading order
    pub const ALL: [Direction; 8] = [
        Direction::TopLeft,
        Direction::TopCenter,
        Direction::TopRight,
        Direction::CenterLeft,
        Direction::CenterRight,
        Direction::BottomLeft,
        Direction::BottomCenter,
        Direction::BottomRight,
    ];

    /// Slot index in [`Direction::ALL`] order
    pub fn index(self) -> usize {
        self as usize
    }

    /// Cell offset `(dx, dy)` of this neighbor
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::TopLeft => (-1, -1),
            Direction::TopCenter => (0, -1),
            Direction::TopRight => (1, -1),
            Direction::CenterLeft => (-1, 0),
            Direction::CenterRight => (1, 0),
            Direction::BottomLeft => (-1, 1),
            Direction::BottomCenter => (0, 1),
            Direction::BottomRight => (1, 1),
        }
    }

    /// Property key used in tile set files
    pub fn key(self) -> &'static str {
        match self {
            Direction::TopLeft => "topLeft",
            Direction::TopCenter => "topCenter",
            Direction::TopRight => "topRight",
            Direction::CenterLeft => "centerLeft",
            Direction::CenterRight => "centerRight",
            Direction::BottomLeft => "bottomLeft",
            Direction::BottomCenter => "bottomCenter",
            Direction::BottomRight => "bottomRight",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| dir.key() == key)
    }
}

/// Persisted tag of a [`Dependency`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    Solid,
    Empty,
    Tile,
}

impl DependencyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DependencyKind::Solid => "SOLID",
            DependencyKind::Empty => "EMPTY",
            DependencyKind::Tile => "TILE",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DependencyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SOLID" => Ok(DependencyKind::Solid),
            "EMPTY" => Ok(DependencyKind::Empty),
            "TILE" => Ok(DependencyKind::Tile),
            other => Err(format!("unknown dependency type '{}'", other)),
        }
    }
}

/// A constraint on a single neighbor cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dependency {
    /// Satisfied iff the neighbor has no tile
    Empty,
    /// Satisfied iff the neighbor has any tile
    Solid,
    /// Satisfied iff the neighbor's tile type is in the set
    Tile(BTreeSet<TileTypeId>),
}

impl Dependency {
    /// Build a [`Dependency::Tile`] from any list of ids
    pub fn tiles<I, T>(types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TileTypeId>,
    {
        Dependency::Tile(types.into_iter().map(Into::into).collect())
    }

    pub fn kind(&self) -> DependencyKind {
        match self {
            Dependency::Empty => DependencyKind::Empty,
            Dependency::Solid => DependencyKind::Solid,
            Dependency::Tile(_) => DependencyKind::Tile,
        }
    }

    /// Test this dependency against a neighbor's tile type
    pub fn is_satisfied_by(&self, neighbor: Option<&TileTypeId>) -> bool {
        match self {
            Dependency::Empty => neighbor.is_none(),
            Dependency::Solid => neighbor.is_some(),
            Dependency::Tile(types) => neighbor.is_some_and(|t| types.contains(t)),
        }
    }

    /// Tile types referenced by this dependency
    pub fn tile_types(&self) -> Option<&BTreeSet<TileTypeId>> {
        match self {
            Dependency::Tile(types) => Some(types),
            _ => None,
        }
    }
}
