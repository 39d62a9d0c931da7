#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tunneler arena.
//!
//! This crate defines the vocabulary every other layer speaks: grid
//! coordinates, movement directions, the closed set of [`CellKind`] variants
//! that may occupy a grid position, footprints for multi-cell structures and
//! the typed errors raised when a request would break the occupancy
//! invariant. The authoritative grid lives in the world crate; systems and
//! adapters only ever exchange the values declared here.

mod config;

pub use config::{
    GameConfig, DEFAULT_BASE_SIZE, DEFAULT_DIRT_HEALTH, DEFAULT_GRID_SIZE, DEFAULT_PLAYER_COUNT,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Type tag reported by dirt cells.
pub const DIRT_TAG: char = 'd';
/// Type tag reported by empty cells.
pub const EMPTY_TAG: char = '.';
/// Type tag reported by wall cells.
pub const WALL_TAG: char = '#';
/// Type tag reported by base fragments.
pub const BASE_TAG: char = 'b';
/// Type tag reported by player avatars.
pub const PLAYER_TAG: char = '@';

/// Cardinal movement directions available to players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Column and row offsets of a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Parses the single-letter compass abbreviation used by input scripts.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'n' => Some(Self::North),
            'e' => Some(Self::East),
            's' => Some(Self::South),
            'w' => Some(Self::West),
            _ => None,
        }
    }
}

/// Identifier assigned to a player taking part in a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Creates a new player identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Signed coordinates of the neighbour one step away in `direction`.
    ///
    /// The result may lie outside any grid, including at negative indices;
    /// callers resolve it against a grid before use.
    #[must_use]
    pub fn probe(self, direction: Direction) -> (i64, i64) {
        let (dc, dr) = direction.delta();
        (i64::from(self.column) + dc, i64::from(self.row) + dr)
    }
}

/// Closed set of occupants a grid position may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Tunnelable earth that clears once its health is spent.
    Dirt {
        /// Tunnelling attempts the dirt absorbs before clearing.
        health: u8,
    },
    /// Open space; the only kind a player may step onto.
    Empty,
    /// Impassable, indestructible barrier.
    Wall,
    /// One cell of a player's base structure.
    BaseFragment {
        /// Player that owns the base.
        owner: PlayerId,
    },
    /// Avatar of a player.
    Player {
        /// Player represented by the avatar.
        id: PlayerId,
    },
}

impl CellKind {
    /// Single-character tag identifying the variant.
    #[must_use]
    pub const fn tag(&self) -> char {
        match self {
            Self::Dirt { .. } => DIRT_TAG,
            Self::Empty => EMPTY_TAG,
            Self::Wall => WALL_TAG,
            Self::BaseFragment { .. } => BASE_TAG,
            Self::Player { .. } => PLAYER_TAG,
        }
    }

    /// Reports whether a movable occupant may step onto this kind.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Outcome of removing one unit of health from a dirt cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Erosion {
    /// The dirt survived with the reported health left.
    Remaining(u8),
    /// The dirt has no health left and must be cleared.
    Exhausted,
}

/// Occupant of a single grid position together with the position it believes it holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    coord: CellCoord,
    kind: CellKind,
}

impl Cell {
    /// Creates a cell of the provided kind located at `coord`.
    #[must_use]
    pub const fn new(coord: CellCoord, kind: CellKind) -> Self {
        Self { coord, kind }
    }

    /// Creates a dirt cell with the provided health.
    #[must_use]
    pub const fn dirt(coord: CellCoord, health: u8) -> Self {
        Self::new(coord, CellKind::Dirt { health })
    }

    /// Creates an empty cell.
    #[must_use]
    pub const fn empty(coord: CellCoord) -> Self {
        Self::new(coord, CellKind::Empty)
    }

    /// Creates a wall cell.
    #[must_use]
    pub const fn wall(coord: CellCoord) -> Self {
        Self::new(coord, CellKind::Wall)
    }

    /// Creates a base fragment owned by `owner`.
    #[must_use]
    pub const fn base_fragment(coord: CellCoord, owner: PlayerId) -> Self {
        Self::new(coord, CellKind::BaseFragment { owner })
    }

    /// Creates the avatar of player `id`.
    #[must_use]
    pub const fn player(coord: CellCoord, id: PlayerId) -> Self {
        Self::new(coord, CellKind::Player { id })
    }

    /// Position the cell believes it occupies.
    #[must_use]
    pub const fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Variant and variant-specific state of the cell.
    #[must_use]
    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    /// Single-character tag identifying the variant.
    #[must_use]
    pub const fn tag(&self) -> char {
        self.kind.tag()
    }

    /// Updates the position the cell believes it occupies.
    ///
    /// Whoever moves the cell inside a grid is responsible for keeping this
    /// in sync with the grid's storage.
    pub fn set_coord(&mut self, coord: CellCoord) {
        self.coord = coord;
    }

    /// Removes one unit of health from a dirt cell.
    ///
    /// Returns `None` for every other kind. Health saturates at zero, so a
    /// cell that is already spent keeps reporting [`Erosion::Exhausted`].
    pub fn decrement_health(&mut self) -> Option<Erosion> {
        let CellKind::Dirt { health } = &mut self.kind else {
            return None;
        };
        *health = health.saturating_sub(1);
        if *health == 0 {
            Some(Erosion::Exhausted)
        } else {
            Some(Erosion::Remaining(*health))
        }
    }
}

/// Cell kind used to populate a freshly constructed grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fill {
    /// Dirt with the provided health.
    Dirt(u8),
    /// Open space.
    Empty,
    /// Solid wall.
    Wall,
}

impl Default for Fill {
    fn default() -> Self {
        Self::Dirt(DEFAULT_DIRT_HEALTH)
    }
}

impl Fill {
    /// Creates the fill cell for the provided position.
    #[must_use]
    pub const fn cell_at(self, coord: CellCoord) -> Cell {
        match self {
            Self::Dirt(health) => Cell::dirt(coord, health),
            Self::Empty => Cell::empty(coord),
            Self::Wall => Cell::wall(coord),
        }
    }
}

/// Inclusive rectangle spanning a top-left and bottom-right cell.
///
/// Deserialized footprints pass through [`Footprint::new`], so every value
/// has ordered corners and a width and height that fit in a `u32`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FootprintCorners")]
pub struct Footprint {
    top_left: CellCoord,
    bottom_right: CellCoord,
}

#[derive(Deserialize)]
struct FootprintCorners {
    top_left: CellCoord,
    bottom_right: CellCoord,
}

impl TryFrom<FootprintCorners> for Footprint {
    type Error = FootprintError;

    fn try_from(corners: FootprintCorners) -> Result<Self, Self::Error> {
        Self::new(corners.top_left, corners.bottom_right)
    }
}

impl Footprint {
    /// Creates a footprint, rejecting corners that are not ordered component-wise
    /// and spans whose width or height would not fit in a `u32`.
    pub fn new(top_left: CellCoord, bottom_right: CellCoord) -> Result<Self, FootprintError> {
        if bottom_right.column() < top_left.column() || bottom_right.row() < top_left.row() {
            return Err(FootprintError::Inverted {
                top_left,
                bottom_right,
            });
        }
        if bottom_right.column() - top_left.column() == u32::MAX
            || bottom_right.row() - top_left.row() == u32::MAX
        {
            return Err(FootprintError::Oversized {
                top_left,
                bottom_right,
            });
        }

        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    /// Creates a footprint from its top-left corner and non-zero dimensions.
    pub fn from_origin_and_size(
        top_left: CellCoord,
        width: u32,
        height: u32,
    ) -> Result<Self, FootprintError> {
        if width == 0 || height == 0 {
            return Err(FootprintError::TooSmall { width, height });
        }
        let column = top_left
            .column()
            .checked_add(width - 1)
            .ok_or(FootprintError::TooSmall { width, height })?;
        let row = top_left
            .row()
            .checked_add(height - 1)
            .ok_or(FootprintError::TooSmall { width, height })?;
        Self::new(top_left, CellCoord::new(column, row))
    }

    /// Upper-left corner of the footprint.
    #[must_use]
    pub const fn top_left(&self) -> CellCoord {
        self.top_left
    }

    /// Lower-right corner of the footprint.
    #[must_use]
    pub const fn bottom_right(&self) -> CellCoord {
        self.bottom_right
    }

    /// Number of columns spanned, corners included.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.bottom_right.column() - self.top_left.column() + 1
    }

    /// Number of rows spanned, corners included.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.bottom_right.row() - self.top_left.row() + 1
    }

    /// Reports whether `coord` lies inside the footprint.
    #[must_use]
    pub const fn contains(&self, coord: CellCoord) -> bool {
        coord.column() >= self.top_left.column()
            && coord.column() <= self.bottom_right.column()
            && coord.row() >= self.top_left.row()
            && coord.row() <= self.bottom_right.row()
    }
}

/// Reasons a structure footprint is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum FootprintError {
    /// The bottom-right corner precedes the top-left corner on some axis.
    #[error("bottom-right corner {bottom_right:?} precedes top-left corner {top_left:?}")]
    Inverted {
        /// Requested top-left corner.
        top_left: CellCoord,
        /// Requested bottom-right corner.
        bottom_right: CellCoord,
    },
    /// The corners span every `u32` value on some axis.
    #[error("footprint from {top_left:?} to {bottom_right:?} is too large to measure")]
    Oversized {
        /// Requested top-left corner.
        top_left: CellCoord,
        /// Requested bottom-right corner.
        bottom_right: CellCoord,
    },
    /// The structure's cell array does not match the footprint dimensions.
    #[error("cell array is {actual_width}x{actual_height} but the footprint is {width}x{height}")]
    DimensionMismatch {
        /// Footprint width in cells.
        width: u32,
        /// Footprint height in cells.
        height: u32,
        /// Widest row of the supplied cell array.
        actual_width: u32,
        /// Number of rows in the supplied cell array.
        actual_height: u32,
    },
    /// The footprint is too small for the requested structure.
    #[error("a {width}x{height} footprint is too small")]
    TooSmall {
        /// Requested width in cells.
        width: u32,
        /// Requested height in cells.
        height: u32,
    },
    /// The footprint extends past the grid edge.
    #[error("footprint ending at {bottom_right:?} exceeds a {size}x{size} grid")]
    ExceedsGrid {
        /// Lower-right corner of the rejected footprint.
        bottom_right: CellCoord,
        /// Side length of the grid.
        size: u32,
    },
}

/// Errors raised by grid operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum GridError {
    /// The requested position lies outside the grid.
    #[error("cell ({column}, {row}) lies outside a {size}x{size} grid")]
    OutOfBounds {
        /// Requested column, possibly negative.
        column: i64,
        /// Requested row, possibly negative.
        row: i64,
        /// Side length of the grid.
        size: u32,
    },
    /// A grid was requested with a non-positive side length.
    #[error("grid size must be positive, got {size}")]
    InvalidSize {
        /// Requested side length.
        size: u32,
    },
    /// A structure could not be stamped onto the grid.
    #[error("invalid footprint: {0}")]
    InvalidFootprint(#[from] FootprintError),
    /// A checked move targeted a cell that is not empty.
    #[error("destination {coord:?} holds '{tag}', not empty space")]
    DestinationBlocked {
        /// Destination of the rejected move.
        coord: CellCoord,
        /// Type tag found at the destination.
        tag: char,
    },
    /// A mover is no longer stored where it believes it stands.
    #[error("expected occupant missing at {coord:?}, found '{tag}'")]
    OccupantMissing {
        /// Position the mover recorded for itself.
        coord: CellCoord,
        /// Type tag actually stored at that position.
        tag: char,
    },
    /// Tunnelling was attempted on a cell that is not dirt.
    #[error("cell {coord:?} holds '{tag}', which cannot be tunnelled")]
    NotTunnelable {
        /// Target of the rejected tunnelling attempt.
        coord: CellCoord,
        /// Type tag found at the target.
        tag: char,
    },
}
