//! Pan and zoom navigation between tile addresses

use super::address::{MAX_DEPTH, Quadrant, TileAddress};
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// A navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Pan to the tile above (`U`)
    Up,
    /// Pan to the tile below (`D`)
    Down,
    /// Pan to the tile on the left (`L`)
    Left,
    /// Pan to the tile on the right (`R`)
    Right,
    /// Descend one level (`I`)
    ZoomIn,
    /// Ascend one level (`O`)
    ZoomOut,
}

impl Direction {
    /// All directions
    pub const ALL: [Direction; 6] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::ZoomIn,
        Direction::ZoomOut,
    ];

    /// The four same-level directions
    pub const PANS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Single-letter request code
    pub fn code(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::ZoomIn => 'I',
            Direction::ZoomOut => 'O',
        }
    }

    /// Parse a single-letter request code (case-insensitive)
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            'I' => Some(Direction::ZoomIn),
            'O' => Some(Direction::ZoomOut),
            _ => None,
        }
    }

    /// Whether this direction keeps the zoom level
    pub fn is_pan(self) -> bool {
        self.offset().is_some()
    }

    /// The direction that undoes this one
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::ZoomIn => Direction::ZoomOut,
            Direction::ZoomOut => Direction::ZoomIn,
        }
    }

    /// Column and row step of a pan
    pub(crate) fn offset(self) -> Option<(i8, i8)> {
        match self {
            Direction::Up => Some((0, -1)),
            Direction::Down => Some((0, 1)),
            Direction::Left => Some((-1, 0)),
            Direction::Right => Some((1, 0)),
            Direction::ZoomIn | Direction::ZoomOut => None,
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Direction::from_code(code),
            _ => None,
        }
        .ok_or_else(|| Error::InvalidDirection(s.to_string()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Move one step within a parent
///
/// Returns the neighbouring quadrant and whether the step left the parent.
/// When it does, the returned quadrant is the entry point on the opposite
/// side of the neighbouring parent.
fn step(quadrant: Quadrant, dx: i8, dy: i8) -> (Quadrant, bool) {
    let (col, row) = quadrant.cell();
    let col = col as i8 + dx;
    let row = row as i8 + dy;
    let crossed = !(0..=1).contains(&col) || !(0..=1).contains(&row);
    let next = Quadrant::from_cell(col.rem_euclid(2) as u8, row.rem_euclid(2) as u8);
    (next, crossed)
}

fn pan(address: TileAddress, dx: i8, dy: i8) -> TileAddress {
    let Some((parent, last)) = address.split_last() else {
        return address;
    };
    let (next, crossed) = step(last, dx, dy);
    let parent = if crossed { pan(parent, dx, dy) } else { parent };
    parent.push(next)
}

/// Compute the address reached from `address` by one navigation step
///
/// - Pans keep the depth. The last digit moves to its neighbour; when that
///   crosses the parent's edge, the parent is panned the same way first.
///   At the outer edge of the grid the recursion reaches the empty address
///   and the pan wraps around to the opposite side.
/// - `ZoomIn` appends `1`, the top-left sub-tile. The dataset's `levels` is
///   not consulted. At [`MAX_DEPTH`] the address is returned unchanged.
/// - `ZoomOut` drops the last digit; from a depth-1 tile this yields
///   [`TileAddress::EMPTY`].
/// - Every direction maps the empty address to itself.
///
/// # Example
///
/// ```
/// use geoquadtree::{navigate, Direction, TileAddress};
///
/// let address: TileAddress = "21".parse()?;
/// assert_eq!(navigate(address, Direction::Up).to_string(), "34");
/// assert_eq!(navigate(address, Direction::ZoomIn).to_string(), "211");
/// # Ok::<(), geoquadtree::Error>(())
/// ```
pub fn navigate(address: TileAddress, direction: Direction) -> TileAddress {
    match direction {
        Direction::ZoomIn => {
            if address.is_empty() {
                return address;
            }
            match address.child(Quadrant::TopLeft) {
                Some(child) => child,
                None => {
                    warn!(
                        address = %address,
                        max_depth = MAX_DEPTH,
                        "Zoom in ignored at maximum depth"
                    );
                    address
                }
            }
        }
        Direction::ZoomOut => address.parent().unwrap_or(address),
        pan_direction => match pan_direction.offset() {
            Some((dx, dy)) => pan(address, dx, dy),
            None => address,
        },
    }
}

/// Parse an address and a request code, then navigate
///
/// This is the entry point for untrusted input such as query parameters.
///
/// # Errors
///
/// Returns [`Error::InvalidAddress`] for a malformed address and
/// [`Error::InvalidDirection`] for an unknown code.
pub fn navigate_str(address: &str, code: &str) -> Result<TileAddress> {
    let address = TileAddress::parse(address)?;
    let direction: Direction = code.parse()?;
    Ok(navigate(address, direction))
}

impl TileAddress {
    /// Navigate one step; see [`navigate`]
    pub fn navigate(self, direction: Direction) -> TileAddress {
        navigate(self, direction)
    }

    /// Addresses of the block of tiles around this one
    ///
    /// The block is `2 * radius_x + 1` tiles wide and `2 * radius_y + 1`
    /// tiles high, centred on this tile, returned row by row from the
    /// top-left. Tiles are reached by panning, so the block wraps at the
    /// edge of the grid.
    pub fn window(self, radius_x: usize, radius_y: usize) -> Vec<Vec<TileAddress>> {
        let mut row_start = self;
        for _ in 0..radius_y {
            row_start = navigate(row_start, Direction::Up);
        }
        for _ in 0..radius_x {
            row_start = navigate(row_start, Direction::Left);
        }

        let mut rows = Vec::with_capacity(2 * radius_y + 1);
        for _ in 0..=2 * radius_y {
            let mut row = Vec::with_capacity(2 * radius_x + 1);
            let mut tile = row_start;
            for _ in 0..=2 * radius_x {
                row.push(tile);
                tile = navigate(tile, Direction::Right);
            }
            rows.push(row);
            row_start = navigate(row_start, Direction::Down);
        }
        rows
    }
}
