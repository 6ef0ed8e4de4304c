//! Tile addresses as packed quadrant digit sequences

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Maximum number of digits a [`TileAddress`] can hold
///
/// Each digit takes two bits of a `u128`. Real datasets stay far below this;
/// depth 20 is already about a trillion tiles.
pub const MAX_DEPTH: usize = 64;

/// Position of a tile inside its parent
///
/// The layout is fixed with the origin at the top-left, x growing right and
/// y growing down:
///
/// ```text
/// +---+---+
/// | 1 | 2 |
/// +---+---+
/// | 4 | 3 |
/// +---+---+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Digit `1`
    TopLeft,
    /// Digit `2`
    TopRight,
    /// Digit `3`
    BottomRight,
    /// Digit `4`
    BottomLeft,
}

impl Quadrant {
    /// All quadrants in digit order
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomRight,
        Quadrant::BottomLeft,
    ];

    /// The address digit for this quadrant
    pub fn digit(self) -> char {
        match self {
            Quadrant::TopLeft => '1',
            Quadrant::TopRight => '2',
            Quadrant::BottomRight => '3',
            Quadrant::BottomLeft => '4',
        }
    }

    /// Parse an address digit
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Quadrant::TopLeft),
            '2' => Some(Quadrant::TopRight),
            '3' => Some(Quadrant::BottomRight),
            '4' => Some(Quadrant::BottomLeft),
            _ => None,
        }
    }

    /// Column and row of this quadrant within its parent (each 0 or 1)
    pub fn cell(self) -> (u8, u8) {
        match self {
            Quadrant::TopLeft => (0, 0),
            Quadrant::TopRight => (1, 0),
            Quadrant::BottomRight => (1, 1),
            Quadrant::BottomLeft => (0, 1),
        }
    }

    /// Quadrant at a column and row within its parent
    ///
    /// Only the lowest bit of each coordinate is used.
    pub fn from_cell(col: u8, row: u8) -> Self {
        match (col & 1, row & 1) {
            (0, 0) => Quadrant::TopLeft,
            (1, 0) => Quadrant::TopRight,
            (1, _) => Quadrant::BottomRight,
            _ => Quadrant::BottomLeft,
        }
    }

    fn bits(self) -> u128 {
        match self {
            Quadrant::TopLeft => 0,
            Quadrant::TopRight => 1,
            Quadrant::BottomRight => 2,
            Quadrant::BottomLeft => 3,
        }
    }

    fn from_bits(bits: u128) -> Self {
        match bits & 0b11 {
            0 => Quadrant::TopLeft,
            1 => Quadrant::TopRight,
            2 => Quadrant::BottomRight,
            _ => Quadrant::BottomLeft,
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digit())
    }
}

/// Address of a tile in a quadtree
///
/// A sequence of quadrant digits read from the coarsest tile to the finest;
/// the number of digits is the tile's depth. By convention a dataset's root
/// tile is `"1"`.
///
/// Addresses are small `Copy` values: the digits are packed two bits each
/// into a fixed buffer, so navigation never allocates.
///
/// The empty address is the parent of every depth-1 tile. It never comes
/// out of [`TileAddress::parse`], but zooming out of a depth-1 tile yields
/// it, and every navigation from it returns it unchanged.
///
/// # Example
///
/// ```
/// use geoquadtree::{Quadrant, TileAddress};
///
/// let address: TileAddress = "2134".parse()?;
/// assert_eq!(address.depth(), 4);
/// assert_eq!(address.last(), Some(Quadrant::BottomLeft));
/// assert_eq!(address.parent().map(|p| p.to_string()), Some("213".to_string()));
/// # Ok::<(), geoquadtree::Error>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileAddress {
    digits: u128,
    len: u8,
}

impl TileAddress {
    /// The empty address (above the depth-1 tiles)
    pub const EMPTY: TileAddress = TileAddress { digits: 0, len: 0 };

    /// The dataset root tile, `"1"`
    pub fn root() -> Self {
        Self::EMPTY.push(Quadrant::TopLeft)
    }

    /// Parse an address from its digit string
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] if the string is empty, longer than
    /// [`MAX_DEPTH`], or contains anything other than the digits `1`-`4`.
    pub fn parse(digits: &str) -> Result<Self> {
        if digits.is_empty() {
            return Err(Error::InvalidAddress(
                "address must contain at least one digit".to_string(),
            ));
        }
        let mut address = Self::EMPTY;
        for (position, digit) in digits.chars().enumerate() {
            let quadrant = Quadrant::from_digit(digit).ok_or_else(|| {
                Error::InvalidAddress(format!(
                    "'{}' has '{}' at position {}; digits must be 1-4",
                    digits, digit, position
                ))
            })?;
            address = address.child(quadrant).ok_or_else(|| {
                Error::InvalidAddress(format!(
                    "'{}' is deeper than the maximum of {} levels",
                    digits, MAX_DEPTH
                ))
            })?;
        }
        Ok(address)
    }

    /// Build an address from quadrants, coarsest first
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] if more than [`MAX_DEPTH`]
    /// quadrants are given. An empty sequence yields [`TileAddress::EMPTY`].
    pub fn from_quadrants<I>(quadrants: I) -> Result<Self>
    where
        I: IntoIterator<Item = Quadrant>,
    {
        quadrants
            .into_iter()
            .try_fold(Self::EMPTY, |address, quadrant| address.child(quadrant))
            .ok_or_else(|| {
                Error::InvalidAddress(format!("more than {} quadrants", MAX_DEPTH))
            })
    }

    /// Number of digits
    pub fn depth(&self) -> usize {
        usize::from(self.len)
    }

    /// Number of digits (same as [`depth`](Self::depth))
    pub fn len(&self) -> usize {
        self.depth()
    }

    /// Whether this is the empty address
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Quadrant at a digit position (0 is the coarsest)
    pub fn get(&self, position: usize) -> Option<Quadrant> {
        (position < self.depth()).then(|| Quadrant::from_bits(self.digits >> (2 * position)))
    }

    /// The finest quadrant
    pub fn last(&self) -> Option<Quadrant> {
        self.depth().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Quadrants from coarsest to finest
    pub fn quadrants(&self) -> impl Iterator<Item = Quadrant> + use<> {
        let address = *self;
        (0..address.depth()).filter_map(move |i| address.get(i))
    }

    /// Split off the finest quadrant
    pub fn split_last(&self) -> Option<(TileAddress, Quadrant)> {
        let last = self.last()?;
        let len = self.len - 1;
        let mask = (1u128 << (2 * u32::from(len))) - 1;
        Some((
            TileAddress {
                digits: self.digits & mask,
                len,
            },
            last,
        ))
    }

    /// The enclosing tile one level up
    pub fn parent(&self) -> Option<TileAddress> {
        self.split_last().map(|(parent, _)| parent)
    }

    /// The sub-tile in `quadrant`, or `None` at [`MAX_DEPTH`]
    pub fn child(&self, quadrant: Quadrant) -> Option<TileAddress> {
        (self.depth() < MAX_DEPTH).then(|| self.push(quadrant))
    }

    /// The four sub-tiles in digit order
    ///
    /// Empty at [`MAX_DEPTH`].
    pub fn children(&self) -> impl Iterator<Item = TileAddress> + use<> {
        let address = *self;
        Quadrant::ALL
            .into_iter()
            .filter_map(move |quadrant| address.child(quadrant))
    }

    /// Whether `self` is `other` or one of its ancestors
    pub fn contains(&self, other: &TileAddress) -> bool {
        if self.len > other.len {
            return false;
        }
        let mask = if self.len == 0 {
            0
        } else {
            u128::MAX >> (128 - 2 * u32::from(self.len))
        };
        other.digits & mask == self.digits
    }

    /// Append a quadrant; the caller guarantees there is room
    pub(crate) fn push(self, quadrant: Quadrant) -> TileAddress {
        debug_assert!(self.depth() < MAX_DEPTH);
        TileAddress {
            digits: self.digits | (quadrant.bits() << (2 * u32::from(self.len))),
            len: self.len + 1,
        }
    }
}

impl FromStr for TileAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TileAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for quadrant in self.quadrants() {
            write!(f, "{}", quadrant.digit())?;
        }
        Ok(())
    }
}

impl fmt::Debug for TileAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileAddress(\"{}\")", self)
    }
}
