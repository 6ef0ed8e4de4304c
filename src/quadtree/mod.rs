//! Quadtree tile addressing and navigation
//!
//! A tile is addressed by the path of quadrant digits leading to it from
//! the root tile. Navigation computes the address of the neighbouring tile
//! in one of four cardinal directions, or of the tile one level finer or
//! coarser, purely from the address itself.
//!
//! # Example
//!
//! ```
//! use geoquadtree::{Direction, TileAddress};
//!
//! let start = TileAddress::root();
//! let finer = start.navigate(Direction::ZoomIn);
//! let right = finer.navigate(Direction::Right);
//! assert_eq!(right.to_string(), "12");
//! assert_eq!(right.navigate(Direction::Left), finer);
//! ```

mod address;
mod grid;
mod navigate;

pub use address::{MAX_DEPTH, Quadrant, TileAddress};
pub use grid::GridPosition;
pub use navigate::{Direction, navigate, navigate_str};
