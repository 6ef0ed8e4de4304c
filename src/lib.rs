//! # geoquadtree
//!
//! Configuration loading and tile navigation for quadtree-tiled raster
//! datasets.
//!
//! A tile service is described by a service document that lists layers.
//! Each layer references one or more datasets, and each dataset is a pyramid
//! of image tiles whose parameters live in a small document of its own. A
//! tile inside a pyramid is addressed by its path from the root tile, one
//! quadrant digit (1-4) per level.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Generic markup parser producing an owned, immutable element tree
//! - Service and dataset configuration loading with document-order layers
//! - Quadtree navigation: pan in four directions, zoom in and out
//! - Conversion between tile addresses and grid cells
//!
//! ## Example
//!
//! ```no_run
//! use geoquadtree::{Direction, ServiceConfig, TileAddress};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = ServiceConfig::from_file("/etc/geoquadtreeserver.xml")?;
//! let layer = service.select(None)?;
//!
//! let tile: TileAddress = "21".parse()?;
//! let above = tile.navigate(Direction::Up);
//! println!("{} above {} is {}", layer.name, tile, above);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod model;
pub mod parser;
pub mod quadtree;
pub mod writer;

pub use error::{Error, Location, Result};
pub use loader::{load_dataset, load_service, load_service_with_config};
pub use model::{
    BoundingBox, ContactInfo, DatasetDescriptor, DuplicateLayerPolicy, Element,
    LayerDescriptor, LoaderConfig, ResolutionRange, ServiceConfig, ServiceInfo, SrsRef,
};
pub use parser::parse_document;
pub use quadtree::{
    Direction, GridPosition, MAX_DEPTH, Quadrant, TileAddress, navigate, navigate_str,
};

use std::path::Path;

impl ServiceConfig {
    /// Load a service document and its datasets from disk
    ///
    /// Uses the default [`LoaderConfig`]: duplicate layer names are resolved
    /// last-write-wins and dataset paths are used as written.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use geoquadtree::ServiceConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let service = ServiceConfig::from_file("geoquadtreeserver.xml")?;
    /// for layer in &service {
    ///     println!("{}: {}", layer.name, layer.title);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        loader::load_service(path)
    }

    /// Load a service document with custom loader options
    ///
    /// # Example
    ///
    /// ```no_run
    /// use geoquadtree::{DuplicateLayerPolicy, LoaderConfig, ServiceConfig};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = LoaderConfig::new()
    ///     .with_duplicate_layers(DuplicateLayerPolicy::Reject)
    ///     .with_relative_paths_resolved(true);
    ///
    /// let service = ServiceConfig::from_file_with_config("geoquadtreeserver.xml", &config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file_with_config<P: AsRef<Path>>(path: P, config: &LoaderConfig) -> Result<Self> {
        loader::load_service_with_config(path, config)
    }
}
