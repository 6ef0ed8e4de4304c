//! Tiled raster dataset descriptions

use crate::quadtree::TileAddress;
use std::path::PathBuf;

/// Extent of a dataset in its native coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum x
    pub min_x: f64,
    /// Minimum y
    pub min_y: f64,
    /// Maximum x
    pub max_x: f64,
    /// Maximum y
    pub max_y: f64,
}

impl BoundingBox {
    /// Width of the box
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the box
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Range of output resolutions a dataset should serve
///
/// Declared on the dataset reference in the service document, not in the
/// tiling-parameter document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolutionRange {
    /// Finest horizontal resolution
    pub min_res_x: f64,
    /// Finest vertical resolution
    pub min_res_y: f64,
    /// Coarsest horizontal resolution
    pub max_res_x: f64,
    /// Coarsest vertical resolution
    pub max_res_y: f64,
}

impl ResolutionRange {
    /// Whether a requested resolution falls inside the range (inclusive)
    pub fn contains(&self, res_x: f64, res_y: f64) -> bool {
        (self.min_res_x..=self.max_res_x).contains(&res_x)
            && (self.min_res_y..=self.max_res_y).contains(&res_y)
    }
}

/// One tiled raster pyramid (a "geoquadtree")
///
/// Tiling parameters come from the root element of the dataset's own
/// document; `source_path`, `web_path` and `resolution_range` come from the
/// element in the service document that referenced it.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetDescriptor {
    /// File name of each tile image inside its tile directory
    pub filename: String,
    /// Maximum tree depth, i.e. the longest legal tile address
    pub levels: u32,
    /// Horizontal resolution of the finest level
    pub res_x: f64,
    /// Vertical resolution of the finest level
    pub res_y: f64,
    /// Tile width in pixels
    pub tile_size_x: u32,
    /// Tile height in pixels
    pub tile_size_y: u32,
    /// Minimum x of the dataset extent, if declared
    pub min_x: Option<f64>,
    /// Minimum y of the dataset extent, if declared
    pub min_y: Option<f64>,
    /// Maximum x of the dataset extent, if declared
    pub max_x: Option<f64>,
    /// Maximum y of the dataset extent, if declared
    pub max_y: Option<f64>,
    /// Path the tiling-parameter document was loaded from
    pub source_path: PathBuf,
    /// Base reference for tile images, as given by the service document
    pub web_path: String,
    /// Resolutions this dataset serves, if declared
    pub resolution_range: Option<ResolutionRange>,
}

impl DatasetDescriptor {
    /// Create a descriptor with the required tiling parameters
    pub fn new(
        filename: impl Into<String>,
        levels: u32,
        (res_x, res_y): (f64, f64),
        (tile_size_x, tile_size_y): (u32, u32),
    ) -> Self {
        Self {
            filename: filename.into(),
            levels,
            res_x,
            res_y,
            tile_size_x,
            tile_size_y,
            min_x: None,
            min_y: None,
            max_x: None,
            max_y: None,
            source_path: PathBuf::new(),
            web_path: String::new(),
            resolution_range: None,
        }
    }

    /// Set the dataset extent
    pub fn with_bounding_box(mut self, bbox: BoundingBox) -> Self {
        self.min_x = Some(bbox.min_x);
        self.min_y = Some(bbox.min_y);
        self.max_x = Some(bbox.max_x);
        self.max_y = Some(bbox.max_y);
        self
    }

    /// The dataset extent, when all four bounds are declared
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        Some(BoundingBox {
            min_x: self.min_x?,
            min_y: self.min_y?,
            max_x: self.max_x?,
            max_y: self.max_y?,
        })
    }

    /// Whether an address is within this dataset's depth
    pub fn allows(&self, address: &TileAddress) -> bool {
        !address.is_empty() && address.depth() <= self.max_depth()
    }

    /// Whether the tile at `address` has finer sub-tiles in this dataset
    pub fn has_children(&self, address: &TileAddress) -> bool {
        self.max_depth() > address.depth()
    }

    fn max_depth(&self) -> usize {
        usize::try_from(self.levels).unwrap_or(usize::MAX)
    }
}
