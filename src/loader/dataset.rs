//! Tiling-parameter documents

use super::{numeric_attribute, optional_numeric, read_document};
use crate::error::{Error, Result};
use crate::model::{DatasetDescriptor, Element};
use crate::parser::parse_document;
use std::path::Path;
use tracing::{debug, instrument};

/// Load the tiling parameters of one dataset
///
/// Only the tiling parameters are filled in; `web_path` and
/// `resolution_range` belong to the service document and are left empty.
///
/// # Errors
///
/// - [`Error::ConfigRead`] if the file cannot be read
/// - [`Error::MalformedDocument`] or [`Error::ReservedName`] if it does not parse
/// - [`Error::InvalidConfig`] if a required attribute is missing or not numeric
#[instrument(level = "debug", fields(path = %path.as_ref().display()), skip(path))]
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<DatasetDescriptor> {
    let path = path.as_ref();
    let xml = read_document(path)?;
    parse_dataset_document(&xml, path).map_err(|e| e.in_file(&path.display().to_string()))
}

/// Parse a tiling-parameter document held in memory
///
/// `path` is recorded as the descriptor's source path.
pub fn parse_dataset_document(xml: &str, path: &Path) -> Result<DatasetDescriptor> {
    let root = parse_document(xml)?;
    dataset_from_element(&root, path)
}

/// Read tiling parameters off the root element of a dataset document
///
/// The tile file name is taken from `filename`, or from `name` when
/// `filename` is absent.
pub fn dataset_from_element(root: &Element, path: &Path) -> Result<DatasetDescriptor> {
    let filename = match root.attribute("filename") {
        Some(filename) => filename,
        None => root
            .attribute("name")
            .ok_or_else(|| Error::missing_attribute(root.name(), "filename"))?,
    };

    let mut dataset = DatasetDescriptor::new(
        filename,
        numeric_attribute(root, "levels")?,
        (
            numeric_attribute(root, "resx")?,
            numeric_attribute(root, "resy")?,
        ),
        (
            numeric_attribute(root, "tilesizex")?,
            numeric_attribute(root, "tilesizey")?,
        ),
    );
    dataset.min_x = optional_numeric(root, "minx")?;
    dataset.min_y = optional_numeric(root, "miny")?;
    dataset.max_x = optional_numeric(root, "maxx")?;
    dataset.max_y = optional_numeric(root, "maxy")?;
    dataset.source_path = path.to_path_buf();

    // An empty name would address the tile directory itself
    if dataset.filename.trim().is_empty() {
        return Err(Error::InvalidConfig(format!(
            "dataset '{}' has an empty tile file name",
            path.display()
        )));
    }

    debug!(
        levels = dataset.levels,
        tile_size_x = dataset.tile_size_x,
        tile_size_y = dataset.tile_size_y,
        "Loaded dataset"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const DATASET: &str = r#"<GeoQuadTree name="tile.jpg" levels="6" resx="0.25" resy="0.5"
        tilesizex="256" tilesizey="128" minx="10" miny="20" maxx="30" maxy="40"/>"#;

    #[test]
    fn test_parse_dataset_document() {
        let dataset = parse_dataset_document(DATASET, Path::new("/data/gqt.xml")).unwrap();
        assert_eq!(dataset.filename, "tile.jpg");
        assert_eq!(dataset.levels, 6);
        assert_eq!(dataset.res_x, 0.25);
        assert_eq!(dataset.res_y, 0.5);
        assert_eq!(dataset.tile_size_x, 256);
        assert_eq!(dataset.tile_size_y, 128);
        assert_eq!(dataset.bounding_box().unwrap().width(), 20.0);
        assert_eq!(dataset.source_path, PathBuf::from("/data/gqt.xml"));
        assert!(dataset.web_path.is_empty());
    }

    #[test]
    fn test_filename_preferred_over_name() {
        let xml = r#"<geoquadtree filename="a.png" name="b.png" levels="1" resx="1" resy="1"
            tilesizex="1" tilesizey="1"/>"#;
        let dataset = parse_dataset_document(xml, Path::new("x.xml")).unwrap();
        assert_eq!(dataset.filename, "a.png");
        assert_eq!(dataset.bounding_box(), None);
    }

    #[test]
    fn test_missing_levels() {
        let xml = r#"<geoquadtree name="t.png" resx="1" resy="1" tilesizex="1" tilesizey="1"/>"#;
        let err = parse_dataset_document(xml, Path::new("x.xml")).unwrap_err();
        assert!(err.to_string().contains("'levels'"));
    }

    #[test]
    fn test_non_numeric_resolution() {
        let xml = r#"<geoquadtree name="t.png" levels="2" resx="fine" resy="1"
            tilesizex="1" tilesizey="1"/>"#;
        let err = parse_dataset_document(xml, Path::new("x.xml")).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(ref msg) if msg.contains("'fine'")));
    }

    #[test]
    fn test_negative_levels_rejected() {
        let xml = r#"<geoquadtree name="t.png" levels="-1" resx="1" resy="1"
            tilesizex="1" tilesizey="1"/>"#;
        assert!(matches!(
            parse_dataset_document(xml, Path::new("x.xml")),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_empty_filename_rejected() {
        let xml = r#"<geoquadtree filename="" levels="2" resx="1" resy="1"
            tilesizex="1" tilesizey="1"/>"#;
        assert!(matches!(
            parse_dataset_document(xml, Path::new("x.xml")),
            Err(Error::InvalidConfig(_))
        ));
    }
}
