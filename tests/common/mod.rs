//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Write a file into `dir` and return its path
pub fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// A tiling-parameter document as written by the tile generator
pub fn dataset_xml(name: &str, levels: u32) -> String {
    format!(
        r#"<?xml version="1.0"?>
<GeoQuadTree name="{}" levels="{}" resx="0.5" resy="0.5"
             tilesizex="256" tilesizey="256"
             minx="-180" miny="-90" maxx="180" maxy="90"/>"#,
        name, levels
    )
}

/// A service document with one dataset per layer
///
/// Each entry is `(layer name, dataset path)`.
pub fn service_xml(layers: &[(&str, &Path)]) -> String {
    let mut xml = String::from("<GeoQuadTreeServer>\n");
    for (name, path) in layers {
        xml.push_str(&format!(
            "  <Layer Name=\"{}\" Title=\"{} layer\">\n    <GeoQuadTree Path=\"{}\" WebPath=\"/tiles/{}/\"/>\n  </Layer>\n",
            name,
            name,
            path.display(),
            name
        ));
    }
    xml.push_str("</GeoQuadTreeServer>\n");
    xml
}
