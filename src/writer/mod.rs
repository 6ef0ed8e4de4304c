//! Writing markup trees and tiling-parameter documents
//!
//! [`Element::to_markup`] produces the canonical text form of a tree: one
//! element per line, indented by its depth in tabs. Parsing that text again
//! yields the same structure.
//!
//! [`write_dataset_xml`] writes the document a tile generator leaves next to
//! a tile pyramid, which [`load_dataset`](crate::loader::load_dataset) reads.

use crate::error::{Error, Result};
use crate::model::{DatasetDescriptor, Element};
use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesStart, Event};
use std::fmt::{self, Write as FmtWrite};
use std::io::Write as IoWrite;
use std::path::Path;

impl Element {
    /// Serialize the subtree in canonical form
    ///
    /// ```
    /// use geoquadtree::Element;
    ///
    /// let layer = Element::new("layer").with_attribute("name", "a&b");
    /// let root = Element::new("service").with_child(layer)?;
    /// assert_eq!(root.to_markup(), "\n<service>\n\t<layer name=\"a&amp;b\" />\n</service>");
    /// # Ok::<(), geoquadtree::Error>(())
    /// ```
    pub fn to_markup(&self) -> String {
        self.to_string()
    }
}

/// Formats as [`Element::to_markup`]
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_element(self, f)
    }
}

/// Write an element and its subtree in canonical form
///
/// Each element starts on a new line indented by one tab per level of
/// depth. An element with neither children nor text is self-closed. Text of
/// an element that has children is not written.
pub fn write_element<W: FmtWrite>(element: &Element, out: &mut W) -> fmt::Result {
    let indent = "\t".repeat(element.depth());
    write!(out, "\n{}<{}", indent, element.name())?;
    for (name, value) in element.attributes() {
        write!(out, " {}=\"{}\"", name, escape(value.as_str()))?;
    }

    if element.has_children() {
        out.write_char('>')?;
        for child in element.children() {
            write_element(child, out)?;
        }
        write!(out, "\n{}</{}>", indent, element.name())
    } else if element.text().is_empty() {
        out.write_str(" />")
    } else {
        write!(out, ">{}</{}>", escape(element.text()), element.name())
    }
}

/// Write a tiling-parameter document for a dataset
///
/// The bounding box is written only when all four bounds are set.
pub fn write_dataset_xml<W: IoWrite>(dataset: &DatasetDescriptor, writer: W) -> Result<()> {
    let mut xml_writer = Writer::new_with_indent(writer, b' ', 2);

    xml_writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| Error::DocumentWrite(format!("Failed to write XML declaration: {}", e)))?;

    let levels = dataset.levels.to_string();
    let res_x = dataset.res_x.to_string();
    let res_y = dataset.res_y.to_string();
    let tile_size_x = dataset.tile_size_x.to_string();
    let tile_size_y = dataset.tile_size_y.to_string();

    let mut root = BytesStart::new("geoquadtree");
    root.push_attribute(("filename", dataset.filename.as_str()));
    root.push_attribute(("levels", levels.as_str()));
    root.push_attribute(("resx", res_x.as_str()));
    root.push_attribute(("resy", res_y.as_str()));
    root.push_attribute(("tilesizex", tile_size_x.as_str()));
    root.push_attribute(("tilesizey", tile_size_y.as_str()));

    if let Some(bbox) = dataset.bounding_box() {
        for (name, value) in [
            ("minx", bbox.min_x),
            ("miny", bbox.min_y),
            ("maxx", bbox.max_x),
            ("maxy", bbox.max_y),
        ] {
            root.push_attribute((name, value.to_string().as_str()));
        }
    }

    xml_writer
        .write_event(Event::Empty(root))
        .map_err(|e| Error::DocumentWrite(format!("Failed to write dataset element: {}", e)))?;
    Ok(())
}

/// Write a tiling-parameter document into a string
pub fn write_dataset_document(dataset: &DatasetDescriptor) -> Result<String> {
    let mut buffer = Vec::new();
    write_dataset_xml(dataset, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| Error::DocumentWrite(e.to_string()))
}

/// Write a tiling-parameter document to a file
pub fn write_dataset_file<P: AsRef<Path>>(dataset: &DatasetDescriptor, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)
        .map_err(|e| Error::DocumentWrite(format!("{}: {}", path.display(), e)))?;
    let mut writer = std::io::BufWriter::new(file);
    write_dataset_xml(dataset, &mut writer)?;
    writer
        .flush()
        .map_err(|e| Error::DocumentWrite(format!("{}: {}", path.display(), e)))
}
