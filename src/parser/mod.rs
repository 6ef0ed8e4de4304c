//! Markup parsing into an [`Element`] tree
//!
//! The document is tokenized by quick-xml and folded into a tree by a
//! [`TreeBuilder`] that reacts to three kinds of event: an element opens, an
//! element closes, or character data appears. The builder keeps the
//! currently open elements on a stack; an element is attached to its parent
//! when it closes and is never touched again.

use crate::error::{Error, Result};
use crate::model::{Element, is_reserved_name};
use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesRef, BytesStart, Event};
use tracing::{debug, instrument};

/// Builds a tree from start, end and character-data events
///
/// The first element opened becomes the root. Names are lower-cased.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    stack: Vec<Element>,
    root: Option<Element>,
    pending: String,
}

impl TreeBuilder {
    /// Create a builder with no open elements
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently open elements
    pub fn open_depth(&self) -> usize {
        self.stack.len()
    }

    /// Handle an element start
    ///
    /// Attribute names are lower-cased; a later attribute whose lower-cased
    /// name repeats an earlier one overwrites its value.
    ///
    /// # Errors
    ///
    /// - [`Error::ReservedName`] if a child element uses a reserved name
    /// - [`Error::MalformedDocument`] if the root element is already closed
    pub fn start<'a, I>(&mut self, name: &str, attributes: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, String)>,
    {
        if self.stack.is_empty() && self.root.is_some() {
            return Err(structure_error("document has more than one root element"));
        }
        self.flush_text();
        let mut element = Element::with_depth(name, self.stack.len());
        if !self.stack.is_empty() && is_reserved_name(element.name()) {
            return Err(Error::ReservedName(element.name().to_string()));
        }
        for (key, value) in attributes {
            element.set_attribute(key, value);
        }
        self.stack.push(element);
        Ok(())
    }

    /// Handle an element end
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDocument`] if no element is open.
    pub fn end(&mut self) -> Result<()> {
        self.flush_text();
        let element = self
            .stack
            .pop()
            .ok_or_else(|| structure_error("end tag without an open element"))?;
        match self.stack.last_mut() {
            Some(parent) => parent.push_child(element),
            None => {
                self.root = Some(element);
                Ok(())
            }
        }
    }

    /// Handle character data
    ///
    /// Data is collected until the next start or end tag. The collected run
    /// is then trimmed and appended to the innermost open element, so text
    /// split by entity references or comments keeps its inner spacing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDocument`] for non-whitespace data outside
    /// the root element.
    pub fn text(&mut self, data: &str) -> Result<()> {
        if !self.stack.is_empty() {
            self.pending.push_str(data);
            Ok(())
        } else if data.trim().is_empty() {
            Ok(())
        } else {
            Err(structure_error("character data outside the root element"))
        }
    }

    fn flush_text(&mut self) {
        if let Some(element) = self.stack.last_mut() {
            element.append_text(&self.pending);
        }
        self.pending.clear();
    }

    /// Finish building and return the root
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDocument`] if an element is still open or
    /// no element was seen.
    pub fn finish(self) -> Result<Element> {
        if let Some(open) = self.stack.last() {
            return Err(structure_error(&format!(
                "element '<{}>' is not closed",
                open.name()
            )));
        }
        self.root
            .ok_or_else(|| structure_error("document has no root element"))
    }
}

/// A MalformedDocument error whose position is filled in by the caller
fn structure_error(message: &str) -> Error {
    Error::MalformedDocument {
        message: message.to_string(),
        location: Default::default(),
    }
}

/// Give a position to a builder error that does not have one yet
fn locate(err: Error, xml: &str, offset: usize) -> Error {
    match err {
        Error::MalformedDocument { message, location } if location.line == 0 => {
            Error::malformed_at(xml, offset, message)
        }
        other => other,
    }
}

fn to_offset<T: TryInto<usize>>(position: T) -> usize {
    position.try_into().unwrap_or(usize::MAX)
}

/// Parse a markup document into a tree
///
/// # Errors
///
/// - [`Error::MalformedDocument`] with line and column for syntax errors,
///   character data outside the root, several roots or unclosed elements
/// - [`Error::ReservedName`] if a child element uses a reserved name
///
/// # Example
///
/// ```
/// use geoquadtree::parser::parse_document;
///
/// let root = parse_document(r#"<Service><Layer Name="roads"/></Service>"#)?;
/// assert_eq!(root.name(), "service");
/// assert_eq!(root.first_child("layer").and_then(|l| l.attribute("name")), Some("roads"));
/// # Ok::<(), geoquadtree::Error>(())
/// ```
#[instrument(level = "debug", skip_all, fields(bytes = xml.len()))]
pub fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);

    let mut builder = TreeBuilder::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::malformed_at(xml, to_offset(reader.error_position()), e.to_string())
        })?;
        let offset = to_offset(reader.buffer_position());

        let handled = match event {
            Event::Start(ref start) => open_element(&mut builder, start, xml, offset),
            Event::Empty(ref start) => {
                open_element(&mut builder, start, xml, offset).and_then(|_| builder.end())
            }
            Event::End(_) => builder.end(),
            Event::Text(ref text) => {
                // Entity references arrive as separate GeneralRef events
                let data = text
                    .xml_content()
                    .map_err(|e| Error::malformed_at(xml, offset, e.to_string()))?;
                builder.text(&data)
            }
            Event::CData(ref data) => {
                let data = std::str::from_utf8(data.as_ref())
                    .map_err(|e| Error::malformed_at(xml, offset, e.to_string()))?;
                builder.text(data)
            }
            Event::GeneralRef(ref reference) => {
                let resolved = resolve_reference(reference)
                    .map_err(|message| Error::malformed_at(xml, offset, message))?;
                builder.text(&resolved)
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and DOCTYPE
            // carry nothing for the tree
            _ => Ok(()),
        };
        handled.map_err(|e| locate(e, xml, offset))?;
    }

    let root = builder.finish().map_err(|e| locate(e, xml, xml.len()))?;
    debug!(
        root = root.name(),
        elements = root.descendant_count() + 1,
        "Parsed markup document"
    );
    Ok(root)
}

fn open_element(
    builder: &mut TreeBuilder,
    start: &BytesStart<'_>,
    xml: &str,
    offset: usize,
) -> Result<()> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| Error::malformed_at(xml, offset, e.to_string()))?
        .to_string();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::malformed_at(xml, offset, e.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| Error::malformed_at(xml, offset, e.to_string()))?
            .to_string();
        let raw = std::str::from_utf8(&attr.value)
            .map_err(|e| Error::malformed_at(xml, offset, e.to_string()))?;
        let value = unescape(raw)
            .map_err(|e| Error::malformed_at(xml, offset, e.to_string()))?
            .into_owned();
        attributes.push((key, value));
    }

    builder.start(
        &name,
        attributes.iter().map(|(key, value)| (key.as_str(), value.clone())),
    )
}

fn resolve_reference(reference: &BytesRef<'_>) -> std::result::Result<String, String> {
    if let Some(ch) = reference.resolve_char_ref().map_err(|e| e.to_string())? {
        return Ok(ch.to_string());
    }
    let name = reference.decode().map_err(|e| e.to_string())?;
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| format!("unknown entity '&{};'", name))
}
