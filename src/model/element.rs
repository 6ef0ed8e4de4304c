//! In-memory markup tree

use crate::error::{Error, Result};
use std::collections::HashMap;

/// Names that cannot be used for child elements
///
/// Each of these is a structural accessor of [`Element`]; a child element
/// sharing one of these names would be ambiguous with the structure itself.
pub const RESERVED_NAMES: [&str; 5] = ["name", "attributes", "text", "children", "depth"];

/// Check whether an element name is reserved
pub fn is_reserved_name(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

/// One parsed markup element
///
/// Element and attribute names are stored lower-cased. Children are kept in
/// document order, together with an index from tag name to child positions
/// so that all children sharing a tag name can be walked without a scan.
///
/// An element owns its whole subtree. Trees returned by the parser are never
/// mutated afterwards; all accessors borrow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
    by_name: HashMap<String, Vec<usize>>,
    depth: usize,
}

impl Element {
    /// Create an empty element at depth 0
    ///
    /// The name is lower-cased.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_lowercase(),
            ..Self::default()
        }
    }

    pub(crate) fn with_depth(name: impl Into<String>, depth: usize) -> Self {
        let mut element = Self::new(name);
        element.depth = depth;
        element
    }

    /// Add an attribute, builder style
    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Append text content, builder style
    pub fn with_text(mut self, text: &str) -> Self {
        self.append_text(text);
        self
    }

    /// Append a child element, builder style
    ///
    /// The child's subtree depths are renumbered below this element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservedName`] if the child's name is reserved.
    pub fn with_child(mut self, child: Element) -> Result<Self> {
        self.push_child(child)?;
        Ok(self)
    }

    /// Element name (lower-cased)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nesting level from the document root (root is 0)
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Accumulated, trimmed character data
    pub fn text(&self) -> &str {
        &self.text
    }

    /// All attributes in document order
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Look up an attribute value; the name is matched case-insensitively
    pub fn attribute(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All direct children in document order
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Direct children with the given tag name, in document order
    pub fn children_named<'a>(
        &'a self,
        name: &str,
    ) -> impl Iterator<Item = &'a Element> + use<'a> {
        let positions = self
            .by_name
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default();
        positions.iter().filter_map(|&i| self.children.get(i))
    }

    /// First direct child with the given tag name
    pub fn first_child(&self, name: &str) -> Option<&Element> {
        self.children_named(name).next()
    }

    /// Text of the first direct child with the given tag name
    ///
    /// Returns `None` when there is no such child or its text is empty.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.first_child(name)
            .map(Element::text)
            .filter(|text| !text.is_empty())
    }

    /// Whether this element has any child elements
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of elements below this one
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// Compare name, attributes and child structure
    ///
    /// Text is only compared on elements without children, since text of an
    /// element with children does not survive reserialization. Depth is not
    /// compared.
    pub fn same_structure(&self, other: &Element) -> bool {
        if self.name != other.name
            || self.attributes != other.attributes
            || self.children.len() != other.children.len()
        {
            return false;
        }
        if self.children.is_empty() {
            return self.text == other.text;
        }
        self.children
            .iter()
            .zip(&other.children)
            .all(|(a, b)| a.same_structure(b))
    }

    /// Set an attribute; the name is lower-cased
    ///
    /// When two attributes collapse to the same lower-cased name the later
    /// value wins and the position of the first is kept.
    pub(crate) fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let name = name.to_lowercase();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Append trimmed character data
    pub(crate) fn append_text(&mut self, data: &str) {
        self.text.push_str(data.trim());
    }

    /// Attach a finished child element
    pub(crate) fn push_child(&mut self, mut child: Element) -> Result<()> {
        if is_reserved_name(&child.name) {
            return Err(Error::ReservedName(child.name));
        }
        child.renumber(self.depth + 1);
        self.by_name
            .entry(child.name.clone())
            .or_default()
            .push(self.children.len());
        self.children.push(child);
        Ok(())
    }

    fn renumber(&mut self, depth: usize) {
        if self.depth == depth {
            return;
        }
        self.depth = depth;
        for child in &mut self.children {
            child.renumber(depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("Service")
            .with_child(Element::new("layer").with_attribute("Name", "roads"))
            .unwrap()
            .with_child(Element::new("title").with_text("  Demo  "))
            .unwrap()
            .with_child(Element::new("LAYER").with_attribute("name", "satellite"))
            .unwrap()
    }

    #[test]
    fn test_names_are_lower_cased() {
        let root = sample();
        assert_eq!(root.name(), "service");
        assert_eq!(root.children()[2].name(), "layer");
        assert_eq!(root.children()[0].attributes()[0].0, "name");
    }

    #[test]
    fn test_children_named_keeps_document_order() {
        let root = sample();
        let names: Vec<_> = root
            .children_named("layer")
            .filter_map(|l| l.attribute("name"))
            .collect();
        assert_eq!(names, vec!["roads", "satellite"]);
        assert_eq!(root.children_named("Layer").count(), 2);
        assert_eq!(root.children_named("missing").count(), 0);
    }

    #[test]
    fn test_attribute_lookup_is_case_insensitive() {
        let root = sample();
        let layer = root.first_child("layer").unwrap();
        assert_eq!(layer.attribute("NAME"), Some("roads"));
        assert_eq!(layer.attribute("title"), None);
    }

    #[test]
    fn test_duplicate_attribute_last_value_wins() {
        let mut element = Element::new("layer");
        element.set_attribute("Name", "a");
        element.set_attribute("title", "t");
        element.set_attribute("NAME", "b");
        assert_eq!(
            element.attributes(),
            &[
                ("name".to_string(), "b".to_string()),
                ("title".to_string(), "t".to_string())
            ]
        );
    }

    #[test]
    fn test_text_is_trimmed_and_appended() {
        let mut element = Element::new("abstract");
        element.append_text("  first ");
        element.append_text("\n second\t");
        assert_eq!(element.text(), "firstsecond");
    }

    #[test]
    fn test_child_text() {
        let root = sample();
        assert_eq!(root.child_text("title"), Some("Demo"));
        assert_eq!(root.child_text("layer"), None);
        assert_eq!(root.child_text("logo"), None);
    }

    #[test]
    fn test_reserved_child_name_rejected() {
        let result = Element::new("root").with_child(Element::new("Children"));
        assert!(matches!(result, Err(Error::ReservedName(name)) if name == "children"));
    }

    #[test]
    fn test_depth_renumbered_on_attach() {
        let leaf = Element::new("c");
        let middle = Element::new("b").with_child(leaf).unwrap();
        let root = Element::new("a").with_child(middle).unwrap();
        assert_eq!(root.depth(), 0);
        assert_eq!(root.children()[0].depth(), 1);
        assert_eq!(root.children()[0].children()[0].depth(), 2);
        assert_eq!(root.descendant_count(), 2);
    }

    #[test]
    fn test_same_structure_ignores_text_of_parents() {
        let a = Element::new("a")
            .with_text("ignored")
            .with_child(Element::new("b").with_text("kept"))
            .unwrap();
        let b = Element::new("a")
            .with_child(Element::new("b").with_text("kept"))
            .unwrap();
        let c = Element::new("a")
            .with_child(Element::new("b").with_text("other"))
            .unwrap();
        assert!(a.same_structure(&b));
        assert!(!a.same_structure(&c));
    }
}
