//! Parsing and reserializing markup documents

use geoquadtree::{Element, Error, parse_document};

const SERVICE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE GeoQuadTreeServer>
<!-- served by the tile viewer -->
<GeoQuadTreeServer>
  <Service>
    <Title>City &amp; county tiles</Title>
    <Abstract><![CDATA[Orthophotos <2019>]]></Abstract>
  </Service>
  <Layer Name="roads" Title="Roads">
    <GeoQuadTree Path="/data/roads.xml" WebPath="/tiles/roads/"/>
  </Layer>
  <?render quality="high"?>
  <Layer Name="satellite" Title="Imagery">
    <Dataset Path="/data/sat-2019.xml"/>
    <GeoQuadTree Path="/data/sat-2020.xml"/>
  </Layer>
</GeoQuadTreeServer>
"#;

#[test]
fn test_service_tree_shape() {
    let root = parse_document(SERVICE).unwrap();
    assert_eq!(root.name(), "geoquadtreeserver");
    assert_eq!(root.children().len(), 3);
    assert_eq!(root.descendant_count(), 8);

    let service = root.first_child("service").unwrap();
    assert_eq!(service.child_text("title"), Some("City & county tiles"));
    assert_eq!(service.child_text("abstract"), Some("Orthophotos <2019>"));

    let layers: Vec<&Element> = root.children_named("layer").collect();
    assert_eq!(layers.len(), 2);
    assert_eq!(layers[1].attribute("Name"), Some("satellite"));

    let datasets: Vec<&str> = layers[1]
        .children()
        .iter()
        .map(|child| child.name())
        .collect();
    assert_eq!(datasets, vec!["dataset", "geoquadtree"]);
    assert_eq!(layers[1].children()[1].depth(), 2);
}

#[test]
fn test_canonical_markup_of_parsed_document() {
    let root = parse_document(r#"<Layer Name="roads"><SRS Name="EPSG:4326"/><Title>Roads</Title></Layer>"#)
        .unwrap();
    assert_eq!(
        root.to_markup(),
        "\n<layer name=\"roads\">\n\t<srs name=\"EPSG:4326\" />\n\t<title>Roads</title>\n</layer>"
    );
}

#[test]
fn test_reserialized_document_parses_to_same_tree() {
    let root = parse_document(SERVICE).unwrap();
    let again = parse_document(&root.to_markup()).unwrap();
    assert!(root.same_structure(&again));
    assert_eq!(root, again);
}

#[test]
fn test_mixed_content_keeps_children_only() {
    let root = parse_document("<note>before <b>bold</b> after</note>").unwrap();
    assert_eq!(root.text(), "beforeafter");

    let again = parse_document(&root.to_markup()).unwrap();
    assert_eq!(again.text(), "");
    assert!(root.same_structure(&again));
}

#[test]
fn test_reserved_names_rejected_for_children() {
    for name in ["name", "attributes", "text", "children", "depth"] {
        let xml = format!("<root><{}/></root>", name.to_uppercase());
        let result = parse_document(&xml);
        assert!(
            matches!(result, Err(Error::ReservedName(ref found)) if found == name),
            "<{}> should be rejected",
            name
        );
    }
}

#[test]
fn test_syntax_error_location() {
    let xml = "<server>\n  <layer name=\"roads\">\n  </server>\n";
    match parse_document(xml) {
        Err(err @ Error::MalformedDocument { .. }) => {
            let message = err.to_string();
            assert!(message.contains("[E2001]"));
            assert!(message.contains("line 3"));
        }
        other => panic!("expected MalformedDocument, got {:?}", other),
    }
}

#[test]
fn test_unquoted_attribute_rejected() {
    let result = parse_document("<layer levels=5/>");
    assert!(matches!(result, Err(Error::MalformedDocument { .. })));
}

#[test]
fn test_duplicate_attributes_after_lower_casing() {
    let root = parse_document(r#"<layer Name="first" title="t" NAME="second"/>"#).unwrap();
    assert_eq!(root.attribute("name"), Some("second"));
    assert_eq!(root.attributes()[0].0, "name");
    assert_eq!(root.attributes().len(), 2);
}
