// splitscan - separator-driven text scanning.
// Copyright (C) 2025 The splitscan contributors.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

//! Checks the tree builder against an independent XML parser.

use quick_xml::{Reader, events::Event};
use splitscan::xml::{AttributeOrder, XmlNode, XmlTreeBuilder};

const INVENTORY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- inventory export -->
<inventory region="north" version="2">
  <item id="1" name="bolt" price="0.25">
    <tag>hardware</tag>
    <tag>small</tag>
  </item>
  <item id="2" name="hex nut">
    <note lang="en">sold in packs of 10</note>
  </item>
  <item id="3"/>
</inventory>
"#;

/// An element as quick-xml reports it: name and attributes.
type Element = (String, Vec<(String, String)>);

/// Returns the elements in `xml` in document order.
fn reference_elements(xml: &str) -> Vec<Element> {
    let mut reader = Reader::from_str(xml);
    let mut elements = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(start) | Event::Empty(start) => {
                let name = String::from_utf8(start.name().as_ref().to_vec()).unwrap();
                let attributes = start
                    .attributes()
                    .map(|attribute| {
                        let attribute = attribute.unwrap();
                        (
                            String::from_utf8(attribute.key.as_ref().to_vec()).unwrap(),
                            String::from_utf8(attribute.value.to_vec()).unwrap(),
                        )
                    })
                    .collect();
                elements.push((name, attributes));
            }
            Event::Eof => break,
            _ => (),
        }
    }
    elements
}

/// Returns the elements under `root` in document order.
fn tree_elements(root: &XmlNode) -> Vec<Element> {
    fn walk(node: &XmlNode, elements: &mut Vec<Element>) {
        elements.push((node.name.clone(), node.attributes.clone()));
        for child in node {
            walk(child, elements);
        }
    }
    let mut elements = Vec::new();
    for child in root {
        walk(child, &mut elements);
    }
    elements
}

fn build(xml: &str, order: AttributeOrder) -> XmlNode {
    let mut builder = XmlTreeBuilder::new().with_order(order);
    builder.build(xml);
    builder.finish()
}

fn render(root: &XmlNode) -> String {
    root.iter().map(|element| element.to_string()).collect()
}

#[test]
fn elements_match_reference_parser() {
    let root = build(INVENTORY, AttributeOrder::Declared);
    assert_eq!(tree_elements(&root), reference_elements(INVENTORY));
}

#[test]
fn reversed_order_reverses_each_element() {
    let root = build(INVENTORY, AttributeOrder::Reversed);
    let expected = reference_elements(INVENTORY)
        .into_iter()
        .map(|(name, mut attributes)| {
            attributes.reverse();
            (name, attributes)
        })
        .collect::<Vec<_>>();
    assert_eq!(tree_elements(&root), expected);
}

#[test]
fn text_content() {
    let root = build(INVENTORY, AttributeOrder::Declared);
    let inventory = root.child("inventory").unwrap();
    let tags = inventory
        .child("item")
        .unwrap()
        .children_named("tag")
        .map(|tag| tag.value.as_str())
        .collect::<Vec<_>>();
    assert_eq!(tags, ["hardware", "small"]);

    let note = inventory.children_named("item").nth(1).unwrap().child("note").unwrap();
    assert_eq!(note.value, "sold in packs of 10");
    assert_eq!(note.attribute("lang"), Some("en"));
}

#[test]
fn rendering_is_well_formed() {
    let root = build(INVENTORY, AttributeOrder::Declared);
    let rendered = render(&root);
    assert_eq!(reference_elements(&rendered), reference_elements(INVENTORY));
}

/// Close tags always close the innermost element, so mismatched or missing
/// end tags still render as well-formed XML.
#[test]
fn malformed_input_renders_well_formed() {
    let root = build("<a><b>text</a><c>", AttributeOrder::Declared);
    let rendered = render(&root);
    assert_eq!(rendered, "<a><b>text</b><c></c></a>");
    assert_eq!(
        reference_elements(&rendered)
            .into_iter()
            .map(|(name, _)| name)
            .collect::<Vec<_>>(),
        ["a", "b", "c"]
    );
}
