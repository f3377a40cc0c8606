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

use std::collections::HashSet;

use super::{AttributeOrder, XmlHooks, XmlNode, XmlTreeBuilder, parse, preprocess};

fn node(name: &str, attributes: &[(&str, &str)], value: &str, children: Vec<XmlNode>) -> XmlNode {
    XmlNode {
        name: String::from(name),
        value: String::from(value),
        attributes: attributes
            .iter()
            .map(|(key, value)| (String::from(*key), String::from(*value)))
            .collect(),
        children,
    }
}

fn root(children: Vec<XmlNode>) -> XmlNode {
    node("", &[], "", children)
}

#[track_caller]
fn check_tree_with(builder: XmlTreeBuilder, input: &str, expected: XmlNode) {
    let mut builder = builder;
    builder.build(input);
    let actual = builder.finish();
    if actual != expected {
        eprintln!("tree differs from expected:");
        let expected = format!("{expected:#?}");
        let actual = format!("{actual:#?}");
        for result in diff::lines(&expected, &actual) {
            match result {
                diff::Result::Left(left) => eprintln!("-{left}"),
                diff::Result::Both(left, _right) => eprintln!(" {left}"),
                diff::Result::Right(right) => eprintln!("+{right}"),
            }
        }
        panic!();
    }
}

#[track_caller]
fn check_tree(input: &str, expected: XmlNode) {
    check_tree_with(XmlTreeBuilder::new(), input, expected);
}

#[test]
fn test_preprocess() {
    assert_eq!(
        preprocess("<?xml version=\"1.0\"?><a></a>"),
        "<a>\u{e000}a>"
    );
    assert_eq!(preprocess("<!-- </b> --><a/>"), "<a/>");
    assert_eq!(
        preprocess("<!DOCTYPE html><p>\u{e000}</p>"),
        "<p>\u{fffd}\u{e000}p>"
    );
}

#[test]
fn test_nested() {
    check_tree(
        r#"<a x="1"><b>hi</b></a>"#,
        root(vec![node(
            "a",
            &[("x", "1")],
            "",
            vec![node("b", &[], "hi", vec![])],
        )]),
    );
}

#[test]
fn test_siblings() {
    check_tree(
        "<list><item>1</item><item>2</item></list>",
        root(vec![node(
            "list",
            &[],
            "",
            vec![
                node("item", &[], "1", vec![]),
                node("item", &[], "2", vec![]),
            ],
        )]),
    );
}

#[test]
fn test_attribute_order_reversed() {
    check_tree(
        r#"<a x="1" y="2"></a>"#,
        root(vec![node("a", &[("y", "2"), ("x", "1")], "", vec![])]),
    );
}

#[test]
fn test_attribute_order_declared() {
    check_tree_with(
        XmlTreeBuilder::new().with_order(AttributeOrder::Declared),
        r#"<a x="1" y="2"></a>"#,
        root(vec![node("a", &[("x", "1"), ("y", "2")], "", vec![])]),
    );
}

#[test]
fn test_attribute_syntax() {
    let declared = || XmlTreeBuilder::new().with_order(AttributeOrder::Declared);
    check_tree_with(
        declared(),
        r#"<a  x = "1"   y="2" >"#,
        root(vec![node("a", &[("x", "1"), ("y", "2")], "", vec![])]),
    );
    check_tree_with(
        declared(),
        "<a x=1 y=two>",
        root(vec![node("a", &[("x", "1"), ("y", "two")], "", vec![])]),
    );
    check_tree_with(
        declared(),
        r#"<a k="1" k="2" flag>"#,
        root(vec![node(
            "a",
            &[("k", "1"), ("k", "2"), ("flag", "")],
            "",
            vec![],
        )]),
    );
}

/// Attribute values are scanned as a single piece, so separators inside them
/// are kept literally.
#[test]
fn test_attribute_value_contents() {
    check_tree(
        r#"<a title="x > y / z" path="a</b" q="why? a=b"/>"#,
        root(vec![node(
            "a",
            &[("q", "why? a=b"), ("path", "a</b"), ("title", "x > y / z")],
            "",
            vec![],
        )]),
    );
}

#[test]
fn test_text_content() {
    check_tree(
        "<p>a = b?\n\t\"c\" > d</p>",
        root(vec![node("p", &[], "a = b?\n\t\"c\" > d", vec![])]),
    );
}

#[test]
fn test_text_after_child() {
    check_tree(
        "<a>head<b>hi</b> tail</a>",
        root(vec![node(
            "a",
            &[],
            "head tail",
            vec![node("b", &[], "hi", vec![])],
        )]),
    );
}

#[test]
fn test_self_closing() {
    check_tree(
        r#"<a><br/><img src="x.png" /></a>"#,
        root(vec![node(
            "a",
            &[],
            "",
            vec![
                node("br", &[], "", vec![]),
                node("img", &[("src", "x.png")], "", vec![]),
            ],
        )]),
    );
}

#[test]
fn test_prolog_and_comments() {
    check_tree(
        "<?xml version=\"1.0\"?>\n<!DOCTYPE note>\n<!-- <ignored/> -->\n<note>hi</note>\n",
        root(vec![node("note", &[], "hi", vec![])]),
    );
}

#[test]
fn test_unclosed_elements() {
    check_tree(
        "<a><b>text",
        root(vec![node(
            "a",
            &[],
            "",
            vec![node("b", &[], "text", vec![])],
        )]),
    );
}

#[test]
fn test_stray_close_tag() {
    check_tree("</x><a/>", root(vec![node("a", &[], "", vec![])]));
}

/// Close tags are not matched against start tags by name.
#[test]
fn test_mismatched_close_tag() {
    check_tree(
        "<a><b></a></b>",
        root(vec![node("a", &[], "", vec![node("b", &[], "", vec![])])]),
    );
}

#[test]
fn test_empty_input() {
    check_tree("", root(vec![]));
    check_tree("  \n", root(vec![]));
}

#[test]
fn test_root_before_finish() {
    let mut builder = XmlTreeBuilder::new();
    builder.build(" <a>");
    assert_eq!(builder.depth(), 1);
    assert_eq!(builder.root().value, " ");
    assert!(builder.root().is_empty());
    assert_eq!(
        builder.finish(),
        root(vec![node("a", &[], "", vec![])])
    );
}

/// A document may arrive in pieces.
#[test]
fn test_build_in_pieces() {
    let mut builder = XmlTreeBuilder::new();
    builder.build("<a>");
    assert_eq!(builder.depth(), 1);
    builder.build("hello<b/></a>");
    assert_eq!(builder.depth(), 0);
    builder.build(r#"<c x="1">"#);
    builder.build("tail");
    assert_eq!(
        builder.finish(),
        root(vec![
            node("a", &[], "hello", vec![node("b", &[], "", vec![])]),
            node("c", &[("x", "1")], "tail", vec![]),
        ])
    );
}

#[derive(Default)]
struct RejectOnce {
    rejected: HashSet<String>,
    tokens: usize,
}

impl XmlHooks for RejectOnce {
    fn on_node(&mut self, node: &mut XmlNode) -> bool {
        if node.name == "old" {
            node.name = String::from("new");
        }
        node.name != "wrap" || !self.rejected.insert(node.name.clone())
    }

    fn on_token(&mut self, _token: &str, _is_separator: bool) {
        self.tokens += 1;
    }
}

/// A rejected element stays open, so later siblings become its children.
#[test]
fn test_hooks() {
    let mut builder = XmlTreeBuilder::with_hooks(RejectOnce::default());
    builder.build("<wrap></wrap>");
    assert_eq!(builder.hooks().rejected.len(), 1);
    assert!(builder.hooks().tokens > 0);
    builder.hooks_mut().tokens = 0;
    builder.build("<next/><old/>");
    assert_eq!(builder.hooks().tokens, 7);
    assert_eq!(
        builder.finish(),
        root(vec![node(
            "wrap",
            &[],
            "",
            vec![node("next", &[], "", vec![]), node("new", &[], "", vec![])],
        )])
    );
}

#[test]
fn test_lookup() {
    let tree = parse(r#"<a x="1"><b>one</b><c/><b>two</b></a>"#);
    let a = tree.child("a").unwrap();
    assert_eq!(a.attribute("x"), Some("1"));
    assert_eq!(a.attribute("y"), None);
    assert_eq!(a.child("b").map(|b| b.value.as_str()), Some("one"));
    assert_eq!(
        a.children_named("b")
            .map(|b| b.value.as_str())
            .collect::<Vec<_>>(),
        ["one", "two"]
    );
    assert_eq!(a.len(), 3);
    assert!(tree.child("missing").is_none());
    assert_eq!(
        a.iter().map(|child| child.name.as_str()).collect::<Vec<_>>(),
        ["b", "c", "b"]
    );
}

#[test]
fn test_render() {
    let tree = parse(r#"<a x="1"><b>hi</b></a>"#);
    assert_eq!(tree.children[0].to_string(), r#"<a x="1"><b>hi</b></a>"#);

    let mut node = XmlNode::new("n");
    node.attributes.push((String::new(), String::from("dropped")));
    node.attributes.push((String::from("k"), String::new()));
    node.value.push_str("text");
    assert_eq!(node.to_string(), r#"<n k="">text</n>"#);
}
