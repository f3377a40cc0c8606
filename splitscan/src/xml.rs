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

//! Building XML document trees.
//!
//! [XmlTreeBuilder] is a [Classifier] that assembles an [XmlNode] tree from
//! the tokens of a separator scan.  It is forgiving: there is no
//! validation that start and end tags match, so a close tag always closes the
//! innermost open element, and malformed input produces an oddly shaped tree
//! rather than an error.
//!
//! Before scanning, the input is preprocessed:
//!
//! - Processing instructions (`<?xml ...?>`), comments, and `<!DOCTYPE>`
//!   declarations are removed.
//!
//! - Each `</` is replaced by a single close-marker character, so that the
//!   scanner sees end tags as one separator.
//!
//! [XmlTreeBuilder::build] may be called more than once with successive
//! pieces of a document, as long as no piece splits a `</`, a comment, or a
//! processing instruction.  [XmlTreeBuilder::finish] then treats the end of
//! input as one more close tag, which closes the last element if the input
//! left it open.
//!
//! The builder starts with a synthetic, unnamed root node on its stack.  Top
//! level elements become the root's children.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    mem::take,
    sync::LazyLock,
};

use log::{debug, trace};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scan::{Classification, Classifier, Scanner, SeparatorSet};

/// Stands in for `</` in preprocessed input.  This is a private-use
/// character, and any occurrences of it in the input are replaced
/// by U+FFFD.
const CLOSE_MARKER: &str = "\u{e000}";

const SEPARATORS: &[&str] = &[
    " ",
    "\n",
    "\t",
    "\r",
    CLOSE_MARKER,
    "?",
    "/>",
    "<",
    ">",
    "=",
    "\"",
];

static DISCARDED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<\?.*?\?>|<!--.*?-->|<!DOCTYPE[^>]*>").unwrap()
});

/// Prepares `text` for scanning.  See the [module documentation](self).
fn preprocess(text: &str) -> String {
    let text = text.replace(CLOSE_MARKER, "\u{fffd}");
    DISCARDED.replace_all(&text, "").replace("</", CLOSE_MARKER)
}

/// An element in an XML document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct XmlNode {
    pub name: String,

    /// The element's text content, concatenated across its children.
    pub value: String,

    /// Attributes as `(key, value)` pairs, in the order chosen by
    /// [AttributeOrder].  Keys may repeat.
    pub attributes: Vec<(String, String)>,

    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the first child named `name`, if any.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Returns the children named `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Returns the value of the first attribute with key `key`, if any.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, XmlNode> {
        self.children.iter()
    }
}

impl<'a> IntoIterator for &'a XmlNode {
    type Item = &'a XmlNode;
    type IntoIter = std::slice::Iter<'a, XmlNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders the node as `<name key="value">text<child>...</child></name>`.
///
/// Attributes with an empty key are omitted.  Nothing is escaped, so this is
/// only well-formed XML if the names, values, and text are.
impl Display for XmlNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "<{}", self.name)?;
        for (key, value) in &self.attributes {
            if !key.is_empty() {
                write!(f, " {key}=\"{value}\"")?;
            }
        }
        write!(f, ">{}", self.value)?;
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.name)
    }
}

/// Order in which a start tag's attributes are stored in [XmlNode::attributes].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeOrder {
    /// Last attribute first.  Pending attributes are kept on a stack and
    /// popped onto the node, which reverses them.
    #[default]
    Reversed,

    /// In the order they appear in the start tag.
    Declared,
}

/// Client extension points for [XmlTreeBuilder].
///
/// `()` implements this trait with the defaults.
pub trait XmlHooks {
    /// Called when an element is closed, before it is attached to its parent.
    /// The hook may modify `node`.
    ///
    /// Returning false leaves the node open: it goes back on the stack, and
    /// content that follows is added to it until another close tag arrives.
    /// A hook that rejects a node must eventually accept it, e.g. by
    /// rejecting a given node at most once, or the node will swallow the rest
    /// of the document.
    fn on_node(&mut self, node: &mut XmlNode) -> bool {
        let _ = node;
        true
    }

    /// Called for every piece of text the scanner classifies, after the
    /// builder has processed it.
    fn on_token(&mut self, token: &str, is_separator: bool) {
        let _ = (token, is_separator);
    }
}

impl XmlHooks for () {}

/// What the builder is in the middle of.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    /// Text content of the node on top of the stack.
    Content,

    /// The name in a start tag, just after `<`.
    TagName,

    /// The rest of a start tag, where attributes appear.
    TagHead,

    /// Between the quotes of an attribute value.
    AttrValue,

    /// Between `</` and `>`.
    CloseTag,
}

/// Builds an [XmlNode] tree.  See the [module documentation](self).
pub struct XmlTreeBuilder<H = ()> {
    hooks: H,
    order: AttributeOrder,
    state: State,

    /// Whether the pending attribute has seen `=`, so that unquoted text goes
    /// into its value.
    after_equals: bool,

    /// Open elements, innermost last.  `nodes[0]` is the root.
    nodes: Vec<XmlNode>,

    /// Attributes of the start tag being parsed.
    attributes: Vec<(String, String)>,
}

impl XmlTreeBuilder {
    pub fn new() -> Self {
        Self::with_hooks(())
    }
}

impl Default for XmlTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> XmlTreeBuilder<H>
where
    H: XmlHooks,
{
    pub fn with_hooks(hooks: H) -> Self {
        Self {
            hooks,
            order: AttributeOrder::default(),
            state: State::Content,
            after_equals: false,
            nodes: vec![XmlNode::default()],
            attributes: Vec::new(),
        }
    }

    pub fn with_order(self, order: AttributeOrder) -> Self {
        Self { order, ..self }
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Gives access to the hooks between calls to [Self::build].
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Returns the root node as it currently stands.  Until [Self::finish],
    /// its `value` may contain stray whitespace from between top-level
    /// elements.
    pub fn root(&self) -> &XmlNode {
        &self.nodes[0]
    }

    /// Returns the number of open elements, not counting the root.
    pub fn depth(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Preprocesses and scans `text`.  The builder's state carries over
    /// between calls.
    pub fn build(&mut self, text: &str) {
        self.scan(&preprocess(text));
    }

    /// Closes any elements left open and returns the root, with its own text
    /// and attributes cleared.
    ///
    /// The innermost open element is closed as if by a close tag, so the
    /// hooks see it.  Any elements still open after that are closed without
    /// consulting the hooks.
    pub fn finish(mut self) -> XmlNode {
        self.scan(CLOSE_MARKER);
        if self.depth() > 0 {
            debug!("closing {} unterminated element(s)", self.depth());
        }
        while self.nodes.len() > 1 {
            if let Some(node) = self.nodes.pop() {
                self.top().children.push(node);
            }
        }
        let mut root = self.nodes.swap_remove(0);
        root.value.clear();
        root.attributes.clear();
        root
    }

    fn scan(&mut self, text: &str) {
        let scanner = Scanner::new(SeparatorSet::from_static(SEPARATORS), true);
        scanner.scan(text, self);
    }

    fn top(&mut self) -> &mut XmlNode {
        let index = self.nodes.len() - 1;
        &mut self.nodes[index]
    }

    fn pending(&mut self) -> &mut (String, String) {
        if self.attributes.is_empty() {
            self.attributes.push(Default::default());
        }
        let index = self.attributes.len() - 1;
        &mut self.attributes[index]
    }

    fn new_attribute(&mut self) {
        self.after_equals = false;
        if self
            .attributes
            .last()
            .is_none_or(|(key, value)| !key.is_empty() || !value.is_empty())
        {
            self.attributes.push(Default::default());
        }
    }

    /// Moves the pending attributes onto the current node.
    fn freeze_attributes(&mut self) {
        let mut attributes = take(&mut self.attributes)
            .into_iter()
            .filter(|(key, value)| !key.is_empty() || !value.is_empty())
            .collect::<Vec<_>>();
        if self.order == AttributeOrder::Reversed {
            attributes.reverse();
        }
        self.after_equals = false;
        self.top().attributes = attributes;
    }

    /// Pops the innermost element and, if the hooks accept it, attaches it to
    /// its parent.  The root is never closed.
    fn close(&mut self) {
        if self.nodes.len() == 1 {
            trace!("ignoring close tag with no open element");
            return;
        }
        let Some(mut node) = self.nodes.pop() else {
            return;
        };
        if self.hooks.on_node(&mut node) {
            self.top().children.push(node);
            self.attributes.clear();
        } else {
            trace!("hooks kept element {:?} open", node.name);
            self.nodes.push(node);
        }
    }

    fn separator(&mut self, separator: &str) {
        match (self.state, separator) {
            (State::AttrValue, "\"") => {
                self.state = State::TagHead;
                self.after_equals = false;
                self.attributes.push(Default::default());
            }
            (State::AttrValue, CLOSE_MARKER) => self.pending().1.push_str("</"),
            (State::AttrValue, _) => self.pending().1.push_str(separator),

            (_, CLOSE_MARKER) => {
                self.close();
                self.state = State::CloseTag;
            }
            (_, "<") => {
                self.attributes.clear();
                self.after_equals = false;
                self.nodes.push(XmlNode::default());
                self.state = State::TagName;
            }

            (State::TagName | State::TagHead, ">") => {
                self.freeze_attributes();
                self.state = State::Content;
            }
            (State::TagName | State::TagHead, "/>") => {
                self.freeze_attributes();
                self.close();
                self.state = State::Content;
            }
            (State::TagName | State::TagHead, "=") => {
                if self.attributes.len() > 1
                    && self
                        .attributes
                        .last()
                        .is_some_and(|(key, value)| key.is_empty() && value.is_empty())
                {
                    // `key = "value"`: the space before `=` started a new
                    // attribute that should not exist.
                    self.attributes.pop();
                }
                self.state = State::TagHead;
                self.after_equals = true;
            }
            (State::TagName | State::TagHead, "\"") => {
                self.pending();
                self.state = State::AttrValue;
            }
            (State::TagName, " " | "\n" | "\t" | "\r") => {
                self.state = State::TagHead;
                self.new_attribute();
            }
            (State::TagHead, " " | "\n" | "\t" | "\r") => {
                let waiting_for_value = self.after_equals
                    && self.attributes.last().is_some_and(|(_, value)| value.is_empty());
                if !waiting_for_value {
                    self.new_attribute();
                }
            }
            (State::TagName | State::TagHead, _) => (),

            (State::CloseTag, ">" | "/>") => self.state = State::Content,
            (State::CloseTag, _) => (),

            (State::Content, _) => self.top().value.push_str(separator),
        }
    }

    fn text(&mut self, text: &str) {
        match self.state {
            State::Content => self.top().value.push_str(text),
            State::TagName => self.top().name.push_str(text),
            State::TagHead if self.after_equals => self.pending().1.push_str(text),
            State::TagHead => self.pending().0.push_str(text),
            State::AttrValue => {
                let text = text.replace(CLOSE_MARKER, "</");
                self.pending().1.push_str(&text);
            }
            State::CloseTag => (),
        }
    }
}

impl<H> Classifier for XmlTreeBuilder<H>
where
    H: XmlHooks,
{
    type Kind = ();

    fn classify(&mut self, token: &str, is_separator: bool) -> Classification<()> {
        if is_separator {
            self.separator(token);
        } else {
            self.text(token);
        }
        Classification::discard(())
    }

    /// Inside an attribute value, only the closing quote splits, so that the
    /// value arrives as a single token.
    fn accept_separator(&mut self, _offset: usize, candidate: &str) -> bool {
        self.state != State::AttrValue || candidate == "\""
    }

    fn on_token(&mut self, token: &str, is_separator: bool, _classification: &Classification<()>) {
        self.hooks.on_token(token, is_separator);
    }
}

/// Parses `text` into a tree with the default settings.
pub fn parse(text: &str) -> XmlNode {
    let mut builder = XmlTreeBuilder::new();
    builder.build(text);
    builder.finish()
}

#[cfg(test)]
mod tests;
