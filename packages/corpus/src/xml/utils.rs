//! XML utility functions for navigating and extracting data from DOM trees.

use std::path::Path;

use roxmltree::{Document, Node, ParsingOptions};

use crate::error::{CorpusError, Result};
use crate::types::Attributes;

/// Parse XML text, accepting a doctype declaration.
///
/// LTF and LAF files always reference an external DTD, which roxmltree
/// rejects unless explicitly allowed. The DTD itself is never fetched.
///
/// # Arguments
/// * `text` - XML source
/// * `path` - File the text came from, for error reporting
pub fn parse_document<'input>(text: &'input str, path: Option<&Path>) -> Result<Document<'input>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(text, options).map_err(|source| CorpusError::XmlParse {
        path: path.map(Path::to_path_buf),
        source,
    })
}

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use lctl_corpus::xml::get_tag_name;
///
/// let xml = r#"<LCTL_TEXT><DOC id="D1"/></LCTL_TEXT>"#;
/// let doc = Document::parse(xml).unwrap();
/// let node = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(node), "DOC");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check if a node is an element with a specific tag name.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}

/// Check if a node is an element with a tag name, ignoring ASCII case.
pub fn has_tag_ignore_case(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node).eq_ignore_ascii_case(tag)
}

/// Find the first child element with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use lctl_corpus::xml::find_child;
///
/// let xml = r#"<ANNOTATION><EXTENT/></ANNOTATION>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// assert!(find_child(root, "EXTENT").is_some());
/// assert!(find_child(root, "TAG").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| has_tag(*child, tag))
}

/// Find all child elements with the given tag name.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| has_tag(*child, tag))
}

/// Find all descendant elements (excluding `node` itself) with the given tag
/// name, in document order.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use lctl_corpus::xml::find_descendants;
///
/// let xml = r#"<DOC><TEXT><SEG id="1"/><SEG id="2"/></TEXT></DOC>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let ids: Vec<_> = find_descendants(doc.root_element(), "SEG")
///     .filter_map(|seg| seg.attribute("id"))
///     .collect();
/// assert_eq!(ids, vec!["1", "2"]);
/// ```
pub fn find_descendants<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants()
        .filter(move |descendant| *descendant != node && has_tag(*descendant, tag))
}

/// Get the direct text content of a node, untrimmed.
///
/// Returns `None` when the element has no text before its first child.
pub fn get_text(node: Node<'_, '_>) -> Option<String> {
    node.text().map(String::from)
}

/// Get an attribute value from a node.
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
}

/// Get an attribute value, matching the attribute name case-insensitively.
pub fn get_attribute_ignore_case<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attributes()
        .find(|attr| attr.name().eq_ignore_ascii_case(name))
        .map(|attr| attr.value())
}

/// Get an attribute that must be present.
pub fn required_attribute<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name)
        .ok_or_else(|| CorpusError::MissingAttribute {
            attribute: name.to_string(),
            element: get_tag_name(node).to_string(),
        })
}

/// Parse an optional character offset attribute.
///
/// An absent attribute is `Ok(None)`. Offsets are unsigned: a present value
/// that is not a non-negative integer, including a negative number such as
/// `-1`, is [`CorpusError::InvalidOffset`].
pub fn parse_offset(node: Node<'_, '_>, name: &str) -> Result<Option<usize>> {
    node.attribute(name)
        .map(|value| {
            value
                .trim()
                .parse::<usize>()
                .map_err(|_| CorpusError::InvalidOffset {
                    attribute: name.to_string(),
                    element: get_tag_name(node).to_string(),
                    value: value.to_string(),
                })
        })
        .transpose()
}

/// Collect the attributes of a node, skipping the ones listed in `known`.
pub fn collect_attributes(node: Node<'_, '_>, known: &[&str]) -> Attributes {
    node.attributes()
        .filter(|attr| !known.contains(&attr.name()))
        .map(|attr| (attr.name(), attr.value()))
        .collect()
}
