//! Minimal XML element tree and indenting serializer.
//!
//! Output follows the layout LDC tooling produces: a single-quoted UTF-8
//! declaration, the doctype on its own line, one element per line with
//! two-space indentation, and text-only elements kept on a single line.

use crate::config::INDENT;

/// An element to be serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    /// Create an element without attributes, text or children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Add an attribute when a value is present.
    #[must_use]
    pub fn with_opt_attr(self, name: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.with_attr(name, value.to_string()),
            None => self,
        }
    }

    /// Add several attributes in order.
    #[must_use]
    pub fn with_attrs<'a>(mut self, attrs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        self.attributes
            .extend(attrs.into_iter().map(|(k, v)| (k.to_string(), v.to_string())));
        self
    }

    /// Set the text content.
    #[must_use]
    pub fn with_text(mut self, text: Option<impl Into<String>>) -> Self {
        self.text = text.map(Into::into);
        self
    }

    /// Append a child element.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child elements.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Serialize a full document.
///
/// # Arguments
/// * `version` - XML version for the declaration
/// * `doctype` - Doctype declaration line, if any
/// * `root` - Root element
///
/// # Examples
/// ```
/// use lctl_corpus::xml::{render_document, Element};
///
/// let root = Element::new("LCTL_TEXT").with_child(Element::new("DOC").with_attr("id", "D1"));
/// let xml = render_document("1.0", None, &root);
/// assert_eq!(
///     xml,
///     "<?xml version='1.0' encoding='UTF-8'?>\n<LCTL_TEXT>\n  <DOC id=\"D1\"/>\n</LCTL_TEXT>\n"
/// );
/// ```
pub fn render_document(version: &str, doctype: Option<&str>, root: &Element) -> String {
    let mut out = format!("<?xml version='{version}' encoding='UTF-8'?>\n");
    if let Some(doctype) = doctype {
        out.push_str(doctype);
        out.push('\n');
    }
    write_element(&mut out, root, 0);
    out
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    let indent = INDENT.repeat(depth);
    out.push_str(&indent);
    out.push('<');
    out.push_str(&element.name);
    for (name, value) in &element.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }

    match (&element.text, element.children.is_empty()) {
        (None, true) => out.push_str("/>\n"),
        (Some(text), true) => {
            out.push('>');
            out.push_str(&escape_text(text));
            out.push_str("</");
            out.push_str(&element.name);
            out.push_str(">\n");
        }
        (text, false) => {
            out.push('>');
            if let Some(text) = text {
                out.push_str(&escape_text(text));
            }
            out.push('\n');
            for child in &element.children {
                write_element(out, child, depth + 1);
            }
            out.push_str(&indent);
            out.push_str("</");
            out.push_str(&element.name);
            out.push_str(">\n");
        }
    }
}

/// Escape character data.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\r' => escaped.push_str("&#13;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape an attribute value for use inside double quotes.
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
