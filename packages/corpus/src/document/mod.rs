//! Document model for LTF (tokenized text) and LAF (annotation) files.
//!
//! Both formats share the same outer shape: a root element holding a single
//! `DOC` with an `id` and an optional `lang`. [`CorpusDocument`] captures
//! that shape; [`LtfDocument`] and [`LafDocument`] add the format-specific
//! content and constructors.

mod laf;
mod ltf;

use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};

use crate::error::{CorpusError, Result};
use crate::types::DocHeader;
use crate::xml::{
    collect_attributes, find_descendants, get_tag_name, read_prolog, render_document,
    required_attribute, Element,
};

pub use laf::LafDocument;
pub use ltf::LtfDocument;

/// Common behaviour of LTF and LAF documents.
pub trait CorpusDocument: Sized {
    /// Expected root element tag.
    const ROOT_TAG: &'static str;

    /// Parse a document from XML text.
    ///
    /// `path` is only used for error reporting.
    ///
    /// Parsing is strict about structure the file names and offsets depend
    /// on: `DOC` must carry an `id` ([`CorpusError::MissingAttribute`]),
    /// character offsets must be non-negative integers
    /// ([`CorpusError::InvalidOffset`]) and a span must not start after it
    /// ends ([`CorpusError::InvalidSpan`]).
    fn from_xml(xml: &str, path: Option<&Path>) -> Result<Self>;

    /// Document-level information.
    fn header(&self) -> &DocHeader;

    /// Build the element tree for serialization.
    fn to_element(&self) -> Element;

    /// Read and parse a document file.
    fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let xml = fs::read_to_string(path).map_err(|e| CorpusError::io(path, e))?;
        Self::from_xml(&xml, Some(path))
    }

    /// Parse a document from an in-memory string.
    fn parse_str(xml: &str) -> Result<Self> {
        Self::from_xml(xml, None)
    }

    /// Document id (`DOC/@id`).
    fn doc_id(&self) -> &str {
        &self.header().doc_id
    }

    /// Document language (`DOC/@lang`), empty when the attribute is absent.
    fn lang(&self) -> &str {
        self.header().lang.as_deref().unwrap_or_default()
    }

    /// XML version of the source declaration.
    fn xml_version(&self) -> Option<&str> {
        self.header().xml_version.as_deref()
    }

    /// Doctype declaration of the source.
    fn doctype(&self) -> Option<&str> {
        self.header().doctype.as_deref()
    }

    /// Serialize to UTF-8 XML with declaration, doctype and indentation.
    fn to_xml(&self) -> String {
        let header = self.header();
        render_document(
            header.xml_version.as_deref().unwrap_or(crate::config::XML_VERSION),
            header.doctype.as_deref(),
            &self.to_element(),
        )
    }

    /// Write the document to `path`, overwriting any existing file.
    fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_xml()).map_err(|e| CorpusError::io(path, e))
    }
}

/// Load a document, turning any failure into `None`.
///
/// The failure is logged at warn level. Use this where an unreadable or
/// missing file should be skipped rather than abort the run; use
/// [`CorpusDocument::from_file`] to get the error itself.
pub fn load_doc<D: CorpusDocument>(path: impl AsRef<Path>) -> Option<D> {
    let path = path.as_ref();
    match D::from_file(path) {
        Ok(doc) => Some(doc),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not load document");
            None
        }
    }
}

/// Parse the header shared by both formats and return it with the `DOC` node.
fn parse_header<'a, 'input>(
    doc: &'a Document<'input>,
    xml: &str,
    root_tag: &'static str,
) -> Result<(DocHeader, Node<'a, 'input>)> {
    let root = doc.root_element();
    let found = get_tag_name(root);
    if found != root_tag {
        return Err(CorpusError::UnexpectedRoot {
            expected: root_tag,
            found: found.to_string(),
        });
    }

    let doc_elem = find_descendants(root, "DOC")
        .next()
        .ok_or_else(|| CorpusError::MissingElement {
            element: "DOC".to_string(),
            context: root_tag.to_string(),
        })?;

    let prolog = read_prolog(xml);
    let header = DocHeader {
        xml_version: prolog.xml_version,
        doctype: prolog.doctype,
        root_attributes: collect_attributes(root, &[]),
        doc_id: required_attribute(doc_elem, "id")?.to_string(),
        lang: doc_elem.attribute("lang").map(String::from),
        doc_attributes: collect_attributes(doc_elem, &["id", "lang"]),
    };

    Ok((header, doc_elem))
}

/// Build the `DOC` element of a header around the given children.
fn doc_element(header: &DocHeader, children: impl IntoIterator<Item = Element>) -> Element {
    Element::new("DOC")
        .with_attr("id", header.doc_id.as_str())
        .with_opt_attr("lang", header.lang.as_deref())
        .with_attrs(header.doc_attributes.iter())
        .with_children(children)
}
