//! Core data types for LTF and LAF documents.
//!
//! Documents are held as a typed tree of fixed node kinds. Attributes that
//! have no dedicated field are kept in an ordered [`Attributes`] bag so that
//! nodes copied between documents keep everything they carried.

use serde::Serialize;

use crate::error::{CorpusError, Result};

/// Ordered attribute list of an XML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Create an empty attribute list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of an attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Iterate over `(name, value)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (name, value) in iter {
            attributes.set(name, value);
        }
        attributes
    }
}

/// Document-level information shared by LTF and LAF documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocHeader {
    /// XML version from the declaration, if the source had one.
    pub xml_version: Option<String>,

    /// Full doctype declaration, e.g. `<!DOCTYPE LCTL_TEXT SYSTEM "ltf.v1.5.dtd">`.
    pub doctype: Option<String>,

    /// Attributes of the root element.
    pub root_attributes: Attributes,

    /// `id` attribute of `DOC`.
    pub doc_id: String,

    /// `lang` attribute of `DOC`. Some versions of the schema omit it.
    pub lang: Option<String>,

    /// Remaining attributes of `DOC`.
    pub doc_attributes: Attributes,
}

/// A `SEG` element of an LTF document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segment {
    pub id: Option<String>,
    pub start_char: Option<usize>,
    pub end_char: Option<usize>,

    /// Content of the first `ORIGINAL_TEXT` under the segment. `Some("")`
    /// for an empty element, `None` when there is none.
    pub original_text: Option<String>,

    pub tokens: Vec<Token>,

    /// Attributes other than `id`, `start_char` and `end_char`.
    pub attributes: Attributes,
}

/// A `TOKEN` element of an LTF segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token {
    pub id: Option<String>,
    pub text: Option<String>,
    pub start_char: Option<usize>,
    pub end_char: Option<usize>,

    /// Attributes other than `id`, `start_char` and `end_char` (`pos`, `morph`, ...).
    pub attributes: Attributes,
}

/// Tokens of a document flattened into four parallel sequences.
///
/// All sequences have the same length; index `i` describes the same token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenized {
    /// Token strings. A token without text content is a single space.
    pub tokens: Vec<String>,

    pub token_ids: Vec<Option<String>>,

    /// Character onsets (0-indexed), `None` when the attribute is absent.
    pub onsets: Vec<Option<usize>>,

    /// Character offsets (0-indexed), `None` when the attribute is absent.
    pub offsets: Vec<Option<usize>>,
}

impl Tokenized {
    pub(crate) fn push(&mut self, token: &Token) {
        self.tokens
            .push(token.text.clone().unwrap_or_else(|| " ".to_string()));
        self.token_ids.push(token.id.clone());
        self.onsets.push(token.start_char);
        self.offsets.push(token.end_char);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// An `ANNOTATION` element of an LAF document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub id: Option<String>,
    pub task: Option<String>,
    pub annotation_type: Option<String>,

    /// The first `EXTENT` child, if any.
    pub extent: Option<Extent>,

    /// Attributes other than `id`, `task` and `type`.
    pub attributes: Attributes,
}

/// An `EXTENT` element: the annotated character span and its text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extent {
    pub text: Option<String>,
    pub start_char: Option<usize>,
    pub end_char: Option<usize>,

    /// Attributes other than `start_char` and `end_char`.
    pub attributes: Attributes,
}

/// A named-entity mention derived from an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mention {
    /// Entity (annotation) id.
    pub entity_id: String,

    /// Annotation type, e.g. `PER` or `GPE`.
    #[serde(rename = "type")]
    pub entity_type: String,

    /// Text of the mention in the underlying source.
    pub extent: String,

    /// Character onset (0-indexed).
    pub start_char: usize,

    /// Character offset (0-indexed).
    pub end_char: usize,
}

impl Mention {
    #[must_use]
    pub fn new(
        entity_id: impl Into<String>,
        entity_type: impl Into<String>,
        extent: impl Into<String>,
        start_char: usize,
        end_char: usize,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            entity_type: entity_type.into(),
            extent: extent.into(),
            start_char,
            end_char,
        }
    }
}

/// Reject a span whose start lies after its end.
pub(crate) fn check_span(
    element: &str,
    id: Option<&str>,
    start: Option<usize>,
    end: Option<usize>,
) -> Result<()> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(CorpusError::InvalidSpan {
            element: element.to_string(),
            id: id.map(String::from),
            start,
            end,
        }),
        _ => Ok(()),
    }
}
