//! Error types for the corpus tools.
//!
//! Every failure is fatal to the run that hit it: `CorpusError` carries
//! enough context (paths, element names) to be reported directly to the user.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the corpus library.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Reading or writing a file failed.
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// XML parsing failed.
    #[error("XML parsing failed for {}: {source}", .path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "<string>".to_string()))]
    XmlParse {
        path: Option<PathBuf>,
        #[source]
        source: roxmltree::Error,
    },

    /// The document root is not the element this document kind expects.
    #[error("Unexpected root element <{found}>, expected <{expected}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },

    /// Missing required XML element.
    #[error("Missing required XML element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// Missing required XML attribute.
    #[error("Missing required attribute '{attribute}' on <{element}>")]
    MissingAttribute { attribute: String, element: String },

    /// A character offset attribute is not a non-negative integer.
    #[error("Invalid character offset '{value}' for {attribute} on <{element}>")]
    InvalidOffset {
        attribute: String,
        element: String,
        value: String,
    },

    /// A span whose start lies after its end.
    #[error("Invalid span on <{element}>{}: start_char {start} > end_char {end}", .id.as_ref().map(|id| format!(" '{id}'")).unwrap_or_default())]
    InvalidSpan {
        element: String,
        id: Option<String>,
        start: usize,
        end: usize,
    },

    /// An id that cannot be used to build a file name.
    #[error("Invalid id '{0}': ids must be non-empty and must not contain path separators or '..'")]
    InvalidId(String),

    /// Copying a split file into a match directory failed.
    #[error("Failed to copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),
}

impl CorpusError {
    /// Wrap an IO error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for corpus operations.
pub type Result<T> = std::result::Result<T, CorpusError>;
