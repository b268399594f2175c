//! LCTL corpus tools - read, write, split and match LDC LTF/LAF documents.
//!
//! LTF (LCTL Text Format) files hold tokenized, segmented source text;
//! LAF (LCTL Annotation Format) files hold named-entity annotations whose
//! extents point into that text by character offset.
//!
//! # Example
//!
//! ```
//! use lctl_corpus::{CorpusDocument, LafDocument, Mention};
//!
//! let mentions = vec![Mention::new("D1-NE1", "PER", "Musa", 0, 4)];
//! let doc = LafDocument::from_mentions(&mentions, "hau", "D1");
//!
//! let reparsed = LafDocument::parse_str(&doc.to_xml()).unwrap();
//! assert_eq!(reparsed.doc_id(), "D1");
//! assert_eq!(reparsed.mentions().unwrap(), mentions);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Format constants, file naming and id validation
//! - [`types`]: Core data types (Segment, Token, Annotation, Mention, etc.)
//! - [`error`]: Error types and Result alias
//! - [`xml`]: XML reading and writing utilities
//! - [`document`]: LTF and LAF document models
//! - [`splitter`]: Splitting LTF documents into single-segment files
//! - [`matcher`]: Copying split files listed in a parallel-corpus index
//! - [`inspect`]: YAML summaries of documents
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod inspect;
pub mod matcher;
pub mod splitter;
pub mod types;
pub mod xml;

// Re-export main functions
pub use matcher::{match_segments, MatchDirs, MatchReport};
pub use splitter::{split_directory, split_directory_with, SplitEvent, SplitReport};

// Re-export commonly used items
pub use document::{load_doc, CorpusDocument, LafDocument, LtfDocument};
pub use error::{CorpusError, Result};
pub use types::{Annotation, Extent, Mention, Segment, Token, Tokenized};
