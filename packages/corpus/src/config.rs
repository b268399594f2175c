//! Configuration constants and naming/validation helpers for LTF and LAF files.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{CorpusError, Result};

/// File name suffix of LTF (tokenized text) documents.
pub const LTF_SUFFIX: &str = ".ltf.xml";

/// File name suffix of LAF (annotation) documents.
pub const LAF_SUFFIX: &str = ".laf.xml";

/// Substring a file name must contain to be picked up by the splitter.
pub const LTF_NAME_MARKER: &str = "ltf";

/// Root element of an LTF document.
pub const LTF_ROOT_TAG: &str = "LCTL_TEXT";

/// Root element of an LAF document.
pub const LAF_ROOT_TAG: &str = "LCTL_ANNOTATIONS";

/// System identifier of the LTF DTD.
pub const LTF_DTD: &str = "ltf.v1.5.dtd";

/// System identifier of the LAF DTD.
pub const LAF_DTD: &str = "laf.v1.2.dtd";

/// Doctype declaration written for synthesized LTF documents.
pub const LTF_DOCTYPE: &str = r#"<!DOCTYPE LCTL_TEXT SYSTEM "ltf.v1.5.dtd">"#;

/// Doctype declaration written for synthesized LAF documents.
pub const LAF_DOCTYPE: &str = r#"<!DOCTYPE LCTL_ANNOTATIONS SYSTEM "laf.v1.2.dtd">"#;

/// XML version written for synthesized documents.
pub const XML_VERSION: &str = "1.0";

/// Task attribute of named-entity annotations.
pub const NE_TASK: &str = "NE";

/// Indentation unit used when serializing XML.
pub const INDENT: &str = "  ";

/// Ids end up in file names: no path separators and no NUL.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^/\\\x00]+$").expect("valid regex"));

/// Validate that an id can be used as (part of) a file name.
///
/// # Examples
/// ```
/// use lctl_corpus::config::validate_id;
///
/// assert!(validate_id("NW_AMI_HAU_006001_20141128").is_ok());
/// assert!(validate_id("seg..1").is_ok());
/// assert!(validate_id("../etc/passwd").is_err());
/// assert!(validate_id("").is_err());
/// ```
pub fn validate_id(id: &str) -> Result<()> {
    if ID_PATTERN.is_match(id) && id != "." && id != ".." {
        Ok(())
    } else {
        Err(CorpusError::InvalidId(id.to_string()))
    }
}

/// File name of the LTF document with the given id.
///
/// # Examples
/// ```
/// use lctl_corpus::config::ltf_file_name;
///
/// assert_eq!(ltf_file_name("D1_S1"), "D1_S1.ltf.xml");
/// ```
pub fn ltf_file_name(id: &str) -> String {
    format!("{id}{LTF_SUFFIX}")
}

/// File name of the LAF document with the given id.
pub fn laf_file_name(id: &str) -> String {
    format!("{id}{LAF_SUFFIX}")
}

/// Document id of a single-segment document split from `doc_id`.
///
/// # Examples
/// ```
/// use lctl_corpus::config::segment_doc_id;
///
/// assert_eq!(segment_doc_id("D1", "S2"), "D1_S2");
/// ```
pub fn segment_doc_id(doc_id: &str, seg_id: &str) -> String {
    format!("{doc_id}_{seg_id}")
}

/// Whether the splitter should pick up a file with this name.
pub fn is_ltf_file_name(name: &str) -> bool {
    name.contains(LTF_NAME_MARKER)
}
