//! Matching split LTF/LAF files against a parallel-corpus index.
//!
//! The index declares `parallel` entries, each pointing at a split document
//! through the `id` of its `segment_source`. For every declared id the split
//! LTF and LAF files are copied into the match directories.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{laf_file_name, ltf_file_name, validate_id};
use crate::error::{CorpusError, Result};
use crate::xml::{get_attribute_ignore_case, has_tag_ignore_case, parse_document};

/// Source and destination directories for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDirs {
    pub ltf_split: PathBuf,
    pub ltf_match: PathBuf,
    pub laf_split: PathBuf,
    pub laf_match: PathBuf,
}

/// Outcome of a successful matching run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    /// Ids declared in the index, in index order.
    pub ids: Vec<String>,

    /// Number of files copied (two per id).
    pub files_copied: usize,
}

/// Read the segment ids declared in a parallel-corpus index file.
///
/// Tag and attribute names are compared case-insensitively.
///
/// # Returns
/// The `id` of the first `segment_source` of every `parallel` element, in
/// document order
pub fn read_segment_ids(index_path: impl AsRef<Path>) -> Result<Vec<String>> {
    let index_path = index_path.as_ref();
    let xml = fs::read_to_string(index_path).map_err(|e| CorpusError::io(index_path, e))?;
    parse_segment_ids(&xml, Some(index_path))
}

/// Parse segment ids from index XML text.
pub fn parse_segment_ids(xml: &str, path: Option<&Path>) -> Result<Vec<String>> {
    let doc = parse_document(xml, path)?;

    doc.descendants()
        .filter(|node| has_tag_ignore_case(*node, "parallel"))
        .map(|parallel| {
            let source = parallel
                .descendants()
                .find(|node| *node != parallel && has_tag_ignore_case(*node, "segment_source"))
                .ok_or_else(|| CorpusError::MissingElement {
                    element: "segment_source".to_string(),
                    context: "parallel".to_string(),
                })?;

            get_attribute_ignore_case(source, "id")
                .map(String::from)
                .ok_or_else(|| CorpusError::MissingAttribute {
                    attribute: "id".to_string(),
                    element: "segment_source".to_string(),
                })
        })
        .collect()
}

/// Copy the split files of every id declared in the index into the match
/// directories.
///
/// For each id, `<id>.ltf.xml` is copied from `ltf_split` to `ltf_match`,
/// then `<id>.laf.xml` from `laf_split` to `laf_match`. The first failing
/// copy aborts the run.
pub fn match_segments(index_path: impl AsRef<Path>, dirs: &MatchDirs) -> Result<MatchReport> {
    let ids = read_segment_ids(index_path)?;
    for id in &ids {
        validate_id(id)?;
    }

    let mut report = MatchReport::default();
    for id in ids {
        copy_into(&dirs.ltf_split, &dirs.ltf_match, &ltf_file_name(&id))?;
        copy_into(&dirs.laf_split, &dirs.laf_match, &laf_file_name(&id))?;
        report.files_copied += 2;

        tracing::info!(id = %id, "Matched segment");
        report.ids.push(id);
    }

    Ok(report)
}

/// Copy `file_name` from one directory into another.
fn copy_into(from_dir: &Path, to_dir: &Path, file_name: &str) -> Result<()> {
    let from = from_dir.join(file_name);
    let to = to_dir.join(file_name);
    tracing::debug!(from = %from.display(), to = %to.display(), "Copying");

    fs::copy(&from, &to).map_err(|source| CorpusError::Copy { from, to, source })?;
    Ok(())
}
