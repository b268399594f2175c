//! Splitting LTF documents into single-segment files.
//!
//! Every segment of a source document becomes its own LTF document with id
//! `<doc id>_<segment id>`, written to `<doc id>_<segment id>.ltf.xml`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{is_ltf_file_name, ltf_file_name, segment_doc_id, validate_id};
use crate::document::{CorpusDocument, LtfDocument};
use crate::error::{CorpusError, Result};

/// Outcome of splitting a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitReport {
    /// Number of source documents processed.
    pub documents: usize,

    /// Paths of the single-segment files written, in processing order.
    pub written: Vec<PathBuf>,
}

/// Progress of [`split_directory_with`], reported as the run advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitEvent<'a> {
    /// The source files were listed.
    Listed { files: usize },

    /// A source file is about to be split.
    Started(&'a Path),

    /// A source file was split into `segments` files.
    Finished { path: &'a Path, segments: usize },
}

/// List the files of `dir` whose name contains `ltf`.
///
/// Only the directory itself is searched, not its subdirectories. The result
/// is sorted by path.
pub fn list_ltf_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| CorpusError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CorpusError::io(dir, e))?;
        let path = entry.path();
        let is_match = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(is_ltf_file_name);
        if is_match && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Write one single-segment document per segment of `doc` into `output_dir`.
///
/// # Returns
/// Paths of the written files, in segment order
pub fn split_document(doc: &LtfDocument, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for segment in doc.segments() {
        let seg_id = segment
            .id
            .as_deref()
            .ok_or_else(|| CorpusError::MissingAttribute {
                attribute: "id".to_string(),
                element: "SEG".to_string(),
            })?;

        let split_id = segment_doc_id(doc.doc_id(), seg_id);
        validate_id(&split_id)?;

        let path = output_dir.join(ltf_file_name(&split_id));
        LtfDocument::from_segment(segment, split_id.as_str()).write_to_file(&path)?;

        tracing::debug!(path = %path.display(), "Wrote segment");
        written.push(path);
    }

    Ok(written)
}

/// Load one LTF file and split it into `output_dir`.
pub fn split_file(path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let doc = LtfDocument::from_file(path)?;
    let written = split_document(&doc, output_dir)?;

    tracing::info!(
        doc_id = %doc.doc_id(),
        segments = written.len(),
        "Split document"
    );

    Ok(written)
}

/// Split every LTF file of `input_dir` into `output_dir`.
///
/// The output directory is created if needed. A file that cannot be loaded
/// aborts the run.
pub fn split_directory(input_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Result<SplitReport> {
    split_directory_with(input_dir, output_dir, |_| {})
}

/// Same as [`split_directory`], reporting progress to `on_event`.
pub fn split_directory_with(
    input_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    mut on_event: impl FnMut(SplitEvent<'_>),
) -> Result<SplitReport> {
    let output_dir = output_dir.as_ref();
    let files = list_ltf_files(input_dir)?;
    fs::create_dir_all(output_dir).map_err(|e| CorpusError::io(output_dir, e))?;
    on_event(SplitEvent::Listed { files: files.len() });

    let mut report = SplitReport::default();
    for file in &files {
        on_event(SplitEvent::Started(file));
        let written = split_file(file, output_dir)?;
        on_event(SplitEvent::Finished {
            path: file,
            segments: written.len(),
        });

        report.written.extend(written);
        report.documents += 1;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Segment;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_ltf_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["B.ltf.xml", "A.ltf.xml", "A.laf.xml", "notes.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("nested.ltf")).unwrap();

        let files = list_ltf_files(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("A.ltf.xml"), dir.path().join("B.ltf.xml")]
        );
    }

    #[test]
    fn test_list_ltf_files_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            list_ltf_files(dir.path().join("missing")),
            Err(CorpusError::Io { .. })
        ));
    }

    #[test]
    fn test_split_directory_one_file_per_segment() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(
            input.path().join("D1.ltf.xml"),
            r#"<LCTL_TEXT><DOC id="D1" lang="yor"><TEXT>
                <SEG id="S1"><ORIGINAL_TEXT>Bawo</ORIGINAL_TEXT><TOKEN id="T1">Bawo</TOKEN></SEG>
                <SEG id="S2"><ORIGINAL_TEXT>ni</ORIGINAL_TEXT><TOKEN id="T2">ni</TOKEN></SEG>
            </TEXT></DOC></LCTL_TEXT>"#,
        )
        .unwrap();

        let report = split_directory(input.path(), output.path()).unwrap();
        assert_eq!(report.documents, 1);
        assert_eq!(
            report.written,
            vec![
                output.path().join("D1_S1.ltf.xml"),
                output.path().join("D1_S2.ltf.xml"),
            ]
        );

        let mut names: Vec<_> = fs::read_dir(output.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        names.sort();
        assert_eq!(names, vec!["D1_S1.ltf.xml", "D1_S2.ltf.xml"]);

        let second = LtfDocument::from_file(&report.written[1]).unwrap();
        assert_eq!(second.doc_id(), "D1_S2");
        assert_eq!(second.text(), "ni");
        assert_eq!(second.segments().count(), 1);
    }

    #[test]
    fn test_split_directory_reports_events() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let path = input.path().join("D1.ltf.xml");
        fs::write(
            &path,
            r#"<LCTL_TEXT><DOC id="D1"><TEXT><SEG id="S1"/><SEG id="S2"/></TEXT></DOC></LCTL_TEXT>"#,
        )
        .unwrap();

        let mut events = Vec::new();
        split_directory_with(input.path(), output.path(), |event| {
            events.push(match event {
                SplitEvent::Listed { files } => format!("listed {files}"),
                SplitEvent::Started(p) => format!("started {}", p.display()),
                SplitEvent::Finished { path, segments } => {
                    format!("finished {} {segments}", path.display())
                }
            });
        })
        .unwrap();

        assert_eq!(
            events,
            vec![
                "listed 1".to_string(),
                format!("started {}", path.display()),
                format!("finished {} 2", path.display()),
            ]
        );
    }

    #[test]
    fn test_split_keeps_dots_in_segment_ids() {
        let dir = tempfile::tempdir().unwrap();
        let doc = LtfDocument::parse_str(
            r#"<LCTL_TEXT><DOC id="D1"><TEXT>
                <SEG id="seg..1"><ORIGINAL_TEXT>a</ORIGINAL_TEXT></SEG>
            </TEXT></DOC></LCTL_TEXT>"#,
        )
        .unwrap();

        let written = split_document(&doc, dir.path()).unwrap();
        assert_eq!(written, vec![dir.path().join("D1_seg..1.ltf.xml")]);

        let split = LtfDocument::from_file(&written[0]).unwrap();
        assert_eq!(split.doc_id(), "D1_seg..1");
    }

    #[test]
    fn test_split_document_requires_segment_id() {
        let dir = tempfile::tempdir().unwrap();
        let doc = LtfDocument::from_segment(&Segment::default(), "D1");

        assert!(matches!(
            split_document(&doc, dir.path()),
            Err(CorpusError::MissingAttribute { .. })
        ));
    }
}
