//! Human-readable summaries of LTF and LAF files.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::LAF_SUFFIX;
use crate::document::{load_doc, CorpusDocument, LafDocument, LtfDocument};
use crate::error::Result;
use crate::types::Mention;

/// Summary of one file, serialized as YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DocumentSummary {
    Ltf {
        path: PathBuf,
        doc_id: String,
        lang: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        doctype: Option<String>,
        segments: usize,
        tokens: usize,
        text: String,
    },
    Laf {
        path: PathBuf,
        doc_id: String,
        lang: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        doctype: Option<String>,
        annotations: usize,
        mentions: Vec<Mention>,
    },
    Skipped {
        path: PathBuf,
    },
}

/// Summarize a file, choosing LAF or LTF from its name.
///
/// Files that cannot be loaded produce [`DocumentSummary::Skipped`]. An LAF
/// document whose annotations do not yield mentions is an error.
pub fn summarize_file(path: &Path) -> Result<DocumentSummary> {
    let is_laf = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(LAF_SUFFIX));

    if is_laf {
        let Some(doc) = load_doc::<LafDocument>(path) else {
            return Ok(DocumentSummary::Skipped {
                path: path.to_path_buf(),
            });
        };
        Ok(DocumentSummary::Laf {
            path: path.to_path_buf(),
            doc_id: doc.doc_id().to_string(),
            lang: doc.lang().to_string(),
            doctype: doc.doctype().map(String::from),
            annotations: doc.annotations().count(),
            mentions: doc.mentions()?,
        })
    } else {
        let Some(doc) = load_doc::<LtfDocument>(path) else {
            return Ok(DocumentSummary::Skipped {
                path: path.to_path_buf(),
            });
        };
        Ok(DocumentSummary::Ltf {
            path: path.to_path_buf(),
            doc_id: doc.doc_id().to_string(),
            lang: doc.lang().to_string(),
            doctype: doc.doctype().map(String::from),
            segments: doc.segments().count(),
            tokens: doc.tokenized().len(),
            text: doc.text(),
        })
    }
}

/// Render summaries as a YAML sequence.
pub fn render_summaries(summaries: &[DocumentSummary]) -> Result<String> {
    Ok(serde_yaml_ng::to_string(summaries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_summarize_ltf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("D1.ltf.xml");
        fs::write(
            &path,
            r#"<LCTL_TEXT><DOC id="D1"><TEXT>
                <SEG id="S1"><ORIGINAL_TEXT>Sannu</ORIGINAL_TEXT><TOKEN id="T1">Sannu</TOKEN></SEG>
            </TEXT></DOC></LCTL_TEXT>"#,
        )
        .unwrap();

        let summary = summarize_file(&path).unwrap();
        assert_eq!(
            summary,
            DocumentSummary::Ltf {
                path,
                doc_id: "D1".to_string(),
                lang: String::new(),
                doctype: None,
                segments: 1,
                tokens: 1,
                text: "Sannu".to_string(),
            }
        );
    }

    #[test]
    fn test_summarize_missing_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.laf.xml");

        let summary = summarize_file(&path).unwrap();
        assert_eq!(summary, DocumentSummary::Skipped { path });
    }

    #[test]
    fn test_render_summaries_yaml() {
        let yaml = render_summaries(&[DocumentSummary::Laf {
            path: PathBuf::from("D1.laf.xml"),
            doc_id: "D1".to_string(),
            lang: "hau".to_string(),
            doctype: None,
            annotations: 1,
            mentions: vec![Mention::new("E1", "PER", "Musa", 0, 4)],
        }])
        .unwrap();

        assert!(yaml.contains("kind: laf"));
        assert!(yaml.contains("doc_id: D1"));
        assert!(yaml.contains("type: PER"));
        assert!(yaml.contains("extent: Musa"));
    }
}
