//! LTF (LCTL Text Format) documents.

use std::path::Path;

use roxmltree::Node;

use super::{doc_element, parse_header, CorpusDocument};
use crate::config::{LTF_DOCTYPE, LTF_ROOT_TAG, XML_VERSION};
use crate::error::Result;
use crate::types::{check_span, Attributes, DocHeader, Segment, Token, Tokenized};
use crate::xml::{
    collect_attributes, find_descendants, get_attribute, get_text, parse_document,
    parse_offset, Element,
};

/// Attributes of `SEG` and `TOKEN` that have a dedicated field.
const SPAN_ATTRIBUTES: &[&str] = &["id", "start_char", "end_char"];

/// A tokenized text document: `LCTL_TEXT/DOC/TEXT/SEG*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LtfDocument {
    header: DocHeader,
    segments: Vec<Segment>,

    /// Every `ORIGINAL_TEXT` of the document, in document order.
    original_texts: Vec<String>,
}

impl LtfDocument {
    /// Build a single-segment document around a segment taken from another
    /// document.
    ///
    /// The segment is copied as-is, attributes and tokens included. The new
    /// `DOC` carries only `doc_id`; no language is set.
    #[must_use]
    pub fn from_segment(segment: &Segment, doc_id: impl Into<String>) -> Self {
        Self {
            header: DocHeader {
                xml_version: Some(XML_VERSION.to_string()),
                doctype: Some(LTF_DOCTYPE.to_string()),
                root_attributes: Attributes::new(),
                doc_id: doc_id.into(),
                lang: None,
                doc_attributes: Attributes::new(),
            },
            segments: vec![segment.clone()],
            original_texts: segment.original_text.iter().cloned().collect(),
        }
    }

    /// Iterate over all segments in document order.
    ///
    /// Every `SEG` under the document counts, wherever it is nested. Each
    /// call starts a fresh iteration.
    pub fn segments(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Flatten the tokens of all segments into parallel sequences.
    #[must_use]
    pub fn tokenized(&self) -> Tokenized {
        let mut tokenized = Tokenized::default();
        for token in self.segments().flat_map(|segment| &segment.tokens) {
            tokenized.push(token);
        }
        tokenized
    }

    /// Original text of the document: every `ORIGINAL_TEXT` joined by a space.
    ///
    /// All `ORIGINAL_TEXT` elements count, wherever they are nested, including
    /// several inside one segment or ones outside any segment. An element
    /// without text contributes an empty string.
    #[must_use]
    pub fn text(&self) -> String {
        self.original_texts.join(" ")
    }
}

impl CorpusDocument for LtfDocument {
    const ROOT_TAG: &'static str = LTF_ROOT_TAG;

    fn from_xml(xml: &str, path: Option<&Path>) -> Result<Self> {
        let doc = parse_document(xml, path)?;
        let (header, _) = parse_header(&doc, xml, Self::ROOT_TAG)?;

        let segments = find_descendants(doc.root_element(), "SEG")
            .map(parse_segment)
            .collect::<Result<Vec<_>>>()?;
        let original_texts = find_descendants(doc.root_element(), "ORIGINAL_TEXT")
            .map(|node| get_text(node).unwrap_or_default())
            .collect();

        tracing::debug!(
            doc_id = %header.doc_id,
            segments = segments.len(),
            "Parsed LTF document"
        );

        Ok(Self {
            header,
            segments,
            original_texts,
        })
    }

    fn header(&self) -> &DocHeader {
        &self.header
    }

    fn to_element(&self) -> Element {
        let text = Element::new("TEXT").with_children(self.segments().map(segment_element));
        Element::new(Self::ROOT_TAG)
            .with_attrs(self.header.root_attributes.iter())
            .with_child(doc_element(&self.header, [text]))
    }
}

fn parse_segment(node: Node<'_, '_>) -> Result<Segment> {
    let id = get_attribute(node, "id").map(String::from);
    let start_char = parse_offset(node, "start_char")?;
    let end_char = parse_offset(node, "end_char")?;
    check_span("SEG", id.as_deref(), start_char, end_char)?;

    let original_text = find_descendants(node, "ORIGINAL_TEXT")
        .next()
        .map(|child| get_text(child).unwrap_or_default());

    let tokens = find_descendants(node, "TOKEN")
        .map(parse_token)
        .collect::<Result<Vec<_>>>()?;

    Ok(Segment {
        id,
        start_char,
        end_char,
        original_text,
        tokens,
        attributes: collect_attributes(node, SPAN_ATTRIBUTES),
    })
}

fn parse_token(node: Node<'_, '_>) -> Result<Token> {
    let id = get_attribute(node, "id").map(String::from);
    let start_char = parse_offset(node, "start_char")?;
    let end_char = parse_offset(node, "end_char")?;
    check_span("TOKEN", id.as_deref(), start_char, end_char)?;

    Ok(Token {
        id,
        text: get_text(node),
        start_char,
        end_char,
        attributes: collect_attributes(node, SPAN_ATTRIBUTES),
    })
}

fn segment_element(segment: &Segment) -> Element {
    let original_text = segment
        .original_text
        .as_deref()
        .map(|text| Element::new("ORIGINAL_TEXT").with_text(Some(text)));

    Element::new("SEG")
        .with_opt_attr("id", segment.id.as_deref())
        .with_opt_attr("start_char", segment.start_char)
        .with_opt_attr("end_char", segment.end_char)
        .with_attrs(segment.attributes.iter())
        .with_children(original_text)
        .with_children(segment.tokens.iter().map(token_element))
}

fn token_element(token: &Token) -> Element {
    Element::new("TOKEN")
        .with_opt_attr("id", token.id.as_deref())
        .with_attrs(token.attributes.iter())
        .with_opt_attr("start_char", token.start_char)
        .with_opt_attr("end_char", token.end_char)
        .with_text(token.text.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const THREE_SEGMENTS: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<!DOCTYPE LCTL_TEXT SYSTEM "ltf.v1.5.dtd">
<LCTL_TEXT>
  <DOC id="D1" lang="hau">
    <TEXT>
      <SEG id="S1" start_char="0" end_char="8">
        <ORIGINAL_TEXT>Ina kwana</ORIGINAL_TEXT>
        <TOKEN id="T1" pos="word" morph="none" start_char="0" end_char="2">Ina</TOKEN>
        <TOKEN id="T2" pos="word" morph="none" start_char="4" end_char="8">kwana</TOKEN>
      </SEG>
      <SEG id="S2" start_char="10" end_char="15">
        <ORIGINAL_TEXT>Lafiya</ORIGINAL_TEXT>
        <TOKEN id="T3" start_char="10" end_char="15">Lafiya</TOKEN>
      </SEG>
      <SEG id="S3" start_char="17" end_char="17">
        <ORIGINAL_TEXT>.</ORIGINAL_TEXT>
        <TOKEN id="T4" start_char="17" end_char="17">.</TOKEN>
      </SEG>
    </TEXT>
  </DOC>
</LCTL_TEXT>
"#;

    #[test]
    fn test_parse_header_fields() {
        let doc = LtfDocument::parse_str(THREE_SEGMENTS).unwrap();
        assert_eq!(doc.doc_id(), "D1");
        assert_eq!(doc.lang(), "hau");
        assert_eq!(doc.xml_version(), Some("1.0"));
        assert_eq!(doc.doctype(), Some(LTF_DOCTYPE));
    }

    #[test]
    fn test_segments_are_restartable() {
        let doc = LtfDocument::parse_str(THREE_SEGMENTS).unwrap();

        let first: Vec<_> = doc.segments().filter_map(|s| s.id.as_deref()).collect();
        let second: Vec<_> = doc.segments().filter_map(|s| s.id.as_deref()).collect();
        assert_eq!(first, vec!["S1", "S2", "S3"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_tokenized_flattens_in_order() {
        let doc = LtfDocument::parse_str(THREE_SEGMENTS).unwrap();
        let tokenized = doc.tokenized();

        assert_eq!(tokenized.tokens, vec!["Ina", "kwana", "Lafiya", "."]);
        assert_eq!(
            tokenized.token_ids,
            vec![
                Some("T1".to_string()),
                Some("T2".to_string()),
                Some("T3".to_string()),
                Some("T4".to_string())
            ]
        );
        assert_eq!(tokenized.onsets, vec![Some(0), Some(4), Some(10), Some(17)]);
        assert_eq!(tokenized.offsets, vec![Some(2), Some(8), Some(15), Some(17)]);
    }

    #[test]
    fn test_text_joins_original_text() {
        let doc = LtfDocument::parse_str(THREE_SEGMENTS).unwrap();
        assert_eq!(doc.text(), "Ina kwana Lafiya .");
    }

    #[test]
    fn test_text_includes_nested_original_text() {
        let xml = r#"<LCTL_TEXT><DOC id="D4"><TEXT>
            <SEG id="S1"><WRAP><ORIGINAL_TEXT>a</ORIGINAL_TEXT></WRAP></SEG>
            <SEG id="S2"><ORIGINAL_TEXT>b</ORIGINAL_TEXT><ORIGINAL_TEXT>c</ORIGINAL_TEXT></SEG>
            <ORIGINAL_TEXT>d</ORIGINAL_TEXT>
            <SEG id="S3"><ORIGINAL_TEXT/></SEG>
        </TEXT></DOC></LCTL_TEXT>"#;
        let doc = LtfDocument::parse_str(xml).unwrap();

        assert_eq!(doc.text(), "a b c d ");

        // A segment keeps its first original text, nested or not
        let first = doc.segments().next().unwrap();
        assert_eq!(first.original_text.as_deref(), Some("a"));
        let split = LtfDocument::from_segment(first, "D4_S1");
        assert_eq!(split.text(), "a");
        assert_eq!(LtfDocument::parse_str(&split.to_xml()).unwrap().text(), "a");
    }

    #[test]
    fn test_missing_lang_is_empty_string() {
        let xml = r#"<LCTL_TEXT><DOC id="D2"><TEXT/></DOC></LCTL_TEXT>"#;
        let doc = LtfDocument::parse_str(xml).unwrap();
        assert_eq!(doc.lang(), "");
        assert_eq!(doc.segments().count(), 0);
        assert!(doc.tokenized().is_empty());
        assert_eq!(doc.text(), "");
    }

    #[test]
    fn test_token_without_text_or_offsets() {
        let xml = r#"<LCTL_TEXT><DOC id="D3"><TEXT>
            <SEG id="S1"><ORIGINAL_TEXT> </ORIGINAL_TEXT><TOKEN id="T1"/></SEG>
        </TEXT></DOC></LCTL_TEXT>"#;
        let tokenized = LtfDocument::parse_str(xml).unwrap().tokenized();

        assert_eq!(tokenized.tokens, vec![" "]);
        assert_eq!(tokenized.onsets, vec![None]);
        assert_eq!(tokenized.offsets, vec![None]);
    }

    #[test]
    fn test_segments_found_at_any_depth() {
        let xml = r#"<LCTL_TEXT><DOC id="D4"><TEXT>
            <SEG id="S1"/>
            <GROUP><SEG id="S2"/></GROUP>
        </TEXT></DOC></LCTL_TEXT>"#;
        let doc = LtfDocument::parse_str(xml).unwrap();

        let ids: Vec<_> = doc.segments().filter_map(|s| s.id.as_deref()).collect();
        assert_eq!(ids, vec!["S1", "S2"]);
    }

    #[test]
    fn test_inverted_token_span_is_rejected() {
        let xml = r#"<LCTL_TEXT><DOC id="D5"><TEXT>
            <SEG id="S1"><TOKEN id="T1" start_char="5" end_char="2">x</TOKEN></SEG>
        </TEXT></DOC></LCTL_TEXT>"#;
        assert!(matches!(
            LtfDocument::parse_str(xml),
            Err(crate::error::CorpusError::InvalidSpan { .. })
        ));
    }

    #[test]
    fn test_from_segment_keeps_segment_verbatim() {
        let source = LtfDocument::parse_str(THREE_SEGMENTS).unwrap();
        let segment = source.segments().next().unwrap();

        let split = LtfDocument::from_segment(segment, "D1_S1");
        assert_eq!(split.doc_id(), "D1_S1");
        assert_eq!(split.lang(), "");
        assert_eq!(split.segments().collect::<Vec<_>>(), vec![segment]);
        assert_eq!(
            split.to_xml(),
            r#"<?xml version='1.0' encoding='UTF-8'?>
<!DOCTYPE LCTL_TEXT SYSTEM "ltf.v1.5.dtd">
<LCTL_TEXT>
  <DOC id="D1_S1">
    <TEXT>
      <SEG id="S1" start_char="0" end_char="8">
        <ORIGINAL_TEXT>Ina kwana</ORIGINAL_TEXT>
        <TOKEN id="T1" pos="word" morph="none" start_char="0" end_char="2">Ina</TOKEN>
        <TOKEN id="T2" pos="word" morph="none" start_char="4" end_char="8">kwana</TOKEN>
      </SEG>
    </TEXT>
  </DOC>
</LCTL_TEXT>
"#
        );
    }

    #[test]
    fn test_serialized_document_parses_back() {
        let doc = LtfDocument::parse_str(THREE_SEGMENTS).unwrap();
        let reparsed = LtfDocument::parse_str(&doc.to_xml()).unwrap();
        assert_eq!(reparsed, doc);
    }
}
