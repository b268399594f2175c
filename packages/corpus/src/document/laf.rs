//! LAF (LCTL Annotation Format) documents.

use std::path::Path;

use roxmltree::Node;

use super::{doc_element, parse_header, CorpusDocument};
use crate::config::{LAF_DOCTYPE, LAF_ROOT_TAG, NE_TASK, XML_VERSION};
use crate::error::{CorpusError, Result};
use crate::types::{check_span, Annotation, Attributes, DocHeader, Extent, Mention};
use crate::xml::{
    collect_attributes, find_child, find_descendants, get_attribute, get_text, parse_document,
    parse_offset, Element,
};

/// A named-entity annotation document: `LCTL_ANNOTATIONS/DOC/ANNOTATION*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LafDocument {
    header: DocHeader,
    annotations: Vec<Annotation>,
}

impl LafDocument {
    /// Build a document from a list of mentions.
    ///
    /// Both the root element and `DOC` carry `lang`; every mention becomes an
    /// `NE` annotation with a single extent, in the given order.
    #[must_use]
    pub fn from_mentions(mentions: &[Mention], lang: &str, doc_id: &str) -> Self {
        let annotations = mentions
            .iter()
            .map(|mention| Annotation {
                id: Some(mention.entity_id.clone()),
                task: Some(NE_TASK.to_string()),
                annotation_type: Some(mention.entity_type.clone()),
                extent: Some(Extent {
                    text: Some(mention.extent.clone()),
                    start_char: Some(mention.start_char),
                    end_char: Some(mention.end_char),
                    attributes: Attributes::new(),
                }),
                attributes: Attributes::new(),
            })
            .collect();

        Self {
            header: DocHeader {
                xml_version: Some(XML_VERSION.to_string()),
                doctype: Some(LAF_DOCTYPE.to_string()),
                root_attributes: [("lang", lang)].into_iter().collect(),
                doc_id: doc_id.to_string(),
                lang: Some(lang.to_string()),
                doc_attributes: Attributes::new(),
            },
            annotations,
        }
    }

    /// Iterate over all annotations in document order.
    pub fn annotations(&self) -> std::slice::Iter<'_, Annotation> {
        self.annotations.iter()
    }

    /// Extract mentions from all annotations.
    ///
    /// Every annotation must have an `EXTENT` with both offsets, plus an `id`
    /// and a `type`; the first annotation missing any of them fails the whole
    /// extraction.
    pub fn mentions(&self) -> Result<Vec<Mention>> {
        self.annotations().map(mention_from_annotation).collect()
    }
}

impl CorpusDocument for LafDocument {
    const ROOT_TAG: &'static str = LAF_ROOT_TAG;

    fn from_xml(xml: &str, path: Option<&Path>) -> Result<Self> {
        let doc = parse_document(xml, path)?;
        let (header, _) = parse_header(&doc, xml, Self::ROOT_TAG)?;

        let annotations = find_descendants(doc.root_element(), "ANNOTATION")
            .map(parse_annotation)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            doc_id = %header.doc_id,
            annotations = annotations.len(),
            "Parsed LAF document"
        );

        Ok(Self {
            header,
            annotations,
        })
    }

    fn header(&self) -> &DocHeader {
        &self.header
    }

    fn to_element(&self) -> Element {
        Element::new(Self::ROOT_TAG)
            .with_attrs(self.header.root_attributes.iter())
            .with_child(doc_element(
                &self.header,
                self.annotations().map(annotation_element),
            ))
    }
}

fn mention_from_annotation(annotation: &Annotation) -> Result<Mention> {
    let context = match &annotation.id {
        Some(id) => format!("ANNOTATION '{id}'"),
        None => "ANNOTATION".to_string(),
    };
    let missing_attribute = |attribute: &str, element: &str| CorpusError::MissingAttribute {
        attribute: attribute.to_string(),
        element: element.to_string(),
    };

    let extent = annotation
        .extent
        .as_ref()
        .ok_or_else(|| CorpusError::MissingElement {
            element: "EXTENT".to_string(),
            context,
        })?;

    Ok(Mention {
        entity_id: annotation
            .id
            .clone()
            .ok_or_else(|| missing_attribute("id", "ANNOTATION"))?,
        entity_type: annotation
            .annotation_type
            .clone()
            .ok_or_else(|| missing_attribute("type", "ANNOTATION"))?,
        extent: extent.text.clone().unwrap_or_default(),
        start_char: extent
            .start_char
            .ok_or_else(|| missing_attribute("start_char", "EXTENT"))?,
        end_char: extent
            .end_char
            .ok_or_else(|| missing_attribute("end_char", "EXTENT"))?,
    })
}

fn parse_annotation(node: Node<'_, '_>) -> Result<Annotation> {
    let extent = find_child(node, "EXTENT").map(parse_extent).transpose()?;

    Ok(Annotation {
        id: get_attribute(node, "id").map(String::from),
        task: get_attribute(node, "task").map(String::from),
        annotation_type: get_attribute(node, "type").map(String::from),
        extent,
        attributes: collect_attributes(node, &["id", "task", "type"]),
    })
}

fn parse_extent(node: Node<'_, '_>) -> Result<Extent> {
    let start_char = parse_offset(node, "start_char")?;
    let end_char = parse_offset(node, "end_char")?;
    check_span("EXTENT", None, start_char, end_char)?;

    Ok(Extent {
        text: get_text(node),
        start_char,
        end_char,
        attributes: collect_attributes(node, &["start_char", "end_char"]),
    })
}

fn annotation_element(annotation: &Annotation) -> Element {
    let extent = annotation.extent.as_ref().map(|extent| {
        Element::new("EXTENT")
            .with_attrs(extent.attributes.iter())
            .with_opt_attr("start_char", extent.start_char)
            .with_opt_attr("end_char", extent.end_char)
            .with_text(extent.text.as_deref())
    });

    Element::new("ANNOTATION")
        .with_opt_attr("id", annotation.id.as_deref())
        .with_opt_attr("task", annotation.task.as_deref())
        .with_opt_attr("type", annotation.annotation_type.as_deref())
        .with_attrs(annotation.attributes.iter())
        .with_children(extent)
}
