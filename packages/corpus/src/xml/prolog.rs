//! Reading the XML declaration and doctype from raw document text.
//!
//! roxmltree parses past the prolog without exposing it, so the version and
//! the doctype declaration are recovered from the source text directly.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static XML_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\x{FEFF}?\s*<\?xml\s+version\s*=\s*["']([^"']+)["']"#).expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DOCTYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!DOCTYPE\s[^>\[]*(?:\[.*?\]\s*)?>").expect("valid regex")
});

/// Declaration information found before the root element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prolog {
    /// Version from `<?xml version=...?>`.
    pub xml_version: Option<String>,

    /// The doctype declaration, whitespace-normalized.
    pub doctype: Option<String>,
}

/// Read the prolog of an XML document.
///
/// # Examples
/// ```
/// use lctl_corpus::xml::read_prolog;
///
/// let prolog = read_prolog(
///     "<?xml version='1.0' encoding='UTF-8'?>\n<!DOCTYPE LCTL_TEXT SYSTEM \"ltf.v1.5.dtd\">\n<LCTL_TEXT/>",
/// );
/// assert_eq!(prolog.xml_version.as_deref(), Some("1.0"));
/// assert_eq!(
///     prolog.doctype.as_deref(),
///     Some("<!DOCTYPE LCTL_TEXT SYSTEM \"ltf.v1.5.dtd\">")
/// );
/// ```
pub fn read_prolog(text: &str) -> Prolog {
    let xml_version = XML_DECLARATION
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    // Only look before the first real element so a doctype-like string inside
    // content is never picked up.
    let head = &text[..prolog_end(text)];
    let doctype = DOCTYPE
        .find(head)
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "));

    Prolog {
        xml_version,
        doctype,
    }
}

/// Byte offset of the first element start tag.
fn prolog_end(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut search_from = 0;
    while let Some(pos) = text[search_from..].find('<') {
        let start = search_from + pos;
        match bytes.get(start + 1) {
            Some(b'?' | b'!') => search_from = start + 1,
            Some(_) => return start,
            None => break,
        }
    }
    text.len()
}
