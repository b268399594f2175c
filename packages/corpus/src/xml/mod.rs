//! XML utilities: tree navigation, prolog sniffing and serialization.

mod prolog;
mod utils;
mod writer;

pub use prolog::{read_prolog, Prolog};
pub use utils::{
    collect_attributes, find_child, find_children, find_descendants, get_attribute,
    get_attribute_ignore_case, get_tag_name, get_text, has_tag, has_tag_ignore_case,
    parse_document, parse_offset, required_attribute,
};
pub use writer::{escape_attribute, escape_text, render_document, Element};
