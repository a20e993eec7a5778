//! PHPDoc annotation extraction.
//!
//! This module pulls declared types out of a `/** ... */` docblock's text:
//! the first `@return` type and every `@param` type in order of appearance.
//! Extraction is purely textual — the docblock is never validated, and a
//! marker without a usable type name simply contributes nothing.
//!
//! A type name is a run of letters, digits, underscores, and namespace
//! separators (`\`), optionally preceded by whitespace after the marker, so
//! all of these yield a type:
//!
//! ```text
//! @param int $x
//! @param \Foo\Bar $bar Description text.
//! @return bool Whether the write succeeded.
//! ```

use memchr::memmem;

/// The types declared by one docblock: an optional return type and the
/// parameter types in declaration order.  Parameter correlation downstream
/// is positional — index `i` here is assumed to describe the function's
/// `i`-th parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocblockTypes {
    pub return_type: Option<String>,
    pub param_types: Vec<String>,
}

/// Extract both the return type and the parameter types from a docblock.
pub fn extract_types(docblock: &str) -> DocblockTypes {
    DocblockTypes {
        return_type: extract_return_type(docblock),
        param_types: extract_param_types(docblock),
    }
}

/// Extract the type from the first usable `@return` tag, if any.
pub fn extract_return_type(docblock: &str) -> Option<String> {
    marker_types(docblock, "@return").next()
}

/// Extract the types of every `@param` tag, in order of appearance.
pub fn extract_param_types(docblock: &str) -> Vec<String> {
    marker_types(docblock, "@param").collect()
}

/// Iterate over the type names following each occurrence of `marker`.
///
/// Occurrences whose marker is not followed by a type name (after optional
/// whitespace, which may span lines) are skipped rather than reported.
fn marker_types<'a>(docblock: &'a str, marker: &'a str) -> impl Iterator<Item = String> + 'a {
    memmem::find_iter(docblock.as_bytes(), marker.as_bytes())
        .filter_map(move |idx| type_name_at(docblock, idx + marker.len()))
}

/// Read a type name starting at byte offset `from`, skipping leading ASCII
/// whitespace.  Returns `None` when no name characters follow.
fn type_name_at(docblock: &str, from: usize) -> Option<String> {
    let bytes = docblock.as_bytes();
    let mut i = from;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    let start = i;
    while i < bytes.len() && is_type_name_byte(bytes[i]) {
        i += 1;
    }
    if i == start {
        return None;
    }
    Some(docblock[start..i].to_string())
}

fn is_type_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'\\'
}

// ─── Tests ──────────────────────────────────────────────────────────────
