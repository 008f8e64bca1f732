use std::sync::OnceLock;

use regex::bytes::Regex;

/// Classification of a single line, decided from that line alone.
///
/// Every line gets exactly one class. Lines are bytes: only the ASCII numbering
/// prefix and indentation are interpreted, so any encoding passes through.
/// The body variants borrow from the classified line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Empty, or spaces and tabs only. Passed through unchanged.
    Blank,
    /// Starts (after any indentation) with an existing `digits "." [ws]` prefix.
    NumberedItem {
        /// Byte length of the numbering prefix, measured from the first
        /// non-whitespace byte.
        prefix_len: usize,
        /// Bytes following the prefix.
        body: &'a [u8],
    },
    /// Unindented line with no numbering prefix; the whole line is the body.
    PlainItem { body: &'a [u8] },
    /// Indented line with no numbering prefix. Sub-content of the previous item.
    Continuation,
}

impl<'a> LineClass<'a> {
    /// Returns the body to renumber if this line starts a new item.
    pub fn item_body(&self) -> Option<&'a [u8]> {
        match *self {
            LineClass::NumberedItem { body, .. } | LineClass::PlainItem { body } => Some(body),
            LineClass::Blank | LineClass::Continuation => None,
        }
    }
}

/// Classifies lines of a hand-edited ordered list.
pub struct ListLineClassifier;

impl ListLineClassifier {
    /// Classifies `line`, which must not include its terminator.
    pub fn classify<'a>(&self, line: &'a [u8]) -> LineClass<'a> {
        let indent = line.iter().take_while(|&&b| is_indent(b)).count();
        let trimmed = &line[indent..];
        if trimmed.is_empty() {
            return LineClass::Blank;
        }

        if let Some(prefix_len) = numbering_prefix_len(trimmed) {
            return LineClass::NumberedItem {
                prefix_len,
                body: &trimmed[prefix_len..],
            };
        }

        if indent == 0 {
            LineClass::PlainItem { body: trimmed }
        } else {
            LineClass::Continuation
        }
    }
}

fn is_indent(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Length of a leading `digits "." [ \t]*` prefix.
///
/// A dot directly followed by another digit (`3.1.4`) is a dotted section
/// number, not a list number, and yields `None`.
fn numbering_prefix_len(trimmed: &[u8]) -> Option<usize> {
    static PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();
    let prefix_regex = PREFIX_REGEX
        .get_or_init(|| Regex::new(r"^[0-9]+\.([ \t]*)").expect("Invalid numbering prefix regex"));

    let caps = prefix_regex.captures(trimmed)?;
    let end = caps.get(0)?.end();
    let spacing = caps.get(1).map_or(0, |m| m.len());

    if spacing == 0 && trimmed.get(end).is_some_and(u8::is_ascii_digit) {
        return None;
    }
    Some(end)
}
