/// Splits a raw line into its content and its terminator.
///
/// The terminator is `b"\r\n"`, `b"\n"`, or empty for a final unterminated line.
/// A lone `\r` is content.
pub fn split_terminator(raw: &[u8]) -> (&[u8], &[u8]) {
    let content_len = if raw.ends_with(b"\r\n") {
        raw.len() - 2
    } else if raw.ends_with(b"\n") {
        raw.len() - 1
    } else {
        raw.len()
    };
    raw.split_at(content_len)
}
