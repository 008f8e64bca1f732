use std::io::{self, Write};

/// Renders an item as `"{counter}. {body}"`. The body is copied verbatim.
pub fn format_item(counter: usize, body: &str) -> String {
    format!("{counter}. {body}")
}

/// Writes the same bytes as [`format_item`] into `out`, for bodies in any encoding.
pub fn write_item<W: Write + ?Sized>(out: &mut W, counter: usize, body: &[u8]) -> io::Result<()> {
    write!(out, "{counter}. ")?;
    out.write_all(body)
}
