//! # Stream Driver
//!
//! Single-pass renumbering of a line stream. Each line is read, classified by
//! [`ListLineClassifier`], and written out either untouched or with the next
//! sequential number. Nothing is buffered across lines except the counter.
//!
//! ## Key Invariants
//!
//! - Output has exactly as many lines as input, each with its original terminator
//! - Item numbers start at 1 and increase by exactly 1
//! - Blank and continuation lines are copied byte for byte, in any encoding
//! - The first read or write failure ends the run; partial output is left as written

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::classify::{LineClass, ListLineClassifier};
use crate::error::RenumberError;
use crate::format::write_item;
use crate::lines::split_terminator;

/// Counts from a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenumberStats {
    /// Lines read and written.
    pub lines: usize,
    /// Lines renumbered as items; also the last number assigned.
    pub items: usize,
    /// Lines whose output differs from their input. Zero means the output
    /// is byte-identical to the input.
    pub changed: usize,
}

/// Shared flag for stopping a run from another thread.
///
/// Checked once per line, before reading it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Renumbers every top-level item read from `input` and writes the result to `output`.
pub fn renumber<R: BufRead, W: Write>(input: R, output: W) -> Result<RenumberStats, RenumberError> {
    renumber_with_cancel(input, output, &CancelToken::new())
}

/// Like [`renumber`], but returns [`RenumberError::Cancelled`] once `cancel` is set.
pub fn renumber_with_cancel<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    cancel: &CancelToken,
) -> Result<RenumberStats, RenumberError> {
    let classifier = ListLineClassifier;
    let mut stats = RenumberStats::default();
    let mut raw = Vec::new();
    let mut item = Vec::new();

    loop {
        if cancel.is_cancelled() {
            log::warn!("Renumbering cancelled after {} lines", stats.lines);
            return Err(RenumberError::Cancelled);
        }

        raw.clear();
        if input.read_until(b'\n', &mut raw).map_err(RenumberError::Read)? == 0 {
            break;
        }

        let (content, terminator) = split_terminator(&raw);
        let rendered = match classifier.classify(content) {
            LineClass::Blank | LineClass::Continuation => content,
            LineClass::NumberedItem { body, .. } | LineClass::PlainItem { body } => {
                stats.items += 1;
                item.clear();
                // Writing into a Vec cannot fail.
                let _ = write_item(&mut item, stats.items, body);
                if item != content {
                    stats.changed += 1;
                }
                item.as_slice()
            }
        };
        output
            .write_all(rendered)
            .and_then(|()| output.write_all(terminator))
            .map_err(RenumberError::Write)?;
        stats.lines += 1;
    }

    output.flush().map_err(RenumberError::Write)?;
    log::debug!(
        "Renumbered {} items across {} lines, {} changed",
        stats.items,
        stats.lines,
        stats.changed
    );
    Ok(stats)
}

/// Renumbers an in-memory document.
pub fn renumber_str(text: &str) -> String {
    let mut out = Vec::with_capacity(text.len());
    match renumber(text.as_bytes(), &mut out) {
        Ok(_) => {}
        Err(e) => unreachable!("in-memory renumbering cannot fail: {e}"),
    }
    // Every byte written is either copied from the UTF-8 input or ASCII digits and ". ".
    String::from_utf8(out).unwrap_or_else(|e| unreachable!("renumbered output is UTF-8: {e}"))
}
