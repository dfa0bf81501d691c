//! Bounded rendering of values for diagnostic output.
//!
//! A failed assertion on a 10,000-element vector or a 50KB string must still
//! produce a readable message. The formatter turns any [`Value`] into a
//! [`FormattedBlock`]: a handful of lines plus the true size of what was
//! rendered, so truncation never hides how big the value really is.
//!
//! # Strategies
//!
//! - **Short strings** (no line break, at most `short_string` chars) render
//!   as one quoted line.
//! - **Long strings** are split into numbered `line_width` chunks. Past
//!   `max_lines` chunks, a head and a tail window are kept around an elision
//!   marker, followed by a character/line count.
//! - **Small collections** (at most `inline_items` elements) render inline.
//! - **Large collections** render one element per line: a `head` window and
//!   an optional `tail` window, annotated with the total count.

use std::borrow::Cow;
use std::fmt::Write;

use vouch_value::{Record, Scalar, Value};

use crate::config::RenderLimits;
use crate::similar::plural_s;

/// Rendered lines plus the size of what they represent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FormattedBlock {
    pub lines: Vec<String>,
    /// Elements (or string chunks) in the full value.
    pub total_count: usize,
    /// Elements (or string chunks) actually shown.
    pub shown: usize,
    /// `shown < total_count`.
    pub truncated: bool,
}

impl FormattedBlock {
    fn single(line: String, count: usize) -> Self {
        FormattedBlock {
            lines: vec![line],
            total_count: count,
            shown: count,
            truncated: false,
        }
    }

    pub fn is_single_line(&self) -> bool {
        self.lines.len() == 1
    }

    /// All lines joined with `\n`.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Cut `s` to at most `max` chars, marking the cut with `...`.
pub fn truncate_inline(s: &str, max: usize) -> Cow<'_, str> {
    match s.char_indices().nth(max) {
        None => Cow::Borrowed(s),
        Some(_) => {
            let keep = max.saturating_sub(3);
            let end = s.char_indices().nth(keep).map_or(s.len(), |(idx, _)| idx);
            Cow::Owned(format!("{}...", &s[..end]))
        }
    }
}

/// Render any value within `limits`.
pub fn render(value: &Value, limits: &RenderLimits) -> FormattedBlock {
    match value {
        Value::Scalar(Scalar::Str(s)) => render_str(s, limits),
        Value::Scalar(s) => FormattedBlock::single(s.to_string(), 1),
        Value::Sequence(items) => render_collection(
            &Delimiters::SEQUENCE,
            items.len(),
            |i| Entry::indexed(i, &items[i], limits),
            limits,
        ),
        Value::Mapping(entries) => render_collection(
            &Delimiters::MAPPING,
            entries.len(),
            |i| Entry::keyed(&entries[i].0.repr(), &entries[i].1, limits),
            limits,
        ),
        Value::Record(record) => render_record(record, limits),
        Value::Nullable(None) => FormattedBlock::single("None".to_owned(), 1),
        Value::Nullable(Some(inner)) => {
            let mut block = render(inner, limits);
            if block.is_single_line() {
                block.lines[0] = format!("Some({})", block.lines[0]);
            } else {
                block.lines = std::iter::once("Some:".to_owned())
                    .chain(block.lines.into_iter().map(|l| format!("  {l}")))
                    .collect();
            }
            block
        }
    }
}

/// Render pre-formatted items as a sequence.
pub fn render_items(items: &[String], limits: &RenderLimits) -> FormattedBlock {
    render_collection(
        &Delimiters::SEQUENCE,
        items.len(),
        |i| Entry {
            inline: truncate_inline(&items[i], limits.max_item_width).into_owned(),
            labeled: format!("[{i}] {}", truncate_inline(&items[i], limits.max_item_width)),
        },
        limits,
    )
}

/// Render a string: one quoted line if short, numbered chunks otherwise.
pub fn render_str(s: &str, limits: &RenderLimits) -> FormattedBlock {
    let char_count = s.chars().count();
    if char_count <= limits.short_string && !s.contains('\n') {
        return FormattedBlock::single(format!("{s:?}"), 1);
    }

    let width = limits.line_width.max(1);
    let source_lines = s.split('\n').count();
    let chunks: Vec<String> = s.split('\n').flat_map(|line| chunk_line(line, width)).collect();
    let total = chunks.len();
    let number_width = total.to_string().len();
    let numbered = |n: usize| format!("{:>number_width$} | {}", n + 1, chunks[n]);

    let max_lines = limits.max_lines.max(2);
    let mut lines = Vec::new();
    let shown = if total > max_lines {
        let tail = max_lines / 2;
        let head = max_lines - tail;
        lines.extend((0..head).map(&numbered));
        let omitted = total - head - tail;
        lines.push(format!(
            "{:>number_width$} | ... {omitted} line{} omitted ...",
            "",
            plural_s(omitted)
        ));
        lines.extend((total - tail..total).map(&numbered));
        head + tail
    } else {
        lines.extend((0..total).map(&numbered));
        total
    };
    lines.push(format!(
        "({char_count} character{}, {source_lines} line{})",
        plural_s(char_count),
        plural_s(source_lines)
    ));

    FormattedBlock {
        lines,
        total_count: total,
        shown,
        truncated: shown < total,
    }
}

/// Split one line into `width`-char chunks, escaping tabs and carriage returns.
fn chunk_line(line: &str, width: usize) -> Vec<String> {
    let visible: Vec<char> = line
        .chars()
        .flat_map(|c| match c {
            '\t' => vec!['\\', 't'],
            '\r' => vec!['\\', 'r'],
            c => vec![c],
        })
        .collect();
    if visible.is_empty() {
        return vec![String::new()];
    }
    visible.chunks(width).map(|c| c.iter().collect()).collect()
}

struct Delimiters {
    open: &'static str,
    close: &'static str,
    empty: &'static str,
}

impl Delimiters {
    const SEQUENCE: Delimiters = Delimiters {
        open: "[",
        close: "]",
        empty: "[]",
    };
    const MAPPING: Delimiters = Delimiters {
        open: "{",
        close: "}",
        empty: "{}",
    };
    const RECORD: Delimiters = Delimiters {
        open: "{ ",
        close: " }",
        empty: "{}",
    };
}

/// One collection element in its inline and one-per-line forms.
struct Entry {
    inline: String,
    labeled: String,
}

impl Entry {
    fn indexed(index: usize, value: &Value, limits: &RenderLimits) -> Self {
        let repr = value.repr();
        let repr = truncate_inline(&repr, limits.max_item_width);
        Entry {
            labeled: format!("[{index}] {repr}"),
            inline: repr.into_owned(),
        }
    }

    fn keyed(key: &str, value: &Value, limits: &RenderLimits) -> Self {
        let line = format!("{key}: {value}");
        let line = truncate_inline(&line, limits.max_item_width).into_owned();
        Entry {
            inline: line.clone(),
            labeled: line,
        }
    }
}

fn render_record(record: &Record, limits: &RenderLimits) -> FormattedBlock {
    let fields = record.fields();
    let mut block = render_collection(
        &Delimiters::RECORD,
        fields.len(),
        |i| Entry::keyed(&fields[i].0, &fields[i].1, limits),
        limits,
    );
    if let Some(name) = record.name() {
        if fields.is_empty() {
            block.lines[0] = name.to_owned();
        } else if block.is_single_line() {
            block.lines[0] = format!("{name} {}", block.lines[0]);
        } else {
            block.lines.insert(0, format!("{name}:"));
        }
    }
    block
}

/// Shared inline / head-tail layout for sequences, mappings, and records.
///
/// `entry` is only called for elements that end up shown.
fn render_collection(
    delimiters: &Delimiters,
    total: usize,
    entry: impl Fn(usize) -> Entry,
    limits: &RenderLimits,
) -> FormattedBlock {
    if total == 0 {
        return FormattedBlock::single(delimiters.empty.to_owned(), 0);
    }

    if total <= limits.inline_items {
        let mut line = String::from(delimiters.open);
        for i in 0..total {
            if i > 0 {
                line.push_str(", ");
            }
            line.push_str(&entry(i).inline);
        }
        line.push_str(delimiters.close);
        return FormattedBlock::single(line, total);
    }

    let head = limits.head.max(1);
    let tail = limits.tail;
    if head.saturating_add(tail) >= total {
        return FormattedBlock {
            lines: (0..total).map(|i| entry(i).labeled).collect(),
            total_count: total,
            shown: total,
            truncated: false,
        };
    }

    let omitted = total - head - tail;
    let mut lines: Vec<String> = (0..head).map(|i| entry(i).labeled).collect();
    lines.push(format!("... {omitted} more"));
    let mut annotation = format!("(showing first {head}");
    if tail > 0 {
        lines.extend((total - tail..total).map(|i| entry(i).labeled));
        let _ = write!(annotation, " and last {tail}");
    }
    let _ = write!(annotation, " of {total})");
    lines.push(annotation);

    FormattedBlock {
        lines,
        total_count: total,
        shown: head + tail,
        truncated: true,
    }
}
