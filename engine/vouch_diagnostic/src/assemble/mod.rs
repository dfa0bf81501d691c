//! Message assembly, one entry point per assertion family.
//!
//! The [`Engine`] is called after a check has already failed. Each entry
//! point classifies the shapes it was handed, runs only the sub-engines that
//! shape needs, and returns the finished text. Nothing here can fail: a shape
//! an entry point cannot explain yields a degraded message (headline, raw
//! value, and a note) instead.
//!
//! Entry points are grouped by family:
//!
//! | File | Families |
//! |------|----------|
//! | `equality.rs` | `equal`, `not_equal`, `truth`, `none`, `some` |
//! | `containment.rs` | `contains`, `not_contains`, map key/value membership |
//! | `shape.rs` | `length`, `empty`, `not_empty`, `type_is` |
//! | `order.rs` | `sorted`, `in_range` |
//! | `panic.rs` | `panicked`, `did_not_panic`, `panic_message` |

mod containment;
mod equality;
mod order;
mod panic;
mod shape;

pub use order::SortOrder;

use std::fmt::{self, Write};

use vouch_value::{Number, Value};

use crate::config::{ConfigError, EngineConfig, RenderLimits};
use crate::message::DiagnosticMessage;
use crate::neighbors::{self, InsertionContext};
use crate::options::Options;
use crate::render;
use crate::similar::{plural_s, MatchMode};

/// Builds diagnostic messages for failed assertions.
///
/// Holds only immutable configuration, so one engine can be shared across
/// threads.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create an engine, clamping degenerate configuration values.
    pub fn new(config: EngineConfig) -> Self {
        Engine {
            config: config.sanitized(),
        }
    }

    /// Create an engine, rejecting degenerate configuration values.
    pub fn try_new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Engine { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Render limits for one call: the caller's override or the engine's.
    fn limits(&self, options: &Options) -> RenderLimits {
        match &options.limits {
            Some(limits) => limits.clone().sanitized(),
            None => self.config.render.clone(),
        }
    }

    /// Shape-unsupported fallback: headline, raw dump, and a note.
    fn degraded(
        &self,
        headline: impl Into<String>,
        value: &Value,
        note: impl Into<String>,
        options: &Options,
    ) -> String {
        tracing::debug!(shape = %value.shape(), "degrading to raw value dump");
        let message = DiagnosticMessage::new(headline)
            .with_block("Value", render::render(value, &self.limits(options)))
            .with_note(note);
        finish(message, options)
    }

    /// Where `query` would sit among the numbers of `items`, as a hint.
    fn neighbor_hint(&self, query: Number, items: impl Iterator<Item = Number>) -> Option<String> {
        let numbers: Vec<Number> = items.collect();
        let ctx = neighbors::locate(query, &numbers, self.config.context.radius);
        describe_insertion(query, &ctx)
    }
}

/// Attach the caller's custom message and produce the final text.
fn finish(message: DiagnosticMessage, options: &Options) -> String {
    message.with_custom(options.message.as_deref()).to_string()
}

/// Append the case-insensitivity marker when the check ignored case.
fn headline(base: &str, options: &Options) -> String {
    if options.ignore_case {
        format!("{base} (ignoring case)")
    } else {
        base.to_owned()
    }
}

fn describe_insertion(query: Number, ctx: &InsertionContext<Number>) -> Option<String> {
    if ctx.is_empty() || query.is_nan() {
        return None;
    }
    let position = match (ctx.below, ctx.above) {
        (Some(below), Some(above)) => format!("{query} would sort between {below} and {above}"),
        (None, Some(above)) => format!("{query} is smaller than every element (minimum {above})"),
        (Some(below), None) => format!("{query} is larger than every element (maximum {below})"),
        (None, None) => return None,
    };
    let mut window: Vec<String> = ctx.window.iter().map(ToString::to_string).collect();
    window.insert(ctx.window_split, format!("<{query}>"));
    Some(format!("{position}; sorted neighborhood: {}", window.join(", ")))
}

/// Hints explaining why two strings differ.
///
/// Reports, in order of preference: a pure letter-case difference, a pure
/// surrounding-whitespace difference, or the first differing character.
fn string_hints(expected: &str, actual: &str, mode: MatchMode) -> Vec<String> {
    if expected == actual {
        return Vec::new();
    }
    if expected.to_lowercase() == actual.to_lowercase() {
        return match mode {
            MatchMode::CaseSensitive => vec!["strings differ only in letter case".to_owned()],
            MatchMode::IgnoreCase => Vec::new(),
        };
    }
    if expected.trim() == actual.trim() {
        return vec!["strings differ only in leading or trailing whitespace".to_owned()];
    }

    let expected_chars: Vec<char> = expected.chars().collect();
    let actual_chars: Vec<char> = actual.chars().collect();
    let first = expected_chars
        .iter()
        .zip(&actual_chars)
        .position(|(&e, &a)| !chars_match(e, a, mode));
    let hint = match first {
        Some(i) => format!(
            "first difference at character {i}: expected {:?}, actual {:?}",
            expected_chars[i], actual_chars[i]
        ),
        None if actual_chars.len() > expected_chars.len() => {
            let extra = actual_chars.len() - expected_chars.len();
            format!(
                "actual has {extra} extra character{} at the end",
                plural_s(extra)
            )
        }
        None => {
            let missing = expected_chars.len() - actual_chars.len();
            format!(
                "actual is missing {missing} character{} at the end",
                plural_s(missing)
            )
        }
    };
    vec![hint]
}

fn chars_match(expected: char, actual: char, mode: MatchMode) -> bool {
    match mode {
        MatchMode::CaseSensitive => expected == actual,
        MatchMode::IgnoreCase => {
            expected == actual || expected.to_lowercase().eq(actual.to_lowercase())
        }
    }
}

/// Lowercased `text`, with the index of the source char for every char of
/// the result. Some chars lowercase to more than one char.
fn fold_case(text: &str) -> (String, Vec<usize>) {
    let mut folded = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len());
    for (index, c) in text.chars().enumerate() {
        for lower in c.to_lowercase() {
            folded.push(lower);
            origin.push(index);
        }
    }
    (folded, origin)
}

/// Character index, in `haystack`, of the first case-insensitive occurrence
/// of `needle`.
fn find_ignoring_case(haystack: &str, needle: &str) -> Option<usize> {
    let (folded, origin) = fold_case(haystack);
    let byte = folded.find(&fold_case(needle).0)?;
    let folded_index = folded[..byte].chars().count();
    Some(
        origin
            .get(folded_index)
            .copied()
            .unwrap_or_else(|| haystack.chars().count()),
    )
}

/// [`char_positions`] ignoring letter case; indices refer to `haystack`.
fn char_positions_ignoring_case(haystack: &str, needle: &str) -> Vec<usize> {
    let (folded, origin) = fold_case(haystack);
    let mut positions: Vec<usize> = char_positions(&folded, &fold_case(needle).0)
        .into_iter()
        .filter_map(|i| origin.get(i).copied())
        .collect();
    positions.dedup();
    positions
}

/// Character indices of every occurrence of `needle`, overlapping ones included.
fn char_positions(haystack: &str, needle: &str) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }
    haystack
        .char_indices()
        .enumerate()
        .filter(|(_, (byte, _))| haystack[*byte..].starts_with(needle))
        .map(|(index, _)| index)
        .collect()
}

/// `"index 1, index 4 and 2 more"`-style list, at most `max` items spelled out.
fn list_positions<T: fmt::Display>(positions: &[T], max: usize) -> String {
    let shown: Vec<String> = positions.iter().take(max).map(ToString::to_string).collect();
    let mut text = shown.join(", ");
    if positions.len() > max {
        let _ = write!(text, " and {} more", positions.len() - max);
    }
    text
}
