//! Ordering and range checks.

use std::cmp::Ordering;
use std::fmt;

use vouch_value::{Number, Value};

use super::{finish, headline, Engine};
use crate::message::DiagnosticMessage;
use crate::options::Options;
use crate::render::{self, truncate_inline};
use crate::similar::format_delta;

/// Elements shown on each side of a sort violation.
const VIOLATION_RADIUS: usize = 2;

/// Direction a sequence was expected to be sorted in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }

    /// Whether `prev` may precede `next`, given `prev.cmp(next)`.
    fn allows(self, ordering: Ordering) -> bool {
        match self {
            SortOrder::Ascending => ordering != Ordering::Greater,
            SortOrder::Descending => ordering != Ordering::Less,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Engine {
    /// `sequence` was not sorted in `order`.
    ///
    /// Reports the first adjacent pair out of order, the elements around it,
    /// and how many pairs are out of order in total.
    #[tracing::instrument(level = "trace", skip_all, fields(family = "sorted", order = %order))]
    pub fn sorted(&self, sequence: &Value, order: SortOrder, options: &Options) -> String {
        let headline = headline(
            &format!("Expected sequence to be sorted in {order} order"),
            options,
        );
        let Some(items) = sequence.as_sequence() else {
            return self.degraded(
                headline,
                sequence,
                format!("{} values have no element order", sequence.type_name()),
                options,
            );
        };

        let violations: Vec<usize> = (1..items.len())
            .filter(|&i| !order.allows(compare(&items[i - 1], &items[i], options)))
            .collect();
        let limits = self.limits(options);
        let mut message =
            DiagnosticMessage::new(headline).with_block("Sequence", render::render(sequence, &limits));

        let Some(&first) = violations.first() else {
            message = message.with_note("no adjacent pair is out of order");
            return finish(message, options);
        };

        let relation = match order {
            SortOrder::Ascending => "greater",
            SortOrder::Descending => "less",
        };
        message = message.with_detail(
            "First violation",
            format!(
                "{} at index {} is {relation} than {} at index {first}",
                items[first - 1],
                first - 1,
                items[first]
            ),
        );

        let start = first.saturating_sub(VIOLATION_RADIUS);
        let end = (first + VIOLATION_RADIUS).min(items.len());
        let around: Vec<String> = (start..end)
            .map(|i| {
                let repr = items[i].repr();
                format!("[{i}] {}", truncate_inline(&repr, limits.max_item_width))
            })
            .collect();
        message = message.with_detail("Around violation", around.join(", "));

        if violations.len() > 1 {
            message = message.with_note(format!(
                "{} adjacent pairs are out of order",
                violations.len()
            ));
        }
        finish(message, options)
    }

    /// `actual` was outside the inclusive range `[low, high]`.
    #[tracing::instrument(level = "trace", skip_all, fields(family = "in_range"))]
    pub fn in_range(&self, actual: &Value, low: &Value, high: &Value, options: &Options) -> String {
        const HEADLINE: &str = "Expected value to be within range";
        let (Some(value), Some(min), Some(max)) = (actual.as_number(), low.as_number(), high.as_number())
        else {
            let types = [actual, low, high].map(Value::type_name).join(", ");
            return self.degraded(
                HEADLINE,
                actual,
                format!("range checks need numbers (got {types})"),
                options,
            );
        };

        let mut message = DiagnosticMessage::new(HEADLINE)
            .with_detail("Range", format!("[{min}, {max}]"))
            .with_detail("Actual", value.to_string());

        let hint = if min.partial_cmp(&max) == Some(Ordering::Greater) {
            Some(format!(
                "the range is empty: lower bound {min} exceeds upper bound {max}"
            ))
        } else if value.is_nan() {
            Some("NaN is not within any range".to_owned())
        } else if value < min {
            Some(out_of_bounds(value, min, "below the lower bound"))
        } else if value > max {
            Some(out_of_bounds(value, max, "above the upper bound"))
        } else {
            None
        };
        message = message.with_hints(hint);
        finish(message, options)
    }
}

fn out_of_bounds(value: Number, bound: Number, side: &str) -> String {
    format!("{value} is {} {side}", format_delta(value.abs_diff(bound)))
}

/// Canonical order, with numbers compared by value and strings folded when
/// the check ignored case.
fn compare(a: &Value, b: &Value, options: &Options) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_number(), b.as_number()) {
        return x.total_cmp(y);
    }
    match (options.ignore_case, a.as_str(), b.as_str()) {
        (true, Some(x), Some(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        _ => a.canonical_cmp(b),
    }
}
