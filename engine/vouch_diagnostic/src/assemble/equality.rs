//! Equality, truth, and presence checks.

use std::cmp::Ordering;

use vouch_value::{Number, Scalar, Value};

use super::{finish, headline, list_positions, string_hints, Engine};
use crate::diff::{self, same, DiffReport};
use crate::message::DiagnosticMessage;
use crate::options::Options;
use crate::render;
use crate::similar::{format_delta, plural_s};

impl Engine {
    /// `actual == expected` failed.
    ///
    /// Scalars get a targeted hint (letter case, whitespace, first differing
    /// character, numeric delta). Composites of the same shape get a
    /// path-qualified difference list. Mismatched shapes get a type note.
    #[tracing::instrument(level = "trace", skip_all, fields(family = "equal"))]
    pub fn equal(&self, actual: &Value, expected: &Value, options: &Options) -> String {
        let limits = self.limits(options);
        let message = DiagnosticMessage::new(headline("Expected values to be equal", options))
            .with_block("Expected", render::render(expected, &limits))
            .with_block("Actual", render::render(actual, &limits));

        let message = match (expected, actual) {
            (Value::Scalar(e), Value::Scalar(a)) => scalar_equality(message, e, a, options),
            _ if expected.shape() == actual.shape() => {
                self.structural_equality(message, expected, actual)
            }
            _ => shape_mismatch(message, expected, actual),
        };
        finish(message, options)
    }

    /// `actual != expected` failed.
    #[tracing::instrument(level = "trace", skip_all, fields(family = "not_equal"))]
    pub fn not_equal(&self, actual: &Value, expected: &Value, options: &Options) -> String {
        let mut message = DiagnosticMessage::new(headline("Expected values to differ", options))
            .with_block("Value", render::render(actual, &self.limits(options)));
        if !same(actual, expected) {
            message = message.with_note(format!("compared against {}", expected.repr()));
        }
        finish(message, options)
    }

    /// A boolean condition had the wrong value.
    #[tracing::instrument(level = "trace", skip_all, fields(family = "truth"))]
    pub fn truth(&self, actual: bool, expected: bool, options: &Options) -> String {
        let message = DiagnosticMessage::new(format!("Expected {expected}"))
            .with_detail("Actual", actual.to_string());
        finish(message, options)
    }

    /// The value was expected to be absent.
    #[tracing::instrument(level = "trace", skip_all, fields(family = "none"))]
    pub fn none(&self, actual: &Value, options: &Options) -> String {
        const HEADLINE: &str = "Expected value to be None";
        match actual {
            Value::Nullable(_) => {
                let message = DiagnosticMessage::new(HEADLINE)
                    .with_block("Actual", render::render(actual, &self.limits(options)));
                finish(message, options)
            }
            _ => self.degraded(HEADLINE, actual, not_nullable(actual), options),
        }
    }

    /// The value was expected to be present.
    #[tracing::instrument(level = "trace", skip_all, fields(family = "some"))]
    pub fn some(&self, actual: &Value, options: &Options) -> String {
        const HEADLINE: &str = "Expected value to be Some(..)";
        match actual {
            Value::Nullable(_) => {
                let message = DiagnosticMessage::new(HEADLINE)
                    .with_block("Actual", render::render(actual, &self.limits(options)));
                finish(message, options)
            }
            _ => self.degraded(HEADLINE, actual, not_nullable(actual), options),
        }
    }

    fn structural_equality(
        &self,
        mut message: DiagnosticMessage,
        expected: &Value,
        actual: &Value,
    ) -> DiagnosticMessage {
        let report = diff::diff_report(expected, actual, &self.config.diff);
        if report.is_empty() {
            return message.with_note("no structural difference found");
        }

        let DiffReport { entries, lengths } = report;
        let total = entries.len();
        let max = self.config.diff.max_entries;
        if total > 0 {
            let lines = entries.iter().take(max).map(|e| e.describe()).collect();
            message = message.with_lines("Differences", lines);
            if total > max {
                message = message.with_note(format!("showing first {max} of {total} differences"));
            }
        }
        for length in &lengths {
            message = message.with_note(length.describe());
        }

        if let (Some(e), Some(a)) = (expected.as_sequence(), actual.as_sequence()) {
            message = message.with_hints(sequence_hints(e, a, total));
        }
        message
    }
}

fn not_nullable(value: &Value) -> String {
    format!("{} values are never None", value.type_name())
}

fn scalar_equality(
    message: DiagnosticMessage,
    expected: &Scalar,
    actual: &Scalar,
    options: &Options,
) -> DiagnosticMessage {
    if let (Some(e), Some(a)) = (expected.as_str(), actual.as_str()) {
        return message.with_hints(string_hints(e, a, options.match_mode()));
    }
    if let (Some(e), Some(a)) = (expected.as_number(), actual.as_number()) {
        return numeric_equality(message, expected, actual, e, a);
    }

    let (expected_type, actual_type) = (expected.type_name(), actual.type_name());
    if expected_type == actual_type {
        return message;
    }
    let message = message.with_note(format!(
        "types differ: expected {expected_type}, actual {actual_type}"
    ));
    match (expected.as_number(), actual.as_str()) {
        (Some(number), Some(text)) if parses_as(text, number) => message.with_hint(format!(
            "actual is the string {text:?}; parse it before comparing"
        )),
        _ => match (expected.as_str(), actual.as_number()) {
            (Some(text), Some(number)) if parses_as(text, number) => message.with_hint(format!(
                "expected is the string {text:?}; actual is the number {number}"
            )),
            _ => message,
        },
    }
}

fn parses_as(text: &str, number: Number) -> bool {
    text.trim()
        .parse::<f64>()
        .is_ok_and(|parsed| Number::Float(parsed) == number)
}

fn numeric_equality(
    message: DiagnosticMessage,
    expected_scalar: &Scalar,
    actual_scalar: &Scalar,
    expected: Number,
    actual: Number,
) -> DiagnosticMessage {
    let (expected_type, actual_type) = (expected_scalar.type_name(), actual_scalar.type_name());
    if expected == actual {
        if expected_type == actual_type {
            return message;
        }
        return message.with_note(format!(
            "values are numerically equal but differ in type ({expected_type} vs {actual_type})"
        ));
    }
    if expected.is_nan() || actual.is_nan() {
        return message.with_hint("NaN never equals a number; check for NaN explicitly");
    }

    let delta = actual.abs_diff(expected);
    let direction = match actual.total_cmp(expected) {
        Ordering::Greater => "greater",
        _ => "less",
    };
    let mut message = message.with_hint(format!(
        "actual is {} {direction} than expected",
        format_delta(delta)
    ));
    let scale = expected.as_f64().abs().max(actual.as_f64().abs());
    if matches!(expected, Number::Float(_))
        && matches!(actual, Number::Float(_))
        && delta <= scale * f64::EPSILON * 4.0
    {
        message =
            message.with_hint("the difference is floating-point rounding; compare with a tolerance");
    }
    message
}

fn shape_mismatch(message: DiagnosticMessage, expected: &Value, actual: &Value) -> DiagnosticMessage {
    let message = message.with_note(format!(
        "types differ: expected {}, actual {}",
        expected.type_name(),
        actual.type_name()
    ));
    match (expected, actual) {
        (_, Value::Nullable(Some(inner))) if same(inner, expected) => {
            message.with_hint("actual is wrapped in Some(..); unwrap it before comparing")
        }
        (Value::Nullable(Some(inner)), _) if same(inner, actual) => {
            message.with_hint("expected is Some(..) but actual is the bare value; wrap it in Some")
        }
        _ => message,
    }
}

/// Reordering and surplus/shortfall hints for top-level sequences.
fn sequence_hints(expected: &[Value], actual: &[Value], changed: usize) -> Vec<String> {
    let mut hints = Vec::new();
    if changed > 0 && expected.len() == actual.len() {
        let mut e: Vec<&Value> = expected.iter().collect();
        let mut a: Vec<&Value> = actual.iter().collect();
        e.sort_by(|x, y| x.canonical_cmp(y));
        a.sort_by(|x, y| x.canonical_cmp(y));
        if e.iter().zip(&a).all(|(x, y)| same(x, y)) {
            hints.push("actual has the same elements in a different order".to_owned());
        }
    }
    if changed == 0 && expected.len() != actual.len() {
        let shared = expected.len().min(actual.len());
        let (label, rest) = if actual.len() > expected.len() {
            ("actual has", &actual[shared..])
        } else {
            ("actual is missing", &expected[shared..])
        };
        hints.push(format!(
            "{label} {} element{} at the end: {}",
            rest.len(),
            plural_s(rest.len()),
            list_positions(rest, 3)
        ));
    }
    hints
}
