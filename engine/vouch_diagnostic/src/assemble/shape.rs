//! Length, emptiness, and type checks.

use std::fmt::Write;

use vouch_value::{Scalar, Shape, Value};

use super::{finish, list_positions, Engine};
use crate::message::DiagnosticMessage;
use crate::options::Options;
use crate::render;
use crate::similar::{self, SimilarityKind};

/// Extra elements listed in a surplus hint.
const MAX_SURPLUS_SHOWN: usize = 3;

impl Engine {
    /// `value` had the wrong length.
    #[tracing::instrument(level = "trace", skip_all, fields(family = "length", expected = expected))]
    pub fn length(&self, value: &Value, expected: usize, options: &Options) -> String {
        let headline = format!("Expected value to have length {expected}");
        let Some(actual) = value.len() else {
            return self.degraded(headline, value, no_length(value), options);
        };
        let mut message = DiagnosticMessage::new(headline)
            .with_detail("Expected length", expected.to_string())
            .with_detail("Actual length", actual.to_string())
            .with_block("Value", render::render(value, &self.limits(options)));

        if actual > expected {
            let surplus = actual - expected;
            let mut hint = format!("{surplus} more {} than expected", unit(value, surplus));
            if let Some(items) = value.as_sequence() {
                let _ = write!(
                    hint,
                    "; extra elements start at index {expected}: {}",
                    list_positions(&items[expected..], MAX_SURPLUS_SHOWN)
                );
            }
            message = message.with_hint(hint);
        } else if actual < expected {
            let shortfall = expected - actual;
            message = message.with_hint(format!(
                "{shortfall} fewer {} than expected",
                unit(value, shortfall)
            ));
        }
        finish(message, options)
    }

    /// `value` was expected to be empty.
    #[tracing::instrument(level = "trace", skip_all, fields(family = "empty"))]
    pub fn empty(&self, value: &Value, options: &Options) -> String {
        const HEADLINE: &str = "Expected value to be empty";
        let Some(len) = value.len() else {
            return self.degraded(HEADLINE, value, no_length(value), options);
        };
        let message = DiagnosticMessage::new(HEADLINE)
            .with_detail("Length", len.to_string())
            .with_block("Value", render::render(value, &self.limits(options)));
        finish(message, options)
    }

    /// `value` was expected to have at least one element.
    #[tracing::instrument(level = "trace", skip_all, fields(family = "not_empty"))]
    pub fn not_empty(&self, value: &Value, options: &Options) -> String {
        const HEADLINE: &str = "Expected value to be non-empty";
        if value.len().is_none() {
            return self.degraded(HEADLINE, value, no_length(value), options);
        }
        let message = DiagnosticMessage::new(HEADLINE)
            .with_block("Value", render::render(value, &self.limits(options)));
        finish(message, options)
    }

    /// `actual` was not of `expected_type`.
    #[tracing::instrument(level = "trace", skip_all, fields(family = "type_is", expected_type = expected_type))]
    pub fn type_is(&self, actual: &Value, expected_type: &str, options: &Options) -> String {
        let actual_type = actual.type_name();
        let mut message = DiagnosticMessage::new(format!("Expected value of type `{expected_type}`"))
            .with_detail("Expected type", expected_type)
            .with_detail("Actual type", actual_type)
            .with_block("Value", render::render(actual, &self.limits(options)));

        match actual {
            Value::Nullable(Some(inner)) if inner.type_name() == expected_type => {
                message = message.with_hint("the value is wrapped in Some(..); unwrap it first");
            }
            Value::Scalar(Scalar::Str(text))
                if is_numeric_type(expected_type) && text.trim().parse::<f64>().is_ok() =>
            {
                message =
                    message.with_hint(format!("the string {text:?} holds a number; parse it first"));
            }
            _ => {}
        }

        if actual_type != expected_type && !is_builtin(expected_type) && !is_builtin(actual_type) {
            let threshold = self.config.similarity.threshold(expected_type.chars().count());
            if similar::qualifies(expected_type, actual_type, threshold) {
                let distance = similar::edit_distance(expected_type, actual_type);
                let hint = match similar::classify(expected_type, actual_type, distance) {
                    SimilarityKind::CaseOnly => {
                        "type names differ only in letter case".to_owned()
                    }
                    _ => format!(
                        "type names `{expected_type}` and `{actual_type}` are {distance} edit{} apart",
                        similar::plural_s(distance)
                    ),
                };
                message = message.with_hint(hint);
            }
        }
        finish(message, options)
    }
}

fn is_numeric_type(name: &str) -> bool {
    matches!(name, "int" | "uint" | "float")
}

/// Type names reported for scalars and unnamed shapes.
fn is_builtin(name: &str) -> bool {
    matches!(
        name,
        "bool" | "int" | "uint" | "float" | "char" | "string" | "unit"
            | "sequence" | "mapping" | "record" | "nullable"
    )
}

fn no_length(value: &Value) -> String {
    format!("{} values have no length", value.type_name())
}

/// What `len()` counts for this shape, pluralized for `count`.
fn unit(value: &Value, count: usize) -> &'static str {
    let one = count == 1;
    match value.shape() {
        Shape::Scalar if one => "character",
        Shape::Scalar => "characters",
        Shape::Mapping if one => "entry",
        Shape::Mapping => "entries",
        _ if one => "element",
        _ => "elements",
    }
}
