//! Membership checks: elements, substrings, map keys, and map values.

use vouch_value::{Scalar, Value};

use super::{
    char_positions, char_positions_ignoring_case, find_ignoring_case, finish, headline,
    list_positions, Engine,
};
use crate::diff::{self, same};
use crate::message::DiagnosticMessage;
use crate::options::Options;
use crate::render;
use crate::similar::{self, MatchMode, Position};

/// Positions spelled out in "Found at" details.
const MAX_POSITIONS: usize = 5;

/// Differences up to which a composite element counts as a near miss.
const MAX_NEAR_MISS_FIELDS: usize = 3;

impl Engine {
    /// `collection` did not contain `element`.
    ///
    /// A string collection is searched for a substring. A mapping is checked
    /// for a key. Sequences get similarity hints for strings, insertion
    /// context for numbers, and the closest element for composites.
    #[tracing::instrument(level = "trace", skip_all, fields(family = "contains"))]
    pub fn contains(&self, collection: &Value, element: &Value, options: &Options) -> String {
        match collection {
            Value::Scalar(Scalar::Str(haystack)) => match needle_text(element) {
                Some(needle) => self.string_contains(haystack, &needle, options),
                None => self.degraded(
                    headline("Expected string to contain substring", options),
                    collection,
                    format!("strings cannot contain {} values", element.type_name()),
                    options,
                ),
            },
            Value::Sequence(items) => self.sequence_contains(collection, items, element, options),
            Value::Mapping(_) => self.contains_key(collection, element, options),
            _ => self.degraded(
                headline("Expected collection to contain element", options),
                collection,
                format!("{} values have no elements", collection.type_name()),
                options,
            ),
        }
    }

    /// `collection` contained `element` but should not have.
    #[tracing::instrument(level = "trace", skip_all, fields(family = "not_contains"))]
    pub fn not_contains(&self, collection: &Value, element: &Value, options: &Options) -> String {
        let limits = self.limits(options);
        match collection {
            Value::Scalar(Scalar::Str(haystack)) => {
                let Some(needle) = needle_text(element) else {
                    return self.degraded(
                        headline("Expected string not to contain substring", options),
                        collection,
                        format!("strings cannot contain {} values", element.type_name()),
                        options,
                    );
                };
                let positions = if options.ignore_case {
                    char_positions_ignoring_case(haystack, &needle)
                } else {
                    char_positions(haystack, &needle)
                };
                let mut message = DiagnosticMessage::new(headline(
                    "Expected string not to contain substring",
                    options,
                ))
                .with_block("String", render::render_str(haystack, &limits))
                .with_block("Substring", render::render_str(&needle, &limits));
                if !positions.is_empty() {
                    let positions: Vec<String> =
                        positions.iter().map(|i| format!("character {i}")).collect();
                    message = message.with_detail("Found at", list_positions(&positions, MAX_POSITIONS));
                }
                finish(message, options)
            }
            Value::Sequence(items) => {
                let positions: Vec<String> = items
                    .iter()
                    .enumerate()
                    .filter(|(_, item)| matches_element(item, element, options.match_mode()))
                    .map(|(i, _)| format!("index {i}"))
                    .collect();
                let mut message = DiagnosticMessage::new(headline(
                    "Expected collection not to contain element",
                    options,
                ))
                .with_block("Collection", render::render(collection, &limits))
                .with_block("Element", render::render(element, &limits));
                if !positions.is_empty() {
                    message = message.with_detail("Found at", list_positions(&positions, MAX_POSITIONS));
                }
                finish(message, options)
            }
            Value::Mapping(_) => self.not_contains_key(collection, element, options),
            _ => self.degraded(
                headline("Expected collection not to contain element", options),
                collection,
                format!("{} values have no elements", collection.type_name()),
                options,
            ),
        }
    }

    /// `mapping` had no entry for `key`.
    #[tracing::instrument(level = "trace", skip_all, fields(family = "contains_key"))]
    pub fn contains_key(&self, mapping: &Value, key: &Value, options: &Options) -> String {
        const HEADLINE: &str = "Expected mapping to contain key";
        let Some(entries) = mapping.as_mapping() else {
            return self.degraded(
            headline(HEADLINE, options),
            mapping,
            no_keys(mapping),
            options,
        );
        };
        let limits = self.limits(options);
        let mut message = DiagnosticMessage::new(headline(HEADLINE, options))
            .with_block("Mapping", render::render(mapping, &limits))
            .with_block("Missing key", render::render(key, &limits));

        if let Some(query) = key.as_str() {
            let keys = entries
                .iter()
                .enumerate()
                .map(|(i, (k, _))| (Position::Index(i), k));
            let found =
                similar::find_similar(query, keys, &self.config.similarity, options.match_mode());
            message = message.with_hints(found.iter().map(|c| format!("similar key {}", c.relation())));
        } else if let Some(query) = key.as_number() {
            let keys = entries.iter().filter_map(|(k, _)| k.as_number());
            message = message.with_hints(self.neighbor_hint(query, keys));
        }
        finish(message, options)
    }

    /// `mapping` had an entry for `key` but should not have.
    #[tracing::instrument(level = "trace", skip_all, fields(family = "not_contains_key"))]
    pub fn not_contains_key(&self, mapping: &Value, key: &Value, options: &Options) -> String {
        const HEADLINE: &str = "Expected mapping not to contain key";
        if mapping.as_mapping().is_none() {
            return self.degraded(
            headline(HEADLINE, options),
            mapping,
            no_keys(mapping),
            options,
        );
        }
        let limits = self.limits(options);
        let mut message = DiagnosticMessage::new(headline(HEADLINE, options))
            .with_block("Mapping", render::render(mapping, &limits))
            .with_block("Key", render::render(key, &limits));
        if let Some(value) = mapping.get(key) {
            message = message.with_block("Value at key", render::render(value, &limits));
        }
        finish(message, options)
    }

    /// No entry of `mapping` held `value`.
    #[tracing::instrument(level = "trace", skip_all, fields(family = "contains_value"))]
    pub fn contains_value(&self, mapping: &Value, value: &Value, options: &Options) -> String {
        const HEADLINE: &str = "Expected mapping to contain value";
        let Some(entries) = mapping.as_mapping() else {
            return self.degraded(
            headline(HEADLINE, options),
            mapping,
            no_keys(mapping),
            options,
        );
        };
        let limits = self.limits(options);
        let mut message = DiagnosticMessage::new(headline(HEADLINE, options))
            .with_block("Mapping", render::render(mapping, &limits))
            .with_block("Missing value", render::render(value, &limits));

        let values = entries.iter().map(|(k, v)| (Position::Key(k.repr()), v));
        let found = if let Some(query) = value.as_str() {
            similar::find_similar(query, values, &self.config.similarity, options.match_mode())
        } else if let Some(query) = value.as_number() {
            similar::find_similar_numbers(query, values, &self.config.similarity)
        } else {
            Vec::new()
        };
        message = message.with_hints(found.iter().map(|c| format!("similar value {}", c.describe())));

        if mapping.get(value).is_some() {
            message = message.with_hint(format!("{} is present as a key, not as a value", value.repr()));
        }
        finish(message, options)
    }

    fn string_contains(&self, haystack: &str, needle: &str, options: &Options) -> String {
        let limits = self.limits(options);
        let mut message =
            DiagnosticMessage::new(headline("Expected string to contain substring", options))
                .with_block("String", render::render_str(haystack, &limits))
                .with_block("Substring", render::render_str(needle, &limits));
        if !options.ignore_case {
            if let Some(index) = find_ignoring_case(haystack, needle) {
                message = message.with_hint(format!(
                    "found with different letter case at character {index}"
                ));
            }
        }
        let trimmed = needle.trim();
        if !message.has_hints() && trimmed != needle && !trimmed.is_empty() {
            if let Some(index) = char_positions(haystack, trimmed).first() {
                message = message.with_hint(format!(
                    "found without the surrounding whitespace at character {index}"
                ));
            }
        }
        finish(message, options)
    }

    fn sequence_contains(
        &self,
        collection: &Value,
        items: &[Value],
        element: &Value,
        options: &Options,
    ) -> String {
        let limits = self.limits(options);
        let mut message = DiagnosticMessage::new(headline(
            "Expected collection to contain element",
            options,
        ))
        .with_block("Collection", render::render(collection, &limits))
        .with_block("Missing", render::render(element, &limits));

        if let Some(query) = element.as_str() {
            let found = similar::find_similar(
                query,
                similar::indexed(items),
                &self.config.similarity,
                options.match_mode(),
            );
            message = message.with_hints(found.iter().map(|c| format!("similar element {}", c.describe())));
        } else if let Some(query) = element.as_number() {
            let numbers = items.iter().filter_map(Value::as_number);
            message = message.with_hints(self.neighbor_hint(query, numbers));
            let found =
                similar::find_similar_numbers(query, similar::indexed(items), &self.config.similarity);
            message = message.with_hints(found.iter().map(|c| format!("closest element {}", c.describe())));
        } else if element.shape().is_composite() {
            message = message.with_hints(self.near_miss(items, element));
        }
        finish(message, options)
    }

    /// The composite element of `items` with the fewest differences from
    /// `element`, if it differs in only a few places.
    fn near_miss(&self, items: &[Value], element: &Value) -> Option<String> {
        let (index, entries) = items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.shape() == element.shape() && item.type_name() == element.type_name())
            .map(|(i, item)| (i, diff::diff_report(element, item, &self.config.diff)))
            .filter(|(_, report)| report.lengths.is_empty() && !report.entries.is_empty())
            .map(|(i, report)| (i, report.entries))
            .min_by_key(|(_, entries)| entries.len())?;
        if entries.len() > MAX_NEAR_MISS_FIELDS {
            return None;
        }
        let paths: Vec<String> = entries.iter().map(|e| e.path.to_string()).collect();
        Some(format!(
            "element at index {index} differs only at {}",
            paths.join(", ")
        ))
    }
}

/// Text to search a string for: strings and chars qualify.
fn needle_text(element: &Value) -> Option<String> {
    match element {
        Value::Scalar(Scalar::Str(s)) => Some(s.clone()),
        Value::Scalar(Scalar::Char(c)) => Some(c.to_string()),
        _ => None,
    }
}

fn matches_element(item: &Value, element: &Value, mode: MatchMode) -> bool {
    match (mode, item.as_str(), element.as_str()) {
        (MatchMode::IgnoreCase, Some(a), Some(b)) => a.to_lowercase() == b.to_lowercase(),
        _ => same(item, element),
    }
}

fn no_keys(value: &Value) -> String {
    format!("{} values have no keys", value.type_name())
}
