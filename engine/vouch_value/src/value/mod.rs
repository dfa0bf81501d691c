//! Shape-tagged value snapshots.
//!
//! A [`Value`] is an immutable copy of whatever an assertion compared. Its
//! shape is fixed at construction time: every consumer dispatches on the
//! enum variant instead of probing types at runtime.
//!
//! Mapping keys are kept in canonical order from construction onward, so no
//! consumer can observe the iteration order of the caller's container.

use std::cmp::Ordering;
use std::fmt;

use crate::scalar::{Number, Scalar};
use crate::stack::ensure_sufficient_stack;
use crate::Inspect;

/// Structural classification of a value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Shape {
    Scalar,
    Sequence,
    Mapping,
    Record,
    Nullable,
}

impl Shape {
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Scalar => "scalar",
            Shape::Sequence => "sequence",
            Shape::Mapping => "mapping",
            Shape::Record => "record",
            Shape::Nullable => "nullable",
        }
    }

    /// Whether values of this shape have child values.
    pub fn is_composite(self) -> bool {
        matches!(self, Shape::Sequence | Shape::Mapping | Shape::Record)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A snapshot of an actual or expected datum.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Value {
    Scalar(Scalar),
    /// Ordered, indexed elements (vectors, slices, tuples, sets).
    Sequence(Vec<Value>),
    /// Unique keys in canonical order. Build with [`Value::mapping`].
    Mapping(Vec<(Value, Value)>),
    /// Named fields in declaration order.
    Record(Record),
    /// A value that may be absent.
    Nullable(Option<Box<Value>>),
}

// Constructors

impl Value {
    pub fn bool(v: bool) -> Self {
        Value::Scalar(Scalar::Bool(v))
    }

    pub fn int(v: i64) -> Self {
        Value::Scalar(Scalar::Int(v))
    }

    pub fn uint(v: u64) -> Self {
        Value::Scalar(Scalar::UInt(v))
    }

    pub fn float(v: f64) -> Self {
        Value::Scalar(Scalar::Float(v))
    }

    pub fn char(c: char) -> Self {
        Value::Scalar(Scalar::Char(c))
    }

    pub fn str(s: impl Into<String>) -> Self {
        Value::Scalar(Scalar::Str(s.into()))
    }

    pub fn unit() -> Self {
        Value::Scalar(Scalar::Unit)
    }

    pub fn null() -> Self {
        Value::Nullable(None)
    }

    pub fn some(inner: Value) -> Self {
        Value::Nullable(Some(Box::new(inner)))
    }

    pub fn sequence(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Sequence(items.into_iter().collect())
    }

    /// Sequence in canonical element order, for unordered sets.
    pub fn sorted_sequence(items: impl IntoIterator<Item = Value>) -> Self {
        let mut items: Vec<Value> = items.into_iter().collect();
        items.sort_by(Value::canonical_cmp);
        Value::Sequence(items)
    }

    /// Mapping with keys sorted canonically.
    ///
    /// If a key appears more than once, the last entry wins.
    pub fn mapping(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        let mut entries: Vec<(Value, Value)> = entries.into_iter().collect();
        entries.sort_by(|a, b| a.0.canonical_cmp(&b.0));

        let mut unique: Vec<(Value, Value)> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match unique.last_mut() {
                Some(last) if last.0.canonical_cmp(&key) == Ordering::Equal => last.1 = value,
                _ => unique.push((key, value)),
            }
        }
        Value::Mapping(unique)
    }
}

// Accessors

impl Value {
    pub fn shape(&self) -> Shape {
        match self {
            Value::Scalar(_) => Shape::Scalar,
            Value::Sequence(_) => Shape::Sequence,
            Value::Mapping(_) => Shape::Mapping,
            Value::Record(_) => Shape::Record,
            Value::Nullable(_) => Shape::Nullable,
        }
    }

    /// Name of the value's type as shown in diagnostics.
    ///
    /// Scalars report their kind (`int`, `string`, ...), named records their
    /// declared name, and everything else its shape.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Scalar(s) => s.type_name(),
            Value::Record(r) => r.name().unwrap_or("record"),
            other => other.shape().as_str(),
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        self.as_scalar().and_then(Scalar::as_number)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Nullable(None))
    }

    /// Element count for sequences and mappings, character count for strings.
    ///
    /// Other shapes have no length.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Scalar(Scalar::Str(s)) => Some(s.chars().count()),
            Value::Sequence(items) => Some(items.len()),
            Value::Mapping(entries) => Some(entries.len()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> Option<bool> {
        self.len().map(|n| n == 0)
    }

    /// Look up a mapping entry by key.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        let entries = self.as_mapping()?;
        entries
            .binary_search_by(|(k, _)| k.canonical_cmp(key))
            .ok()
            .map(|idx| &entries[idx].1)
    }

    /// Rust-like textual representation.
    pub fn repr(&self) -> String {
        self.to_string()
    }

    fn shape_rank(&self) -> u8 {
        match self {
            Value::Nullable(None) => 0,
            Value::Scalar(_) => 1,
            Value::Sequence(_) => 2,
            Value::Mapping(_) => 3,
            Value::Record(_) => 4,
            Value::Nullable(Some(_)) => 5,
        }
    }

    /// Total order over values, used to canonicalize keys and sets.
    pub fn canonical_cmp(&self, other: &Value) -> Ordering {
        ensure_sufficient_stack(|| match (self, other) {
            (Value::Scalar(a), Value::Scalar(b)) => a.canonical_cmp(b),
            (Value::Sequence(a), Value::Sequence(b)) => cmp_slices(a, b, Value::canonical_cmp),
            (Value::Mapping(a), Value::Mapping(b)) => cmp_slices(a, b, |x, y| {
                x.0.canonical_cmp(&y.0).then_with(|| x.1.canonical_cmp(&y.1))
            }),
            (Value::Record(a), Value::Record(b)) => a
                .name
                .cmp(&b.name)
                .then_with(|| {
                    cmp_slices(&a.fields, &b.fields, |x, y| {
                        x.0.cmp(&y.0).then_with(|| x.1.canonical_cmp(&y.1))
                    })
                }),
            (Value::Nullable(Some(a)), Value::Nullable(Some(b))) => a.canonical_cmp(b),
            (a, b) => a.shape_rank().cmp(&b.shape_rank()),
        })
    }
}

fn cmp_slices<T>(a: &[T], b: &[T], mut cmp: impl FnMut(&T, &T) -> Ordering) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        let ord = cmp(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            Value::Scalar(s) => write!(f, "{s}"),
            Value::Sequence(items) => {
                f.write_str("[")?;
                write_separated(f, items, |f, item| write!(f, "{item}"))?;
                f.write_str("]")
            }
            Value::Mapping(entries) => {
                f.write_str("{")?;
                write_separated(f, entries, |f, (k, v)| write!(f, "{k}: {v}"))?;
                f.write_str("}")
            }
            Value::Record(r) => write!(f, "{r}"),
            Value::Nullable(None) => f.write_str("None"),
            Value::Nullable(Some(inner)) => write!(f, "Some({inner})"),
        })
    }
}

fn write_separated<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    mut write_item: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_item(f, item)?;
    }
    Ok(())
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

/// A struct-like aggregate of named fields.
///
/// ```
/// use vouch_value::{Record, Value};
///
/// let user: Value = Record::named("User")
///     .field("name", "John")
///     .field("age", &30)
///     .into();
/// assert_eq!(user.to_string(), r#"User { name: "John", age: 30 }"#);
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Record {
    name: Option<String>,
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn named(name: impl Into<String>) -> Self {
        Record {
            name: Some(name.into()),
            fields: Vec::new(),
        }
    }

    pub fn anonymous() -> Self {
        Record::default()
    }

    /// Append a field by snapshotting `value`.
    ///
    /// Re-declaring a field replaces its value but keeps its position.
    #[must_use]
    pub fn field<T: Inspect + ?Sized>(self, name: impl Into<String>, value: &T) -> Self {
        self.with_value(name, value.inspect())
    }

    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: Value) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == field)
            .map(|(_, v)| v)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            f.write_str(name)?;
            if self.fields.is_empty() {
                return Ok(());
            }
            f.write_str(" ")?;
        }
        if self.fields.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{ ")?;
        write_separated(f, &self.fields, |f, (n, v)| write!(f, "{n}: {v}"))?;
        f.write_str(" }")
    }
}

#[cfg(test)]
mod tests;
