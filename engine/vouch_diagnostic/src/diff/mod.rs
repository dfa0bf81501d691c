//! Structural diffing of composite values.
//!
//! Compares an expected and an actual [`Value`] and lists every place they
//! differ, each qualified by the path leading to it. Instead of "the two
//! users differ", the caller can say "`Name`: expected "John", actual "Jane"".
//!
//! # Ordering
//!
//! Output is stable: sequence indices ascend, mapping keys follow canonical
//! key order, record fields follow the expected record's declaration order
//! (fields only the actual record has come last).
//!
//! # Depth
//!
//! Recursion is pre-order and bounded by [`DiffConfig::max_depth`]. Past the
//! bound, a single [`DiffKind::TooDeep`] marker replaces the subtree.

use std::cmp::Ordering;
use std::fmt;

use smallvec::SmallVec;
use vouch_value::{ensure_sufficient_stack, Record, Value};

use crate::config::DiffConfig;

/// One step into a nested value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PathSegment {
    Field(String),
    Index(usize),
    /// Rendered mapping key.
    Key(String),
}

/// Location of a difference within nested structure.
///
/// An empty path refers to the top-level values themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DiffPath(SmallVec<[PathSegment; 4]>);

impl DiffPath {
    pub fn root() -> Self {
        DiffPath::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn join(&self, segment: PathSegment) -> Self {
        let mut path = self.clone();
        path.0.push(segment);
        path
    }
}

impl FromIterator<PathSegment> for DiffPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        DiffPath(iter.into_iter().collect())
    }
}

impl fmt::Display for DiffPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("value");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => f.write_str(name)?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
                PathSegment::Key(key) => write!(f, "[{key}]")?,
            }
        }
        Ok(())
    }
}

/// What kind of difference an entry records.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DiffKind {
    /// Both sides present, values differ.
    Changed,
    /// Present in expected, absent in actual.
    Missing,
    /// Absent in expected, present in actual.
    Unexpected,
    /// The two sides have different shapes or record types.
    ShapeMismatch { expected: String, actual: String },
    /// The depth bound was reached before the subtree could be compared.
    TooDeep,
}

/// A single path-qualified difference.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DiffEntry {
    pub path: DiffPath,
    pub kind: DiffKind,
    /// Representation of the expected side; `None` when absent.
    pub expected: Option<String>,
    /// Representation of the actual side; `None` when absent.
    pub actual: Option<String>,
}

impl DiffEntry {
    /// One-line description of this difference.
    pub fn describe(&self) -> String {
        let path = &self.path;
        let expected = self.expected.as_deref().unwrap_or("<absent>");
        let actual = self.actual.as_deref().unwrap_or("<absent>");
        match &self.kind {
            DiffKind::Changed => format!("{path}: expected {expected}, actual {actual}"),
            DiffKind::Missing => format!("{path}: missing (expected {expected})"),
            DiffKind::Unexpected => format!("{path}: unexpected (actual {actual})"),
            DiffKind::ShapeMismatch {
                expected: expected_type,
                actual: actual_type,
            } => format!(
                "{path}: expected {expected_type} {expected}, actual {actual_type} {actual}"
            ),
            DiffKind::TooDeep => format!("{path}: structure too deep to compare"),
        }
    }
}

/// A sequence whose length differs between the two sides.
///
/// Kept apart from [`DiffEntry`]: indices past the shorter length are not
/// compared element-wise, the length fact is reported once instead.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LengthMismatch {
    pub path: DiffPath,
    pub expected: usize,
    pub actual: usize,
}

impl LengthMismatch {
    pub fn describe(&self) -> String {
        format!(
            "{}: expected length {}, actual length {}",
            self.path, self.expected, self.actual
        )
    }
}

/// Everything the differencer found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DiffReport {
    pub entries: Vec<DiffEntry>,
    pub lengths: Vec<LengthMismatch>,
}

impl DiffReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.lengths.is_empty()
    }
}

/// Path-qualified differences between `expected` and `actual`.
///
/// Sequence length mismatches are not included; see [`diff_report`].
pub fn diff(expected: &Value, actual: &Value, config: &DiffConfig) -> Vec<DiffEntry> {
    diff_report(expected, actual, config).entries
}

/// Differences plus sequence length mismatches, both in pre-order.
pub fn diff_report(expected: &Value, actual: &Value, config: &DiffConfig) -> DiffReport {
    let mut differ = Differ {
        max_depth: config.max_depth,
        path: DiffPath::root(),
        report: DiffReport::default(),
    };
    differ.walk(expected, actual, 0);
    differ.report
}

struct Differ {
    max_depth: usize,
    path: DiffPath,
    report: DiffReport,
}

impl Differ {
    fn walk(&mut self, expected: &Value, actual: &Value, depth: usize) {
        if depth >= self.max_depth && !matches!(expected, Value::Scalar(_)) {
            if !same(expected, actual) {
                tracing::debug!(depth, path = %self.path, "diff depth limit reached");
                self.push(DiffKind::TooDeep, None, None);
            }
            return;
        }
        ensure_sufficient_stack(|| self.walk_shape(expected, actual, depth));
    }

    fn walk_shape(&mut self, expected: &Value, actual: &Value, depth: usize) {
        match (expected, actual) {
            (Value::Scalar(e), Value::Scalar(a)) => {
                if e != a {
                    self.push_changed(expected, actual);
                }
            }
            (Value::Sequence(e), Value::Sequence(a)) => {
                if e.len() != a.len() {
                    self.report.lengths.push(LengthMismatch {
                        path: self.path.clone(),
                        expected: e.len(),
                        actual: a.len(),
                    });
                }
                for (i, (ev, av)) in e.iter().zip(a).enumerate() {
                    self.child(PathSegment::Index(i), ev, av, depth);
                }
            }
            (Value::Mapping(e), Value::Mapping(a)) => self.walk_mapping(e, a, depth),
            (Value::Record(e), Value::Record(a)) => self.walk_record(e, a, expected, actual, depth),
            (Value::Nullable(e), Value::Nullable(a)) => match (e, a) {
                (None, None) => {}
                (Some(ev), Some(av)) => self.walk(ev, av, depth + 1),
                _ => self.push_changed(expected, actual),
            },
            _ => self.push_shape_mismatch(expected, actual),
        }
    }

    /// Merge-walk two canonically ordered entry lists.
    fn walk_mapping(&mut self, expected: &[(Value, Value)], actual: &[(Value, Value)], depth: usize) {
        let (mut i, mut j) = (0, 0);
        loop {
            match (expected.get(i), actual.get(j)) {
                (Some((ek, ev)), Some((ak, av))) => match ek.canonical_cmp(ak) {
                    Ordering::Equal => {
                        self.child(PathSegment::Key(ek.repr()), ev, av, depth);
                        i += 1;
                        j += 1;
                    }
                    Ordering::Less => {
                        self.missing(PathSegment::Key(ek.repr()), ev);
                        i += 1;
                    }
                    Ordering::Greater => {
                        self.unexpected(PathSegment::Key(ak.repr()), av);
                        j += 1;
                    }
                },
                (Some((ek, ev)), None) => {
                    self.missing(PathSegment::Key(ek.repr()), ev);
                    i += 1;
                }
                (None, Some((ak, av))) => {
                    self.unexpected(PathSegment::Key(ak.repr()), av);
                    j += 1;
                }
                (None, None) => break,
            }
        }
    }

    fn walk_record(
        &mut self,
        expected: &Record,
        actual: &Record,
        expected_value: &Value,
        actual_value: &Value,
        depth: usize,
    ) {
        if expected.name() != actual.name() {
            self.push_shape_mismatch(expected_value, actual_value);
            return;
        }
        for (name, ev) in expected.fields() {
            let segment = PathSegment::Field(name.clone());
            match actual.get(name) {
                Some(av) => self.child(segment, ev, av, depth),
                None => self.missing(segment, ev),
            }
        }
        for (name, av) in actual.fields() {
            if expected.get(name).is_none() {
                self.unexpected(PathSegment::Field(name.clone()), av);
            }
        }
    }

    fn child(&mut self, segment: PathSegment, expected: &Value, actual: &Value, depth: usize) {
        self.path.0.push(segment);
        self.walk(expected, actual, depth + 1);
        self.path.0.pop();
    }

    fn missing(&mut self, segment: PathSegment, expected: &Value) {
        self.path.0.push(segment);
        self.push(DiffKind::Missing, Some(expected.repr()), None);
        self.path.0.pop();
    }

    fn unexpected(&mut self, segment: PathSegment, actual: &Value) {
        self.path.0.push(segment);
        self.push(DiffKind::Unexpected, None, Some(actual.repr()));
        self.path.0.pop();
    }

    fn push_changed(&mut self, expected: &Value, actual: &Value) {
        self.push(DiffKind::Changed, Some(expected.repr()), Some(actual.repr()));
    }

    fn push_shape_mismatch(&mut self, expected: &Value, actual: &Value) {
        let kind = DiffKind::ShapeMismatch {
            expected: expected.type_name().to_owned(),
            actual: actual.type_name().to_owned(),
        };
        self.push(kind, Some(expected.repr()), Some(actual.repr()));
    }

    fn push(&mut self, kind: DiffKind, expected: Option<String>, actual: Option<String>) {
        self.report.entries.push(DiffEntry {
            path: self.path.clone(),
            kind,
            expected,
            actual,
        });
    }
}

/// Structural equality that grows the stack instead of overflowing it.
pub(crate) fn same(a: &Value, b: &Value) -> bool {
    ensure_sufficient_stack(|| match (a, b) {
        (Value::Scalar(x), Value::Scalar(y)) => x == y,
        (Value::Sequence(x), Value::Sequence(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(p, q)| same(p, q))
        }
        (Value::Mapping(x), Value::Mapping(y)) => {
            x.len() == y.len()
                && x.iter()
                    .zip(y)
                    .all(|((xk, xv), (yk, yv))| same(xk, yk) && same(xv, yv))
        }
        (Value::Record(x), Value::Record(y)) => {
            x.name() == y.name()
                && x.fields().len() == y.fields().len()
                && x.fields()
                    .iter()
                    .all(|(name, xv)| y.get(name).is_some_and(|yv| same(xv, yv)))
        }
        (Value::Nullable(x), Value::Nullable(y)) => match (x, y) {
            (None, None) => true,
            (Some(p), Some(q)) => same(p, q),
            _ => false,
        },
        _ => false,
    })
}
