//! "Did you mean?" matching for missing elements.
//!
//! When a collection lacks the element an assertion looked for, the most
//! useful hint is usually a near miss: the same word in different case, a
//! stray separator, a one-letter typo. This module finds those near misses
//! and classifies them.
//!
//! # Design
//!
//! Strings are compared by Levenshtein edit distance with a threshold that
//! grows with the query length. Two cheap equivalences also qualify a
//! candidate regardless of distance:
//!
//! - equality after case folding (`UserId` vs `userid`)
//! - equality of the *loose form*: lowercase, separators dropped, digits
//!   spelled out (`user3` vs `user_three`)
//!
//! Long queries skip edit distance entirely, which bounds the cost to
//! `O(candidates × max_query_len²)`.
//!
//! Numbers use absolute/relative proximity instead.

use std::cmp::Ordering;
use std::fmt;

use rustc_hash::FxHashSet;
use vouch_value::{Number, Value};

use crate::config::SimilarityConfig;

/// How a candidate relates to the query.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SimilarityKind {
    /// Byte-for-byte equal.
    ExactCase,
    /// Equal after case folding.
    CaseOnly,
    /// The candidate is the query plus extra characters.
    ExtraChars,
    /// The candidate is the query minus some characters.
    MissingChars,
    /// Generic edit-distance match.
    Edit,
    /// Numerically close.
    NumericProximity,
}

/// How far a candidate is from the query.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Distance {
    Edits(usize),
    Delta(f64),
}

impl Distance {
    #[expect(
        clippy::cast_precision_loss,
        reason = "edit distances are bounded by string lengths"
    )]
    fn as_f64(self) -> f64 {
        match self {
            Distance::Edits(n) => n as f64,
            Distance::Delta(d) => d,
        }
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Distance::Edits(a), Distance::Edits(b)) => Some(a.cmp(b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

/// Where a candidate came from in its collection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Position {
    Index(usize),
    /// Rendered key of a mapping entry.
    Key(String),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Index(i) => write!(f, "index {i}"),
            Position::Key(k) => write!(f, "key {k}"),
        }
    }
}

/// Whether the failed check compared strings case-insensitively.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MatchMode {
    #[default]
    CaseSensitive,
    IgnoreCase,
}

/// A near miss found in a collection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimilarityCandidate {
    pub candidate: Value,
    pub distance: Distance,
    pub kind: SimilarityKind,
    pub position: Position,
}

impl SimilarityCandidate {
    /// How the candidate relates to the query, without its position.
    pub fn relation(&self) -> String {
        let what = &self.candidate;
        match (self.kind, self.distance) {
            (SimilarityKind::ExactCase, _) => format!("{what} matches exactly"),
            (SimilarityKind::CaseOnly, _) => format!("{what} differs only in letter case"),
            (SimilarityKind::ExtraChars, Distance::Edits(n)) => {
                format!("{what} has {n} extra character{}", plural_s(n))
            }
            (SimilarityKind::MissingChars, Distance::Edits(n)) => {
                format!("{what} is missing {n} character{}", plural_s(n))
            }
            (_, Distance::Edits(n)) => format!("{what} is {n} edit{} away", plural_s(n)),
            (_, Distance::Delta(d)) => format!("{what} differs by {}", format_delta(d)),
        }
    }

    /// One-line hint: the relation plus where the candidate sits.
    pub fn describe(&self) -> String {
        format!("{} ({})", self.relation(), self.position)
    }
}

#[inline]
pub(crate) fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Whole deltas print without a fractional part, tiny ones in exponent form.
pub(crate) fn format_delta(delta: f64) -> String {
    if delta.fract() == 0.0 && delta.abs() < 1e15 {
        format!("{delta}")
    } else {
        format!("{delta:?}")
    }
}

/// Levenshtein edit distance over `char`s.
///
/// ```
/// use vouch_diagnostic::similar::edit_distance;
///
/// assert_eq!(edit_distance("kitten", "sitting"), 3);
/// assert_eq!(edit_distance("user3", "user-3"), 1);
/// ```
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    // Two rows instead of the full matrix
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, a_char) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

fn fold(s: &str) -> String {
    s.to_lowercase()
}

const DIGIT_WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Lowercase, drop separators, spell out ASCII digits.
fn loose_form(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '-' | '_' | ' ' | '.' => {}
            '0'..='9' => out.push_str(DIGIT_WORDS[usize::from(c as u8 - b'0')]),
            c => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Whether `candidate` qualifies as a near miss of `query` at `threshold`.
///
/// Raising the threshold never disqualifies a candidate.
pub fn qualifies(query: &str, candidate: &str, threshold: usize) -> bool {
    if fold(query) == fold(candidate) || loose_form(query) == loose_form(candidate) {
        return true;
    }
    let len_diff = query.chars().count().abs_diff(candidate.chars().count());
    len_diff <= threshold && edit_distance(query, candidate) <= threshold
}

/// Classify a qualifying candidate, given its edit distance from the query.
pub fn classify(query: &str, candidate: &str, distance: usize) -> SimilarityKind {
    if query == candidate {
        return SimilarityKind::ExactCase;
    }
    if fold(query) == fold(candidate) {
        return SimilarityKind::CaseOnly;
    }
    let query_len = query.chars().count();
    let candidate_len = candidate.chars().count();
    if query_len != candidate_len && distance == query_len.abs_diff(candidate_len) {
        if candidate_len > query_len {
            SimilarityKind::ExtraChars
        } else {
            SimilarityKind::MissingChars
        }
    } else {
        SimilarityKind::Edit
    }
}

/// Precomputed forms of the query, shared across candidates.
struct StringQuery<'q> {
    text: &'q str,
    folded: String,
    loose: String,
    len: usize,
    threshold: usize,
    mode: MatchMode,
}

impl StringQuery<'_> {
    /// Edit-distance match: threshold, case folding, or loose form.
    fn fuzzy(&self, text: &str) -> Option<(usize, SimilarityKind)> {
        let folded = fold(text);
        let equivalent = self.folded == folded || self.loose == loose_form(text);
        let len_diff = self.len.abs_diff(text.chars().count());
        if !equivalent && len_diff > self.threshold {
            return None;
        }

        let distance = match self.mode {
            MatchMode::CaseSensitive => edit_distance(self.text, text),
            MatchMode::IgnoreCase => edit_distance(&self.folded, &folded),
        };
        if !equivalent && distance > self.threshold {
            return None;
        }
        Some((distance, classify(self.text, text, distance)))
    }

    /// Exact or case-only match, without edit distance.
    fn exact(&self, text: &str) -> Option<(usize, SimilarityKind)> {
        if self.text == text {
            return Some((0, SimilarityKind::ExactCase));
        }
        if self.folded != fold(text) {
            return None;
        }
        let differing = self
            .text
            .chars()
            .zip(text.chars())
            .filter(|(a, b)| a != b)
            .count();
        let extra = self.len.abs_diff(text.chars().count());
        Some((differing + extra, SimilarityKind::CaseOnly))
    }
}

/// Find string near misses of `query` among `candidates`.
///
/// Non-string candidates are ignored. A candidate string appearing more than
/// once is reported at its first position. The result is ordered by edit
/// distance, ties keep collection order, and it is cut to `max_hints`.
pub fn find_similar<'a, I>(
    query: &str,
    candidates: I,
    config: &SimilarityConfig,
    mode: MatchMode,
) -> Vec<SimilarityCandidate>
where
    I: IntoIterator<Item = (Position, &'a Value)>,
{
    if query.is_empty() || config.max_hints == 0 {
        return Vec::new();
    }

    let len = query.chars().count();
    let query = StringQuery {
        text: query,
        folded: fold(query),
        loose: loose_form(query),
        len,
        threshold: config.threshold(len),
        mode,
    };
    let guarded = len > config.max_query_len;
    if guarded {
        tracing::debug!(
            query_len = len,
            cap = config.max_query_len,
            "query too long for edit distance, reporting exact matches only"
        );
    }

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut found = Vec::new();
    for (position, value) in candidates {
        let Some(text) = value.as_str() else {
            continue;
        };
        if !seen.insert(text) {
            continue;
        }
        let matched = if guarded {
            query.exact(text)
        } else {
            query.fuzzy(text)
        };
        let Some((distance, kind)) = matched else {
            continue;
        };
        if mode == MatchMode::IgnoreCase && kind == SimilarityKind::CaseOnly {
            continue;
        }
        found.push(SimilarityCandidate {
            candidate: value.clone(),
            distance: Distance::Edits(distance),
            kind,
            position,
        });
    }

    // Stable: equal distances keep collection order.
    found.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
    found.truncate(config.max_hints);
    found
}

/// Find numeric candidates close to `query`.
///
/// Candidates within `max(abs_delta, rel_delta × |query|)` qualify. When none
/// does, the single closest candidate is reported instead.
pub fn find_similar_numbers<'a, I>(
    query: Number,
    candidates: I,
    config: &SimilarityConfig,
) -> Vec<SimilarityCandidate>
where
    I: IntoIterator<Item = (Position, &'a Value)>,
{
    if config.max_hints == 0 || query.is_nan() {
        return Vec::new();
    }

    let mut seen: FxHashSet<u64> = FxHashSet::default();
    let mut scored: Vec<(f64, Position, &Value)> = Vec::new();
    for (position, value) in candidates {
        let Some(number) = value.as_number() else {
            continue;
        };
        let delta = query.abs_diff(number);
        if delta.is_nan() || !seen.insert(number.as_f64().to_bits()) {
            continue;
        }
        scored.push((delta, position, value));
    }

    let tolerance = config.numeric_tolerance(query.as_f64());
    let by_delta = |a: &(f64, Position, &Value), b: &(f64, Position, &Value)| {
        a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal)
    };
    let mut chosen: Vec<_> = scored.iter().filter(|s| s.0 <= tolerance).collect();
    if chosen.is_empty() {
        // min_by returns the first minimum, keeping collection order on ties.
        chosen.extend(scored.iter().min_by(|a, b| by_delta(a, b)));
    }
    chosen.sort_by(|a, b| by_delta(a, b));
    chosen.truncate(config.max_hints);

    chosen
        .into_iter()
        .map(|(delta, position, value)| SimilarityCandidate {
            candidate: (*value).clone(),
            distance: Distance::Delta(*delta),
            kind: SimilarityKind::NumericProximity,
            position: position.clone(),
        })
        .collect()
}

/// Enumerate a sequence as `(Position::Index, element)` pairs.
pub fn indexed(items: &[Value]) -> impl Iterator<Item = (Position, &Value)> {
    items
        .iter()
        .enumerate()
        .map(|(i, v)| (Position::Index(i), v))
}
