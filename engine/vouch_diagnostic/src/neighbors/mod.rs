//! Insertion-point context for values missing from ordered collections.
//!
//! "55 is not in the list" is much more useful as "55 would sit between 50
//! and 60". This module sorts a private copy of the collection, finds where
//! the query would be inserted, and returns the neighbors on either side
//! plus a small window of the sorted view.

use std::cmp::Ordering;

/// Where a query would land in the sorted view of a collection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InsertionContext<T> {
    /// Largest element that sorts before the query.
    pub below: Option<T>,
    /// Smallest element that sorts at or after the query.
    pub above: Option<T>,
    /// Leftmost index at which the query keeps the sorted view sorted.
    pub index: usize,
    /// Up to `radius` sorted elements on each side of `index`.
    pub window: Vec<T>,
    /// Number of elements in `window` that sort before the query.
    pub window_split: usize,
    /// Number of comparable elements in the collection.
    pub total: usize,
}

impl<T> InsertionContext<T> {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// The query sorts before every element.
    pub fn is_below_all(&self) -> bool {
        self.total > 0 && self.below.is_none()
    }

    /// The query sorts after every element.
    pub fn is_above_all(&self) -> bool {
        self.total > 0 && self.above.is_none()
    }
}

/// Locate `query` in the sorted view of `collection`.
///
/// The input slice is left untouched. Elements that do not compare with
/// themselves (NaN) are left out of the sorted view.
///
/// ```
/// use vouch_diagnostic::neighbors::locate;
///
/// let ctx = locate(55, &[10, 80, 20, 70, 30, 60, 40, 50], 2);
/// assert_eq!((ctx.below, ctx.above), (Some(50), Some(60)));
/// assert_eq!(ctx.window, [40, 50, 60, 70]);
/// ```
pub fn locate<T: Copy + PartialOrd>(query: T, collection: &[T], radius: usize) -> InsertionContext<T> {
    let mut sorted: Vec<T> = collection
        .iter()
        .copied()
        .filter(|v| v.partial_cmp(v).is_some())
        .collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let index = sorted.partition_point(|v| *v < query);
    let below = index.checked_sub(1).map(|i| sorted[i]);
    let above = sorted.get(index).copied();

    let start = index.saturating_sub(radius);
    let end = index.saturating_add(radius).min(sorted.len());

    InsertionContext {
        below,
        above,
        index,
        window: sorted[start..end].to_vec(),
        window_split: index - start,
        total: sorted.len(),
    }
}

#[cfg(test)]
mod tests;
