//! Value snapshots for assertion diagnostics.
//!
//! Every datum an assertion compares is captured once as a [`Value`], a
//! closed enum of five shapes:
//!
//! - [`Shape::Scalar`]: booleans, numbers, characters, strings, unit
//! - [`Shape::Sequence`]: ordered, indexed elements
//! - [`Shape::Mapping`]: unique keys in canonical order
//! - [`Shape::Record`]: named fields in declaration order
//! - [`Shape::Nullable`]: a value that may be absent
//!
//! Capture goes through the [`Inspect`] trait. After that, consumers only
//! `match` on variants, and no container iteration order survives into a
//! snapshot.

mod inspect;
mod scalar;
mod stack;
mod value;

pub use inspect::Inspect;
pub use scalar::{Number, Scalar};
pub use stack::ensure_sufficient_stack;
pub use value::{Record, Shape, Value};
