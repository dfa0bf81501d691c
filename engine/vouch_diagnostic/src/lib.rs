//! Diagnostic messages for failed test assertions.
//!
//! Given the values a failed check compared, the [`Engine`] explains the
//! failure in a readable, bounded message:
//!
//! - what was expected (headline)
//! - what was actually there (rendered values, path-qualified differences)
//! - how to fix it (near misses, neighbors, case and whitespace hints)
//!
//! ```text
//! Expected collection to contain element
//!   Collection: ["user-one", "user_two", "UserThree", "user-3", "userThree"]
//!   Missing:    "user3"
//!   = hint: similar element "user-3" has 1 extra character (index 3)
//! ```
//!
//! # Sub-engines
//!
//! - [`similar`]: "did you mean?" matching by edit distance or numeric proximity
//! - [`neighbors`]: insertion point and sorted neighbors of a missing number
//! - [`diff`]: path-qualified structural differences
//! - [`render`]: size-bounded rendering of any value
//!
//! Every operation is a pure function of its inputs. An [`Engine`] holds only
//! immutable configuration and can be shared across test threads.

pub mod config;
pub mod diff;
pub mod neighbors;
pub mod render;
pub mod similar;

mod assemble;
mod message;
mod options;

pub use assemble::{Engine, SortOrder};
pub use config::{ConfigError, ContextConfig, DiffConfig, EngineConfig, RenderLimits, SimilarityConfig};
pub use message::{DiagnosticMessage, Detail};
pub use options::Options;
pub use vouch_value::{Inspect, Record, Value};
