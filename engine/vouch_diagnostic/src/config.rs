//! Engine configuration.
//!
//! All thresholds live here, fixed at [`Engine`](crate::Engine) construction.
//! Nothing is process-global, so tests can pin any boundary they need.

use thiserror::Error;

/// A degenerate configuration value.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("similarity threshold divisor must be at least 1")]
    ZeroThresholdDivisor,
    #[error("render line width must be at least 1")]
    ZeroLineWidth,
    #[error("render max_lines must be at least 2 (head and tail)")]
    TooFewLines,
    #[error("render head must show at least one element")]
    ZeroHead,
    #[error("diff max_depth must be at least 1")]
    ZeroDepth,
    #[error("{name} must be a finite, non-negative number (got {value})")]
    InvalidDelta { name: &'static str, value: f64 },
}

/// Tuning for the similarity matcher.
#[derive(Clone, Debug, PartialEq)]
pub struct SimilarityConfig {
    /// Maximum number of hints reported.
    pub max_hints: usize,
    /// Lower bound on the edit-distance threshold.
    pub min_threshold: usize,
    /// Threshold is `query_len / threshold_divisor`, floored at `min_threshold`.
    pub threshold_divisor: usize,
    /// Queries longer than this (in chars) skip edit distance entirely.
    pub max_query_len: usize,
    /// Absolute tolerance for numeric proximity.
    pub numeric_abs_delta: f64,
    /// Tolerance relative to the query's magnitude.
    pub numeric_rel_delta: f64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        SimilarityConfig {
            max_hints: 3,
            min_threshold: 1,
            threshold_divisor: 4,
            max_query_len: 20,
            numeric_abs_delta: 1.0,
            numeric_rel_delta: 0.1,
        }
    }
}

impl SimilarityConfig {
    /// Maximum edit distance for a query of `query_len` chars.
    pub fn threshold(&self, query_len: usize) -> usize {
        (query_len / self.threshold_divisor.max(1)).max(self.min_threshold)
    }

    /// Maximum numeric difference for a query of magnitude `query`.
    pub fn numeric_tolerance(&self, query: f64) -> f64 {
        self.numeric_abs_delta
            .max(self.numeric_rel_delta * query.abs())
    }
}

/// Tuning for the numeric context resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextConfig {
    /// Sorted neighbors shown on each side of the insertion point.
    pub radius: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        ContextConfig { radius: 2 }
    }
}

/// Tuning for the structural differencer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffConfig {
    /// Nesting depth past which a `TooDeep` marker replaces recursion.
    pub max_depth: usize,
    /// Differences listed in a message before the rest are summarized.
    pub max_entries: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        DiffConfig {
            max_depth: 64,
            max_entries: 10,
        }
    }
}

/// Width and count limits for the content formatter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderLimits {
    /// Strings up to this many chars (with no line break) render on one line.
    pub short_string: usize,
    /// Chunk width for long strings.
    pub line_width: usize,
    /// Chunks shown before head/tail elision kicks in.
    pub max_lines: usize,
    /// Collections up to this size render inline.
    pub inline_items: usize,
    /// Leading elements shown for large collections.
    pub head: usize,
    /// Trailing elements shown for large collections (0 = none).
    pub tail: usize,
    /// Element representations are cut to this many chars.
    pub max_item_width: usize,
}

impl Default for RenderLimits {
    fn default() -> Self {
        RenderLimits {
            short_string: 80,
            line_width: 80,
            max_lines: 10,
            inline_items: 5,
            head: 5,
            tail: 0,
            max_item_width: 120,
        }
    }
}

impl RenderLimits {
    /// Limits that never truncate (for testing).
    pub fn unlimited() -> Self {
        RenderLimits {
            max_lines: usize::MAX,
            head: usize::MAX,
            max_item_width: usize::MAX,
            ..RenderLimits::default()
        }
    }

    /// Show the first `head` elements of large collections and nothing else.
    #[must_use]
    pub fn with_head(mut self, head: usize) -> Self {
        self.head = head;
        self.tail = 0;
        self
    }

    /// Show `head` leading and `tail` trailing elements of large collections.
    #[must_use]
    pub fn with_head_and_tail(mut self, head: usize, tail: usize) -> Self {
        self.head = head;
        self.tail = tail;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.line_width == 0 {
            return Err(ConfigError::ZeroLineWidth);
        }
        if self.max_lines < 2 {
            return Err(ConfigError::TooFewLines);
        }
        if self.head == 0 {
            return Err(ConfigError::ZeroHead);
        }
        Ok(())
    }

    /// Clamp degenerate limits to the smallest usable values.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if self.line_width == 0 {
            tracing::debug!("render line_width was 0, using 1");
            self.line_width = 1;
        }
        if self.max_lines < 2 {
            tracing::debug!(max_lines = self.max_lines, "render max_lines too small, using 2");
            self.max_lines = 2;
        }
        if self.head == 0 {
            tracing::debug!("render head was 0, using 1");
            self.head = 1;
        }
        if self.max_item_width < 4 {
            self.max_item_width = 4;
        }
        self
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EngineConfig {
    pub similarity: SimilarityConfig,
    pub context: ContextConfig,
    pub diff: DiffConfig,
    pub render: RenderLimits,
}

impl EngineConfig {
    /// Report the first degenerate value, if any.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.similarity.threshold_divisor == 0 {
            return Err(ConfigError::ZeroThresholdDivisor);
        }
        check_delta("numeric_abs_delta", self.similarity.numeric_abs_delta)?;
        check_delta("numeric_rel_delta", self.similarity.numeric_rel_delta)?;
        if self.diff.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        self.render.validate()
    }

    /// Clamp every degenerate value to a safe minimum.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if self.similarity.threshold_divisor == 0 {
            tracing::debug!("similarity threshold_divisor was 0, using 1");
            self.similarity.threshold_divisor = 1;
        }
        self.similarity.numeric_abs_delta = sanitize_delta(self.similarity.numeric_abs_delta);
        self.similarity.numeric_rel_delta = sanitize_delta(self.similarity.numeric_rel_delta);
        if self.diff.max_depth == 0 {
            tracing::debug!("diff max_depth was 0, using 1");
            self.diff.max_depth = 1;
        }
        self.render = self.render.sanitized();
        self
    }
}

fn check_delta(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDelta { name, value })
    }
}

fn sanitize_delta(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        tracing::debug!(value, "numeric delta invalid, using 0");
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn threshold_scales_with_length() {
        let config = SimilarityConfig::default();
        assert_eq!(config.threshold(0), 1);
        assert_eq!(config.threshold(5), 1);
        assert_eq!(config.threshold(8), 2);
        assert_eq!(config.threshold(20), 5);
    }

    #[test]
    fn numeric_tolerance_uses_larger_bound() {
        let config = SimilarityConfig::default();
        assert!((config.numeric_tolerance(5.0) - 1.0).abs() < f64::EPSILON);
        assert!((config.numeric_tolerance(-200.0) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn validate_reports_degenerate_values() {
        let mut config = EngineConfig::default();
        config.render.max_lines = 1;
        assert_eq!(config.validate(), Err(ConfigError::TooFewLines));

        let mut config = EngineConfig::default();
        config.similarity.numeric_rel_delta = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDelta {
                name: "numeric_rel_delta",
                ..
            })
        ));
    }

    #[test]
    fn sanitized_is_always_valid() {
        let mut config = EngineConfig::default();
        config.similarity.threshold_divisor = 0;
        config.similarity.numeric_abs_delta = -1.0;
        config.diff.max_depth = 0;
        config.render = RenderLimits {
            short_string: 0,
            line_width: 0,
            max_lines: 0,
            inline_items: 0,
            head: 0,
            tail: 0,
            max_item_width: 0,
        };
        assert_eq!(config.sanitized().validate(), Ok(()));
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = ConfigError::InvalidDelta {
            name: "numeric_abs_delta",
            value: -2.0,
        };
        assert_eq!(
            err.to_string(),
            "numeric_abs_delta must be a finite, non-negative number (got -2)"
        );
    }
}
