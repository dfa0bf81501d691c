//! Per-call formatting options.

use crate::config::RenderLimits;
use crate::similar::MatchMode;

/// Options recognized by every [`Engine`](crate::Engine) entry point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Options {
    /// Printed verbatim on its own line before the diagnostic.
    pub message: Option<String>,
    /// The failed check compared strings case-insensitively.
    pub ignore_case: bool,
    /// Overrides the engine's render limits for this call.
    pub limits: Option<RenderLimits>,
}

impl Options {
    pub fn new() -> Self {
        Options::default()
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn ignoring_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: RenderLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub(crate) fn match_mode(&self) -> MatchMode {
        if self.ignore_case {
            MatchMode::IgnoreCase
        } else {
            MatchMode::CaseSensitive
        }
    }
}
