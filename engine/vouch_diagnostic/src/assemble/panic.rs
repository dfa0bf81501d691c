//! Panic expectations.

use super::{char_positions, finish, headline, string_hints, Engine};
use crate::message::DiagnosticMessage;
use crate::options::Options;
use crate::render;

impl Engine {
    /// The code under test returned normally but was expected to panic.
    #[tracing::instrument(level = "trace", skip_all, fields(family = "did_not_panic"))]
    pub fn did_not_panic(&self, options: &Options) -> String {
        let message =
            DiagnosticMessage::new("Expected function to panic").with_detail("Outcome", "returned normally");
        finish(message, options)
    }

    /// The code under test panicked. `payload` is the panic message when the
    /// payload was a string.
    #[tracing::instrument(level = "trace", skip_all, fields(family = "panicked"))]
    pub fn panicked(&self, payload: Option<&str>, options: &Options) -> String {
        let message = DiagnosticMessage::new("Expected function not to panic");
        let message = match payload {
            Some(text) => {
                message.with_block("Panic message", render::render_str(text, &self.limits(options)))
            }
            None => message.with_detail("Panic message", "<non-string payload>"),
        };
        finish(message, options)
    }

    /// The code under test panicked with an unexpected message.
    #[tracing::instrument(level = "trace", skip_all, fields(family = "panic_message"))]
    pub fn panic_message(&self, actual: &str, expected: &str, options: &Options) -> String {
        let limits = self.limits(options);
        let mut message = DiagnosticMessage::new(headline("Expected panic message to match", options))
            .with_block("Expected", render::render_str(expected, &limits))
            .with_block("Actual", render::render_str(actual, &limits));

        if let Some(index) = char_positions(actual, expected).first() {
            message = message.with_hint(format!(
                "the expected text appears in the actual message at character {index}"
            ));
        } else {
            message = message.with_hints(string_hints(expected, actual, options.match_mode()));
        }
        finish(message, options)
    }
}
