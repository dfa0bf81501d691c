//! The assembled diagnostic message.
//!
//! A [`DiagnosticMessage`] is built in three fixed sections: a headline,
//! labeled details (plus notes), and hints. Its `Display` impl produces the
//! final text:
//!
//! ```text
//! <custom message, if any>
//! Expected collection to contain element
//!   Collection: ["user-one", "user_two", "UserThree", "user-3", "userThree"]
//!   Missing:    "user3"
//!   = hint: "user-3" has 1 extra character (index 3)
//! ```
//!
//! Multi-line blocks are placed under their label, indented.

use std::fmt;

use crate::render::FormattedBlock;

/// One labeled row of the details section.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Detail {
    pub label: String,
    pub lines: Vec<String>,
}

/// A diagnostic under construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DiagnosticMessage {
    /// Caller-supplied text, printed verbatim before everything else.
    pub custom: Option<String>,
    pub headline: String,
    pub details: Vec<Detail>,
    /// Secondary facts about the values, printed after the details.
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl DiagnosticMessage {
    pub fn new(headline: impl Into<String>) -> Self {
        DiagnosticMessage {
            headline: headline.into(),
            ..DiagnosticMessage::default()
        }
    }

    /// Set the caller's custom message. Empty messages are ignored.
    #[must_use]
    pub fn with_custom(mut self, custom: Option<&str>) -> Self {
        self.custom = custom.filter(|c| !c.is_empty()).map(str::to_owned);
        self
    }

    /// Add a single-line detail.
    #[must_use]
    pub fn with_detail(mut self, label: impl Into<String>, text: impl Into<String>) -> Self {
        self.details.push(Detail {
            label: label.into(),
            lines: vec![text.into()],
        });
        self
    }

    /// Add a rendered block as a detail.
    #[must_use]
    pub fn with_block(self, label: impl Into<String>, block: FormattedBlock) -> Self {
        self.with_lines(label, block.lines)
    }

    /// Add a detail spanning several lines.
    #[must_use]
    pub fn with_lines(mut self, label: impl Into<String>, lines: Vec<String>) -> Self {
        self.details.push(Detail {
            label: label.into(),
            lines,
        });
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    #[must_use]
    pub fn with_hints<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hints.extend(hints.into_iter().map(Into::into));
        self
    }

    pub fn has_hints(&self) -> bool {
        !self.hints.is_empty()
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(custom) = &self.custom {
            writeln!(f, "{custom}")?;
        }
        f.write_str(&self.headline)?;

        // Labels of single-line details share one column.
        let width = self
            .details
            .iter()
            .filter(|d| d.lines.len() == 1)
            .map(|d| d.label.chars().count() + 1)
            .max()
            .unwrap_or(0);

        for detail in &self.details {
            let label = format!("{}:", detail.label);
            match detail.lines.as_slice() {
                [line] => write!(f, "\n  {label:<width$} {line}")?,
                lines => {
                    write!(f, "\n  {label}")?;
                    for line in lines {
                        write!(f, "\n    {line}")?;
                    }
                }
            }
        }

        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }

        for hint in &self.hints {
            write!(f, "\n  = hint: {hint}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
