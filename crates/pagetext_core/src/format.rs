use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const PLACEHOLDER: char = 's';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("format string has no `%s` placeholder")]
    NoPlaceholder,
    #[error("format string has {0} `%s` placeholders, expected exactly one")]
    MultiplePlaceholders(usize),
    #[error("unsupported directive `%{0}` (only `%s` and `%%` are allowed)")]
    UnsupportedDirective(char),
    #[error("format string ends with a lone `%`")]
    TrailingPercent,
}

/// A format string with exactly one `%s` slot, pre-split around the slot.
///
/// `%%` stands for a literal percent sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatString {
    prefix: String,
    suffix: String,
}

impl FormatString {
    pub fn parse(pattern: &str) -> Result<Self, FormatError> {
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut slots = 0usize;
        let mut chars = pattern.chars();

        while let Some(ch) = chars.next() {
            let target = if slots == 0 { &mut prefix } else { &mut suffix };
            if ch != '%' {
                target.push(ch);
                continue;
            }
            match chars.next() {
                Some(PLACEHOLDER) => slots += 1,
                Some('%') => target.push('%'),
                Some(other) => return Err(FormatError::UnsupportedDirective(other)),
                None => return Err(FormatError::TrailingPercent),
            }
        }

        match slots {
            0 => Err(FormatError::NoPlaceholder),
            1 => Ok(Self { prefix, suffix }),
            n => Err(FormatError::MultiplePlaceholders(n)),
        }
    }

    /// The format that returns its input unchanged (`%s`).
    pub fn identity() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
        }
    }

    /// Wraps the value between `prefix` and `suffix`, taken literally.
    pub fn around(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn apply(&self, value: &str) -> String {
        let mut out = String::with_capacity(self.prefix.len() + value.len() + self.suffix.len());
        out.push_str(&self.prefix);
        out.push_str(value);
        out.push_str(&self.suffix);
        out
    }
}

impl FromStr for FormatString {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FormatString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}%s{}",
            self.prefix.replace('%', "%%"),
            self.suffix.replace('%', "%%")
        )
    }
}
