//! Conversion errors and recoverable warnings.

use std::fmt;

/// Failure that aborts the conversion of a single file.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConvertError {
    /// Comment opener token that is neither `/**` nor `///`.
    #[error("unknown comment opening: \"{marker}\"")]
    UnknownCommentOpener { marker: String },

    /// `@param` line with no whitespace between the name and its description.
    #[error("line {line}: @param has no description: \"{text}\"")]
    MalformedParamDirective { line: usize, text: String },
}

/// Defect noticed during conversion that did not stop it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// 1-based line number in the input.
    pub line: usize,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// `@param` without a description; the parameter was dropped.
    MalformedParam { name: String },
    /// Input ended inside a `/** ... */` comment.
    UnterminatedBlock,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::MalformedParam { name } => write!(
                f,
                "{}: @param \"{}\" has no description and was dropped",
                self.line, name
            ),
            WarningKind::UnterminatedBlock => {
                write!(f, "{}: comment block is never closed", self.line)
            }
        }
    }
}
