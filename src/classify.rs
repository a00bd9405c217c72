//! Line classifier — decides whether a line opens, continues or ends a
//! documentation comment.

use crate::error::ConvertError;
use regex::Regex;
use std::sync::LazyLock;

/// Opening marker at the start of a line, plus the character after it so
/// banner runs like `////` and `/***` can be rejected.
static RE_OPENER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*(/\*\*|///)(.?)").unwrap());

pub const BLOCK_OPEN: &str = "/**";
pub const BLOCK_CLOSE: &str = "*/";
pub const LINE_MARKER: &str = "///";

/// Syntax of the comment block currently being read. Fixed when the block
/// opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentForm {
    /// `/** ... */`
    BlockStyle,
    /// A run of `///` lines.
    LineStyle,
}

impl CommentForm {
    pub fn from_marker(marker: &str) -> Result<Self, ConvertError> {
        match marker {
            BLOCK_OPEN => Ok(Self::BlockStyle),
            LINE_MARKER => Ok(Self::LineStyle),
            other => Err(ConvertError::UnknownCommentOpener {
                marker: other.to_string(),
            }),
        }
    }
}

/// What the driver should do with a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Ordinary source, written through unchanged.
    NotAComment,
    /// Line opens a `/** ... */` block and belongs to it.
    OpenBlockStyle,
    /// Line opens a `///` run and belongs to it.
    OpenLineStyle,
    /// Line belongs to the open block.
    ContinueComment,
    /// The open `///` run ended before this line. The line itself has not
    /// been looked at yet and must be classified again from outside.
    EndLineStyleImplicit,
}

/// Classify `line` given the form of the block it would belong to, if any.
pub fn classify(line: &str, open: Option<CommentForm>) -> Result<Action, ConvertError> {
    match open {
        None => match opener(line)? {
            Some(CommentForm::BlockStyle) => Ok(Action::OpenBlockStyle),
            Some(CommentForm::LineStyle) => Ok(Action::OpenLineStyle),
            None => Ok(Action::NotAComment),
        },
        Some(CommentForm::LineStyle) => {
            if line.trim_start().starts_with(LINE_MARKER) {
                Ok(Action::ContinueComment)
            } else {
                Ok(Action::EndLineStyleImplicit)
            }
        }
        // The closer is handled after the line's content is extracted.
        Some(CommentForm::BlockStyle) => Ok(Action::ContinueComment),
    }
}

/// Detect an opening marker as the first non-whitespace text on the line.
fn opener(line: &str) -> Result<Option<CommentForm>, ConvertError> {
    let Some(caps) = RE_OPENER.captures(line) else {
        return Ok(None);
    };
    let marker = &caps[1];
    let next = &caps[2];
    let banner = match marker {
        LINE_MARKER => next == "/",
        _ => next == "*" || next == "/",
    };
    if banner {
        return Ok(None);
    }
    CommentForm::from_marker(marker).map(Some)
}

/// Byte offset of the block closer on a line. An accepted `/**` opener is
/// never followed by `/`, so the opener itself cannot match.
pub fn find_closer(line: &str) -> Option<usize> {
    line.find(BLOCK_CLOSE)
}
