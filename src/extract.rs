//! Directive extractor — splits one comment line into a directive and its
//! inline text, or plain continuation text.

use crate::classify::{find_closer, CommentForm, LINE_MARKER};
use crate::directive::DirectiveKind;
use regex::Regex;
use std::sync::LazyLock;

/// Directive marker: `@` or `\` followed by a whitespace-delimited keyword.
static RE_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[@\\](\S+)").unwrap());

/// Prefix in front of the text of a `/** ... */` line.
const BLOCK_PREFIX: &str = "* ";

/// Parsed content of a single comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineContent {
    /// No directive on the line.
    Text(String),
    Directive {
        kind: DirectiveKind,
        /// Only set for `@param`.
        param_name: Option<String>,
        text: String,
    },
}

/// Parse a comment line of the given form.
pub fn extract(line: &str, form: CommentForm) -> LineContent {
    let body = strip_prefix(line, form);

    let Some(caps) = RE_DIRECTIVE.captures(body) else {
        return LineContent::Text(body.to_string());
    };
    let Some(kind) = DirectiveKind::from_keyword(&caps[1]) else {
        // `user@example.com`, `\n` and friends are plain text
        return LineContent::Text(body.to_string());
    };

    let whole = caps.get(0).map_or(body.len(), |m| m.end());
    let inline = body[whole..].trim_start();

    if kind == DirectiveKind::Param {
        let (name, text) = split_param(inline);
        return LineContent::Directive {
            kind,
            param_name: Some(name.to_string()),
            text: text.to_string(),
        };
    }

    LineContent::Directive {
        kind,
        param_name: None,
        text: inline.to_string(),
    }
}

/// Remove the comment syntax around a line's text and trim trailing
/// whitespace. Block-style text stops at the closer.
fn strip_prefix(line: &str, form: CommentForm) -> &str {
    let body = match form {
        CommentForm::BlockStyle => {
            let region = &line[..find_closer(line).unwrap_or(line.len())];
            match region.find(BLOCK_PREFIX) {
                Some(pos) => &region[pos + BLOCK_PREFIX.len()..],
                None => "",
            }
        }
        CommentForm::LineStyle => {
            let trimmed = line.trim_start();
            match trimmed.strip_prefix(LINE_MARKER) {
                Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
                None => "",
            }
        }
    };
    body.trim_end()
}

/// Split `@param` inline text at its first whitespace run. Without any
/// whitespace the whole text is the name and the description is empty.
fn split_param(inline: &str) -> (&str, &str) {
    match inline.find(char::is_whitespace) {
        Some(pos) => (&inline[..pos], inline[pos..].trim_start()),
        None => (inline, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directive(kind: DirectiveKind, text: &str) -> LineContent {
        LineContent::Directive {
            kind,
            param_name: None,
            text: text.to_string(),
        }
    }

    fn param(name: &str, text: &str) -> LineContent {
        LineContent::Directive {
            kind: DirectiveKind::Param,
            param_name: Some(name.to_string()),
            text: text.to_string(),
        }
    }

    #[test]
    fn block_continuation_text() {
        assert_eq!(
            extract("     * Some text.  \n", CommentForm::BlockStyle),
            LineContent::Text("Some text.".to_string())
        );
    }

    #[test]
    fn block_line_without_prefix_is_empty() {
        assert_eq!(
            extract("    just words\n", CommentForm::BlockStyle),
            LineContent::Text(String::new())
        );
        assert_eq!(extract("/**", CommentForm::BlockStyle), LineContent::Text(String::new()));
        assert_eq!(extract(" *", CommentForm::BlockStyle), LineContent::Text(String::new()));
    }

    #[test]
    fn block_closer_is_stripped() {
        assert_eq!(
            extract(" * last words */", CommentForm::BlockStyle),
            LineContent::Text("last words".to_string())
        );
        assert_eq!(extract(" */", CommentForm::BlockStyle), LineContent::Text(String::new()));
    }

    #[test]
    fn block_opener_with_directive() {
        assert_eq!(
            extract("/** @brief Does X. */", CommentForm::BlockStyle),
            directive(DirectiveKind::Brief, "Does X.")
        );
    }

    #[test]
    fn line_style_text() {
        assert_eq!(
            extract("    /// Some text.\r\n", CommentForm::LineStyle),
            LineContent::Text("Some text.".to_string())
        );
        assert_eq!(
            extract("///", CommentForm::LineStyle),
            LineContent::Text(String::new())
        );
        assert_eq!(
            extract("///tight", CommentForm::LineStyle),
            LineContent::Text("tight".to_string())
        );
    }

    #[test]
    fn directives_with_either_marker() {
        assert_eq!(
            extract(" * @return The sum.", CommentForm::BlockStyle),
            directive(DirectiveKind::Return, "The sum.")
        );
        assert_eq!(
            extract(r" * \author Jane Doe", CommentForm::BlockStyle),
            directive(DirectiveKind::Author, "Jane Doe")
        );
        assert_eq!(
            extract("/// @date 2011-04-01", CommentForm::LineStyle),
            directive(DirectiveKind::Date, "2011-04-01")
        );
    }

    #[test]
    fn directive_without_text() {
        assert_eq!(
            extract(" * @brief", CommentForm::BlockStyle),
            directive(DirectiveKind::Brief, "")
        );
    }

    #[test]
    fn param_splits_name_and_description() {
        assert_eq!(
            extract(" * @param n The count.", CommentForm::BlockStyle),
            param("n", "The count.")
        );
        assert_eq!(
            extract("/// @param  iIndent \t The indent level.", CommentForm::LineStyle),
            param("iIndent", "The indent level.")
        );
    }

    #[test]
    fn param_without_description_keeps_name() {
        assert_eq!(extract(" * @param count", CommentForm::BlockStyle), param("count", ""));
        assert_eq!(extract(" * @param count   */", CommentForm::BlockStyle), param("count", ""));
        assert_eq!(extract(" * @param", CommentForm::BlockStyle), param("", ""));
    }

    #[test]
    fn unknown_keyword_is_text() {
        assert_eq!(
            extract(" * Mail jane@example.com", CommentForm::BlockStyle),
            LineContent::Text("Mail jane@example.com".to_string())
        );
        assert_eq!(
            extract(" * @returns x", CommentForm::BlockStyle),
            LineContent::Text("@returns x".to_string())
        );
    }
}
