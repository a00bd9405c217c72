//! Emitter — renders a finished directive as XML doc comment lines.

use crate::directive::DirectiveKind;

/// Columns per indentation level, both when measuring the source block and
/// when indenting the output.
pub const TAB_WIDTH: usize = 4;

/// Marker that starts every emitted line.
pub const TARGET_MARKER: &str = "/// ";

/// Leading text of every emitted line for a block at `indent_level`.
pub fn line_prefix(indent_level: usize) -> String {
    format!("{}{}", " ".repeat(indent_level * TAB_WIDTH), TARGET_MARKER)
}

/// Render a directive into output lines, without terminators.
///
/// `segments` holds the directive's text one source line per entry. Nothing
/// is produced when there is no text.
pub fn emit(
    kind: DirectiveKind,
    param_name: Option<&str>,
    segments: &[String],
    indent_level: usize,
) -> Vec<String> {
    if segments.is_empty() {
        return Vec::new();
    }
    let head = line_prefix(indent_level);
    let joined = || segments.join(" ");

    match kind {
        DirectiveKind::Brief => {
            let mut lines = Vec::with_capacity(segments.len() + 2);
            lines.push(format!("{head}<summary>"));
            lines.extend(segments.iter().map(|s| format!("{head}{s}")));
            lines.push(format!("{head}</summary>"));
            lines
        }
        DirectiveKind::Param => vec![format!(
            "{head}<param name=\"{}\">{}</param>",
            param_name.unwrap_or_default(),
            joined()
        )],
        DirectiveKind::Return => vec![format!("{head}<returns>{}</returns>", joined())],
        DirectiveKind::Author => vec![format!("{head}<author>{}</author>", joined())],
        DirectiveKind::Date => vec![format!("{head}<date>{}</date>", joined())],
        DirectiveKind::Remark => segments.iter().map(|s| format!("{head}{s}")).collect(),
    }
}
