//! Block accumulator — collects directive text across the lines of one
//! comment block and flushes it through the emitter.
//!
//! A directive stays active until the next directive marker, the end of the
//! block, or (for single-line kinds) the next plain text line, which then
//! starts a remark.

use crate::classify::CommentForm;
use crate::directive::DirectiveKind;
use crate::emit::{emit, TAB_WIDTH};
use crate::error::{ConvertError, Warning, WarningKind};
use crate::extract::LineContent;
use tracing::debug;

/// Per-file settings for the accumulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    /// Fail on `@param` lines without a description instead of warning.
    pub strict: bool,
    /// Treat unmarked text before the first directive as the brief.
    pub implicit_brief: bool,
}

/// Live state of the comment block being read.
#[derive(Debug)]
pub struct CommentBlockState {
    form: CommentForm,
    active: Option<DirectiveKind>,
    param_name: Option<String>,
    segments: Vec<String>,
    indent_level: usize,
}

impl CommentBlockState {
    /// Start a block whose first line is `first_line`. The indentation level
    /// is taken from this line only.
    pub fn open(form: CommentForm, first_line: &str) -> Self {
        Self {
            form,
            active: None,
            param_name: None,
            segments: Vec::new(),
            indent_level: indent_level(first_line),
        }
    }

    pub fn form(&self) -> CommentForm {
        self.form
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    pub fn active(&self) -> Option<DirectiveKind> {
        self.active
    }

    /// Add one extracted comment line. Finished directives are rendered
    /// into `out`.
    pub fn feed(
        &mut self,
        content: LineContent,
        line_no: usize,
        options: &ConvertOptions,
        out: &mut Vec<String>,
    ) -> Result<Option<Warning>, ConvertError> {
        match content {
            LineContent::Directive {
                kind,
                param_name,
                text,
            } => {
                let mut warning = None;
                if kind == DirectiveKind::Param && text.is_empty() {
                    let name = param_name.clone().unwrap_or_default();
                    if options.strict {
                        return Err(ConvertError::MalformedParamDirective {
                            line: line_no,
                            text: name,
                        });
                    }
                    debug!(line = line_no, name = %name, "@param without description");
                    warning = Some(Warning {
                        line: line_no,
                        kind: WarningKind::MalformedParam { name },
                    });
                }
                self.flush(out);
                self.active = Some(kind);
                self.param_name = param_name;
                self.append(text);
                Ok(warning)
            }
            LineContent::Text(text) => {
                match self.active {
                    Some(kind) if kind.is_single_line() => {
                        self.flush(out);
                        self.active = Some(DirectiveKind::Remark);
                    }
                    Some(_) => {}
                    None if text.is_empty() => {}
                    None if options.implicit_brief => self.active = Some(DirectiveKind::Brief),
                    None => self.active = Some(DirectiveKind::Remark),
                }
                self.append(text);
                Ok(None)
            }
        }
    }

    /// End the block, rendering whatever is still pending.
    pub fn close(mut self, out: &mut Vec<String>) {
        self.flush(out);
    }

    fn append(&mut self, text: String) {
        if !text.is_empty() {
            self.segments.push(text);
        }
    }

    /// Render the active directive and clear it. Directive, name and text
    /// are reset together.
    fn flush(&mut self, out: &mut Vec<String>) {
        let kind = self.active.take();
        let name = self.param_name.take();
        let segments = std::mem::take(&mut self.segments);
        if let Some(kind) = kind {
            out.extend(emit(kind, name.as_deref(), &segments, self.indent_level));
        }
    }
}

/// Indentation level of a line: its leading whitespace width in columns,
/// divided by [`TAB_WIDTH`]. A tab counts as a full level.
pub fn indent_level(line: &str) -> usize {
    let width: usize = line
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum();
    width / TAB_WIDTH
}
