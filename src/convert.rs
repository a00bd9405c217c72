//! Driver — feeds the lines of one file through the classifier, extractor
//! and accumulator, and collects the output text.

use crate::block::{CommentBlockState, ConvertOptions};
use crate::classify::{classify, find_closer, Action, CommentForm, BLOCK_CLOSE};
use crate::emit::TAB_WIDTH;
use crate::error::{ConvertError, Warning, WarningKind};
use crate::extract::extract;
use tracing::debug;

/// Result of converting one file's text.
#[derive(Debug, Default)]
pub struct Conversion {
    pub output: String,
    /// Comment blocks opened.
    pub blocks: usize,
    /// Input lines read.
    pub lines: usize,
    pub warnings: Vec<Warning>,
}

/// Convert a whole input text in one forward pass.
pub fn convert(input: &str, options: &ConvertOptions) -> Result<Conversion, ConvertError> {
    let mut converter = Converter::new(*options);
    for line in input.split_inclusive('\n') {
        converter.push_line(line)?;
    }
    Ok(converter.finish())
}

/// Line-at-a-time conversion state for a single file.
#[derive(Debug)]
pub struct Converter {
    options: ConvertOptions,
    block: Option<CommentBlockState>,
    /// Line number where the open block started.
    block_line: usize,
    newline: Option<&'static str>,
    result: Conversion,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            block: None,
            block_line: 0,
            newline: None,
            result: Conversion::default(),
        }
    }

    /// Process one input line, including its terminator if it has one.
    pub fn push_line(&mut self, line: &str) -> Result<(), ConvertError> {
        self.result.lines += 1;
        if self.newline.is_none() && line.ends_with('\n') {
            self.newline = Some(if line.ends_with("\r\n") { "\r\n" } else { "\n" });
        }

        if let Some(form) = self.block.as_ref().map(CommentBlockState::form) {
            match classify(line, Some(form))? {
                // The line is not part of the run; look at it again below.
                Action::EndLineStyleImplicit => self.close_block(),
                _ => return self.comment_line(line),
            }
        }

        match classify(line, None)? {
            Action::OpenBlockStyle => self.open_block(CommentForm::BlockStyle, line),
            Action::OpenLineStyle => self.open_block(CommentForm::LineStyle, line),
            Action::NotAComment | Action::ContinueComment | Action::EndLineStyleImplicit => {
                self.result.output.push_str(line);
                Ok(())
            }
        }
    }

    /// Flush any open block and hand back the collected output.
    pub fn finish(mut self) -> Conversion {
        if let Some(form) = self.block.as_ref().map(CommentBlockState::form) {
            if form == CommentForm::BlockStyle {
                debug!(line = self.block_line, "comment block is never closed");
                self.result.warnings.push(Warning {
                    line: self.block_line,
                    kind: WarningKind::UnterminatedBlock,
                });
            }
            self.close_block();
        }
        self.result
    }

    fn open_block(&mut self, form: CommentForm, line: &str) -> Result<(), ConvertError> {
        self.result.blocks += 1;
        self.block_line = self.result.lines;
        debug!(line = self.block_line, ?form, "comment block opened");
        self.block = Some(CommentBlockState::open(form, line));
        self.comment_line(line)
    }

    fn comment_line(&mut self, line: &str) -> Result<(), ConvertError> {
        let Some(block) = self.block.as_mut() else {
            return Ok(());
        };
        let form = block.form();
        let indent = block.indent_level();

        let mut emitted = Vec::new();
        if let Some(warning) =
            block.feed(extract(line, form), self.result.lines, &self.options, &mut emitted)?
        {
            self.result.warnings.push(warning);
        }
        self.write_lines(emitted);

        if form == CommentForm::BlockStyle {
            if let Some(pos) = find_closer(line) {
                self.close_block();
                let trailing = line[pos + BLOCK_CLOSE.len()..].trim();
                if !trailing.is_empty() {
                    let kept = format!("{}{}", " ".repeat(indent * TAB_WIDTH), trailing);
                    self.write_lines(vec![kept]);
                }
            }
        }
        Ok(())
    }

    fn close_block(&mut self) {
        if let Some(block) = self.block.take() {
            let mut emitted = Vec::new();
            block.close(&mut emitted);
            self.write_lines(emitted);
            debug!(opened_at = self.block_line, "comment block closed");
        }
    }

    fn write_lines(&mut self, lines: Vec<String>) {
        let newline = self.newline.unwrap_or("\n");
        for line in lines {
            self.result.output.push_str(&line);
            self.result.output.push_str(newline);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> String {
        convert(input, &ConvertOptions::default()).unwrap().output
    }

    #[test]
    fn source_without_comments_is_unchanged() {
        let input = "int main() {\r\n    return 0;\r\n}\n// plain\n/* plain */\nno newline";
        assert_eq!(run(input), input);
        assert_eq!(run(""), "");
    }

    #[test]
    fn converted_output_converts_to_itself() {
        let input = "    /**\n     * @brief Does X.\n     * Really.\n     * @param n The count.\n     * @return Y.\n     */\n    int f(int n);\n";
        let once = run(input);
        assert_eq!(run(&once), once);
    }

    #[test]
    fn block_style_round_trip() {
        let input = "class A {\n    /**\n     * @brief Does X.\n     * @param n The count.\n     * @return Y.\n     */\n    int f(int n);\n}\n";
        let expected = "class A {\n    /// <summary>\n    /// Does X.\n    /// </summary>\n    /// <param name=\"n\">The count.</param>\n    /// <returns>Y.</returns>\n    int f(int n);\n}\n";
        assert_eq!(run(input), expected);
    }

    #[test]
    fn line_style_run_ends_at_code() {
        let input = "/// @brief Adds.\n/// @return Sum.\nint add();\n";
        let expected = "/// <summary>\n/// Adds.\n/// </summary>\n/// <returns>Sum.</returns>\nint add();\n";
        assert_eq!(run(input), expected);
    }

    #[test]
    fn line_ending_a_run_may_open_a_block() {
        let input = "/// @return A.\n/** @return B. */\nx\n";
        let result = convert(input, &ConvertOptions::default()).unwrap();
        assert_eq!(
            result.output,
            "/// <returns>A.</returns>\n/// <returns>B.</returns>\nx\n"
        );
        assert_eq!(result.blocks, 2);
        assert_eq!(result.lines, 3);
    }

    #[test]
    fn single_line_block() {
        assert_eq!(
            run("  /** @date 2011 */\n"),
            "/// <date>2011</date>\n"
        );
    }

    #[test]
    fn code_after_closer_is_kept() {
        assert_eq!(
            run("    /** @return Y. */ int f();\n"),
            "    /// <returns>Y.</returns>\n    int f();\n"
        );
    }

    #[test]
    fn crlf_input_gets_crlf_output() {
        assert_eq!(
            run("/**\r\n * @author J\r\n */\r\nx\r\n"),
            "/// <author>J</author>\r\nx\r\n"
        );
    }

    #[test]
    fn run_at_end_of_input_is_flushed() {
        let result = convert("/// @brief Last.", &ConvertOptions::default()).unwrap();
        assert_eq!(result.output, "/// <summary>\n/// Last.\n/// </summary>\n");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn unterminated_block_is_flushed_with_warning() {
        let result = convert("x\n/**\n * @return Y.\n", &ConvertOptions::default()).unwrap();
        assert_eq!(result.output, "x\n/// <returns>Y.</returns>\n");
        assert_eq!(
            result.warnings,
            vec![Warning {
                line: 2,
                kind: WarningKind::UnterminatedBlock
            }]
        );
    }

    #[test]
    fn deep_indentation_is_kept() {
        let input = "                /**\n  * @return R.\n */\n";
        assert_eq!(run(input), "                /// <returns>R.</returns>\n");
    }

    #[test]
    fn strict_mode_fails_the_file() {
        let options = ConvertOptions {
            strict: true,
            ..Default::default()
        };
        let err = convert("/// @param n\n", &options).unwrap_err();
        assert!(matches!(err, ConvertError::MalformedParamDirective { line: 1, .. }));
    }

    #[test]
    fn converters_are_independent() {
        let mut a = Converter::new(ConvertOptions::default());
        let mut b = Converter::new(ConvertOptions::default());
        a.push_line("/**\n").unwrap();
        b.push_line("plain\n").unwrap();
        a.push_line(" * @return A.\n").unwrap();
        b.push_line("/// @return B.\n").unwrap();
        a.push_line(" */\n").unwrap();
        assert_eq!(a.finish().output, "/// <returns>A.</returns>\n");
        assert_eq!(b.finish().output, "plain\n/// <returns>B.</returns>\n");
    }
}
