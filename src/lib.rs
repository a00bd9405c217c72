//! doxml — rewrite Doxygen-style doc comments as XML doc comments.
//!
//! Reads source text line by line and replaces every `/** ... */` block or
//! `///` run carrying `@brief`, `@param`, `@return`, `@author` and `@date`
//! directives with `///` lines holding `<summary>`, `<param>`, `<returns>`,
//! `<author>` and `<date>` tags. Every other line is copied unchanged.
//!
//! ```
//! use doxml::{convert, ConvertOptions};
//!
//! let input = "/**\n * @brief Adds.\n * @param a Left.\n */\nint add(int a);\n";
//! let result = convert(input, &ConvertOptions::default()).unwrap();
//! assert_eq!(
//!     result.output,
//!     "/// <summary>\n/// Adds.\n/// </summary>\n/// <param name=\"a\">Left.</param>\nint add(int a);\n"
//! );
//! ```

pub mod block;
pub mod classify;
pub mod convert;
pub mod directive;
pub mod emit;
pub mod error;
pub mod extract;

pub use block::ConvertOptions;
pub use convert::{convert, Conversion, Converter};
pub use directive::DirectiveKind;
pub use error::{ConvertError, Warning, WarningKind};
