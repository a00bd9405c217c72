//! Directive vocabulary — the fixed set of recognised doc directives.

/// Kind of documentation element carried by a comment line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `@brief`
    Brief,
    /// `@param <name> <text>`
    Param,
    /// `@return`
    Return,
    /// `@author`
    Author,
    /// `@date`
    Date,
    /// Free text with no marker. Never matched from source text.
    Remark,
}

impl DirectiveKind {
    /// Look up a directive by the keyword following `@` or `\`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "brief" => Some(Self::Brief),
            "param" => Some(Self::Param),
            "return" => Some(Self::Return),
            "author" => Some(Self::Author),
            "date" => Some(Self::Date),
            _ => None,
        }
    }

    /// Kinds whose value ends at the end of their own line. Any plain text
    /// that follows becomes a remark.
    pub fn is_single_line(self) -> bool {
        matches!(self, Self::Param | Self::Return | Self::Author | Self::Date)
    }
}
