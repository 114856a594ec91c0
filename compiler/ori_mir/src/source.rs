//! Source provenance carried by every instruction and body.

use std::fmt;

/// Source location of an instruction or body.
///
/// `line`/`column` are 1-based and file-relative. `pos` is the byte offset
/// of the construct and `span` its length in bytes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SourceInfo {
    pub line: u32,
    pub column: u32,
    pub pos: u32,
    pub span: u32,
}

impl SourceInfo {
    /// Provenance for compiler-synthesized code.
    pub const SYNTHETIC: SourceInfo = SourceInfo {
        line: 0,
        column: 0,
        pos: 0,
        span: 0,
    };

    #[inline]
    pub const fn new(line: u32, column: u32, pos: u32, span: u32) -> Self {
        SourceInfo {
            line,
            column,
            pos,
            span,
        }
    }

    /// Provenance with only a line/column known.
    #[inline]
    pub const fn at(line: u32, column: u32) -> Self {
        SourceInfo::new(line, column, 0, 0)
    }
}

impl fmt::Display for SourceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
