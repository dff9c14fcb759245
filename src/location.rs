//! This module describes a [Loc] that is a newtype wrapper that is used to localize things inside
//! the source code. It's used to represent the character representation in bytes.

use std::ops::{AddAssign, Range};

use miette::SourceSpan;

/// Byte address of a character in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Loc(pub usize);

impl AddAssign for Loc {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl From<Loc> for usize {
    fn from(loc: Loc) -> Self {
        loc.0
    }
}

/// Converts a byte range of the source code into a span that miette can label.
pub fn span(range: &Range<Loc>) -> SourceSpan {
    let length = range.end.0.saturating_sub(range.start.0);
    SourceSpan::from((range.start.0, length))
}
