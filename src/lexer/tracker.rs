//! This module defines a [Tracker] structure that is used to keep track of the cursor of the
//! lexer inside of the source code.
use std::{iter::Peekable, ops::Range, str::Chars};

use crate::location::Loc;

/// Keeps track of the current position in the source code and helps cutting out substrings. It's
/// used for lexing.
pub struct Tracker<'a> {
    current: Loc,
    saved: Vec<Loc>,
    string: &'a str,
    peekable: Peekable<Chars<'a>>,
}

impl<'a> Tracker<'a> {
    pub fn new(string: &'a str) -> Self {
        Self {
            current: Loc(0),
            saved: Vec::with_capacity(12),
            string,
            peekable: string.chars().peekable(),
        }
    }

    /// Current byte position of the cursor.
    pub fn current(&self) -> Loc {
        self.current
    }

    /// Returns the range from the last saved position to the current one.
    pub fn pop_range(&mut self) -> Range<Loc> {
        Range {
            start: self.saved.pop().unwrap_or(self.current),
            end: self.current,
        }
    }

    /// Peeks the next character in the iterator.
    pub fn peek(&mut self) -> Option<char> {
        self.peekable.peek().cloned()
    }

    /// Gets the next character.
    pub fn next(&mut self) -> Option<char> {
        let next = self.peekable.next();
        if let Some(c) = next {
            self.current += Loc(c.len_utf8());
        }
        next
    }

    /// Jumps to the next character without returning a char.
    pub fn jump(&mut self) {
        self.next();
    }

    /// Saves the current position and then jumps one character.
    pub fn save_jump(&mut self) {
        self.save();
        self.next();
    }

    /// Consumes characters while they satisfy the predicate.
    pub fn skip_while(&mut self, mut f: impl FnMut(char) -> bool) {
        while self.peek().map(&mut f).unwrap_or_default() {
            self.next();
        }
    }

    /// Gets the substring of the current code by a location.
    pub fn substring(&self, range: Range<Loc>) -> &'a str {
        &self.string[range.start.0..range.end.0]
    }

    pub fn save(&mut self) {
        self.saved.push(self.current)
    }
}
