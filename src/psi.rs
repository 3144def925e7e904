//! Positions in source text: byte spans, line lookup and a peekable cursor.

use std::str::CharIndices;

/// A half-open byte range in the currently scanned file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Span {
    /// Starting byte index of the span.
    pub lo: usize,
    /// Byte index one past the end of the span.
    pub hi: usize,
}

impl Span {
    /// Does the span cover byte `offset`?
    pub fn contains(&self, offset: usize) -> bool {
        self.lo <= offset && offset < self.hi
    }
}

/// Line lookup for a piece of text.
///
/// # Examples
///
/// ```
/// use toastscan::psi::LineIndex;
///
/// let index = LineIndex::new("foo\nbar\nbaz");
/// assert_eq!(index.line_of(0), 1);
/// assert_eq!(index.line_of(4), 2);
/// assert_eq!(index.line_of(10), 3);
/// ```
#[derive(Clone, Debug)]
pub struct LineIndex {
    /// Starting byte of every line, in increasing order. Always begins with 0.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Index the line starts of `text`.
    pub fn new(text: &str) -> LineIndex {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        LineIndex { line_starts }
    }

    /// 1-based line number of byte `offset`, i.e. one plus the number of newlines before it.
    pub fn line_of(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset)
    }
}

/// A cursor over a borrowed string which can peek arbitrarily far ahead.
///
/// # Examples
///
/// ```
/// use toastscan::psi::Cursor;
///
/// let mut cursor = Cursor::new("foo BAR baz");
/// let span = cursor.skip_chars_while(|x| x.is_ascii_lowercase());
/// assert_eq!(span.lo, 0);
/// assert_eq!(span.hi, 3);
/// assert!(cursor.starts_with(" BAR"));
/// ```
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    iter: CharIndices<'a>,
    len: usize,
}

impl<'a> Iterator for Cursor<'a> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        self.iter.next().map(|(_, c)| c)
    }
}

impl<'a> Cursor<'a> {
    /// Start at the beginning of `content`.
    pub fn new(content: &'a str) -> Cursor<'a> {
        Cursor {
            iter: content.char_indices(),
            len: content.len(),
        }
    }

    /// Byte offset of the next character, or the length of the content at the end.
    pub fn offset(&self) -> usize {
        self.len - self.iter.as_str().len()
    }

    /// Peek the next character.
    pub fn peek(&self) -> Option<char> {
        self.iter.as_str().chars().next()
    }

    /// Returns whether the current position starts with `s`.
    pub fn starts_with(&self, s: &str) -> bool {
        self.iter.as_str().starts_with(s)
    }

    /// Advance past `s` if the current position starts with it.
    pub fn eat(&mut self, s: &str) -> bool {
        if !self.starts_with(s) {
            return false;
        }
        for _ in s.chars() {
            self.next();
        }
        true
    }

    /// Skip characters while `f` holds. Returns the span of the skipped characters.
    pub fn skip_chars_while(&mut self, mut f: impl FnMut(char) -> bool) -> Span {
        let lo = self.offset();
        while let Some(c) = self.peek() {
            if !f(c) {
                break;
            }
            self.next();
        }
        Span {
            lo,
            hi: self.offset(),
        }
    }
}
