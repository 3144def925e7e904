//! Lexical pre-pass locating string literals and comments.
//!
//! This is not a tokenizer. It only knows the delimiters configured for a language and ignores
//! everything else, so template-literal interpolation and regex literals are not understood.

use crate::options::LanguageSettings;
use crate::psi::{Cursor, Span};

/// Spans of all comments and string literals in `text`, in order and non-overlapping.
pub fn literal_spans(text: &str, settings: &LanguageSettings) -> Vec<Span> {
    let mut cursor = Cursor::new(text);
    let mut spans = Vec::new();
    while cursor.peek().is_some() {
        let lo = cursor.offset();
        if settings
            .single_line_comments
            .iter()
            .any(|c| cursor.starts_with(c))
        {
            cursor.skip_chars_while(|c| c != '\n');
        } else if let Some((start, end)) = settings
            .multi_line_comments
            .iter()
            .find(|(start, _)| cursor.starts_with(start))
        {
            cursor.eat(start);
            flush_multi_line_comment(&mut cursor, end);
        } else if let Some(delimiter) = settings
            .string_delimiters
            .iter()
            .find(|d| cursor.starts_with(d))
        {
            cursor.eat(delimiter);
            let multiline = settings.multiline_strings.contains(delimiter);
            flush_string(&mut cursor, delimiter, multiline);
        } else {
            cursor.next();
            continue;
        }
        spans.push(Span {
            lo,
            hi: cursor.offset(),
        });
    }
    spans
}

/// Is `offset` inside one of `spans`? `spans` must be sorted and non-overlapping.
pub fn inside_literal(spans: &[Span], offset: usize) -> bool {
    let candidate = spans.partition_point(|span| span.hi <= offset);
    spans
        .get(candidate)
        .is_some_and(|span| span.contains(offset))
}

fn flush_multi_line_comment(cursor: &mut Cursor, end: &str) {
    while !cursor.eat(end) {
        if cursor.next().is_none() {
            break;
        }
    }
}

fn flush_string(cursor: &mut Cursor, delimiter: &str, multiline: bool) {
    loop {
        if cursor.eat(delimiter) {
            return;
        }
        match cursor.peek() {
            None => return,
            // Unterminated single-line string, leave the newline to the caller.
            Some('\n') if !multiline => return,
            Some('\\') => {
                cursor.next();
                cursor.next();
            }
            Some(_) => {
                cursor.next();
            }
        }
    }
}
