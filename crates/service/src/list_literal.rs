//! Fail-closed parser for bracketed string lists such as `['Bright Red', "Sap Green"]`.
//!
//! Only quoted string items are accepted. Anything else (bare words, numbers,
//! nested lists, trailing garbage) is an error, never evaluated.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::ExtractError;

type Chars<'a> = Peekable<CharIndices<'a>>;

fn malformed(offset: usize, reason: &'static str) -> ExtractError {
    ExtractError::MalformedList { offset, reason }
}

fn skip_whitespace(chars: &mut Chars<'_>) {
    while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
}

/// Parse a quoted item whose opening quote has already been consumed.
fn parse_quoted(chars: &mut Chars<'_>, quote: char, start: usize) -> Result<String, ExtractError> {
    let mut item = String::new();
    while let Some((offset, c)) = chars.next() {
        match c {
            c if c == quote => return Ok(item),
            '\\' => match chars.next() {
                Some((_, 'n')) => item.push('\n'),
                Some((_, 'r')) => item.push('\r'),
                Some((_, 't')) => item.push('\t'),
                Some((_, '\\')) => item.push('\\'),
                Some((_, '\'')) => item.push('\''),
                Some((_, '"')) => item.push('"'),
                Some((_, other)) => {
                    item.push('\\');
                    item.push(other);
                },
                None => return Err(malformed(offset, "dangling escape")),
            },
            _ => item.push(c),
        }
    }
    Err(malformed(start, "unterminated string"))
}

/// Parse a list literal into its string items.
pub fn parse_list_literal(text: &str) -> Result<Vec<String>, ExtractError> {
    let mut chars = text.char_indices().peekable();
    let mut items = Vec::new();

    skip_whitespace(&mut chars);
    match chars.next() {
        Some((_, '[')) => {},
        Some((offset, _)) => return Err(malformed(offset, "expected `[`")),
        None => return Err(malformed(0, "empty input")),
    }

    loop {
        skip_whitespace(&mut chars);
        match chars.next() {
            Some((_, ']')) => break,
            Some((offset, quote @ ('\'' | '"'))) => {
                items.push(parse_quoted(&mut chars, quote, offset)?);
            },
            Some((offset, _)) => return Err(malformed(offset, "expected quoted item")),
            None => return Err(malformed(text.len(), "missing `]`")),
        }

        skip_whitespace(&mut chars);
        match chars.next() {
            Some((_, ',')) => {},
            Some((_, ']')) => break,
            Some((offset, _)) => return Err(malformed(offset, "expected `,` or `]`")),
            None => return Err(malformed(text.len(), "missing `]`")),
        }
    }

    skip_whitespace(&mut chars);
    if let Some((offset, _)) = chars.next() {
        return Err(malformed(offset, "trailing characters after `]`"));
    }
    Ok(items)
}
