//! Escape-aware lexical scanner
//!
//! Walks a JSON-like text and yields only the characters that sit outside
//! string literals, so callers can count braces and brackets, or look for
//! misplaced commas, without being fooled by the contents of strings.
//! String literals are reported as a `StringStart`/`StringEnd` pair (the
//! quote characters); their contents are skipped.

use std::str::CharIndices;

/// Classification of a character outside string literals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Comma,
    Whitespace,
    StringStart,
    StringEnd,
    Other,
}

/// A structural character and its byte offset in the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme {
    pub offset: usize,
    pub ch: char,
    pub token: Token,
}

/// Iterator over the structural characters of a text
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    chars: CharIndices<'a>,
    in_string: bool,
    escaped: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.char_indices(),
            in_string: false,
            escaped: false,
        }
    }

    /// True while the scanner is positioned inside a string literal
    pub fn in_string(&self) -> bool {
        self.in_string
    }
}

impl Iterator for Scanner<'_> {
    type Item = Lexeme;

    fn next(&mut self) -> Option<Lexeme> {
        loop {
            let (offset, ch) = self.chars.next()?;

            if self.in_string {
                if self.escaped {
                    self.escaped = false;
                } else if ch == '\\' {
                    self.escaped = true;
                } else if ch == '"' {
                    self.in_string = false;
                    return Some(Lexeme {
                        offset,
                        ch,
                        token: Token::StringEnd,
                    });
                }
                continue;
            }

            let token = match ch {
                '"' => {
                    self.in_string = true;
                    Token::StringStart
                }
                '{' => Token::OpenBrace,
                '}' => Token::CloseBrace,
                '[' => Token::OpenBracket,
                ']' => Token::CloseBracket,
                ',' => Token::Comma,
                c if c.is_whitespace() => Token::Whitespace,
                _ => Token::Other,
            };

            return Some(Lexeme { offset, ch, token });
        }
    }
}

/// Containers still open at the end of a text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenContainers {
    pub braces: usize,
    pub brackets: usize,
    pub in_string: bool,
}

/// Count the objects and arrays a text leaves unclosed. Stray closers never
/// drive a count below zero.
pub fn open_containers(text: &str) -> OpenContainers {
    let mut scanner = Scanner::new(text);
    let mut open = OpenContainers::default();

    for lexeme in scanner.by_ref() {
        match lexeme.token {
            Token::OpenBrace => open.braces += 1,
            Token::CloseBrace => open.braces = open.braces.saturating_sub(1),
            Token::OpenBracket => open.brackets += 1,
            Token::CloseBracket => open.brackets = open.brackets.saturating_sub(1),
            _ => {}
        }
    }

    open.in_string = scanner.in_string();
    open
}

/// Spans of every top-level `{...}` object in a text, in order.
///
/// Depth tracking starts at the first `{`; anything between top-level
/// objects is skipped. An object left open at the end yields no span.
pub fn balanced_object_spans(text: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
    let mut depth = 0usize;
    let mut start = 0usize;

    Scanner::new(text).filter_map(move |lexeme| match lexeme.token {
        Token::OpenBrace => {
            if depth == 0 {
                start = lexeme.offset;
            }
            depth += 1;
            None
        }
        Token::CloseBrace if depth > 0 => {
            depth -= 1;
            (depth == 0).then_some((start, lexeme.offset + 1))
        }
        _ => None,
    })
}

/// Reverse JSON string escaping. Unknown or incomplete escapes are kept
/// verbatim.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => {
                        out.push(decoded);
                        for _ in 0..4 {
                            chars.next();
                        }
                    }
                    _ => out.push_str("\\u"),
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
