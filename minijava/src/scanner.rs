//! Lexical analysis
use std::io::Read;

use crate::{
    cursor::Cursor,
    error::ScanError,
    reporter::Reporter,
    tokens::{Keyword, Pos, Token, TokenKind},
};

pub struct Scanner<R: Read> {
    /// Character source
    cursor: Cursor<R>,
    /// Text of the token being built.
    spelling: String,
    /// Position of the first character of the token being built.
    start_pos: Pos,
}

impl<R: Read> Scanner<R> {
    pub fn new(reader: R) -> Self {
        let cursor = Cursor::new(reader);
        let start_pos = cursor.pos();

        Self {
            cursor,
            spelling: String::new(),
            start_pos,
        }
    }

    /// Scan the source characters and construct the next token.
    ///
    /// Once the input is exhausted every call returns an
    /// [`TokenKind::EOT`] token.
    ///
    /// ## Implementation
    ///
    /// Each call starts with the cursor pointing at the first character
    /// of the remaining source, which may be whitespace or a comment.
    /// Building a token consumes exactly its characters, leaving the
    /// cursor on the character after the token.
    pub fn scan(&mut self, reporter: &mut Reporter) -> Token {
        use TokenKind as TK;

        loop {
            self.skip_whitespace();
            self.start_token();

            if self.cursor.at_end() {
                if let Some(err) = self.cursor.take_error() {
                    reporter.report(ScanError::from(err));
                }
                return self.make_token(TK::EOT);
            }

            #[rustfmt::skip]
            let token = match self.cursor.current() {
                '/' => match self.cursor.peek() {
                    '/' => { self.skip_line_comment(); continue; }
                    '*' => { self.skip_block_comment(reporter); continue; }
                    _   => self.single(TK::Slash),
                },
                '(' => self.single(TK::LeftParen),
                ')' => self.single(TK::RightParen),
                '[' => self.single(TK::LeftBracket),
                ']' => self.single(TK::RightBracket),
                '{' => self.single(TK::LeftBrace),
                '}' => self.single(TK::RightBrace),
                '.' => self.single(TK::Dot),
                ',' => self.single(TK::Comma),
                ';' => self.single(TK::Semicolon),
                '+' => self.single(TK::Plus),
                '-' => self.single(TK::Minus),
                '*' => self.single(TK::Star),
                '>' => self.either('=', TK::GreaterEq, TK::Greater),
                '<' => self.either('=', TK::LessEq, TK::Less),
                '=' => self.either('=', TK::Eq, TK::Assign),
                '!' => self.either('=', TK::NotEq, TK::Not),
                '&' => self.doubled(TK::And, reporter),
                '|' => self.doubled(TK::Or, reporter),
                '0'..='9' => self.consume_number(),
                'a'..='z' | 'A'..='Z' => self.consume_ident(),
                c => {
                    self.take();
                    reporter.report(ScanError::UnknownCharacter {
                        found: c,
                        pos: self.start_pos,
                    });
                    self.make_token(TK::Error)
                }
            };

            return token;
        }
    }

    /// Primes the scanner to record a new token.
    fn start_token(&mut self) {
        self.spelling.clear();
        self.start_pos = self.cursor.pos();
    }

    /// Build a token from the characters taken since
    /// [`start_token`](Scanner::start_token).
    fn make_token(&mut self, kind: TokenKind) -> Token {
        Token::new(kind, self.spelling.as_str(), self.start_pos)
    }

    /// Append the current character to the token spelling and advance.
    #[inline]
    fn take(&mut self) {
        self.spelling.push(self.cursor.current());
        self.cursor.next();
    }

    /// Advance without recording the current character.
    #[inline]
    fn skip(&mut self) {
        self.cursor.next();
    }

    fn skip_whitespace(&mut self) {
        while !self.cursor.at_end() && is_whitespace(self.cursor.current()) {
            self.skip();
        }
    }
}

/// Specialised tokens.
impl<R: Read> Scanner<R> {
    fn single(&mut self, kind: TokenKind) -> Token {
        self.take();
        self.make_token(kind)
    }

    /// Operator that becomes `long` when followed by `second`.
    fn either(&mut self, second: char, long: TokenKind, short: TokenKind) -> Token {
        self.take();
        if !self.cursor.at_end() && self.cursor.current() == second {
            self.take();
            self.make_token(long)
        } else {
            self.make_token(short)
        }
    }

    /// Operator made of the current character written twice.
    fn doubled(&mut self, kind: TokenKind, reporter: &mut Reporter) -> Token {
        let first = self.cursor.current();
        self.take();
        if !self.cursor.at_end() && self.cursor.current() == first {
            self.take();
            self.make_token(kind)
        } else {
            reporter.report(ScanError::LoneOperator {
                found: first,
                pos: self.start_pos,
            });
            self.make_token(TokenKind::Error)
        }
    }

    fn consume_number(&mut self) -> Token {
        debug_assert!(is_digit(self.cursor.current()));

        while !self.cursor.at_end() && is_digit(self.cursor.current()) {
            self.take();
        }

        self.make_token(TokenKind::Number)
    }

    fn consume_ident(&mut self) -> Token {
        debug_assert!(is_letter(self.cursor.current()));

        self.take();
        while !self.cursor.at_end() && is_ident_char(self.cursor.current()) {
            self.take();
        }

        // Reserved words are only recognised once the whole
        // identifier has been collected.
        let kind = match Keyword::parse(&self.spelling) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Ident,
        };

        self.make_token(kind)
    }

    /// Erase a `//` comment up to, but not including, the line terminator.
    fn skip_line_comment(&mut self) {
        debug_assert_eq!(self.cursor.current(), '/');

        while !self.cursor.at_end() && !is_newline(self.cursor.current()) {
            self.skip();
        }
    }

    /// Erase a `/* ... */` comment, including the closing delimiter.
    ///
    /// Comments don't nest; the first `*/` closes the comment.
    fn skip_block_comment(&mut self, reporter: &mut Reporter) {
        debug_assert_eq!(self.cursor.current(), '/');

        // `/*`
        self.skip();
        self.skip();

        loop {
            if self.cursor.at_end() {
                reporter.report(ScanError::UnterminatedComment {
                    pos: self.start_pos,
                });
                return;
            }

            if self.cursor.current() == '*' && self.cursor.peek() == '/' {
                self.skip();
                self.skip();
                return;
            }

            self.skip();
        }
    }
}

impl<R: Read> Scanner<R> {
    /// Iterate the remaining tokens, up to and including the end-of-text token.
    pub fn tokens(self, reporter: &mut Reporter) -> Tokens<'_, R> {
        Tokens {
            scanner: self,
            reporter,
            done: false,
        }
    }
}

/// Convenience iterator that wraps the scanner.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Tokens<'r, R: Read> {
    scanner: Scanner<R>,
    reporter: &'r mut Reporter,
    // Track end so an EOT token is emitted once.
    done: bool,
}

impl<'r, R: Read> Iterator for Tokens<'r, R> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let token = self.scanner.scan(self.reporter);
        if token.kind == TokenKind::EOT {
            self.done = true;
        }
        Some(token)
    }
}

/// Whitespace separating tokens. Line terminators are plain whitespace.
fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_newline(c: char) -> bool {
    matches!(c, '\r' | '\n')
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_ident_char(c: char) -> bool {
    is_letter(c) || is_digit(c) || c == '_'
}
