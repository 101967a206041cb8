//! Result and errors.
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use smol_str::SmolStr;

use crate::tokens::{Pos, Token, TokenKind};

pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Anything reported during a run.
#[derive(Debug)]
pub enum Diagnostic {
    Scan(ScanError),
    Parse(ParseError),
}

impl Diagnostic {
    #[inline]
    pub fn is_scan(&self) -> bool {
        matches!(self, Self::Scan(_))
    }

    #[inline]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scan(err) => write!(f, "Scan error: {err}"),
            Self::Parse(err) => write!(f, "Parse error: {err}"),
        }
    }
}

impl Error for Diagnostic {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Scan(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<ScanError> for Diagnostic {
    fn from(err: ScanError) -> Self {
        Diagnostic::Scan(err)
    }
}

impl From<ParseError> for Diagnostic {
    fn from(err: ParseError) -> Self {
        Diagnostic::Parse(err)
    }
}

/// Lexical error. Scanning continues after these are reported.
#[derive(Debug)]
pub enum ScanError {
    /// Character that can't start any token.
    UnknownCharacter { found: char, pos: Pos },
    /// `&` or `|` that isn't doubled into `&&` or `||`.
    LoneOperator { found: char, pos: Pos },
    /// End of input reached inside a `/* ... */` comment.
    UnterminatedComment { pos: Pos },
    /// Input stream failed. Treated as end of input.
    Io(std::io::Error),
}

impl Display for ScanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCharacter { found, pos } => {
                write!(f, "{pos}: unrecognized character {found:?} in input")
            }
            Self::LoneOperator { found, pos } => {
                write!(f, "{pos}: expected '{found}{found}' but found a single '{found}'")
            }
            Self::UnterminatedComment { pos } => {
                write!(f, "{pos}: block comment is never closed with '*/'")
            }
            Self::Io(err) => write!(f, "failed to read input: {err}"),
        }
    }
}

impl Error for ScanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ScanError {
    fn from(err: std::io::Error) -> Self {
        ScanError::Io(err)
    }
}

/// Syntax error. The first one aborts the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The lookahead token is not the one the grammar requires here.
    Mismatch { expected: TokenKind, found: Found },
    /// The lookahead token doesn't begin any alternative of a rule.
    Unexpected {
        expected: &'static str,
        found: Found,
    },
    /// Rules nested deeper than the parser's limit.
    TooDeep { limit: usize, found: Found },
}

impl ParseError {
    /// Token that caused the error.
    pub fn found(&self) -> &Found {
        match self {
            Self::Mismatch { found, .. }
            | Self::Unexpected { found, .. }
            | Self::TooDeep { found, .. } => found,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mismatch { expected, found } => write!(
                f,
                "{}: expecting '{expected}' but found {found}",
                found.pos
            ),
            Self::Unexpected { expected, found } => write!(
                f,
                "{}: expecting {expected} but found {found}",
                found.pos
            ),
            Self::TooDeep { limit, found } => write!(
                f,
                "{}: program is nested more than {limit} levels deep at {found}",
                found.pos
            ),
        }
    }
}

impl Error for ParseError {}

/// Copy of the offending lookahead token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    pub kind: TokenKind,
    pub spelling: SmolStr,
    pub pos: Pos,
}

impl From<&Token> for Found {
    fn from(token: &Token) -> Self {
        Self {
            kind: token.kind,
            spelling: token.spelling.clone(),
            pos: token.pos,
        }
    }
}

impl Display for Found {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Ident | TokenKind::Number | TokenKind::Error => {
                write!(f, "{} \"{}\"", self.kind, self.spelling)
            }
            TokenKind::EOT => write!(f, "{}", self.kind),
            _ => write!(f, "'{}'", self.kind),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_diagnostic_prefix() {
        let scan = Diagnostic::from(ScanError::UnknownCharacter {
            found: '#',
            pos: Pos::new(2, 7),
        });
        assert_eq!(
            scan.to_string(),
            "Scan error: 2:7: unrecognized character '#' in input"
        );

        let parse = Diagnostic::from(ParseError::Mismatch {
            expected: TokenKind::Ident,
            found: Found {
                kind: TokenKind::EOT,
                spelling: SmolStr::new(""),
                pos: Pos::new(1, 6),
            },
        });
        assert_eq!(
            parse.to_string(),
            "Parse error: 1:6: expecting 'identifier' but found end of input"
        );
    }

    #[test]
    fn test_found_display() {
        let ident = Found {
            kind: TokenKind::Ident,
            spelling: "foo".into(),
            pos: Pos::new(1, 1),
        };
        assert_eq!(ident.to_string(), "identifier \"foo\"");

        let semi = Found {
            kind: TokenKind::Semicolon,
            spelling: ";".into(),
            pos: Pos::new(1, 1),
        };
        assert_eq!(semi.to_string(), "';'");
    }
}
