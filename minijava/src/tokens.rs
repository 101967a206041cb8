//! Tokens

use smol_str::SmolStr;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact text matched by the scanner.
    pub spelling: SmolStr,
    pub pos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, spelling: impl Into<SmolStr>, pos: Pos) -> Self {
        Self {
            kind,
            spelling: spelling.into(),
            pos,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[rustfmt::skip]
pub enum TokenKind {
    // Simple
    LeftParen,    // (
    RightParen,   // )
    LeftBracket,  // [
    RightBracket, // ]
    LeftBrace,    // {
    RightBrace,   // }
    Dot,          // .
    Comma,        // ,
    Semicolon,    // ;

    // ------------------------------------------------------------------------
    // Operators
    Assign,       // =
    Eq,           // ==
    NotEq,        // !=
    Not,          // !
    Greater,      // >
    GreaterEq,    // >=
    Less,         // <
    LessEq,       // <=
    And,          // &&
    Or,           // ||
    Plus,         // +
    Minus,        // -
    Star,         // *
    Slash,        // /

    // ------------------------------------------------------------------------
    // Complex
    Ident,
    /// Reserved identifiers
    Keyword(Keyword),
    /// Number literal
    Number,

    // ------------------------------------------------------------------------
    // Special
    /// Character that doesn't start any token. Already reported by the scanner.
    Error,
    /// End-of-text
    EOT,
}

impl TokenKind {
    /// Shorthand for keyword token kinds.
    #[inline]
    pub const fn kw(keyword: Keyword) -> Self {
        TokenKind::Keyword(keyword)
    }

    #[inline]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == keyword)
    }
}

impl fmt::Display for TokenKind {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use TokenKind as TK;
        match self {
            TK::LeftParen    => write!(f, "("),
            TK::RightParen   => write!(f, ")"),
            TK::LeftBracket  => write!(f, "["),
            TK::RightBracket => write!(f, "]"),
            TK::LeftBrace    => write!(f, "{{"),
            TK::RightBrace   => write!(f, "}}"),
            TK::Dot          => write!(f, "."),
            TK::Comma        => write!(f, ","),
            TK::Semicolon    => write!(f, ";"),
            TK::Assign       => write!(f, "="),
            TK::Eq           => write!(f, "=="),
            TK::NotEq        => write!(f, "!="),
            TK::Not          => write!(f, "!"),
            TK::Greater      => write!(f, ">"),
            TK::GreaterEq    => write!(f, ">="),
            TK::Less         => write!(f, "<"),
            TK::LessEq       => write!(f, "<="),
            TK::And          => write!(f, "&&"),
            TK::Or           => write!(f, "||"),
            TK::Plus         => write!(f, "+"),
            TK::Minus        => write!(f, "-"),
            TK::Star         => write!(f, "*"),
            TK::Slash        => write!(f, "/"),
            TK::Ident        => write!(f, "identifier"),
            TK::Keyword(kw)  => write!(f, "{kw}"),
            TK::Number       => write!(f, "number"),
            TK::Error        => write!(f, "error"),
            TK::EOT          => write!(f, "end of input"),
        }
    }
}

/// Reserved keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[rustfmt::skip]
pub enum Keyword {
    // ------------------------------------------------------------------------
    // Declarations
    Class,    // class
    Public,   // public
    Private,  // private
    Static,   // static
    Void,     // void

    // ------------------------------------------------------------------------
    // Types
    Int,      // int
    Boolean,  // boolean

    // ------------------------------------------------------------------------
    // Statements
    If,       // if
    Else,     // else
    While,    // while
    Return,   // return

    // ------------------------------------------------------------------------
    // Expressions
    True,     // true
    False,    // false
    This,     // this
    New,      // new
}

impl Keyword {
    /// Look up a complete identifier spelling in the table of reserved words.
    ///
    /// Keywords are case sensitive.
    #[rustfmt::skip]
    pub fn parse(text: impl AsRef<str>) -> Option<Self> {
        match text.as_ref() {
            "class"   => Some(Self::Class),
            "public"  => Some(Self::Public),
            "private" => Some(Self::Private),
            "static"  => Some(Self::Static),
            "void"    => Some(Self::Void),
            // ----------------------------------------------------------------
            "int"     => Some(Self::Int),
            "boolean" => Some(Self::Boolean),
            // ----------------------------------------------------------------
            "if"      => Some(Self::If),
            "else"    => Some(Self::Else),
            "while"   => Some(Self::While),
            "return"  => Some(Self::Return),
            // ----------------------------------------------------------------
            "true"    => Some(Self::True),
            "false"   => Some(Self::False),
            "this"    => Some(Self::This),
            "new"     => Some(Self::New),
            // ----------------------------------------------------------------
            _ => None,
        }
    }

    #[rustfmt::skip]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class   => "class",
            Self::Public  => "public",
            Self::Private => "private",
            Self::Static  => "static",
            Self::Void    => "void",
            Self::Int     => "int",
            Self::Boolean => "boolean",
            Self::If      => "if",
            Self::Else    => "else",
            Self::While   => "while",
            Self::Return  => "return",
            Self::True    => "true",
            Self::False   => "false",
            Self::This    => "this",
            Self::New     => "new",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line and column of a character in the source, both starting at 1.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Pos {
    pub line: u32,
    pub column: u32,
}

impl Pos {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const ALL_KEYWORDS: &[Keyword] = &[
        Keyword::Class,
        Keyword::Public,
        Keyword::Private,
        Keyword::Static,
        Keyword::Void,
        Keyword::Int,
        Keyword::Boolean,
        Keyword::If,
        Keyword::Else,
        Keyword::While,
        Keyword::Return,
        Keyword::True,
        Keyword::False,
        Keyword::This,
        Keyword::New,
    ];

    #[test]
    fn test_keyword_table() {
        for keyword in ALL_KEYWORDS {
            assert_eq!(Keyword::parse(keyword.as_str()), Some(*keyword));
        }
    }

    #[test]
    fn test_keyword_case_sensitive() {
        assert_eq!(Keyword::parse("Class"), None);
        assert_eq!(Keyword::parse("INT"), None);
        assert_eq!(Keyword::parse("classy"), None);
        assert_eq!(Keyword::parse(""), None);
    }

    #[test]
    fn test_token_kind_display() {
        assert_eq!(TokenKind::GreaterEq.to_string(), ">=");
        assert_eq!(TokenKind::LeftBrace.to_string(), "{");
        assert_eq!(TokenKind::kw(Keyword::While).to_string(), "while");
        assert_eq!(TokenKind::Ident.to_string(), "identifier");
        assert_eq!(TokenKind::EOT.to_string(), "end of input");
    }
}
