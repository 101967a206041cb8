//! Types and references.
use std::io::Read;

use super::{Parser, Rule};
use crate::{
    error::ParseResult,
    tokens::{Keyword, TokenKind},
};

impl<'r, R: Read> Parser<'r, R> {
    /// ```text
    /// Type ::= 'int' ('[' ']')? | 'boolean' | ID ('[' ']')?
    /// ```
    pub(super) fn parse_type(&mut self) -> ParseResult<()> {
        use TokenKind as TK;

        self.rule(Rule::Type, |p| match p.peek_kind() {
            TK::Keyword(Keyword::Boolean) => {
                p.accept_it();
                Ok(())
            }
            TK::Keyword(Keyword::Int) | TK::Ident => {
                p.accept_it();
                p.parse_array_suffix()
            }
            _ => Err(p.unexpected("type")),
        })
    }

    /// Optional `[]` making the preceding element type an array.
    fn parse_array_suffix(&mut self) -> ParseResult<()> {
        if self.at(TokenKind::LeftBracket) {
            self.accept_it();
            self.accept(TokenKind::RightBracket)?;
        }
        Ok(())
    }

    /// ```text
    /// Reference ::= (ID | 'this') ('.' ID)*
    /// ```
    pub(super) fn parse_reference(&mut self) -> ParseResult<()> {
        use TokenKind as TK;

        self.rule(Rule::Reference, |p| {
            match p.peek_kind() {
                TK::Ident | TK::Keyword(Keyword::This) => p.accept_it(),
                _ => return Err(p.unexpected("identifier or 'this'")),
            }
            p.parse_member_access()
        })
    }

    /// Trailing `.ID` selections of a reference whose head was already accepted.
    fn parse_member_access(&mut self) -> ParseResult<()> {
        while self.match_token(TokenKind::Dot) {
            self.accept(TokenKind::Ident)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::super::test::{assert_accepts, single_parse_error};
    use crate::{error::ParseError, tokens::TokenKind};

    #[test]
    fn test_types() {
        assert_accepts("class T { int a; int[] b; boolean c; Foo d; Foo[] e; }");
    }

    #[test]
    fn test_boolean_arrays_not_allowed() {
        let err = single_parse_error("class T { boolean[] a; }");
        assert!(matches!(
            err,
            ParseError::Mismatch {
                expected: TokenKind::Ident,
                found,
            } if found.kind == TokenKind::LeftBracket
        ));
    }

    #[test]
    fn test_array_type_must_close() {
        let err = single_parse_error("class T { int[ a; }");
        assert!(matches!(
            err,
            ParseError::Mismatch {
                expected: TokenKind::RightBracket,
                ..
            }
        ));
    }

    #[test]
    fn test_reference_chains() {
        assert_accepts(
            "class T { void m() { a.b.c = 1; this.x.y = 2; this.f(); a.b.c.d(1, 2); } }",
        );
    }

    #[test]
    fn test_reference_dot_requires_identifier() {
        let err = single_parse_error("class T { void m() { this.; } }");
        assert!(matches!(
            err,
            ParseError::Mismatch {
                expected: TokenKind::Ident,
                ..
            }
        ));
    }
}
