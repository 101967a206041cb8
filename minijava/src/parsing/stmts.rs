//! Statement parsing.
use std::io::Read;

use super::{is_expr_starter, is_statement_starter, Parser, Rule};
use crate::{
    error::ParseResult,
    tokens::{Keyword, TokenKind},
};

impl<'r, R: Read> Parser<'r, R> {
    /// ```text
    /// Statement ::= '{' Statement* '}'
    ///             | Type ID '=' Expr ';'
    ///             | Reference ( '[' Expr ']' '=' Expr ';'
    ///                         | '(' ArgList? ')' ';'
    ///                         | '=' Expr ';' )
    ///             | 'return' Expr? ';'
    ///             | 'if' '(' Expr ')' Statement ('else' Statement)?
    ///             | 'while' '(' Expr ')' Statement
    /// ```
    pub(super) fn parse_statement(&mut self) -> ParseResult<()> {
        use Keyword as K;
        use TokenKind as TK;

        self.rule(Rule::Statement, |p| match p.peek_kind() {
            // Declaration of a primitive local
            TK::Keyword(K::Int | K::Boolean) => {
                p.parse_type()?;
                p.parse_local_decl()
            }
            // Declaration with a class type, or a reference
            TK::Ident => p.parse_ident_statement(),
            TK::Keyword(K::This) => {
                p.parse_reference()?;
                p.parse_reference_statement()
            }
            TK::LeftBrace => p.parse_block(),
            TK::Keyword(K::Return) => p.parse_return(),
            TK::Keyword(K::If) => p.parse_if(),
            TK::Keyword(K::While) => p.parse_while(),
            _ => Err(p.unexpected("statement")),
        })
    }

    /// Local variable declaration after its type.
    ///
    /// ```text
    /// ID '=' Expr ';'
    /// ```
    fn parse_local_decl(&mut self) -> ParseResult<()> {
        self.accept(TokenKind::Ident)?;
        self.parse_assignment()
    }

    /// `'=' Expr ';'`
    fn parse_assignment(&mut self) -> ParseResult<()> {
        self.accept(TokenKind::Assign)?;
        self.parse_expr()?;
        self.accept(TokenKind::Semicolon)
    }

    /// Statement starting with an identifier.
    ///
    /// The identifier is either a class type beginning a declaration,
    /// or the head of a reference. The tokens after it decide:
    ///
    /// ```text
    /// Foo x = ...      // another identifier: declaration
    /// Foo[] x = ...    // `[` `]`: array declaration
    /// a[i] = ...       // `[` anything else: indexed assignment
    /// a.b(...)         // reference
    /// ```
    fn parse_ident_statement(&mut self) -> ParseResult<()> {
        use TokenKind as TK;

        let is_declaration = match self.peek_ahead(0) {
            TK::Ident => true,
            TK::LeftBracket => self.peek_ahead(1) == TK::RightBracket,
            _ => false,
        };

        if is_declaration {
            self.parse_type()?;
            self.parse_local_decl()
        } else {
            self.parse_reference()?;
            self.parse_reference_statement()
        }
    }

    /// Remainder of a statement after its reference.
    ///
    /// ```text
    /// '[' Expr ']' '=' Expr ';' | '(' ArgList? ')' ';' | '=' Expr ';'
    /// ```
    fn parse_reference_statement(&mut self) -> ParseResult<()> {
        use TokenKind as TK;

        match self.peek_kind() {
            TK::LeftBracket => {
                self.accept_it();
                self.parse_expr()?;
                self.accept(TK::RightBracket)?;
                self.parse_assignment()
            }
            TK::LeftParen => {
                self.parse_call_args()?;
                self.accept(TK::Semicolon)
            }
            TK::Assign => self.parse_assignment(),
            _ => Err(self.unexpected("'=', '[' or '('")),
        }
    }

    /// `'{' Statement* '}'`
    fn parse_block(&mut self) -> ParseResult<()> {
        self.accept(TokenKind::LeftBrace)?;
        while is_statement_starter(self.peek_kind()) {
            self.parse_statement()?;
        }
        self.accept(TokenKind::RightBrace)
    }

    /// `'return' Expr? ';'`
    fn parse_return(&mut self) -> ParseResult<()> {
        self.accept_keyword(Keyword::Return)?;
        if is_expr_starter(self.peek_kind()) {
            self.parse_expr()?;
        }
        self.accept(TokenKind::Semicolon)
    }

    /// `'if' '(' Expr ')' Statement ('else' Statement)?`
    ///
    /// An `else` belongs to the nearest `if`.
    fn parse_if(&mut self) -> ParseResult<()> {
        self.accept_keyword(Keyword::If)?;
        self.parse_condition()?;
        self.parse_statement()?;

        if self.match_token(TokenKind::Keyword(Keyword::Else)) {
            self.parse_statement()?;
        }

        Ok(())
    }

    /// `'while' '(' Expr ')' Statement`
    fn parse_while(&mut self) -> ParseResult<()> {
        self.accept_keyword(Keyword::While)?;
        self.parse_condition()?;
        self.parse_statement()
    }

    /// `'(' Expr ')'`
    fn parse_condition(&mut self) -> ParseResult<()> {
        self.accept(TokenKind::LeftParen)?;
        self.parse_expr()?;
        self.accept(TokenKind::RightParen)
    }
}

#[cfg(test)]
mod test {
    use super::super::{
        test::{assert_accepts, check_traced, single_parse_error},
        Rule, MAX_NESTING_DEPTH,
    };
    use crate::{
        error::ParseError,
        tokens::{Keyword, TokenKind},
    };

    /// Wrap statements in a method body.
    fn method(body: &str) -> String {
        format!("class T {{ void m() {{ {body} }} }}")
    }

    #[test]
    fn test_local_declarations() {
        assert_accepts(&method(
            "int x = 1; boolean b = true; int[] a = new int[3]; Foo f = new Foo(); Foo[] fs = new Foo[2];",
        ));
    }

    #[test]
    fn test_assignments() {
        assert_accepts(&method("x = 1; a[0] = x; a[i + 1] = a[i]; this.x = 2; o.arr[3] = 4;"));
    }

    #[test]
    fn test_calls() {
        assert_accepts(&method("f(); f(1); this.g(a, b + 1, h()); a.b.c(new Foo());"));
    }

    #[test]
    fn test_blocks() {
        assert_accepts(&method("{ } { x = 1; { y = 2; } }"));
    }

    #[test]
    fn test_return() {
        assert_accepts(&method("return;"));
        assert_accepts(&method("return x + 1;"));
        assert_accepts(&method("return this;"));
    }

    #[test]
    fn test_if_else() {
        assert_accepts(&method("if (x) y = 1;"));
        assert_accepts(&method("if (x < 3) { y = 1; } else { y = 2; }"));
        assert_accepts(&method("if (a) if (b) x = 1; else x = 2;"));
        assert_accepts(&method("if (a) x = 1; else if (b) x = 2; else x = 3;"));
    }

    #[test]
    fn test_while() {
        assert_accepts(&method("while (i < n) i = i + 1;"));
        assert_accepts(&method("while (true) { if (done) return; }"));
    }

    #[test]
    fn test_declaration_uses_assign() {
        let err = single_parse_error(&method("int x == 1;"));
        assert!(matches!(
            err,
            ParseError::Mismatch {
                expected: TokenKind::Assign,
                found,
            } if found.kind == TokenKind::Eq
        ));
    }

    #[test]
    fn test_declaration_requires_initializer() {
        let err = single_parse_error(&method("int x;"));
        assert!(matches!(
            err,
            ParseError::Mismatch {
                expected: TokenKind::Assign,
                ..
            }
        ));
    }

    #[test]
    fn test_bare_reference_is_not_a_statement() {
        let err = single_parse_error(&method("x;"));
        assert!(matches!(
            err,
            ParseError::Unexpected {
                expected: "'=', '[' or '('",
                ..
            }
        ));
    }

    #[test]
    fn test_call_requires_semicolon() {
        let err = single_parse_error(&method("f()"));
        assert!(matches!(
            err,
            ParseError::Mismatch {
                expected: TokenKind::Semicolon,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_condition_parens() {
        let err = single_parse_error(&method("while x < 1 x = 2;"));
        assert!(matches!(
            err,
            ParseError::Mismatch {
                expected: TokenKind::LeftParen,
                ..
            }
        ));
    }

    #[test]
    fn test_else_without_if() {
        // `else` can't start a statement, so the method body ends there.
        let err = single_parse_error(&method("else x = 1;"));
        assert!(matches!(
            err,
            ParseError::Mismatch {
                expected: TokenKind::RightBrace,
                found,
            } if found.kind == TokenKind::Keyword(Keyword::Else)
        ));
    }

    #[test]
    fn test_array_declaration_vs_index() {
        assert_accepts(&method("Foo[] a = b; a[1] = 2;"));

        // `[` then `]` commits to a declaration.
        let err = single_parse_error(&method("a[] = 2;"));
        assert!(matches!(
            err,
            ParseError::Mismatch {
                expected: TokenKind::Ident,
                ..
            }
        ));
    }

    #[test]
    fn test_identifier_statement_heads_are_traced() {
        let (accepted, trace) = check_traced(&method("Foo[] x = y; a.b = 2;"));
        assert!(accepted);

        let rules_of = |spelling: &str| {
            trace
                .iter()
                .find(|entry| entry.spelling == spelling)
                .map(|entry| entry.rules.clone())
                .unwrap()
        };

        let foo = rules_of("Foo");
        assert_eq!(&foo[foo.len() - 2..], &[Rule::Statement, Rule::Type]);
        assert_eq!(rules_of("]").last(), Some(&Rule::Type));
        assert_eq!(rules_of("x").last(), Some(&Rule::Statement));

        let a = rules_of("a");
        assert_eq!(&a[a.len() - 2..], &[Rule::Statement, Rule::Reference]);
        assert_eq!(rules_of("b").last(), Some(&Rule::Reference));
    }

    #[test]
    fn test_deeply_nested_blocks() {
        let depth = 100_000;
        let body = format!("{}{}", "{".repeat(depth), "}".repeat(depth));
        let err = single_parse_error(&method(&body));
        assert!(matches!(
            err,
            ParseError::TooDeep {
                limit: MAX_NESTING_DEPTH,
                found,
            } if found.kind == TokenKind::LeftBrace
        ));
    }
}
