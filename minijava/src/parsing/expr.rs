//! Expression parsing.
//!
//! Binary operators are parsed by precedence climbing over the
//! binding powers in [`binary_binding_power`]. Operands, including
//! unary operators, bind tighter than any binary operator.
use std::io::Read;

use super::{is_expr_starter, Parser, Rule};
use crate::{
    error::ParseResult,
    tokens::{Keyword, TokenKind},
};

/// Binding power for binary operators.
///
/// Higher values bind tighter. Left associative operators bind
/// their right operand one step tighter than their left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingPower {
    pub left: u8,
    pub right: u8,
}

impl BindingPower {
    pub const fn left_assoc(precedence: u8) -> Self {
        Self {
            left: precedence,
            right: precedence + 1,
        }
    }
}

/// Binding power of a binary operator token.
///
/// | Level | Operators         |
/// |-------|-------------------|
/// | 10    | `\|\|`            |
/// | 20    | `&&`              |
/// | 30    | `==` `!=`         |
/// | 40    | `<` `<=` `>` `>=` |
/// | 50    | `+` `-`           |
/// | 60    | `*` `/`           |
///
/// Returns `None` for tokens that aren't binary operators, which
/// ends the expression.
#[rustfmt::skip]
pub fn binary_binding_power(kind: TokenKind) -> Option<BindingPower> {
    use TokenKind as TK;
    match kind {
        TK::Or                                          => Some(BindingPower::left_assoc(10)),
        TK::And                                         => Some(BindingPower::left_assoc(20)),
        TK::Eq | TK::NotEq                              => Some(BindingPower::left_assoc(30)),
        TK::Less | TK::LessEq | TK::Greater | TK::GreaterEq => Some(BindingPower::left_assoc(40)),
        TK::Plus | TK::Minus                            => Some(BindingPower::left_assoc(50)),
        TK::Star | TK::Slash                            => Some(BindingPower::left_assoc(60)),
        _ => None,
    }
}

impl<'r, R: Read> Parser<'r, R> {
    /// ```text
    /// Expr ::= Operand (BinOp Operand)*
    /// ```
    pub(super) fn parse_expr(&mut self) -> ParseResult<()> {
        self.parse_expr_bp(0)
    }

    fn parse_expr_bp(&mut self, min_bp: u8) -> ParseResult<()> {
        self.rule(Rule::Expr, |p| {
            p.parse_operand()?;

            while let Some(bp) = binary_binding_power(p.peek_kind()) {
                // Operator binds less tightly than the caller's; it
                // belongs to an enclosing expression.
                if bp.left < min_bp {
                    break;
                }

                p.accept_it();
                p.parse_expr_bp(bp.right)?;
            }

            Ok(())
        })
    }

    /// ```text
    /// Operand ::= ('-' | '!') Operand
    ///           | '(' Expr ')'
    ///           | NUM | 'true' | 'false'
    ///           | 'new' ( ID ('(' Expr? ')' | '[' Expr ']')
    ///                   | 'int' '[' Expr ']' )
    ///           | Reference ('[' Expr ']' | '(' ArgList? ')')?
    /// ```
    fn parse_operand(&mut self) -> ParseResult<()> {
        use Keyword as K;
        use TokenKind as TK;

        self.rule(Rule::Operand, |p| match p.peek_kind() {
            TK::Minus | TK::Not => {
                p.accept_it();
                p.parse_operand()
            }
            TK::LeftParen => {
                p.accept_it();
                p.parse_expr()?;
                p.accept(TK::RightParen)
            }
            TK::Number | TK::Keyword(K::True | K::False) => {
                p.accept_it();
                Ok(())
            }
            TK::Keyword(K::New) => p.parse_new(),
            TK::Ident | TK::Keyword(K::This) => {
                p.parse_reference()?;
                match p.peek_kind() {
                    TK::LeftBracket => p.parse_index(),
                    TK::LeftParen => p.parse_call_args(),
                    _ => Ok(()),
                }
            }
            _ => Err(p.unexpected("expression")),
        })
    }

    /// Object or array construction.
    ///
    /// A constructor call takes zero or one argument, so `new Foo()` is
    /// accepted as well as `new Foo(x)`.
    fn parse_new(&mut self) -> ParseResult<()> {
        use TokenKind as TK;

        self.accept_keyword(Keyword::New)?;

        match self.peek_kind() {
            TK::Ident => {
                self.accept_it();
                match self.peek_kind() {
                    TK::LeftParen => {
                        self.accept_it();
                        if is_expr_starter(self.peek_kind()) {
                            self.parse_expr()?;
                        }
                        self.accept(TK::RightParen)
                    }
                    TK::LeftBracket => self.parse_index(),
                    _ => Err(self.unexpected("'(' or '['")),
                }
            }
            TK::Keyword(Keyword::Int) => {
                self.accept_it();
                self.parse_index()
            }
            _ => Err(self.unexpected("class name or 'int'")),
        }
    }

    /// `'[' Expr ']'`
    fn parse_index(&mut self) -> ParseResult<()> {
        self.accept(TokenKind::LeftBracket)?;
        self.parse_expr()?;
        self.accept(TokenKind::RightBracket)
    }

    /// `'(' ArgList? ')'`
    pub(super) fn parse_call_args(&mut self) -> ParseResult<()> {
        self.accept(TokenKind::LeftParen)?;
        if is_expr_starter(self.peek_kind()) {
            self.parse_arg_list()?;
        }
        self.accept(TokenKind::RightParen)
    }

    /// ```text
    /// ArgList ::= Expr (',' Expr)*
    /// ```
    fn parse_arg_list(&mut self) -> ParseResult<()> {
        self.rule(Rule::ArgList, |p| {
            p.parse_expr()?;
            while p.match_token(TokenKind::Comma) {
                p.parse_expr()?;
            }
            Ok(())
        })
    }
}
