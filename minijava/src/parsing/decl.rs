//! Class and member declarations.
use std::io::Read;

use super::{is_member_starter, is_statement_starter, is_type_starter, Parser, Rule};
use crate::{
    error::ParseResult,
    tokens::{Keyword, TokenKind},
};

impl<'r, R: Read> Parser<'r, R> {
    /// ```text
    /// Program ::= ClassDecl* EOT
    /// ```
    pub(super) fn parse_program(&mut self) -> ParseResult<()> {
        self.rule(Rule::Program, |p| {
            while p.at_keyword(Keyword::Class) {
                p.parse_class_decl()?;
            }
            p.accept(TokenKind::EOT)
        })
    }

    /// ```text
    /// ClassDecl ::= 'class' ID '{' MemberDecl* '}'
    /// ```
    fn parse_class_decl(&mut self) -> ParseResult<()> {
        self.rule(Rule::ClassDecl, |p| {
            p.accept_keyword(Keyword::Class)?;
            p.accept(TokenKind::Ident)?;
            p.accept(TokenKind::LeftBrace)?;

            while is_member_starter(p.peek_kind()) {
                p.parse_member_decl()?;
            }

            p.accept(TokenKind::RightBrace)
        })
    }

    /// Field or method declaration.
    ///
    /// ```text
    /// MemberDecl ::= Visibility Access
    ///                ( 'void' ID MethodBody
    ///                | Type ID (';' | MethodBody) )
    /// ```
    ///
    /// Fields and methods share their prefix, so the kind of member
    /// is only decided after its name, by the presence of a `;`.
    fn parse_member_decl(&mut self) -> ParseResult<()> {
        self.rule(Rule::MemberDecl, |p| {
            p.parse_visibility();
            p.parse_access();

            if p.at_keyword(Keyword::Void) {
                p.accept_it();
                p.accept(TokenKind::Ident)?;
                return p.parse_method_body();
            }

            p.parse_type()?;
            p.accept(TokenKind::Ident)?;

            if p.match_token(TokenKind::Semicolon) {
                // Field
                Ok(())
            } else {
                p.parse_method_body()
            }
        })
    }

    /// ```text
    /// Visibility ::= ('public' | 'private')?
    /// ```
    fn parse_visibility(&mut self) {
        if self.at_keyword(Keyword::Public) || self.at_keyword(Keyword::Private) {
            self.accept_it();
        }
    }

    /// ```text
    /// Access ::= 'static'?
    /// ```
    fn parse_access(&mut self) {
        self.match_token(TokenKind::Keyword(Keyword::Static));
    }

    /// ```text
    /// MethodBody ::= '(' ParamList? ')' '{' Statement* '}'
    /// ```
    fn parse_method_body(&mut self) -> ParseResult<()> {
        self.rule(Rule::MethodBody, |p| {
            p.accept(TokenKind::LeftParen)?;
            if is_type_starter(p.peek_kind()) {
                p.parse_param_list()?;
            }
            p.accept(TokenKind::RightParen)?;

            p.accept(TokenKind::LeftBrace)?;
            while is_statement_starter(p.peek_kind()) {
                p.parse_statement()?;
            }
            p.accept(TokenKind::RightBrace)
        })
    }

    /// ```text
    /// ParamList ::= Type ID (',' Type ID)*
    /// ```
    fn parse_param_list(&mut self) -> ParseResult<()> {
        self.rule(Rule::ParamList, |p| {
            p.parse_type()?;
            p.accept(TokenKind::Ident)?;

            while p.match_token(TokenKind::Comma) {
                p.parse_type()?;
                p.accept(TokenKind::Ident)?;
            }

            Ok(())
        })
    }
}
