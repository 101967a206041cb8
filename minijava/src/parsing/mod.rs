//! Syntactic analysis.
//!
//! Predictive recursive descent with a single token of lookahead,
//! except for statements led by an identifier which look two tokens
//! further to tell a declaration from a reference.
//! Every grammar rule is a method on [`Parser`] returning a
//! [`ParseResult`], so the first syntax error unwinds the whole parse
//! through `?` and is reported once by [`Parser::parse`].
mod decl;
mod expr;
mod stmts;
mod types;

use std::{collections::VecDeque, fmt, io::Read};

use log::{debug, trace};
use smol_str::SmolStr;

use crate::{
    error::{Found, ParseError, ParseResult},
    reporter::Reporter,
    scanner::Scanner,
    tokens::{Keyword, Token, TokenKind},
};

/// Maximum number of grammar rules active at once.
///
/// Every level of nesting costs several stack frames, so deeply nested
/// parentheses, unary operators or blocks are rejected with
/// [`ParseError::TooDeep`] instead of exhausting the stack.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parser configuration parameters.
#[derive(Debug, Default, Clone)]
pub struct ParserConf {
    /// Record every accepted token together with the
    /// grammar rules that were active when it was accepted.
    pub trace: bool,
}

pub struct Parser<'r, R: Read> {
    scanner: Scanner<R>,
    reporter: &'r mut Reporter,
    /// Lookahead. Always the next unconsumed token.
    token: Token,
    /// Tokens scanned past the lookahead, oldest first.
    ahead: VecDeque<Token>,
    conf: ParserConf,
    /// Number of active grammar rules.
    depth: usize,
    /// Active grammar rules, innermost last. Only kept when tracing.
    rules: Vec<Rule>,
    trace: Vec<TraceEntry>,
}

impl<'r, R: Read> Parser<'r, R> {
    pub fn new(scanner: Scanner<R>, reporter: &'r mut Reporter) -> Self {
        Self::with_conf(scanner, reporter, ParserConf::default())
    }

    pub fn with_conf(mut scanner: Scanner<R>, reporter: &'r mut Reporter, conf: ParserConf) -> Self {
        let token = scanner.scan(reporter);

        Self {
            scanner,
            reporter,
            token,
            ahead: VecDeque::new(),
            conf,
            depth: 0,
            rules: vec![],
            trace: vec![],
        }
    }

    /// Check the whole input against the grammar.
    ///
    /// Returns `true` when the program is accepted, meaning nothing
    /// was reported during the run, including scan errors.
    pub fn parse(&mut self) -> bool {
        debug!("syntactic analysis started");

        if let Err(err) = self.parse_program() {
            // Only the first syntax error is reported.
            self.reporter.report(err);
        }

        debug!(
            "syntactic analysis finished with {} error(s)",
            self.reporter.error_count()
        );

        !self.reporter.has_errors()
    }

    /// Accepted tokens, recorded when [`ParserConf::trace`] is enabled.
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }
}

/// Primitives.
impl<'r, R: Read> Parser<'r, R> {
    /// Kind of the lookahead token.
    #[inline]
    fn peek_kind(&self) -> TokenKind {
        self.token.kind
    }

    /// Kind of the token `offset` places after the lookahead.
    ///
    /// Scans ahead as needed. The tokens are kept, and handed out by
    /// [`Parser::accept_it`] before anything new is scanned.
    fn peek_ahead(&mut self, offset: usize) -> TokenKind {
        while self.ahead.len() <= offset {
            let token = self.scanner.scan(self.reporter);
            self.ahead.push_back(token);
        }
        self.ahead.get(offset).map_or(TokenKind::EOT, |token| token.kind)
    }

    #[inline]
    fn at(&self, kind: TokenKind) -> bool {
        self.token.kind == kind
    }

    #[inline]
    fn at_keyword(&self, keyword: Keyword) -> bool {
        self.token.kind.is_keyword(keyword)
    }

    /// Verify that the lookahead is of the expected kind, and advance
    /// to the next token.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Mismatch`] without advancing when the
    /// kinds don't match.
    fn accept(&mut self, expected: TokenKind) -> ParseResult<()> {
        if self.token.kind == expected {
            self.accept_it();
            Ok(())
        } else {
            Err(ParseError::Mismatch {
                expected,
                found: Found::from(&self.token),
            })
        }
    }

    #[inline]
    fn accept_keyword(&mut self, keyword: Keyword) -> ParseResult<()> {
        self.accept(TokenKind::Keyword(keyword))
    }

    /// Accept the lookahead, whatever it is.
    ///
    /// Callers must have checked the lookahead already.
    fn accept_it(&mut self) {
        if self.conf.trace {
            self.trace_token();
        }
        self.token = match self.ahead.pop_front() {
            Some(token) => token,
            None => self.scanner.scan(self.reporter),
        };
    }

    /// Consume the lookahead if it is of the given kind.
    fn match_token(&mut self, kind: TokenKind) -> bool {
        let is_match = self.token.kind == kind;
        if is_match {
            self.accept_it();
        }
        is_match
    }

    /// Error for a lookahead that doesn't start any alternative.
    #[cold]
    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::Unexpected {
            expected,
            found: Found::from(&self.token),
        }
    }

    /// Run a grammar rule, keeping the rule stack up to date when tracing.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::TooDeep`] when [`MAX_NESTING_DEPTH`] rules
    /// are already active.
    fn rule<T>(&mut self, rule: Rule, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::TooDeep {
                limit: MAX_NESTING_DEPTH,
                found: Found::from(&self.token),
            });
        }

        self.depth += 1;
        if self.conf.trace {
            self.rules.push(rule);
        }

        let result = f(self);

        if self.conf.trace {
            self.rules.pop();
        }
        self.depth -= 1;

        result
    }

    fn trace_token(&mut self) {
        let entry = TraceEntry {
            rules: self.rules.clone(),
            kind: self.token.kind,
            spelling: self.token.spelling.clone(),
        };
        trace!("{entry}");
        self.trace.push(entry);
    }
}

/// Grammar rules, as they appear in a parse trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Program,
    ClassDecl,
    MemberDecl,
    MethodBody,
    ParamList,
    Type,
    Reference,
    Statement,
    Expr,
    Operand,
    ArgList,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A token accepted by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    /// Rules that were active, outermost first.
    pub rules: Vec<Rule>,
    pub kind: TokenKind,
    pub spelling: SmolStr,
}

impl TraceEntry {
    /// Number of occurrences of a rule in the stack.
    pub fn depth(&self, rule: Rule) -> usize {
        self.rules.iter().filter(|r| **r == rule).count()
    }
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                write!(f, " > ")?;
            }
            write!(f, "{rule}")?;
        }
        write!(f, ": accepting {:?} (\"{}\")", self.kind, self.spelling)
    }
}

// ----------------------------------------------------------------------------
// FIRST sets

fn is_member_starter(kind: TokenKind) -> bool {
    use Keyword as K;
    use TokenKind as TK;
    matches!(
        kind,
        TK::Keyword(K::Public | K::Private | K::Static | K::Void)
    ) || is_type_starter(kind)
}

fn is_type_starter(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Keyword(Keyword::Int | Keyword::Boolean) | TokenKind::Ident
    )
}

fn is_reference_starter(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Ident | TokenKind::Keyword(Keyword::This))
}

fn is_statement_starter(kind: TokenKind) -> bool {
    use Keyword as K;
    use TokenKind as TK;
    matches!(
        kind,
        TK::LeftBrace | TK::Keyword(K::Return | K::If | K::While)
    ) || is_type_starter(kind)
        || is_reference_starter(kind)
}

fn is_expr_starter(kind: TokenKind) -> bool {
    use Keyword as K;
    use TokenKind as TK;
    matches!(
        kind,
        TK::Minus | TK::Not | TK::LeftParen | TK::Number | TK::Keyword(K::True | K::False | K::New)
    ) || is_reference_starter(kind)
}
