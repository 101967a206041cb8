//! Lexical and syntactic analysis of miniJava programs.
//!
//! ```
//! let reporter = minijava::check_str("class Hello { int x; }");
//! assert!(!reporter.has_errors());
//! ```
pub mod cursor;
pub mod error;
pub mod parsing;
pub mod reporter;
pub mod scanner;
pub mod tokens;

use std::io::Read;

pub use self::{
    error::{Diagnostic, ParseError, ParseResult, ScanError},
    parsing::{Parser, ParserConf, MAX_NESTING_DEPTH},
    reporter::Reporter,
    scanner::Scanner,
    tokens::{Keyword, Pos, Token, TokenKind},
};

pub const IMPL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the scanner and parser over a program read from the given stream.
///
/// The returned reporter holds every diagnostic of the run. The program
/// is accepted when [`Reporter::has_errors`] is `false`.
pub fn check(source: impl Read, conf: ParserConf) -> Reporter {
    let mut reporter = Reporter::new();

    {
        let scanner = Scanner::new(source);
        let mut parser = Parser::with_conf(scanner, &mut reporter, conf);
        parser.parse();
    }

    reporter
}

/// Check a program held in memory, with the default configuration.
pub fn check_str(source_code: impl AsRef<str>) -> Reporter {
    check(source_code.as_ref().as_bytes(), ParserConf::default())
}
