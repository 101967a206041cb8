//! Entrypoint for CLI
mod error;

use std::{
    env,
    fs::File,
    io::{self, Read, Write},
    process,
};

use log::{error, info, LevelFilter};
use minijava::{check, ParserConf, Reporter, Scanner, TokenKind, IMPL_VERSION};

use self::error::CliError;

static USAGE: &str = r#"
usage: minijava [OPTIONS] [FILE]

Checks the syntax of a miniJava program. Reads standard
input when FILE is omitted or `-`.

options:
    --trace     Log every token accepted by the parser
    --tokens    Print the token stream instead of parsing
    -h, --help  Print this message

exit status:
    0   valid program
    4   invalid program
    3   input could not be read
    64  bad usage

examples:
    minijava Counter.java
    minijava --trace < Counter.java
"#;

/// Program was accepted.
const EXIT_VALID: i32 = 0;
/// Input could not be opened.
const EXIT_IO: i32 = 3;
/// Scan or parse errors were reported.
const EXIT_INVALID: i32 = 4;
/// FreeBSD EX_USAGE
const EXIT_USAGE: i32 = 64;

fn main() {
    let args = match parse_args(env::args().skip(1)) {
        Some(args) => args,
        None => {
            print_usage();
            process::exit(EXIT_USAGE)
        }
    };

    if args.help {
        print_usage();
        return;
    }

    if let Err(err) = init_logger(&args) {
        eprintln!("{err}");
        process::exit(EXIT_IO);
    }

    let result = if args.tokens {
        dump_tokens(&args)
    } else {
        run_parser(&args)
    };

    match result {
        Ok(true) => process::exit(EXIT_VALID),
        Ok(false) => process::exit(EXIT_INVALID),
        Err(err) => {
            error!("{err}");
            process::exit(EXIT_IO)
        }
    }
}

fn init_logger(args: &Args) -> Result<(), CliError> {
    let level = if args.trace {
        LevelFilter::Trace
    } else {
        LevelFilter::Warn
    };

    // `RUST_LOG` takes precedence over the level picked here.
    simple_logger::SimpleLogger::new()
        .with_level(level)
        .env()
        .init()?;

    Ok(())
}

/// Open the program source, prompting for it on standard input.
fn open_input(args: &Args) -> Result<Box<dyn Read>, CliError> {
    match args.filepath.as_deref() {
        None | Some("-") => {
            print!("Enter miniJava program: ");
            io::stdout().flush()?;
            Ok(Box::new(io::stdin()))
        }
        Some(filepath) => {
            info!("reading {filepath}");
            Ok(Box::new(File::open(filepath)?))
        }
    }
}

/// Check the program syntax. Returns whether it was accepted.
fn run_parser(args: &Args) -> Result<bool, CliError> {
    let input = open_input(args)?;
    let conf = ParserConf { trace: args.trace };

    println!("Syntactic analysis ... ");
    let reporter = check(input, conf);
    print_diagnostics(&reporter);
    print!("Syntactic analysis complete:  ");

    if reporter.has_errors() {
        println!("INVALID miniJava program");
        Ok(false)
    } else {
        println!("valid miniJava program");
        Ok(true)
    }
}

/// Print the token stream as a table. Returns whether it was free of scan errors.
fn dump_tokens(args: &Args) -> Result<bool, CliError> {
    let input = open_input(args)?;
    let mut reporter = Reporter::new();

    println!("line:col | token        | spelling");
    for token in Scanner::new(input).tokens(&mut reporter) {
        let pos = token.pos.to_string();
        let kind = format!("{:?}", token.kind); // cannot format debug print {:?} into columns
        match token.kind {
            TokenKind::EOT => println!("{pos: >8} | {kind: <12} |"),
            _ => println!("{pos: >8} | {kind: <12} | \"{}\"", token.spelling),
        }
    }

    print_diagnostics(&reporter);

    Ok(!reporter.has_errors())
}

/// Diagnostics go straight to standard error, so they show whatever
/// the log level.
fn print_diagnostics(reporter: &Reporter) {
    if let Err(err) = write_diagnostics(&mut io::stderr().lock(), reporter) {
        error!("{err}");
    }
}

fn write_diagnostics(out: &mut impl Write, reporter: &Reporter) -> io::Result<()> {
    for diagnostic in reporter.diagnostics() {
        writeln!(out, "{diagnostic}")?;
    }
    Ok(())
}

fn print_usage() {
    println!("miniJava v{IMPL_VERSION}");
    println!("{USAGE}");
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    filepath: Option<String>,
    trace: bool,
    tokens: bool,
    help: bool,
}

/// Returns `None` when the arguments don't make sense.
fn parse_args(args: impl Iterator<Item = String>) -> Option<Args> {
    let mut parsed = Args::default();

    for arg in args {
        match arg.as_str() {
            "--trace" => parsed.trace = true,
            "--tokens" => parsed.tokens = true,
            "-h" | "--help" => parsed.help = true,
            flag if flag.starts_with('-') && flag != "-" => return None,
            filepath => {
                // Only one program per run.
                if parsed.filepath.is_some() {
                    return None;
                }
                parsed.filepath = Some(filepath.to_owned());
            }
        }
    }

    Some(parsed)
}
