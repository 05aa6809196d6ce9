use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use arith::{evaluate_source, HarnessError, Report};
use arith_parser::ParseOptions;
use clap::Parser;
use log::LevelFilter;

/// Environment variable overriding the default nesting limit.
const MAX_DEPTH_ENV: &str = "ARITH_MAX_DEPTH";

/// Environment variable overriding the default operator limit.
const MAX_OPERATORS_ENV: &str = "ARITH_MAX_OPERATORS";

#[derive(Debug, Parser)]
#[command(
    name = "arith",
    version,
    about = "Evaluate integer arithmetic expressions, one per line",
    long_about = "arith reads a file (or stdin) and evaluates every line as an arithmetic\n\
        expression over integers with + - * /, unary minus and brackets.\n\n\
        EXAMPLES:\n\
        \n  arith exprs.txt                 Evaluate every line of a file\n\
        \n  echo '1 + 2 * 3' | arith        Evaluate from stdin\n\
        \n  arith --json exprs.txt          Print the report as JSON"
)]
struct Cli {
    /// Input file with one expression per line (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Show the offending line with a caret under each error
    #[arg(long)]
    snippets: bool,

    /// Deepest allowed nesting of brackets and unary minus
    #[arg(long = "max-depth", value_name = "N")]
    max_depth: Option<usize>,

    /// Most binary operators allowed on one line
    #[arg(long = "max-operators", value_name = "N")]
    max_operators: Option<usize>,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn limit_from_env(name: &str) -> Option<usize> {
    let s = std::env::var(name).ok()?;
    match s.parse::<usize>() {
        Ok(n) => Some(n),
        Err(e) => {
            log::warn!("ignoring {name}={s:?}: {e}");
            None
        }
    }
}

fn parse_options(cli: &Cli) -> ParseOptions {
    let mut options = ParseOptions::default();
    if let Some(n) = cli.max_depth.or_else(|| limit_from_env(MAX_DEPTH_ENV)) {
        options = options.with_max_depth(n);
    }
    if let Some(n) = cli.max_operators.or_else(|| limit_from_env(MAX_OPERATORS_ENV)) {
        options = options.with_max_operators(n);
    }
    options
}

fn read_source_from_input(input: &Option<PathBuf>) -> Result<String, HarnessError> {
    if let Some(path) = input {
        fs::read_to_string(path).map_err(|source| HarnessError::ReadFile {
            path: path.display().to_string(),
            source,
        })
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(HarnessError::ReadStdin)?;
        Ok(buf)
    }
}

fn print_report(cli: &Cli, report: &Report) -> Result<(), HarnessError> {
    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render(cli.snippets));
    }
    Ok(())
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let source = match read_source_from_input(&cli.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };

    let options = parse_options(&cli);
    log::debug!("evaluating with {options:?}");
    let report = evaluate_source(&source, options);
    if let Err(e) = print_report(&cli, &report) {
        eprintln!("error: {e}");
        return 2;
    }

    if report.failures() > 0 {
        1
    } else {
        0
    }
}

fn main() {
    std::process::exit(run_cli());
}
