//! Line-oriented evaluation: every line of the input is parsed and evaluated
//! on its own, and a bad line never stops the ones after it.

use std::fmt::Write as _;

use arith_ast::NodeCensus;
use arith_parser::parser::render_snippet;
use arith_parser::{parse_with_census, ParseOptions, SyntaxError};
use serde::Serialize;

/// Errors that stop a whole run rather than a single line.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("failed to read '{path}': {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read from stdin: {0}")]
    ReadStdin(#[source] std::io::Error),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// What happened to one input line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LineOutcome {
    /// Empty or whitespace-only line
    Blank,
    Value {
        expression: String,
        value: f64,
    },
    Error {
        expression: String,
        #[serde(serialize_with = "serialize_error")]
        error: SyntaxError,
    },
}

fn serialize_error<S: serde::Serializer>(err: &SyntaxError, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&err.to_string())
}

/// Outcome of every line plus the leak audit taken once all trees were released.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub lines: Vec<LineOutcome>,
    pub leaks: usize,
}

impl Report {
    /// Number of lines that failed to parse.
    pub fn failures(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, LineOutcome::Error { .. }))
            .count()
    }

    /// Plain-text rendering: `<expression> = <value>` or the error, one line each,
    /// followed by the leak count.
    pub fn render(&self, snippets: bool) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line {
                LineOutcome::Blank => out.push('\n'),
                LineOutcome::Value { expression, value } => {
                    let _ = writeln!(out, "{expression} = {value}");
                }
                LineOutcome::Error { expression, error } if snippets => {
                    let _ = writeln!(out, "{}", render_snippet(error, expression));
                }
                LineOutcome::Error { error, .. } => {
                    let _ = writeln!(out, "{error}");
                }
            }
        }
        let _ = write!(out, "\n{} leaks detected\n", self.leaks);
        out
    }

    pub fn to_json(&self) -> Result<String, HarnessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse and evaluate one line, enrolling its tree in `census`.
///
/// The tree is dropped before returning, so a correct parser leaves
/// `census` where it found it.
pub fn evaluate_line(line: &str, options: ParseOptions, census: &NodeCensus) -> LineOutcome {
    let expression = line.trim_end_matches(&['\r', '\n'][..]);
    if expression.trim().is_empty() {
        return LineOutcome::Blank;
    }

    match parse_with_census(expression, options, census) {
        Ok(tree) => {
            log::debug!("{expression:?} parsed into {} nodes", tree.node_count());
            LineOutcome::Value {
                expression: expression.to_string(),
                value: tree.evaluate(),
            }
        }
        Err(error) => {
            log::info!("{expression:?} rejected: {error}");
            LineOutcome::Error {
                expression: expression.to_string(),
                error,
            }
        }
    }
}

/// Evaluate every line of `source`.
pub fn evaluate_source(source: &str, options: ParseOptions) -> Report {
    let census = NodeCensus::new();
    let lines: Vec<LineOutcome> = source
        .lines()
        .map(|line| evaluate_line(line, options, &census))
        .collect();
    let leaks = census.live();
    if leaks > 0 {
        log::warn!("{leaks} expression nodes still live after evaluation");
    }
    Report { lines, leaks }
}
