//! Tests for the parser module


use super::*;

/// Parse with test logging enabled.
pub(crate) fn parse_logged(input: &str) -> ParseResult<ExpressionNode> {
    crate::tests::init_test_logger();
    parse(input)
}

/// Parse and evaluate, panicking with the error on failure.
pub(crate) fn eval(input: &str) -> f64 {
    match parse_logged(input) {
        Ok(expr) => expr.evaluate(),
        Err(err) => panic!("failed to parse {input:?}: {err}"),
    }
}
