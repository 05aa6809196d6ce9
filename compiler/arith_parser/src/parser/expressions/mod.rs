use arith_ast::{ExpressionNode, UnaryExpressionNode, UnaryOperator};

use super::literals::parse_number;
use super::{ParseResult, Parser, SyntaxError};

mod sequence;

pub use sequence::{collapse_expression_sequence, parse_expression_sequence};

/// Parses a single operand, choosing the construct from the next character.
///
/// - `-` starts a unary minus, unless `was_unary` says we are already the
///   operand of one
/// - a digit starts a number literal
/// - `(` starts a bracket group
///
/// Anything else, including the end of input, is an error.
pub fn parse_expression(parser: &mut Parser<'_>, was_unary: bool) -> ParseResult<ExpressionNode> {
    let position = parser.cursor.position();
    log::trace!("parse_expression at {position}, next {:?}", parser.cursor.peek());

    match parser.cursor.peek() {
        Some('-') if was_unary => Err(SyntaxError::NestedUnary { position }),
        Some('-') => parse_unary(parser),
        Some(ch) if ch.is_ascii_digit() => parse_number(parser),
        Some('(') => parse_bracket_group(parser),
        Some(symbol) => Err(SyntaxError::UnexpectedSymbol { symbol, position }),
        None => Err(SyntaxError::UnexpectedEnd { position }),
    }
}

/// Parses `-` followed by one operand.
///
/// The operand may not itself start with a unary minus; `-(-1)` is fine
/// because the bracket group resets that restriction.
pub fn parse_unary(parser: &mut Parser<'_>) -> ParseResult<ExpressionNode> {
    let position = parser.cursor.position();
    parser.descend(position)?;
    parser.cursor.bump();

    let operand = parse_expression(parser, true)?;
    parser.ascend();

    Ok(ExpressionNode::Unary(Box::new(UnaryExpressionNode::new(
        UnaryOperator::Negate,
        operand,
        parser.census_token(),
    ))))
}

/// Parses `( sequence )`.
///
/// Brackets only scope precedence resolution; the inner tree is returned as is.
pub fn parse_bracket_group(parser: &mut Parser<'_>) -> ParseResult<ExpressionNode> {
    let open = parser.cursor.position();
    parser.descend(open)?;
    parser.cursor.bump();

    let inner = parse_expression_sequence(parser)?;
    if parser.cursor.bump_if(|c| c == ')').is_none() {
        log::debug!("bracket opened at {open} is never closed");
        return Err(SyntaxError::UnclosedBracket { position: open });
    }
    parser.ascend();

    Ok(inner)
}
