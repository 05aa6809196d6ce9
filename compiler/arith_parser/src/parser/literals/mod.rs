use arith_ast::{ExpressionNode, NumberLiteralNode};

use super::{ParseResult, Parser, SyntaxError};

/// Parses a run of ASCII digits into a number literal.
///
/// The value is accumulated as an `i32`; a literal above `i32::MAX` fails with
/// [`SyntaxError::IntegerOverflow`] at its first digit instead of wrapping.
/// The cursor is left on the first non-digit.
pub fn parse_number(parser: &mut Parser<'_>) -> ParseResult<ExpressionNode> {
    let start = parser.cursor.position();
    let mut value: i32 = 0;
    let mut digits = 0usize;

    while let Some(ch) = parser.cursor.bump_if(|c| c.is_ascii_digit()) {
        let digit = ch.to_digit(10).unwrap_or_default() as i32;
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit))
            .ok_or(SyntaxError::IntegerOverflow { position: start })?;
        digits += 1;
    }

    if digits == 0 {
        return Err(match parser.cursor.peek() {
            Some(symbol) => SyntaxError::UnexpectedSymbol {
                symbol,
                position: start,
            },
            None => SyntaxError::UnexpectedEnd { position: start },
        });
    }

    log::trace!("number literal {value} at {start}");
    Ok(ExpressionNode::Number(NumberLiteralNode::new(
        f64::from(value),
        parser.census_token(),
    )))
}
