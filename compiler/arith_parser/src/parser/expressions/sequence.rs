use arith_ast::{BinaryExpressionNode, BinaryOperator, ExpressionNode};

use super::parse_expression;
use crate::parser::{ParseResult, Parser, SyntaxError};

/// Parses operands separated by binary operators, up to the end of input or a `)`.
///
/// The operands and operators are first read into two flat lists, then folded
/// into one tree by [`collapse_expression_sequence`]. The closing `)` is left
/// for the caller.
pub fn parse_expression_sequence(parser: &mut Parser<'_>) -> ParseResult<ExpressionNode> {
    let start = parser.cursor.position();
    if parser.cursor.at_sequence_end() {
        return Err(SyntaxError::EmptyExpression { position: start });
    }

    let mut operands = vec![parse_expression(parser, false)?];
    let mut operators = Vec::new();

    while let Some(symbol) = parser.cursor.peek() {
        if symbol == ')' {
            break;
        }
        let position = parser.cursor.position();
        let operator = BinaryOperator::try_from(symbol)
            .map_err(|_| SyntaxError::UnknownOperator { symbol, position })?;
        parser.count_operator(position)?;
        parser.cursor.bump();

        operators.push(operator);
        operands.push(parse_expression(parser, false)?);
    }

    log::trace!(
        "sequence at {start}: {} operands, operators {:?}",
        operands.len(),
        operators
    );

    collapse_expression_sequence(parser, &mut operands, &mut operators);

    debug_assert_eq!(operands.len(), 1);
    operands
        .pop()
        .ok_or(SyntaxError::EmptyExpression { position: start })
}

/// Folds a whole sequence into one binary tree, leaving it as the only operand.
///
/// Expects `operands.len() == operators.len() + 1`. Operators are taken left to
/// right; before an operator is stacked, every stacked operator that binds at
/// least as tightly is folded with its two operands. That gives `*` and `/`
/// precedence over `+` and `-`, and left associativity between operators of
/// equal priority. The fold is a loop, so a long chain costs no stack.
pub fn collapse_expression_sequence(
    parser: &Parser<'_>,
    operands: &mut Vec<ExpressionNode>,
    operators: &mut Vec<BinaryOperator>,
) {
    let mut pending_operands = std::mem::take(operands).into_iter();
    let pending_operators = std::mem::take(operators);
    let Some(first) = pending_operands.next() else {
        return;
    };
    operands.push(first);

    for (operator, right) in pending_operators.into_iter().zip(pending_operands) {
        // In `1 - 2 * 3 + 4` the `+` folds `2 * 3` and then `1 - 6`.
        while operators
            .last()
            .is_some_and(|left_op| left_op.priority() >= operator.priority())
        {
            fold_top(parser, operands, operators);
        }
        operators.push(operator);
        operands.push(right);
    }

    while !operators.is_empty() {
        fold_top(parser, operands, operators);
    }
}

/// Replaces the top two operands with the top operator applied to them.
fn fold_top(
    parser: &Parser<'_>,
    operands: &mut Vec<ExpressionNode>,
    operators: &mut Vec<BinaryOperator>,
) {
    let (Some(operator), Some(right), Some(left)) =
        (operators.pop(), operands.pop(), operands.pop())
    else {
        return;
    };
    log::trace!("collapse {operator:?}, {} operands left", operands.len());
    operands.push(ExpressionNode::Binary(Box::new(BinaryExpressionNode::new(
        operator,
        left,
        right,
        parser.census_token(),
    ))));
}
