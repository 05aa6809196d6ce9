// Expression tree for integer arithmetic: number literals, unary minus and
// the four binary operators. Every node owns its children exclusively.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::census::CensusToken;
use crate::AstError;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum ExpressionNode {
    Number(NumberLiteralNode),
    Unary(Box<UnaryExpressionNode>),
    Binary(Box<BinaryExpressionNode>),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumberLiteralNode {
    pub value: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    census: CensusToken,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnaryExpressionNode {
    pub operator: UnaryOperator,
    pub operand: ExpressionNode,
    #[cfg_attr(feature = "serde", serde(skip))]
    census: CensusToken,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinaryExpressionNode {
    pub left: ExpressionNode,
    pub operator: BinaryOperator,
    pub right: ExpressionNode,
    #[cfg_attr(feature = "serde", serde(skip))]
    census: CensusToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOperator {
    Negate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl NumberLiteralNode {
    pub fn new(value: f64, census: CensusToken) -> Self {
        Self { value, census }
    }
}

impl UnaryExpressionNode {
    pub fn new(operator: UnaryOperator, operand: ExpressionNode, census: CensusToken) -> Self {
        Self {
            operator,
            operand,
            census,
        }
    }
}

impl BinaryExpressionNode {
    pub fn new(
        operator: BinaryOperator,
        left: ExpressionNode,
        right: ExpressionNode,
        census: CensusToken,
    ) -> Self {
        Self {
            left,
            operator,
            right,
            census,
        }
    }
}

impl ExpressionNode {
    /// Builds an untracked number literal.
    pub fn number(value: f64) -> Self {
        ExpressionNode::Number(NumberLiteralNode::new(value, CensusToken::default()))
    }

    /// Builds an untracked negation of `operand`.
    pub fn negate(operand: ExpressionNode) -> Self {
        ExpressionNode::Unary(Box::new(UnaryExpressionNode::new(
            UnaryOperator::Negate,
            operand,
            CensusToken::default(),
        )))
    }

    /// Builds an untracked binary node.
    pub fn binary(operator: BinaryOperator, left: ExpressionNode, right: ExpressionNode) -> Self {
        ExpressionNode::Binary(Box::new(BinaryExpressionNode::new(
            operator,
            left,
            right,
            CensusToken::default(),
        )))
    }

    /// Reduces the tree to a single value.
    ///
    /// Division follows IEEE-754: `1/0` is infinity and `0/0` is NaN, neither is an error.
    pub fn evaluate(&self) -> f64 {
        match self {
            ExpressionNode::Number(number) => number.value,
            ExpressionNode::Unary(unary) => match unary.operator {
                UnaryOperator::Negate => -unary.operand.evaluate(),
            },
            ExpressionNode::Binary(binary) => {
                let left = binary.left.evaluate();
                let right = binary.right.evaluate();
                binary.operator.apply(left, right)
            }
        }
    }
}

impl UnaryOperator {
    pub fn symbol(self) -> char {
        match self {
            UnaryOperator::Negate => '-',
        }
    }
}

impl BinaryOperator {
    /// Binding strength; higher binds tighter.
    pub fn priority(self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Sub => 0,
            BinaryOperator::Mul | BinaryOperator::Div => 1,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Sub => '-',
            BinaryOperator::Mul => '*',
            BinaryOperator::Div => '/',
        }
    }

    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOperator::Add => left + right,
            BinaryOperator::Sub => left - right,
            BinaryOperator::Mul => left * right,
            BinaryOperator::Div => left / right,
        }
    }
}

impl TryFrom<char> for BinaryOperator {
    type Error = AstError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        match symbol {
            '+' => Ok(BinaryOperator::Add),
            '-' => Ok(BinaryOperator::Sub),
            '*' => Ok(BinaryOperator::Mul),
            '/' => Ok(BinaryOperator::Div),
            other => Err(AstError::UnknownOperator(other)),
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// Fully parenthesized infix, so the printed form shows how precedence was resolved.
impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionNode::Number(number) => write!(f, "{}", number.value),
            ExpressionNode::Unary(unary) => write!(f, "({}{})", unary.operator, unary.operand),
            ExpressionNode::Binary(binary) => {
                write!(f, "({} {} {})", binary.left, binary.operator, binary.right)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_evaluate_nested_tree() {
        // 1 + 2 * 3
        let tree = ExpressionNode::binary(
            BinaryOperator::Add,
            ExpressionNode::number(1.0),
            ExpressionNode::binary(
                BinaryOperator::Mul,
                ExpressionNode::number(2.0),
                ExpressionNode::number(3.0),
            ),
        );
        assert_eq!(tree.evaluate(), 7.0);
    }

    #[test]
    fn test_negate() {
        let tree = ExpressionNode::negate(ExpressionNode::number(5.0));
        assert_eq!(tree.evaluate(), -5.0);
    }

    #[test]
    fn test_division_by_zero_is_ieee() {
        let inf = ExpressionNode::binary(
            BinaryOperator::Div,
            ExpressionNode::number(1.0),
            ExpressionNode::number(0.0),
        );
        assert!(inf.evaluate().is_infinite());
        assert!(inf.evaluate().is_sign_positive());

        let nan = ExpressionNode::binary(
            BinaryOperator::Div,
            ExpressionNode::number(0.0),
            ExpressionNode::number(0.0),
        );
        assert!(nan.evaluate().is_nan());
    }

    #[test]
    fn test_operator_symbols_round_trip() {
        for op in [
            BinaryOperator::Add,
            BinaryOperator::Sub,
            BinaryOperator::Mul,
            BinaryOperator::Div,
        ] {
            assert_eq!(BinaryOperator::try_from(op.symbol()).ok(), Some(op));
        }
        assert!(matches!(
            BinaryOperator::try_from('%'),
            Err(AstError::UnknownOperator('%'))
        ));
    }

    #[test]
    fn test_priorities() {
        assert!(BinaryOperator::Mul.priority() > BinaryOperator::Add.priority());
        assert_eq!(BinaryOperator::Mul.priority(), BinaryOperator::Div.priority());
        assert_eq!(BinaryOperator::Add.priority(), BinaryOperator::Sub.priority());
    }

    #[test]
    fn test_display_is_fully_parenthesized() {
        let tree = ExpressionNode::binary(
            BinaryOperator::Sub,
            ExpressionNode::binary(
                BinaryOperator::Sub,
                ExpressionNode::number(10.0),
                ExpressionNode::number(2.0),
            ),
            ExpressionNode::negate(ExpressionNode::number(3.0)),
        );
        assert_eq!(tree.to_string(), "((10 - 2) - (-3))");
    }
}
