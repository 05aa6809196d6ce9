//! Expression tree for integer arithmetic expressions.
//!
//! This crate defines the nodes produced by `arith_parser`, their evaluation,
//! a visitor for traversing trees and a census for auditing node lifetimes.

pub mod ast;
pub mod census;
pub mod visit;

pub use ast::{
    BinaryExpressionNode, BinaryOperator, ExpressionNode, NumberLiteralNode, UnaryExpressionNode,
    UnaryOperator,
};
pub use census::{CensusToken, NodeCensus};
pub use visit::Visitor;

use std::fmt::Write as _;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors raised while building or converting AST values.
#[derive(Debug, thiserror::Error)]
pub enum AstError {
    /// A character that names no binary operator.
    #[error("unknown operator: {0}")]
    UnknownOperator(char),
}

/// Serializes an AST node to a pretty-printed JSON string.
///
/// # Example
///
/// ```
/// use arith_ast::{to_json, ExpressionNode};
///
/// let expr = ExpressionNode::number(42.0);
/// let json = to_json(&expr).unwrap();
/// assert!(json.contains(r#""type": "Number""#));
/// assert!(json.contains(r#""value": 42.0"#));
/// ```
#[cfg(feature = "serde")]
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Deserializes an AST node from a JSON string.
///
/// Nodes read this way are untracked by any census.
#[cfg(feature = "serde")]
pub fn from_json<T: for<'de> Deserialize<'de>>(json: &str) -> serde_json::Result<T> {
    serde_json::from_str(json)
}

/// Renders a tree as an indented outline, one node per line.
#[derive(Default)]
pub struct AstPrinter {
    indent: usize,
    out: String,
}

impl AstPrinter {
    /// Creates a new `AstPrinter`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints an expression tree to a string.
    pub fn print(mut self, node: &ExpressionNode) -> String {
        node.accept(&mut self);
        self.out
    }

    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        let _ = writeln!(self.out, "{:width$}{}", "", text, width = self.indent * 2);
    }

    fn nested(&mut self, node: &ExpressionNode) {
        self.indent += 1;
        node.accept(self);
        self.indent -= 1;
    }
}

impl Visitor for AstPrinter {
    type Output = ();

    fn visit_number(&mut self, node: &NumberLiteralNode) {
        self.line(format_args!("Number {}", node.value));
    }

    fn visit_unary(&mut self, node: &UnaryExpressionNode) {
        self.line(format_args!("Unary {:?}", node.operator));
        self.nested(&node.operand);
    }

    fn visit_binary(&mut self, node: &BinaryExpressionNode) {
        self.line(format_args!("Binary {:?}", node.operator));
        self.nested(&node.left);
        self.nested(&node.right);
    }
}

impl ExpressionNode {
    /// Indented outline of the tree, for debugging.
    pub fn describe(&self) -> String {
        AstPrinter::new().print(self)
    }
}
