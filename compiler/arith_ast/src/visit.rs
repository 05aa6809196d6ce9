//! Visitor pattern for walking expression trees.
//!
//! Implement [`Visitor`] to compute something over a tree without matching on
//! [`ExpressionNode`] by hand. Visitors decide for themselves whether to
//! descend; [`walk_unary`] and [`walk_binary`] do the default descent.

use crate::ast::*;

/// A visitor over the three node kinds.
pub trait Visitor {
    /// The value produced for each visited node.
    type Output;

    fn visit_number(&mut self, node: &NumberLiteralNode) -> Self::Output;

    fn visit_unary(&mut self, node: &UnaryExpressionNode) -> Self::Output;

    fn visit_binary(&mut self, node: &BinaryExpressionNode) -> Self::Output;
}

impl ExpressionNode {
    /// Dispatches to the visitor method matching this node's kind.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            ExpressionNode::Number(node) => visitor.visit_number(node),
            ExpressionNode::Unary(node) => visitor.visit_unary(node),
            ExpressionNode::Binary(node) => visitor.visit_binary(node),
        }
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.accept(&mut NodeCounter)
    }

    /// Length of the longest root-to-leaf path, counting nodes.
    pub fn depth(&self) -> usize {
        self.accept(&mut DepthMeter)
    }
}

/// Visits the operand of a unary node.
pub fn walk_unary<V: Visitor + ?Sized>(visitor: &mut V, node: &UnaryExpressionNode) -> V::Output {
    node.operand.accept(visitor)
}

/// Visits both children of a binary node, left first.
pub fn walk_binary<V: Visitor + ?Sized>(
    visitor: &mut V,
    node: &BinaryExpressionNode,
) -> (V::Output, V::Output) {
    let left = node.left.accept(visitor);
    let right = node.right.accept(visitor);
    (left, right)
}

struct NodeCounter;

impl Visitor for NodeCounter {
    type Output = usize;

    fn visit_number(&mut self, _node: &NumberLiteralNode) -> usize {
        1
    }

    fn visit_unary(&mut self, node: &UnaryExpressionNode) -> usize {
        1 + walk_unary(self, node)
    }

    fn visit_binary(&mut self, node: &BinaryExpressionNode) -> usize {
        let (left, right) = walk_binary(self, node);
        1 + left + right
    }
}

struct DepthMeter;

impl Visitor for DepthMeter {
    type Output = usize;

    fn visit_number(&mut self, _node: &NumberLiteralNode) -> usize {
        1
    }

    fn visit_unary(&mut self, node: &UnaryExpressionNode) -> usize {
        1 + walk_unary(self, node)
    }

    fn visit_binary(&mut self, node: &BinaryExpressionNode) -> usize {
        let (left, right) = walk_binary(self, node);
        1 + left.max(right)
    }
}
