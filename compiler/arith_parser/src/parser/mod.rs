// Hand-written recursive-descent parser for integer arithmetic expressions.
// Operands are parsed left to right into a flat sequence and precedence is
// resolved afterwards by collapsing that sequence into a tree.

use arith_ast::{CensusToken, ExpressionNode, NodeCensus};

pub mod cursor;
pub mod diagnostics;
pub mod expressions;
pub mod literals;

#[cfg(test)]
mod tests;

pub use cursor::Cursor;
pub use diagnostics::{render_snippet, ParseResult, SyntaxError};
pub use expressions::{
    collapse_expression_sequence, parse_bracket_group, parse_expression,
    parse_expression_sequence, parse_unary,
};
pub use literals::parse_number;

/// Default cap on bracket and unary-minus nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Default cap on binary operators in one expression.
///
/// A flat chain of `n` operators builds a tree `n` levels deep, and evaluating
/// or dropping that tree recurses once per level.
pub const DEFAULT_MAX_OPERATORS: usize = 1024;

/// Configuration for the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest allowed nesting of brackets and unary minus
    pub max_depth: usize,
    /// Most binary operators allowed in the whole expression
    pub max_operators: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_operators: DEFAULT_MAX_OPERATORS,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_operators(mut self, max_operators: usize) -> Self {
        self.max_operators = max_operators;
        self
    }
}

/// Parser state threaded through every parsing function.
#[derive(Debug)]
pub struct Parser<'a> {
    pub cursor: Cursor<'a>,
    options: ParseOptions,
    census: Option<NodeCensus>,
    depth: usize,
    operators: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, ParseOptions::default())
    }

    pub fn with_options(source: &'a str, options: ParseOptions) -> Self {
        Parser {
            cursor: Cursor::new(source),
            options,
            census: None,
            depth: 0,
            operators: 0,
        }
    }

    /// Enroll every node this parser builds in `census`.
    pub fn with_census(mut self, census: &NodeCensus) -> Self {
        self.census = Some(census.clone());
        self
    }

    /// Token for a node about to be built.
    pub(crate) fn census_token(&self) -> CensusToken {
        self.census
            .as_ref()
            .map_or_else(CensusToken::untracked, NodeCensus::enroll)
    }

    /// Enter one level of bracket or unary nesting.
    pub(crate) fn descend(&mut self, position: usize) -> ParseResult<()> {
        if self.depth >= self.options.max_depth {
            return Err(SyntaxError::NestingTooDeep {
                limit: self.options.max_depth,
                position,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn ascend(&mut self) {
        self.depth -= 1;
    }

    /// Account for one more binary operator, found at `position`.
    pub(crate) fn count_operator(&mut self, position: usize) -> ParseResult<()> {
        if self.operators >= self.options.max_operators {
            return Err(SyntaxError::ExpressionTooLong {
                limit: self.options.max_operators,
                position,
            });
        }
        self.operators += 1;
        Ok(())
    }

    /// Parse the whole input as one expression.
    ///
    /// Fails if anything is left over once the top-level sequence ends.
    pub fn parse(mut self) -> ParseResult<ExpressionNode> {
        let expr = parse_expression_sequence(&mut self)?;
        if let Some(symbol) = self.cursor.peek() {
            let err = SyntaxError::TrailingSymbol {
                symbol,
                position: self.cursor.position(),
            };
            log::debug!("parse failed: {err}");
            return Err(err);
        }
        Ok(expr)
    }
}

/// Parse `text` into an expression tree.
///
/// Whitespace anywhere in the text is ignored, so `" 1 + 2 "` and `"1+2"`
/// produce the same tree.
pub fn parse(text: &str) -> ParseResult<ExpressionNode> {
    parse_with_options(text, ParseOptions::default())
}

/// Parse `text` with explicit parser options.
pub fn parse_with_options(text: &str, options: ParseOptions) -> ParseResult<ExpressionNode> {
    log::debug!("=== parse ===");
    log::trace!("input: {text:?}");
    Parser::with_options(text, options).parse()
}

/// Parse `text` with explicit parser options, enrolling every node of the result in `census`.
pub fn parse_with_census(
    text: &str,
    options: ParseOptions,
    census: &NodeCensus,
) -> ParseResult<ExpressionNode> {
    Parser::with_options(text, options)
        .with_census(census)
        .parse()
}
