use thiserror::Error;

/// Reasons a piece of text is not a well-formed expression.
///
/// Every variant records the byte offset, in the text handed to the parser,
/// of the character that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// An expression (or bracket group) with no operand in it
    #[error("empty expression at offset {position}")]
    EmptyExpression { position: usize },

    /// A character that cannot start an operand
    #[error("unexpected symbol: {symbol} at offset {position}")]
    UnexpectedSymbol { symbol: char, position: usize },

    /// Input ended where an operand was required
    #[error("unexpected end of expression at offset {position}")]
    UnexpectedEnd { position: usize },

    /// A character in operator position that is not `+ - * /`
    #[error("unknown operator: {symbol} at offset {position}")]
    UnknownOperator { symbol: char, position: usize },

    /// A unary minus applied directly to another unary minus
    #[error("nested unary operator is not allowed at offset {position}")]
    NestedUnary { position: usize },

    /// An integer literal larger than `i32::MAX`
    #[error("integer overflow in literal at offset {position}")]
    IntegerOverflow { position: usize },

    /// A `(` whose group never closes; `position` is the opening bracket
    #[error("unclosed bracket opened at offset {position}")]
    UnclosedBracket { position: usize },

    /// Input left over after a complete expression
    #[error("trailing symbol: {symbol} at offset {position}")]
    TrailingSymbol { symbol: char, position: usize },

    /// Brackets and unary minus nested deeper than the configured limit
    #[error("maximum nesting depth of {limit} exceeded at offset {position}")]
    NestingTooDeep { limit: usize, position: usize },

    /// More binary operators than the configured limit; `position` is the first one over it
    #[error("expression has more than {limit} operators at offset {position}")]
    ExpressionTooLong { limit: usize, position: usize },
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, SyntaxError>;

impl SyntaxError {
    /// Byte offset of the offending character.
    pub fn position(&self) -> usize {
        match *self {
            SyntaxError::EmptyExpression { position }
            | SyntaxError::UnexpectedSymbol { position, .. }
            | SyntaxError::UnexpectedEnd { position }
            | SyntaxError::UnknownOperator { position, .. }
            | SyntaxError::NestedUnary { position }
            | SyntaxError::IntegerOverflow { position }
            | SyntaxError::UnclosedBracket { position }
            | SyntaxError::TrailingSymbol { position, .. }
            | SyntaxError::NestingTooDeep { position, .. }
            | SyntaxError::ExpressionTooLong { position, .. } => position,
        }
    }

    /// Short description without the position suffix.
    pub fn message(&self) -> String {
        match self {
            SyntaxError::EmptyExpression { .. } => "empty expression".to_string(),
            SyntaxError::UnexpectedSymbol { symbol, .. } => format!("unexpected symbol: {symbol}"),
            SyntaxError::UnexpectedEnd { .. } => "unexpected end of expression".to_string(),
            SyntaxError::UnknownOperator { symbol, .. } => format!("unknown operator: {symbol}"),
            SyntaxError::NestedUnary { .. } => "nested unary operator is not allowed".to_string(),
            SyntaxError::IntegerOverflow { .. } => "integer overflow".to_string(),
            SyntaxError::UnclosedBracket { .. } => "unclosed bracket".to_string(),
            SyntaxError::TrailingSymbol { symbol, .. } => format!("trailing symbol: {symbol}"),
            SyntaxError::NestingTooDeep { limit, .. } => {
                format!("maximum nesting depth of {limit} exceeded")
            }
            SyntaxError::ExpressionTooLong { limit, .. } => {
                format!("expression has more than {limit} operators")
            }
        }
    }

    /// A hint for fixing the input, when there is an obvious one.
    pub fn help(&self) -> Option<String> {
        match self {
            SyntaxError::EmptyExpression { .. } => {
                Some("write a number, '-' or '(' here".to_string())
            }
            SyntaxError::UnexpectedEnd { .. } => {
                Some("an operator must be followed by an operand".to_string())
            }
            SyntaxError::UnknownOperator { .. } => {
                Some("operators are '+', '-', '*' and '/'".to_string())
            }
            SyntaxError::NestedUnary { .. } => Some("write -(-x) instead of --x".to_string()),
            SyntaxError::IntegerOverflow { .. } => {
                Some(format!("integer literals may not exceed {}", i32::MAX))
            }
            SyntaxError::UnclosedBracket { .. } => {
                Some("add a matching ')' after the group".to_string())
            }
            SyntaxError::ExpressionTooLong { .. } => {
                Some("split the expression over several lines".to_string())
            }
            SyntaxError::TrailingSymbol { symbol: ')', .. } => {
                Some("did you forget a matching '(' earlier?".to_string())
            }
            _ => None,
        }
    }
}

/// Render a syntax error against its source with a caret under the offending column.
///
/// ```text
/// error: unclosed bracket
///  --> 1:1
///   |
/// 1 | (1+2
///   | ^
///   = help: add a matching ')' after the group
/// ```
pub fn render_snippet(err: &SyntaxError, source: &str) -> String {
    let position = clamp_to_boundary(source, err.position());
    let line_start = source[..position].rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[position..]
        .find('\n')
        .map_or(source.len(), |i| position + i);
    let line_no = source[..line_start].matches('\n').count() + 1;
    let column = source[line_start..position].chars().count() + 1;
    let text = source[line_start..line_end].trim_end_matches('\r');

    let gutter = line_no.to_string().len();
    let pad = " ".repeat(gutter);
    let mut out = format!("error: {}\n", err.message());
    out.push_str(&format!("{pad}--> {line_no}:{column}\n"));
    out.push_str(&format!("{pad} |\n"));
    out.push_str(&format!("{line_no} | {text}\n"));
    out.push_str(&format!("{pad} | {}^", " ".repeat(column - 1)));
    if let Some(help) = err.help() {
        out.push_str(&format!("\n{pad} = help: {help}"));
    }
    out
}

fn clamp_to_boundary(source: &str, position: usize) -> usize {
    let mut position = position.min(source.len());
    while !source.is_char_boundary(position) {
        position -= 1;
    }
    position
}
