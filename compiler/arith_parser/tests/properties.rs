//! Property-based tests for parsing and evaluation.

use arith_ast::NodeCensus;
use arith_parser::{parse, parse_with_census, ParseOptions};
use proptest::prelude::*;

/// A well-formed expression together with the value it must evaluate to,
/// built with explicit brackets so the expected value is unambiguous.
fn bracketed_expr() -> impl Strategy<Value = (String, f64)> {
    let leaf = (0i32..1000).prop_map(|n| (n.to_string(), f64::from(n)));
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(vec!['+', '-', '*']), inner.clone()).prop_map(
                |((l, lv), op, (r, rv))| {
                    let value = match op {
                        '+' => lv + rv,
                        '-' => lv - rv,
                        _ => lv * rv,
                    };
                    (format!("({l}{op}{r})"), value)
                }
            ),
            inner.prop_map(|(e, v)| (format!("-({e})"), -v)),
        ]
    })
}

/// An unbracketed `a op b op c ...` chain as its operands and operators.
fn flat_chain() -> impl Strategy<Value = (Vec<i32>, Vec<char>)> {
    proptest::collection::vec(prop::sample::select(vec!['+', '-', '*', '/']), 0..24).prop_flat_map(
        |ops| {
            let operands = proptest::collection::vec(1i32..100, ops.len() + 1);
            (operands, Just(ops))
        },
    )
}

/// Evaluates a flat chain by splitting it into terms: every term folds its
/// `*` and `/` left to right, then the terms are added or subtracted left to right.
fn evaluate_by_terms(operands: &[i32], operators: &[char]) -> f64 {
    let mut terms = vec![(1.0, f64::from(operands[0]))];
    for (&op, &n) in operators.iter().zip(&operands[1..]) {
        let n = f64::from(n);
        match op {
            '+' => terms.push((1.0, n)),
            '-' => terms.push((-1.0, n)),
            _ => {
                if let Some((_, term)) = terms.last_mut() {
                    if op == '*' {
                        *term *= n;
                    } else {
                        *term /= n;
                    }
                }
            }
        }
    }
    let mut total = terms[0].1;
    for &(sign, term) in &terms[1..] {
        if sign > 0.0 {
            total += term;
        } else {
            total -= term;
        }
    }
    total
}

fn render_chain(operands: &[i32], operators: &[char]) -> String {
    let mut text = operands[0].to_string();
    for (op, n) in operators.iter().zip(&operands[1..]) {
        text.push(*op);
        text.push_str(&n.to_string());
    }
    text
}

/// Text drawn from the expression alphabet plus noise, valid or not.
fn arbitrary_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop::sample::select(vec!['0', '1', '9', '+', '-', '*', '/', '(', ')', ' ', 'x']),
        0..40,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn bracketed_expressions_evaluate_exactly((text, expected) in bracketed_expr()) {
        let expr = parse(&text).unwrap();
        prop_assert_eq!(expr.evaluate(), expected);
    }

    #[test]
    fn flat_chains_respect_precedence((operands, operators) in flat_chain()) {
        let text = render_chain(&operands, &operators);
        let expr = parse(&text).unwrap();
        prop_assert_eq!(expr.evaluate(), evaluate_by_terms(&operands, &operators), "{}", text);
    }

    #[test]
    fn whitespace_does_not_change_the_result(
        (text, _) in bracketed_expr(),
        gaps in proptest::collection::vec(0usize..3, 0..64),
    ) {
        let mut spaced = String::new();
        for (i, ch) in text.chars().enumerate() {
            spaced.push_str(&" ".repeat(gaps.get(i).copied().unwrap_or(0)));
            spaced.push(ch);
        }
        let plain = parse(&text).unwrap().evaluate();
        let padded = parse(&spaced).unwrap().evaluate();
        prop_assert_eq!(plain, padded);
    }

    #[test]
    fn parsing_is_deterministic(text in arbitrary_text()) {
        let first = parse(&text).map(|e| e.to_string());
        let second = parse(&text).map(|e| e.to_string());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn census_returns_to_zero(inputs in proptest::collection::vec(arbitrary_text(), 1..8)) {
        let census = NodeCensus::new();
        let trees: Vec<_> = inputs
            .iter()
            .filter_map(|text| parse_with_census(text, ParseOptions::default(), &census).ok())
            .collect();
        let expected: usize = trees.iter().map(|t| t.node_count()).sum();
        prop_assert_eq!(census.live(), expected);
        drop(trees);
        prop_assert_eq!(census.live(), 0);
    }
}
