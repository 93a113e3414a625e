use std::collections::HashSet;
use std::time::Instant;

use crate::builder::{Candidate, ExpressionBuilder};
use crate::expression::{Leaf, Operator, OperatorSet};
use crate::parser::evaluate;

fn leaves(values: &[i64]) -> Vec<Leaf> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| Leaf::new(value, index))
        .collect()
}

fn displays(candidates: &[Candidate]) -> Vec<String> {
    candidates
        .iter()
        .map(|c| c.expression.to_string())
        .collect()
}

#[test]
fn test_single_leaf() {
    let builder = ExpressionBuilder::new(OperatorSet::basic());
    let candidates = builder.expressions_for(&leaves(&[7]));
    assert_eq!(displays(&candidates), vec!["7"]);
    assert!(builder.expressions_for(&[]).is_empty());
}

#[test]
fn test_two_leaves_use_every_operator() {
    let builder = ExpressionBuilder::new(OperatorSet::basic());
    let candidates = builder.expressions_for(&leaves(&[5, 5]));
    assert_eq!(
        displays(&candidates),
        vec!["5 + 5", "5 - 5", "5 * 5", "5 / 5"]
    );
    let difference = candidates.iter().find(|c| c.value == 0.0);
    assert!(difference.is_some());
}

#[test]
fn test_redundant_applications_are_skipped() {
    let builder = ExpressionBuilder::new(OperatorSet::basic().with(Operator::Pow));
    let found = displays(&builder.expressions_for(&leaves(&[3, 1])));
    assert!(!found.contains(&"3 * 1".to_string()));
    assert!(!found.contains(&"3 / 1".to_string()));
    assert!(!found.contains(&"3 ^ 1".to_string()));
    assert!(found.contains(&"3 - 1".to_string()));

    let found = displays(&builder.expressions_for(&leaves(&[3, 0])));
    assert!(!found.contains(&"3 + 0".to_string()));
    assert!(!found.contains(&"3 / 0".to_string()));
    assert!(found.contains(&"3 ^ 0".to_string()));

    let found = displays(&builder.expressions_for(&leaves(&[2, 12])));
    assert!(!found.contains(&"2 ^ 12".to_string()));
}

#[test]
fn test_candidates_are_distinct_per_display() {
    let builder = ExpressionBuilder::new(OperatorSet::basic());
    let candidates = builder.expressions_for(&leaves(&[1, 2, 3, 4]));
    let unique: HashSet<String> = displays(&candidates).into_iter().collect();
    assert_eq!(unique.len(), candidates.len());
    assert!(unique.contains("1 + 2 + 3 + 4"));
    assert!(unique.contains("(1 + 2) * (3 + 4)"));
}

#[test]
fn test_display_reproduces_value() {
    let builder = ExpressionBuilder::new(OperatorSet::scientific());
    for candidate in builder.expressions_for(&leaves(&[2, 3, 4])) {
        let text = candidate.expression.to_string();
        let reparsed = evaluate(&text);
        assert!(reparsed.is_ok(), "{text} failed to parse");
        if let Ok(value) = reparsed {
            assert!(
                (value - candidate.value).abs() < 1e-6 * candidate.value.abs().max(1.0),
                "{text}: {value} != {}",
                candidate.value
            );
        }
    }
}

#[test]
fn test_unary_wrappers() {
    let builder = ExpressionBuilder::new(OperatorSet::scientific());
    let found = displays(&builder.expressions_for(&leaves(&[9])));
    assert_eq!(found, vec!["9", "sqrt(9)", "9!"]);

    let found = displays(&builder.expressions_for(&leaves(&[8])));
    assert_eq!(found, vec!["8", "cbrt(8)", "8!"]);

    let found = displays(&builder.expressions_for(&leaves(&[3])));
    assert_eq!(found, vec!["3", "3!"]);

    let builder = ExpressionBuilder::new(OperatorSet::basic());
    let found = displays(&builder.expressions_for(&leaves(&[9])));
    assert_eq!(found, vec!["9"]);
}

#[test]
fn test_candidates_keep_operand_sources() {
    let builder = ExpressionBuilder::new(OperatorSet::basic());
    let candidates = builder.expressions_for(&leaves(&[4, 6, 8]));
    for candidate in &candidates {
        let mut sources = candidate.expression.consumed_sources();
        sources.sort_unstable();
        assert_eq!(sources, vec![0, 1, 2]);
    }
}

#[test]
fn test_span_limit() {
    let builder = ExpressionBuilder::new(OperatorSet::basic()).with_limit(5);
    let candidates = builder.expressions_for(&leaves(&[1, 2, 3, 4, 5]));
    assert!(candidates.len() <= 5);
    assert!(!candidates.is_empty());
}

#[test]
fn test_output_is_deterministic() {
    let builder = ExpressionBuilder::new(OperatorSet::basic());
    let first = builder.expressions_for(&leaves(&[6, 2, 3, 7]));
    let second = builder.expressions_for(&leaves(&[6, 2, 3, 7]));
    assert_eq!(displays(&first), displays(&second));
}

#[test]
fn test_expired_deadline_stops_combining() {
    let builder = ExpressionBuilder::new(OperatorSet::basic()).with_deadline(Instant::now());
    assert!(builder.expired());
    assert!(builder.expressions_for(&leaves(&[1, 2, 3])).is_empty());

    let unbounded = ExpressionBuilder::new(OperatorSet::basic());
    assert!(!unbounded.expired());
    // a single leaf needs no combining
    assert_eq!(builder.expressions_for(&leaves(&[4])).len(), 1);
}
