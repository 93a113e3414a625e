use std::time::Duration;

use crate::expression::{Operator, OperatorSet};
use crate::generator::Puzzle;
use crate::parser::evaluate_with;
use crate::solver::{CacheKey, SolutionCache, SolutionSet, Solver, SolverConfig, SolverError};

fn solver(config: SolverConfig) -> Solver {
    Solver::new(config).unwrap_or_else(|e| panic!("invalid config: {e}"))
}

/// Every solution evaluates to `target` and consumes each operand at most once
fn assert_valid(set: &SolutionSet, operands: &[i64], target: f64, operators: OperatorSet) {
    for solution in set.iter() {
        let value = evaluate_with(&solution.text, operators);
        assert!(value.is_ok(), "{} did not re-parse", solution.text);
        if let Ok(value) = value {
            assert!((value - target).abs() < 1e-3, "{} = {}", solution.text, value);
        }

        let mut sources = solution.expression.consumed_sources();
        sources.sort_unstable();
        let before = sources.len();
        sources.dedup();
        assert_eq!(before, sources.len(), "{} reuses an operand", solution.text);
        assert!(sources.iter().all(|&i| i < operands.len()));
    }
}

#[test]
fn test_sum_of_four_digits() {
    let solver = Solver::default();
    let operands = [1, 2, 3, 4];
    let result = solver.solve(&operands, 10.0);
    assert!(!result.is_empty());
    assert!(result.len() <= 3);
    assert!(!result.timed_out);
    assert_valid(&result, &operands, 10.0, OperatorSet::basic());
}

#[test]
fn test_must_use_all() {
    let solver = solver(SolverConfig::default().must_use_all(true));
    let operands = [1, 2, 3, 4];
    let result = solver.solve(&operands, 10.0);
    assert!(result.contains("1 + 2 + 3 + 4"));
    for solution in result.iter() {
        assert_eq!(solution.expression.consumed_sources().len(), 4);
    }
}

#[test]
fn test_equal_operands_to_zero() {
    let solver = Solver::default();
    let result = solver.solve(&[5, 5], 0.0);
    assert_eq!(result.texts(), vec!["5 - 5"]);
}

#[test]
fn test_unreachable_target_is_empty() {
    let solver = Solver::default();
    let result = solver.solve(&[0, 0, 0], 1.0);
    assert!(result.is_empty());
    assert!(!result.timed_out);

    assert!(solver.solve(&[], 3.0).is_empty());
    assert!(solver.solve(&[1, 2], f64::NAN).is_empty());
    assert!(solver.solve(&[1, 1, 1, 1, 1, 1, 1, 1, 1], 9.0).is_empty());
}

#[test]
fn test_solutions_are_distinct_and_bounded() {
    let solver = solver(SolverConfig::default().with_max_solutions(10));
    let operands = [6, 2, 3, 7];
    let result = solver.solve(&operands, 24.0);
    assert!(!result.is_empty());
    assert!(result.len() <= 10);

    let mut texts = result.texts();
    texts.sort_unstable();
    texts.dedup();
    assert_eq!(texts.len(), result.len());
    assert_valid(&result, &operands, 24.0, OperatorSet::basic());
}

#[test]
fn test_concatenation_reaches_past_the_arithmetic_bound() {
    let operators = OperatorSet::basic().with(Operator::Concat);
    let solver = solver(SolverConfig::default().with_operators(operators));
    let result = solver.solve(&[1, 2], 12.0);
    assert!(result.contains("12"));
    assert_valid(&result, &[1, 2], 12.0, operators);

    let result = solver.solve(&[2, 1, 3], 123.0);
    assert!(result.contains("123"));
}

#[test]
fn test_concatenated_operands() {
    let operators = OperatorSet::basic().with(Operator::Concat);
    let solver = solver(
        SolverConfig::default()
            .with_operators(operators)
            .with_max_solutions(10),
    );
    let operands = [1, 2, 3];
    let result = solver.solve(&operands, 15.0);
    assert!(result.contains("3 + 12"));
    assert_valid(&result, &operands, 15.0, operators);
}

#[test]
fn test_scientific_operators() {
    let operators = OperatorSet::scientific();
    let solver = solver(SolverConfig::default().with_operators(operators));
    let operands = [3, 9];
    let result = solver.solve(&operands, 6.0);
    assert!(!result.is_empty());
    assert_valid(&result, &operands, 6.0, operators);
}

#[test]
fn test_zero_budget_times_out_without_caching() {
    let solver = solver(SolverConfig::default().with_time_budget(Duration::ZERO));
    let result = solver.solve(&[1, 2, 3, 4, 5, 6], 100.0);
    assert!(result.timed_out);
    assert!(result.is_empty());
    assert!(solver.cache().is_empty());
}

#[test]
fn test_search_cut_short_inside_one_ordering_is_not_cached() {
    // equal operands under must-use-all give a single grouping with a single
    // ordering, so the deadline can only pass while that ordering is built
    let config = SolverConfig::default()
        .with_operators(OperatorSet::scientific())
        .with_time_budget(Duration::from_millis(1))
        .must_use_all(true);
    let solver = solver(config);
    let operands = [2; 8];
    let result = solver.solve(&operands, 1_000_000_007.0);
    assert!(result.timed_out);
    assert!(solver.cache().is_empty());

    let again = solver.solve(&operands, 1_000_000_007.0);
    assert!(again.timed_out);
    assert!(solver.cache().is_empty());
}

#[test]
fn test_results_are_cached_by_multiset() {
    let solver = Solver::default();
    let first = solver.solve(&[1, 2, 3, 4], 10.0);
    assert_eq!(solver.cache().len(), 1);

    let second = solver.solve(&[4, 3, 2, 1], 10.0);
    assert_eq!(solver.cache().len(), 1);
    assert_eq!(first, second);
}

#[test]
fn test_solving_is_deterministic() {
    let config = SolverConfig {
        cache_capacity: 0,
        ..SolverConfig::default()
    };
    let a = solver(config).solve(&[6, 2, 3, 7], 24.0);
    let b = solver(config).solve(&[6, 2, 3, 7], 24.0);
    assert_eq!(a.texts(), b.texts());
}

#[test]
fn test_solver_is_shareable_across_threads() {
    let solver = Solver::default();
    let shared = &solver;
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || shared.solve(&[1, 2, 3, 4], 10.0)))
            .collect();
        for handle in handles {
            let result = handle.join();
            assert!(result.is_ok());
            if let Ok(set) = result {
                assert!(!set.is_empty());
            }
        }
    });
    assert_eq!(solver.cache().len(), 1);
}

#[test]
fn test_solve_puzzle_uses_puzzle_rules() {
    let solver = Solver::default();
    let puzzle = Puzzle {
        operands: vec![2, 3, 4],
        target: 81,
        operators: OperatorSet::basic().with(Operator::Pow),
        must_use_all: false,
        witness: "3 ^ 4".to_string(),
    };
    let result = solver.solve_puzzle(&puzzle);
    assert!(result.contains("3 ^ 4"));

    // the solver's own operators cannot reach 81
    assert!(solver.solve(&[2, 3, 4], 81.0).is_empty());
}

#[test]
fn test_invalid_config() {
    let config = SolverConfig {
        tolerance: 0.0,
        ..SolverConfig::default()
    };
    assert_eq!(
        Solver::new(config).err(),
        Some(SolverError::InvalidTolerance(0.0))
    );

    let config = SolverConfig::default().with_max_solutions(0);
    assert_eq!(
        Solver::new(config).err(),
        Some(SolverError::NoSolutionsRequested)
    );
}

#[test]
fn test_cache_keeps_first_entry_and_evicts_oldest() {
    let cache = SolutionCache::new(2);
    let key = |target: f64| CacheKey::new(&[1, 2], target, OperatorSet::basic(), false);

    let timed_out = SolutionSet {
        solutions: Vec::new(),
        timed_out: true,
    };
    cache.insert(key(3.0), SolutionSet::default());
    cache.insert(key(3.0), timed_out);
    assert_eq!(cache.get(&key(3.0)), Some(SolutionSet::default()));

    cache.insert(key(1.0), SolutionSet::default());
    // touching 3.0 makes 1.0 the oldest entry
    assert!(cache.get(&key(3.0)).is_some());
    cache.insert(key(2.0), SolutionSet::default());
    assert_eq!(cache.len(), 2);
    assert!(cache.get(&key(1.0)).is_none());
    assert!(cache.get(&key(3.0)).is_some());

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_cache_evicts_least_recently_used() {
    let cache = SolutionCache::new(3);
    let key = |target: f64| CacheKey::new(&[4, 5], target, OperatorSet::basic(), false);
    for target in [1.0, 2.0, 3.0] {
        cache.insert(key(target), SolutionSet::default());
    }
    // use order is now 2, 3, 1
    assert!(cache.get(&key(1.0)).is_some());
    cache.insert(key(4.0), SolutionSet::default());
    assert!(cache.get(&key(2.0)).is_none());

    // use order is now 1, 4, 3
    assert!(cache.get(&key(3.0)).is_some());
    cache.insert(key(5.0), SolutionSet::default());
    assert!(cache.get(&key(1.0)).is_none());
    assert_eq!(cache.len(), 3);
    for target in [3.0, 4.0, 5.0] {
        assert!(cache.get(&key(target)).is_some());
    }
}

#[test]
fn test_signed_zero_targets_share_a_cache_entry() {
    let positive = CacheKey::new(&[5, 5], 0.0, OperatorSet::basic(), false);
    let negative = CacheKey::new(&[5, 5], -0.0, OperatorSet::basic(), false);
    assert_eq!(positive, negative);

    let solver = Solver::default();
    let first = solver.solve(&[5, 5], 0.0);
    let second = solver.solve(&[5, 5], -0.0);
    assert_eq!(first, second);
    assert_eq!(solver.cache().len(), 1);
}

#[test]
fn test_zero_capacity_cache_stores_nothing() {
    let cache = SolutionCache::new(0);
    cache.insert(
        CacheKey::new(&[1], 1.0, OperatorSet::basic(), false),
        SolutionSet::default(),
    );
    assert!(cache.is_empty());
}
