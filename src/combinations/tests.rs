use crate::combinations::{
    CombinationGenerator, Grouping, can_reach, concatenation_bound, magnitude_bound,
};
use crate::expression::{Leaf, Operator, OperatorSet};

fn keys(groupings: &[Grouping]) -> Vec<Vec<i64>> {
    let mut keys: Vec<Vec<i64>> = groupings.iter().map(Grouping::key).collect();
    keys.sort();
    keys
}

#[test]
fn test_all_sub_multisets_are_enumerated_once() {
    let generator = CombinationGenerator::new(OperatorSet::basic());
    let groupings = generator.combinations(&[3, 1, 2], 6.0);
    assert_eq!(
        keys(&groupings),
        vec![
            vec![1],
            vec![1, 2],
            vec![1, 2, 3],
            vec![1, 3],
            vec![2],
            vec![2, 3],
            vec![3],
        ]
    );
}

#[test]
fn test_repeated_operands_are_not_duplicated() {
    let generator = CombinationGenerator::new(OperatorSet::basic());
    let groupings = generator.combinations(&[5, 5], 0.0);
    assert_eq!(keys(&groupings), vec![vec![5], vec![5, 5]]);
}

#[test]
fn test_require_all_emits_only_full_groupings() {
    let generator = CombinationGenerator::new(OperatorSet::basic()).require_all(true);
    let groupings = generator.combinations(&[4, 1, 2, 3], 10.0);
    assert_eq!(groupings.len(), 1);
    if let Some(grouping) = groupings.first() {
        assert_eq!(grouping.consumed(), 4);
        assert_eq!(grouping.values(), vec![1, 2, 3, 4]);
    }
}

#[test]
fn test_infeasible_target_prunes_everything() {
    let generator = CombinationGenerator::new(OperatorSet::basic());
    assert!(generator.combinations(&[0, 0, 0], 1.0).is_empty());
}

#[test]
fn test_small_groupings_are_pruned_for_large_targets() {
    let generator = CombinationGenerator::new(OperatorSet::basic());
    let groupings = generator.combinations(&[1, 2, 3], 20.0);
    // {2, 3} tops out at 11, only all three operands can reach 20
    assert_eq!(keys(&groupings), vec![vec![1, 2, 3]]);
}

#[test]
fn test_concatenation_merges_sorted_neighbours() {
    let operators = OperatorSet::basic().with(Operator::Concat);
    let generator = CombinationGenerator::new(operators);
    let groupings = generator.combinations(&[2, 1, 3], 5.0);
    let found = keys(&groupings);
    assert!(found.contains(&vec![3, 12]));
    assert!(found.contains(&vec![1, 23]));
    // a single digit target allows at most two digit leaves
    assert!(!found.contains(&vec![123]));
    // 21 would need the operands out of sorted order
    assert!(!found.iter().any(|key| key.contains(&21)));

    let consumed = groupings
        .iter()
        .find(|g| g.key() == vec![3, 12])
        .map(Grouping::consumed);
    assert_eq!(consumed, Some(3));
}

#[test]
fn test_concatenated_leaf_can_exceed_the_arithmetic_bound() {
    let operators = OperatorSet::basic().with(Operator::Concat);
    let generator = CombinationGenerator::new(operators);
    let groupings = generator.combinations(&[1, 2], 12.0);
    assert!(keys(&groupings).contains(&vec![12]));

    let generator = CombinationGenerator::new(operators).require_all(true);
    let groupings = generator.combinations(&[3, 1, 2], 123.0);
    assert!(keys(&groupings).contains(&vec![123]));
}

#[test]
fn test_concatenation_rejects_leading_zero() {
    let operators = OperatorSet::basic().with(Operator::Concat);
    let generator = CombinationGenerator::new(operators);
    let groupings = generator.combinations(&[0, 5], 5.0);
    assert!(!groupings.is_empty());
    assert!(groupings.iter().all(|g| g.consumed() == g.len()));
}

#[test]
fn test_grouping_limit() {
    let generator = CombinationGenerator::new(OperatorSet::basic()).with_limit(3);
    let groupings = generator.combinations(&[1, 2, 3, 4, 5], 10.0);
    assert_eq!(groupings.len(), 3);
}

#[test]
fn test_orderings_skip_equal_values() {
    let grouping = Grouping::new(vec![Leaf::new(5, 0), Leaf::new(2, 1), Leaf::new(5, 2)]);
    let orderings: Vec<Vec<i64>> = grouping
        .orderings()
        .map(|leaves| leaves.iter().map(|leaf| leaf.value).collect())
        .collect();
    assert_eq!(orderings, vec![vec![2, 5, 5], vec![5, 2, 5], vec![5, 5, 2]]);

    let single = Grouping::new(vec![Leaf::new(7, 0)]);
    assert_eq!(single.orderings().count(), 1);
}

#[test]
fn test_magnitude_bound() {
    assert_eq!(magnitude_bound([0, 0, 0]), 0.0);
    assert_eq!(magnitude_bound([1, 1]), 3.0);
    assert_eq!(magnitude_bound([1, 2, 3, 4]), 119.0);
    assert_eq!(magnitude_bound([-3]), 3.0);
}

#[test]
fn test_bound_admits_reachable_targets() {
    let basic = OperatorSet::basic();
    // 1 + 1 = 2 is above the product of the operands
    assert!(can_reach([1, 1], 2.0, basic));
    // (1 + 1) * (1 + 1) * (1 + 1)
    assert!(can_reach([1, 1, 1, 1, 1, 1], 8.0, basic));
    // 9 / (1 / 9)
    assert!(can_reach([9, 1, 9], 81.0, basic));
    assert!(can_reach([5, 5], -10.0, basic));
    assert!(!can_reach([0, 0, 0], 1.0, basic));
    assert!(!can_reach([2, 3], 12.5, basic));
}

#[test]
fn test_concatenation_bound() {
    assert_eq!(concatenation_bound([1, 2]), 99.0);
    assert_eq!(concatenation_bound([0, 0, 0]), 999.0);
    assert_eq!(concatenation_bound([25, 3]), 999.0);

    let with_concat = OperatorSet::basic().with(Operator::Concat);
    // 12 is out of reach of 1 and 2 without concatenation
    assert!(!can_reach([1, 2], 12.0, OperatorSet::basic()));
    assert!(can_reach([1, 2], 12.0, with_concat));
    assert!(can_reach([9, 8], 98.0, with_concat));
    assert!(!can_reach([9, 8], 100.0, with_concat));
}

#[test]
fn test_bound_disabled_for_non_elementary_operators() {
    let with_power = OperatorSet::basic().with(Operator::Pow);
    assert!(can_reach([0, 0, 0], 1.0, with_power));
}
