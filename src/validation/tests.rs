use crate::expression::{Operator, OperatorSet};
use crate::parser::ParseError;
use crate::solver::{Solver, SolverConfig};
use crate::validation::{
    ExternalError, SubmissionError, SubmissionRules, Verdict, parse_puzzle_block,
    parse_solution_block, puzzle_from_response, validate_candidates, validate_submission,
};

fn basic() -> SubmissionRules {
    SubmissionRules::default()
}

fn with_concat() -> SubmissionRules {
    SubmissionRules {
        operators: OperatorSet::basic().with(Operator::Concat),
        ..SubmissionRules::default()
    }
}

#[test]
fn test_correct_submission() {
    let verdict = validate_submission("1 + 2 + 3 + 4", &[1, 2, 3, 4], 10.0, &basic());
    assert_eq!(
        verdict,
        Ok(Verdict {
            valid: true,
            value: 10.0
        })
    );
}

#[test]
fn test_wrong_value_is_not_an_error() {
    let verdict = validate_submission("1 + 2", &[1, 2, 3, 4], 10.0, &basic());
    assert_eq!(
        verdict,
        Ok(Verdict {
            valid: false,
            value: 3.0
        })
    );
}

#[test]
fn test_reused_operand() {
    let result = validate_submission("1 + 2 + 3 + 4 + 4", &[1, 2, 3, 4], 10.0, &basic());
    assert_eq!(result, Err(SubmissionError::OperandReused(4)));
}

#[test]
fn test_unknown_operand() {
    let result = validate_submission("7 + 3", &[1, 2, 3, 4], 10.0, &basic());
    assert_eq!(result, Err(SubmissionError::UnknownOperand(7)));
}

#[test]
fn test_repeated_values_are_separate_instances() {
    let result = validate_submission("5 - 5", &[5, 5], 0.0, &basic());
    assert!(result.is_ok_and(|v| v.valid));

    let result = validate_submission("5 - 5 + 5", &[5, 5], 5.0, &basic());
    assert_eq!(result, Err(SubmissionError::OperandReused(5)));
}

#[test]
fn test_must_use_all() {
    let rules = SubmissionRules {
        must_use_all: true,
        ..SubmissionRules::default()
    };
    let result = validate_submission("(1 + 4) * 2", &[1, 2, 3, 4], 10.0, &rules);
    assert_eq!(
        result,
        Err(SubmissionError::NotAllOperandsUsed {
            used: 3,
            available: 4
        })
    );
    let result = validate_submission("4 * 3 - 2 / 1", &[1, 2, 3, 4], 10.0, &rules);
    assert!(result.is_ok_and(|v| v.valid));
}

#[test]
fn test_concatenation_requires_the_operator() {
    let result = validate_submission("12 - 2", &[1, 2, 2], 10.0, &basic());
    assert_eq!(result, Err(SubmissionError::UnknownOperand(12)));

    let result = validate_submission("12 - 2", &[1, 2, 2], 10.0, &with_concat());
    assert!(result.is_ok_and(|v| v.valid));

    // both 2s are taken by the concatenation and the subtraction
    let result = validate_submission("12 - 2 + 2", &[1, 2, 2], 12.0, &with_concat());
    assert_eq!(result, Err(SubmissionError::OperandReused(2)));
}

#[test]
fn test_concatenation_keeps_written_digit_order() {
    let result = validate_submission("21", &[1, 2], 21.0, &with_concat());
    assert!(result.is_ok_and(|v| v.valid));

    let result = validate_submission("10 + 3", &[0, 1, 3], 13.0, &with_concat());
    assert!(result.is_ok_and(|v| v.valid));

    let result = validate_submission("11", &[1, 2], 11.0, &with_concat());
    assert_eq!(result, Err(SubmissionError::UnknownOperand(11)));
}

#[test]
fn test_concatenation_with_repeated_digits() {
    let result = validate_submission("1 + 12", &[1, 2, 1], 13.0, &with_concat());
    assert!(result.is_ok_and(|v| v.valid));

    let result = validate_submission("11 + 2", &[1, 2, 1], 13.0, &with_concat());
    assert!(result.is_ok_and(|v| v.valid));

    let result = validate_submission("11 + 1", &[1, 2, 1], 12.0, &with_concat());
    assert_eq!(result, Err(SubmissionError::OperandReused(1)));
}

#[test]
fn test_disabled_operators_are_rejected() {
    let result = validate_submission("2 ^ 3", &[2, 3], 8.0, &basic());
    assert_eq!(
        result,
        Err(SubmissionError::Syntax(ParseError::UnsupportedOperator(
            Operator::Pow
        )))
    );

    let rules = SubmissionRules {
        operators: OperatorSet::empty().with(Operator::Add),
        ..SubmissionRules::default()
    };
    let result = validate_submission("-(1) + 3", &[1, 3], 2.0, &rules);
    assert_eq!(
        result,
        Err(SubmissionError::Syntax(ParseError::UnsupportedOperator(
            Operator::Sub
        )))
    );

    // without subtraction "-1" can only be a negative operand
    let result = validate_submission("-1 + 3", &[1, 3], 2.0, &rules);
    assert_eq!(result, Err(SubmissionError::UnknownOperand(-1)));
    let result = validate_submission("-1 + 3", &[-1, 3], 2.0, &rules);
    assert!(result.is_ok_and(|v| v.valid));
}

#[test]
fn test_negative_operands() {
    let operands = [5, -3];
    let result = validate_submission("5 - -3", &operands, 8.0, &basic());
    assert!(result.is_ok_and(|v| v.valid));

    // the sign may also negate a positive operand
    let result = validate_submission("5 * -3", &[5, 3], -15.0, &basic());
    assert!(result.is_ok_and(|v| v.valid));

    let rules = SubmissionRules {
        must_use_all: true,
        ..SubmissionRules::default()
    };
    let result = validate_submission("-3 + 3", &[3, -3], 0.0, &rules);
    assert!(result.is_ok_and(|v| v.valid));

    let result = validate_submission("5 - -3", &[5, 3, -3], 8.0, &basic());
    assert!(result.is_ok_and(|v| v.valid));
    let result = validate_submission("5 - -3 - -3", &[5, -3], 11.0, &basic());
    assert_eq!(result, Err(SubmissionError::OperandReused(3)));
}

#[test]
fn test_solver_output_over_negative_operands_validates() {
    let operands = [5, -3];
    let solutions = Solver::default().solve(&operands, 8.0);
    assert!(!solutions.is_empty());
    for text in solutions.texts() {
        let result = validate_submission(text, &operands, 8.0, &basic());
        assert!(result.is_ok_and(|v| v.valid), "{} was rejected", text);
    }

    let additive = SubmissionRules {
        operators: OperatorSet::empty().with(Operator::Add),
        ..SubmissionRules::default()
    };
    let config = SolverConfig::default().with_operators(additive.operators);
    let solver = Solver::new(config);
    assert!(solver.is_ok());
    if let Ok(solver) = solver {
        let solutions = solver.solve(&operands, 2.0);
        assert!(solutions.contains("5 + -3"));
        for text in solutions.texts() {
            let result = validate_submission(text, &operands, 2.0, &additive);
            assert!(result.is_ok_and(|v| v.valid), "{} was rejected", text);
        }
    }
}

#[test]
fn test_malformed_and_failing_submissions() {
    assert!(matches!(
        validate_submission("1 + ", &[1], 1.0, &basic()),
        Err(SubmissionError::Syntax(_))
    ));
    assert!(matches!(
        validate_submission("4 / (2 - 2)", &[4, 2, 2], 1.0, &basic()),
        Err(SubmissionError::Evaluation(_))
    ));
    assert!(matches!(
        validate_submission("require('fs')", &[1], 1.0, &basic()),
        Err(SubmissionError::Syntax(_))
    ));
}

#[test]
fn test_error_messages_are_readable() {
    assert_eq!(
        SubmissionError::OperandReused(4).to_string(),
        "4 is used more times than it is available"
    );
    assert_eq!(
        SubmissionError::NotAllOperandsUsed {
            used: 3,
            available: 4
        }
        .to_string(),
        "Every number must be used (3 of 4 used)"
    );
}

const PUZZLE_RESPONSE: &str = "NUMBER_START
2
4
7
8
NUMBER_END
TARGET_START
49
TARGET_END
SOLUTION_START
47 + 2
8 * 7 - 4 - 2 - 1
48 + 1
SOLUTION_END
----------
NUMBER_START
1
NUMBER_END
";

#[test]
fn test_parse_solution_block() {
    let text = "Sure!\nSOLUTION_START\n 1 + 2 \n\n3 * 1\nSOLUTION_END\ntrailing";
    assert_eq!(
        parse_solution_block(text),
        Ok(vec!["1 + 2".to_string(), "3 * 1".to_string()])
    );
    assert_eq!(
        parse_solution_block("no markers here"),
        Err(ExternalError::MissingBlock("SOLUTION_START"))
    );
}

#[test]
fn test_parse_puzzle_block_takes_first_puzzle() {
    let parsed = parse_puzzle_block(PUZZLE_RESPONSE);
    assert!(parsed.is_ok());
    if let Ok(puzzle) = parsed {
        assert_eq!(puzzle.operands, vec![2, 4, 7, 8]);
        assert_eq!(puzzle.target, 49);
        assert_eq!(puzzle.candidates.len(), 3);
    }

    let missing_target = "NUMBER_START\n1\nNUMBER_END\nSOLUTION_START\n1\nSOLUTION_END";
    assert_eq!(
        parse_puzzle_block(missing_target),
        Err(ExternalError::MissingBlock("TARGET_START"))
    );

    let bad_target = "NUMBER_START\n1\nNUMBER_END\nTARGET_START\nten\nTARGET_END";
    assert!(matches!(
        parse_puzzle_block(bad_target),
        Err(ExternalError::Malformed(_))
    ));
}

#[test]
fn test_candidates_are_revalidated() {
    let candidates: Vec<String> = [
        "47 + 2",
        "8 * 7 - 4 - 2 - 1",
        "48 + 1",
        "2 + 47",
        "process.exit()",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let solutions = validate_candidates(&candidates, &[2, 4, 7, 8], 49.0, &with_concat(), 3);
    let texts: Vec<&str> = solutions.iter().map(|s| s.text.as_str()).collect();
    // 8 * 7 - 4 - 2 - 1 needs a 1, 48 + 1 as well
    assert_eq!(texts, vec!["47 + 2", "2 + 47"]);

    let mut sources = solutions
        .first()
        .map(|s| s.expression.consumed_sources())
        .unwrap_or_default();
    sources.sort_unstable();
    assert_eq!(sources, vec![0, 1, 2]);
}

#[test]
fn test_puzzle_from_response() {
    let result = puzzle_from_response(PUZZLE_RESPONSE, &with_concat(), 3);
    assert!(result.is_ok());
    if let Ok((puzzle, solutions)) = result {
        assert_eq!(puzzle.target, 49);
        assert_eq!(puzzle.witness, "47 + 2");
        assert_eq!(solutions.len(), 1);
    }

    // without concatenation nothing in the response validates
    assert_eq!(
        puzzle_from_response(PUZZLE_RESPONSE, &basic(), 3).err(),
        Some(ExternalError::NoValidCandidates)
    );
}
