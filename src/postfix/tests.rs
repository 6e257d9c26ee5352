use num_bigint::BigInt;
use proptest::prelude::*;

use crate::numeric::ArithmeticError;
use crate::pool::Operator;
use crate::postfix::{Instruction, PostfixError, Token, compile, evaluate, tokenize};

fn both(input: &str) -> (Result<BigInt, PostfixError>, Result<BigInt, PostfixError>) {
    let direct = evaluate(input);
    let compiled = compile(input).and_then(|program| program.evaluate());
    (direct, compiled)
}

fn assert_value(input: &str, expected: i64) {
    let (direct, compiled) = both(input);
    assert_eq!(direct, Ok(BigInt::from(expected)), "direct: {}", input);
    assert_eq!(compiled, Ok(BigInt::from(expected)), "compiled: {}", input);
}

fn assert_error(input: &str, expected: PostfixError) {
    let (direct, compiled) = both(input);
    assert_eq!(direct, Err(expected.clone()), "direct: {}", input);
    assert_eq!(compiled, Err(expected), "compiled: {}", input);
}

#[test]
fn test_reference_values() {
    assert_value("3 4 +", 7);
    assert_value("5 1 2 + 4 * + 3 -", 14);
    assert_value("2 3 ^", 8);
    assert_value("42", 42);
    assert_value("  6   3 /  ", 2);
}

#[test]
fn test_first_popped_is_right_operand() {
    assert_value("10 4 -", 6);
    assert_value("3 10 -", -7);
    assert_value("20 5 /", 4);
    assert_value("3 2 ^", 9);
}

#[test]
fn test_division_truncates_toward_zero() {
    assert_value("7 2 /", 3);
    assert_value("0 7 - 2 /", -3);
}

#[test]
fn test_arbitrary_precision() {
    let expected: BigInt = BigInt::from(1) << 100u32;
    assert_eq!(evaluate("2 100 ^"), Ok(expected.clone()));
    assert_eq!(
        evaluate("1267650600228229401496703205376 1 *"),
        Ok(expected)
    );
}

#[test]
fn test_power_result_size_is_bounded() {
    assert_error(
        "2 65536 ^ 2 ^",
        PostfixError::Arithmetic(ArithmeticError::ExponentTooLarge("2".to_string())),
    );
    assert_error(
        "9 65536 ^ 65536 ^",
        PostfixError::Arithmetic(ArithmeticError::ExponentTooLarge("65536".to_string())),
    );
}

#[test]
fn test_division_by_zero() {
    assert_error(
        "10 0 /",
        PostfixError::Arithmetic(ArithmeticError::DivisionByZero),
    );
}

#[test]
fn test_negative_exponent() {
    assert_error(
        "2 0 1 - ^",
        PostfixError::Arithmetic(ArithmeticError::NegativeExponent),
    );
}

#[test]
fn test_empty_input() {
    assert_error("", PostfixError::Empty);
    assert_error(" \t\n ", PostfixError::Empty);
}

#[test]
fn test_lone_operator() {
    assert_error(
        "+",
        PostfixError::InsufficientOperands {
            operator: '+',
            position: 0,
        },
    );
}

#[test]
fn test_operator_with_one_value() {
    assert_error(
        "3 *",
        PostfixError::InsufficientOperands {
            operator: '*',
            position: 1,
        },
    );
}

#[test]
fn test_too_many_values() {
    assert_error("21 3", PostfixError::UnbalancedStack { depth: 2 });
    assert_error("1 2 3 +", PostfixError::UnbalancedStack { depth: 2 });
}

#[test]
fn test_missing_separator() {
    assert_error(
        "3 4+",
        PostfixError::MalformedToken {
            token: "4+".to_string(),
            position: 1,
        },
    );
    assert_error(
        "-7",
        PostfixError::MalformedToken {
            token: "-7".to_string(),
            position: 0,
        },
    );
}

#[test]
fn test_disallowed_character() {
    assert_error(
        "3 x +",
        PostfixError::InvalidCharacter {
            token: "x".to_string(),
            character: 'x',
            position: 1,
        },
    );
    assert_error(
        "3 4.5 +",
        PostfixError::InvalidCharacter {
            token: "4.5".to_string(),
            character: '.',
            position: 1,
        },
    );
}

#[test]
fn test_structure_errors_win_over_arithmetic() {
    assert_error(
        "10 0 / +",
        PostfixError::InsufficientOperands {
            operator: '+',
            position: 3,
        },
    );
}

#[test]
fn test_tokenize() {
    let tokens = tokenize("12 3 ^");
    assert_eq!(
        tokens,
        Ok(vec![
            Token::Number(BigInt::from(12)),
            Token::Number(BigInt::from(3)),
            Token::Operator(Operator::Pow),
        ])
    );
}

#[test]
fn test_compiled_program_is_reusable() {
    let program = compile("5 1 2 + 4 * + 3 -");
    assert!(program.is_ok());
    if let Ok(program) = program {
        assert_eq!(program.max_stack_depth(), 3);
        assert_eq!(program.instructions().len(), 9);
        assert_eq!(
            program.instructions().first(),
            Some(&Instruction::Push(BigInt::from(5)))
        );
        assert_eq!(program.to_string(), "5 1 2 + 4 * + 3 -");
        for _ in 0..3 {
            assert_eq!(program.evaluate(), Ok(BigInt::from(14)));
        }
    }
}

/// A random well-formed postfix string with `leaves` numbers and `leaves - 1`
/// operators, built from a random binary tree.
fn well_formed() -> impl Strategy<Value = String> {
    let leaf = (0u32..1000).prop_map(|n| n.to_string());
    leaf.prop_recursive(6, 64, 2, |inner| {
        (inner.clone(), inner, prop::sample::select(vec!['+', '-', '*']))
            .prop_map(|(l, r, op)| format!("{} {} {}", l, r, op))
    })
}

proptest! {
    #[test]
    fn prop_well_formed_leaves_one_value(input in well_formed()) {
        let (direct, compiled) = both(&input);
        prop_assert!(direct.is_ok());
        prop_assert_eq!(direct, compiled);
    }

    #[test]
    fn prop_modes_agree_on_any_input(input in "[0-9+*/^ x-]{0,24}") {
        let (direct, compiled) = both(&input);
        prop_assert_eq!(direct, compiled);
    }
}
