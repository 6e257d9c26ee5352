use num_bigint::BigInt;
use num_rational::BigRational;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::expression::{BuildError, Equation, Expression, ExpressionBuilder, MAX_DIVISOR_REDRAWS};
use crate::numeric::ArithmeticError;
use crate::pool::{Operator, OperatorPool, TermPool};
use crate::postfix;

fn c(n: i64) -> Expression {
    Expression::Constant(n)
}

fn int(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

fn pool(symbols: &str) -> OperatorPool {
    OperatorPool::parse(symbols).unwrap_or_else(|_| OperatorPool::new(Vec::new()))
}

#[test]
fn test_evaluate_mixed_tree() {
    // (9 + 9) * 9 / 2
    let expr = Expression::binary(
        Operator::Div,
        Expression::binary(
            Operator::Mul,
            Expression::binary(Operator::Add, c(9), c(9)),
            c(9),
        ),
        c(2),
    );
    assert_eq!(expr.evaluate(), Ok(int(81)));
}

#[test]
fn test_division_keeps_fractions() {
    let expr = Expression::binary(Operator::Div, c(7), c(2));
    assert_eq!(
        expr.evaluate(),
        Ok(BigRational::new(BigInt::from(7), BigInt::from(2)))
    );
}

#[test]
fn test_division_by_zero_subtree() {
    let expr = Expression::binary(
        Operator::Div,
        c(1),
        Expression::binary(Operator::Sub, c(3), c(3)),
    );
    assert_eq!(expr.evaluate(), Err(ArithmeticError::DivisionByZero));
}

#[test]
fn test_power_and_overflow() {
    let expr = Expression::binary(Operator::Pow, c(2), c(3));
    assert_eq!(expr.evaluate(), Ok(int(8)));

    let tower = Expression::binary(
        Operator::Pow,
        c(9),
        Expression::binary(Operator::Pow, c(9), c(9)),
    );
    assert_eq!(tower.evaluate(), Err(ArithmeticError::Overflow));

    let root = Expression::binary(
        Operator::Pow,
        c(4),
        Expression::binary(Operator::Div, c(1), c(2)),
    );
    assert_eq!(root.evaluate(), Err(ArithmeticError::NonIntegerExponent));
}

#[test]
fn test_display_fully_parenthesized() {
    let expr = Expression::binary(
        Operator::Sub,
        c(9),
        Expression::binary(Operator::Mul, c(8), c(-2)),
    );
    assert_eq!(expr.to_string(), "(9 - (8 * -2))");
}

#[test]
fn test_render_strips_outer_parentheses() {
    let expr = Expression::binary(
        Operator::Mul,
        Expression::binary(Operator::Add, c(9), c(9)),
        c(9),
    );
    let ops = pool("+*");
    assert_eq!(expr.render(&ops).to_string(), "(9 + 9) * 9");
}

#[test]
fn test_render_single_associative_operator_has_no_parentheses() {
    let expr = Expression::binary(
        Operator::Add,
        c(1),
        Expression::binary(
            Operator::Add,
            Expression::binary(Operator::Add, c(2), c(3)),
            c(4),
        ),
    );
    assert_eq!(expr.render(&pool("+")).to_string(), "1 + 2 + 3 + 4");
    assert_eq!(expr.render(&pool("++")).to_string(), "1 + 2 + 3 + 4");
    assert_eq!(expr.render(&pool("-")).to_string(), "1 + ((2 + 3) + 4)");
}

#[test]
fn test_render_plus_pool_never_has_parentheses() {
    let terms = TermPool::countdown(9);
    let ops = pool("+");
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let builder = ExpressionBuilder::new(6, &terms, &ops);
    assert!(builder.is_ok());
    if let Ok(builder) = builder {
        for _ in 0..50 {
            if let Ok(expr) = builder.build(&mut rng) {
                let text = expr.render(&ops).to_string();
                assert!(!text.contains('(') && !text.contains(')'), "{}", text);
            }
        }
    }
}

#[test]
fn test_postfix_writes_negative_terms_as_subtraction() {
    let expr = Expression::binary(Operator::Add, c(-3), c(-3));
    let text = expr.postfix().to_string();
    assert_eq!(text, "0 3 - 0 3 - +");
    assert_eq!(postfix::evaluate(&text), Ok(BigInt::from(-6)));

    let expr = Expression::binary(Operator::Mul, c(i64::MIN), c(1));
    assert_eq!(
        postfix::evaluate(&expr.postfix().to_string()),
        Ok(BigInt::from(i64::MIN))
    );
}

#[test]
fn test_postfix_replay_truncates_division() {
    // (9 / 2) * 2 is exactly 9 as a tree, but the integer engine truncates 9 / 2.
    let expr = Expression::binary(
        Operator::Mul,
        Expression::binary(Operator::Div, c(9), c(2)),
        c(2),
    );
    assert_eq!(expr.evaluate(), Ok(int(9)));
    assert_eq!(expr.postfix().to_string(), "9 2 / 2 *");
    assert_eq!(postfix::evaluate("9 2 / 2 *"), Ok(BigInt::from(8)));
}

#[test]
fn test_builder_rejects_bad_configuration() {
    let terms = TermPool::single(9);
    let empty_terms = TermPool::new(Vec::new());
    let ops = pool("+");
    let empty_ops = pool("");

    assert_eq!(
        ExpressionBuilder::new(0, &terms, &ops).err(),
        Some(BuildError::NoOperations)
    );
    assert_eq!(
        ExpressionBuilder::new(3, &empty_terms, &ops).err(),
        Some(BuildError::EmptyTermPool)
    );
    assert_eq!(
        ExpressionBuilder::new(3, &terms, &empty_ops).err(),
        Some(BuildError::EmptyOperatorPool)
    );
}

#[test]
fn test_builder_produces_exact_operation_count() {
    let terms = TermPool::countdown(9);
    let ops = pool("+-*/^");
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for operations in [1, 2, 3, 9, 20] {
        let builder = ExpressionBuilder::new(operations, &terms, &ops);
        assert!(builder.is_ok());
        if let Ok(builder) = builder {
            for _ in 0..25 {
                let expr = builder.build(&mut rng);
                assert!(expr.is_ok());
                if let Ok(expr) = expr {
                    assert_eq!(expr.operation_count(), operations);
                    assert_eq!(expr.leaf_count(), operations + 1);
                }
            }
        }
    }
}

#[test]
fn test_builder_single_operation_has_two_leaves() {
    let terms = TermPool::single(9);
    let ops = pool("*");
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let built = ExpressionBuilder::new(1, &terms, &ops).and_then(|b| b.build(&mut rng));
    assert_eq!(built, Ok(Expression::binary(Operator::Mul, c(9), c(9))));
}

#[test]
fn test_builder_never_divides_by_literal_zero() {
    let terms = TermPool::new(vec![0, 0, 0, 1, 2]);
    let ops = pool("/+");
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let builder = ExpressionBuilder::new(8, &terms, &ops);
    assert!(builder.is_ok());
    if let Ok(builder) = builder {
        for _ in 0..500 {
            if let Ok(expr) = builder.build(&mut rng) {
                expr.for_each_operation(&mut |op, _, right| {
                    assert!(!(op == Operator::Div && *right == Expression::Constant(0)));
                });
            }
        }
    }
}

#[test]
fn test_builder_gives_up_without_usable_divisor() {
    let terms = TermPool::single(0);
    let ops = pool("/");
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let built = ExpressionBuilder::new(2, &terms, &ops).and_then(|b| b.build(&mut rng));
    assert_eq!(
        built,
        Err(BuildError::DivisorRedrawsExhausted(MAX_DIVISOR_REDRAWS))
    );
}

#[test]
fn test_builder_is_deterministic_for_a_seed() {
    let terms = TermPool::countdown(9);
    let ops = pool("+-*/");
    let builder = ExpressionBuilder::new(5, &terms, &ops);
    assert!(builder.is_ok());
    if let Ok(builder) = builder {
        let mut a = ChaCha8Rng::seed_from_u64(2024);
        let mut b = ChaCha8Rng::seed_from_u64(2024);
        for _ in 0..10 {
            assert_eq!(builder.build(&mut a), builder.build(&mut b));
        }
    }
}

#[test]
fn test_equation_caches_value() {
    let target = int(18);
    let ops = pool("+");
    let equation = Equation::new(Expression::binary(Operator::Add, c(9), c(9)), &target, &ops);

    let first = equation.value();
    let second = equation.value();
    assert!(std::ptr::eq(first, second));
    assert!(equation.is_solution());
    assert!(equation.is_solution());
    assert_eq!(equation.to_string(), "9 + 9 = 18");
    assert_eq!(equation.expression_text(), "9 + 9");
}

#[test]
fn test_equation_not_solution() {
    let target = int(27);
    let ops = pool("/-");
    let equation = Equation::new(
        Expression::binary(
            Operator::Div,
            c(1),
            Expression::binary(Operator::Sub, c(9), c(6)),
        ),
        &target,
        &ops,
    );
    assert!(!equation.is_solution());
    assert_eq!(equation.to_string(), "1 / (9 - 6) = 0.33");
}

#[test]
fn test_equation_with_failed_evaluation() {
    let target = int(0);
    let ops = pool("/-");
    let equation = Equation::new(
        Expression::binary(
            Operator::Div,
            c(1),
            Expression::binary(Operator::Sub, c(9), c(9)),
        ),
        &target,
        &ops,
    );
    assert_eq!(equation.value(), &Err(ArithmeticError::DivisionByZero));
    assert!(!equation.is_solution());
}
