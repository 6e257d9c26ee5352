use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::pool::{Operator, OperatorPool, PoolError, TermPool};

#[test]
fn test_operator_symbols() {
    for op in Operator::ALL {
        assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
    }
    assert_eq!(Operator::from_symbol('%'), None);
    assert!(Operator::Add.is_associative());
    assert!(Operator::Mul.is_associative());
    assert!(!Operator::Sub.is_associative());
}

#[test]
fn test_operator_pool_preserves_order() {
    let pool = OperatorPool::parse("* + -");
    assert!(pool.is_ok());
    if let Ok(pool) = pool {
        assert_eq!(
            pool.operators(),
            &[Operator::Mul, Operator::Add, Operator::Sub]
        );
        assert_eq!(pool.to_string(), "*+-");
    }
}

#[test]
fn test_operator_pool_rejects_unknown() {
    assert_eq!(
        OperatorPool::parse("+%"),
        Err(PoolError::UnknownOperator('%'))
    );
}

#[test]
fn test_sole_operator() {
    let sole = |s: &str| OperatorPool::parse(s).ok().and_then(|p| p.sole_operator());
    assert_eq!(sole("+"), Some(Operator::Add));
    assert_eq!(sole("**"), Some(Operator::Mul));
    assert_eq!(sole("+*"), None);
    assert_eq!(sole(""), None);
}

#[test]
fn test_term_pool_constructors() {
    assert_eq!(TermPool::countdown(4).terms(), &[4, 3, 2, 1]);
    assert!(TermPool::countdown(0).is_empty());
    assert_eq!(TermPool::single(9).terms(), &[9]);

    let parsed = "9, 8 -2,,0".parse::<TermPool>();
    assert!(parsed.is_ok());
    if let Ok(pool) = parsed {
        assert_eq!(pool.terms(), &[9, 8, -2, 0]);
        assert!(pool.has_nonzero());
    }

    assert_eq!(
        "1,x".parse::<TermPool>(),
        Err(PoolError::InvalidTerm("x".to_string()))
    );
    assert!(!TermPool::new(vec![0, 0]).has_nonzero());
}

#[test]
fn test_picks_stay_in_pool() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let terms = TermPool::new(vec![3, 5, 7]);
    let ops = OperatorPool::new(vec![Operator::Div, Operator::Pow]);

    for _ in 0..200 {
        assert!(terms.terms().contains(&terms.pick(&mut rng)));
        assert!(ops.contains(ops.pick(&mut rng)));
    }
}

#[test]
fn test_picks_cover_pool() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let terms = TermPool::countdown(4);
    let mut seen = [false; 4];
    for _ in 0..500 {
        let term = terms.pick(&mut rng);
        if let Some(slot) = seen.get_mut((term - 1) as usize) {
            *slot = true;
        }
    }
    assert!(seen.iter().all(|s| *s));
}
