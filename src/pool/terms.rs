use std::fmt;
use std::str::FromStr;

use log::debug;
use rand::Rng;

use crate::pool::errors::PoolError;

/// Ordered pool of integer terms; duplicates raise a term's draw probability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermPool {
    terms: Vec<i64>,
}

impl TermPool {
    pub fn new(terms: Vec<i64>) -> Self {
        Self { terms }
    }

    /// A pool made of one repeated term
    pub fn single(term: i64) -> Self {
        Self::new(vec![term])
    }

    /// `max, max - 1, ..., 1`; empty when `max < 1`
    pub fn countdown(max: i64) -> Self {
        Self::new((1..=max).rev().collect())
    }

    /// Uniform draw by index. The pool must not be empty; rounds check this
    /// before any worker starts.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        self.terms[rng.gen_range(0..self.terms.len())]
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn has_nonzero(&self) -> bool {
        self.terms.iter().any(|t| *t != 0)
    }

    pub fn terms(&self) -> &[i64] {
        &self.terms
    }
}

impl FromStr for TermPool {
    type Err = PoolError;

    /// Parse a comma and/or whitespace separated list such as `"9, 8 7"`.
    fn from_str(list: &str) -> Result<Self, Self::Err> {
        let terms = list
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<i64>()
                    .map_err(|_| PoolError::InvalidTerm(token.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Parsed term pool {:?}", terms);
        Ok(Self::new(terms))
    }
}

impl fmt::Display for TermPool {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rendered: Vec<String> = self.terms.iter().map(i64::to_string).collect();
        write!(f, "{}", rendered.join(","))
    }
}
