use log::trace;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::numeric::errors::ArithmeticError;

/// Largest numerator or denominator, in bits, an evaluated value may carry
pub const MAX_MAGNITUDE_BITS: u64 = 256;

/// Largest absolute exponent accepted by [`checked_pow`]
pub const MAX_EXPONENT: u32 = 256;

#[inline]
pub fn within_limits(value: &BigRational) -> bool {
    value.numer().bits() <= MAX_MAGNITUDE_BITS && value.denom().bits() <= MAX_MAGNITUDE_BITS
}

#[inline]
fn limited(value: BigRational) -> Result<BigRational, ArithmeticError> {
    if within_limits(&value) {
        Ok(value)
    } else {
        trace!(
            "Value exceeds magnitude limit: {} / {} bits",
            value.numer().bits(),
            value.denom().bits()
        );
        Err(ArithmeticError::Overflow)
    }
}

/// # Errors
///
/// Returns [`ArithmeticError::Overflow`] if the sum leaves the supported magnitude.
pub fn checked_add(lhs: &BigRational, rhs: &BigRational) -> Result<BigRational, ArithmeticError> {
    limited(lhs + rhs)
}

/// # Errors
///
/// Returns [`ArithmeticError::Overflow`] if the difference leaves the supported magnitude.
pub fn checked_sub(lhs: &BigRational, rhs: &BigRational) -> Result<BigRational, ArithmeticError> {
    limited(lhs - rhs)
}

/// # Errors
///
/// Returns [`ArithmeticError::Overflow`] if the product leaves the supported magnitude.
pub fn checked_mul(lhs: &BigRational, rhs: &BigRational) -> Result<BigRational, ArithmeticError> {
    limited(lhs * rhs)
}

/// Exact division; never truncates.
///
/// # Errors
///
/// Returns [`ArithmeticError::DivisionByZero`] for a zero divisor and
/// [`ArithmeticError::Overflow`] if the quotient leaves the supported magnitude.
pub fn checked_div(lhs: &BigRational, rhs: &BigRational) -> Result<BigRational, ArithmeticError> {
    if rhs.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }
    limited(lhs / rhs)
}

/// Raise `base` to an integral `exponent`. Negative exponents invert the base.
///
/// # Errors
///
/// - [`ArithmeticError::NonIntegerExponent`] if the exponent has a denominator
/// - [`ArithmeticError::DivisionByZero`] for zero raised to a negative power
/// - [`ArithmeticError::Overflow`] if the exponent or the result is too large
pub fn checked_pow(
    base: &BigRational,
    exponent: &BigRational,
) -> Result<BigRational, ArithmeticError> {
    if !exponent.is_integer() {
        return Err(ArithmeticError::NonIntegerExponent);
    }
    let exponent = exponent.to_integer();

    if exponent.is_zero() {
        return Ok(BigRational::one());
    }
    if base.is_zero() {
        return if exponent.is_negative() {
            Err(ArithmeticError::DivisionByZero)
        } else {
            Ok(BigRational::zero())
        };
    }
    if base.abs().is_one() {
        let even = (&exponent % BigInt::from(2)).is_zero();
        return Ok(if base.is_negative() && !even {
            -BigRational::one()
        } else {
            BigRational::one()
        });
    }

    let magnitude = exponent
        .abs()
        .to_u32()
        .filter(|e| *e <= MAX_EXPONENT)
        .ok_or(ArithmeticError::Overflow)?;

    // Reject early rather than materialise a huge intermediate.
    let widest = base.numer().bits().max(base.denom().bits());
    if widest.saturating_sub(1) * u64::from(magnitude) > MAX_MAGNITUDE_BITS {
        return Err(ArithmeticError::Overflow);
    }

    let numer = num_traits::pow(base.numer().clone(), magnitude as usize);
    let denom = num_traits::pow(base.denom().clone(), magnitude as usize);
    let value = if exponent.is_negative() {
        BigRational::new(denom, numer)
    } else {
        BigRational::new(numer, denom)
    };
    limited(value)
}
