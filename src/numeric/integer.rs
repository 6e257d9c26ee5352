use num_bigint::BigInt;
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};

use crate::numeric::errors::ArithmeticError;

/// Largest exponent the integer power accepts for bases other than -1, 0 and 1
pub const MAX_INTEGER_EXPONENT: u32 = 1 << 16;

/// Largest power result, in bits, the integer engine will materialise
pub const MAX_INTEGER_RESULT_BITS: u64 = 1 << 17;

/// Integer division truncating toward zero.
///
/// # Errors
///
/// Returns [`ArithmeticError::DivisionByZero`] when `rhs` is zero.
pub fn div_truncate(lhs: &BigInt, rhs: &BigInt) -> Result<BigInt, ArithmeticError> {
    if rhs.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }
    Ok(lhs / rhs)
}

/// Exponentiation by squaring over arbitrary-precision integers.
///
/// # Errors
///
/// - [`ArithmeticError::NegativeExponent`] when `exponent < 0`
/// - [`ArithmeticError::ExponentTooLarge`] when the base is not -1, 0 or 1 and
///   `exponent` exceeds [`MAX_INTEGER_EXPONENT`] or the result would need more
///   than [`MAX_INTEGER_RESULT_BITS`] bits
pub fn pow_integer(base: &BigInt, exponent: &BigInt) -> Result<BigInt, ArithmeticError> {
    if exponent.is_negative() {
        return Err(ArithmeticError::NegativeExponent);
    }
    if exponent.is_zero() {
        return Ok(BigInt::one());
    }
    if base.is_zero() || base.is_one() {
        return Ok(base.clone());
    }
    if base.abs().is_one() {
        let odd = !(exponent % BigInt::from(2)).is_zero();
        return Ok(if odd { base.clone() } else { BigInt::one() });
    }

    let too_large = || ArithmeticError::ExponentTooLarge(exponent.to_string());
    let e = exponent
        .to_u32()
        .filter(|e| *e <= MAX_INTEGER_EXPONENT)
        .ok_or_else(too_large)?;

    // |base|^e has at most bits(base) * e bits; checked before allocating.
    if base.bits().saturating_mul(u64::from(e)) > MAX_INTEGER_RESULT_BITS {
        return Err(too_large());
    }
    Ok(Pow::pow(base, e))
}
