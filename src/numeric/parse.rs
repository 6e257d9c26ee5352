use log::debug;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Pow, Zero};

use crate::numeric::errors::ParseNumberError;

fn parse_integer(text: &str, original: &str) -> Result<BigInt, ParseNumberError> {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseNumberError::Invalid(original.to_string()));
    }
    text.parse::<BigInt>()
        .map_err(|_| ParseNumberError::Invalid(original.to_string()))
}

/// Parse a target value written as an integer (`27`), a decimal (`-2.75`)
/// or a fraction (`1/3`).
///
/// # Errors
///
/// Returns an error for empty input, malformed numbers, or a zero denominator.
pub fn parse_rational(text: &str) -> Result<BigRational, ParseNumberError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseNumberError::Empty);
    }

    let value = if let Some((numer, denom)) = trimmed.split_once('/') {
        let numer = parse_integer(numer.trim(), trimmed)?;
        let denom = parse_integer(denom.trim(), trimmed)?;
        if denom.is_zero() {
            return Err(ParseNumberError::ZeroDenominator(trimmed.to_string()));
        }
        BigRational::new(numer, denom)
    } else if let Some((whole, fraction)) = trimmed.split_once('.') {
        if fraction.is_empty() || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseNumberError::Invalid(trimmed.to_string()));
        }
        let negative = whole.starts_with('-');
        let whole = match whole {
            "" | "-" | "+" => BigInt::zero(),
            w => parse_integer(w, trimmed)?,
        };
        let scale: BigInt = Pow::pow(BigInt::from(10), fraction.len());
        let fraction = parse_integer(fraction, trimmed)?;
        let magnitude = BigRational::from_integer(whole.magnitude().clone().into())
            + BigRational::new(fraction, scale);
        if negative { -magnitude } else { magnitude }
    } else {
        BigRational::from_integer(parse_integer(trimmed, trimmed)?)
    };

    debug!("Parsed '{}' as {}", trimmed, value);
    Ok(value)
}
