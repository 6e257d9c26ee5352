use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

/// Render a value the way the result log shows it: integers verbatim,
/// everything else rounded to at most two decimals with trailing zeros trimmed.
pub fn format_value(value: &BigRational) -> String {
    if value.is_integer() {
        return value.to_integer().to_string();
    }

    let hundred = BigRational::from_integer(BigInt::from(100));
    let cents = (value * hundred).round().to_integer();
    if cents.is_zero() {
        return "0".to_string();
    }

    let sign = if cents.is_negative() { "-" } else { "" };
    let cents = cents.abs();
    let whole = &cents / BigInt::from(100);
    let fraction = (&cents % BigInt::from(100)).to_string();

    if fraction == "0" {
        format!("{}{}", sign, whole)
    } else {
        let fraction = format!("{:0>2}", fraction);
        format!("{}{}.{}", sign, whole, fraction.trim_end_matches('0'))
    }
}
