use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, Mul, Neg, Sub},
};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};
use thiserror::Error;

/// Scale applied when converting an `f64` into a [`Fraction`].
///
/// The value is multiplied by this scale and truncated toward zero, so a
/// fraction built from a float keeps at most five decimal digits.
pub const FLOAT_SCALE: i64 = 100_000;

/// An exact rational number kept in lowest terms.
///
/// The sign always lives on the numerator and the denominator is positive.
/// Arithmetic never loses precision; only [`Fraction::from_f64`] is lossy.
///
/// # Examples
/// ```
/// use numtrace_core::Fraction;
///
/// let half = Fraction::new(6, 4).unwrap();
/// assert_eq!(half.to_string(), "3/2");
///
/// let five = Fraction::from_integer(5);
/// assert_eq!(five.to_string(), "5");
///
/// let sum = &half + &five;
/// assert_eq!(sum.to_string(), "13/2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fraction(BigRational);

impl Fraction {
    /// Creates a reduced fraction from a numerator and denominator.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::ZeroDenominator`] if `denominator` is zero.
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, FractionError> {
        if denominator == 0 {
            return Err(FractionError::ZeroDenominator);
        }
        Ok(Self(BigRational::new(
            BigInt::from(numerator),
            BigInt::from(denominator),
        )))
    }

    /// Creates a whole-number fraction.
    #[must_use]
    pub fn from_integer(value: i64) -> Self {
        Self(BigRational::from_integer(BigInt::from(value)))
    }

    /// Approximates a float as `trunc(value * 100000) / 100000`.
    ///
    /// This is deliberately lossy: anything beyond the fifth decimal digit is
    /// dropped, which keeps typical textbook inputs such as `0.5` or `2.25`
    /// reducing to small, readable fractions.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::NotFinite`] if `value` is `NaN` or infinite.
    pub fn from_f64(value: f64) -> Result<Self, FractionError> {
        if !value.is_finite() {
            return Err(FractionError::NotFinite(value));
        }
        #[allow(clippy::cast_precision_loss)]
        let scaled = (value * FLOAT_SCALE as f64).trunc();
        let numerator = BigInt::from_f64(scaled).ok_or(FractionError::NotFinite(value))?;
        Ok(Self(BigRational::new(numerator, BigInt::from(FLOAT_SCALE))))
    }

    /// Returns the zero fraction.
    #[must_use]
    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    /// Returns the reduced numerator.
    #[must_use]
    pub fn numerator(&self) -> &BigInt {
        self.0.numer()
    }

    /// Returns the reduced, always positive denominator.
    #[must_use]
    pub fn denominator(&self) -> &BigInt {
        self.0.denom()
    }

    /// Returns true if the fraction equals zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Divides by another fraction.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::DivideByZero`] if `divisor` is zero.
    pub fn divide(&self, divisor: &Fraction) -> Result<Self, FractionError> {
        if divisor.is_zero() {
            return Err(FractionError::DivideByZero);
        }
        Ok(Self(&self.0 / &divisor.0))
    }

    /// Converts to the nearest `f64`.
    ///
    /// Magnitudes beyond the `f64` range saturate to infinity.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        let numerator = self.0.numer().to_f64().unwrap_or(f64::NAN);
        let denominator = self.0.denom().to_f64().unwrap_or(f64::NAN);
        numerator / denominator
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for Fraction {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl TryFrom<f64> for Fraction {
    type Error = FractionError;
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Fraction::from_f64(value)
    }
}

impl From<&Fraction> for f64 {
    fn from(f: &Fraction) -> Self {
        f.to_f64()
    }
}

/// Renders `n` for whole numbers and `n/d` otherwise.
impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.denom().is_one() {
            write!(f, "{}", self.0.numer())
        } else {
            write!(f, "{}/{}", self.0.numer(), self.0.denom())
        }
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for &Fraction {
    type Output = Fraction;
    fn add(self, rhs: &Fraction) -> Fraction {
        Fraction(&self.0 + &rhs.0)
    }
}

impl Add for Fraction {
    type Output = Fraction;
    fn add(self, rhs: Fraction) -> Fraction {
        Fraction(self.0 + rhs.0)
    }
}

impl Sub for &Fraction {
    type Output = Fraction;
    fn sub(self, rhs: &Fraction) -> Fraction {
        Fraction(&self.0 - &rhs.0)
    }
}

impl Sub for Fraction {
    type Output = Fraction;
    fn sub(self, rhs: Fraction) -> Fraction {
        Fraction(self.0 - rhs.0)
    }
}

impl Mul for &Fraction {
    type Output = Fraction;
    fn mul(self, rhs: &Fraction) -> Fraction {
        Fraction(&self.0 * &rhs.0)
    }
}

impl Mul for Fraction {
    type Output = Fraction;
    fn mul(self, rhs: Fraction) -> Fraction {
        Fraction(self.0 * rhs.0)
    }
}

impl Neg for &Fraction {
    type Output = Fraction;
    fn neg(self) -> Fraction {
        Fraction(-&self.0)
    }
}

impl Neg for Fraction {
    type Output = Fraction;
    fn neg(self) -> Fraction {
        Fraction(-self.0)
    }
}

/// Errors that can occur when constructing or dividing a [`Fraction`].
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum FractionError {
    /// A fraction was constructed with a zero denominator.
    #[error("denominator cannot be zero")]
    ZeroDenominator,

    /// A division had a zero divisor.
    #[error("cannot divide by zero")]
    DivideByZero,

    /// Input was not finite.
    #[error("value is not finite: {0}")]
    NotFinite(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    #[test]
    fn reduces_to_lowest_terms() {
        assert_eq!(frac(6, 4).to_string(), "3/2");
        assert_eq!(frac(5, 1).to_string(), "5");
        assert_eq!(frac(10, 5).to_string(), "2");
        assert_eq!(frac(0, 7).to_string(), "0");
    }

    #[test]
    fn sign_moves_to_numerator() {
        let f = frac(3, -6);
        assert_eq!(f.to_string(), "-1/2");
        assert_eq!(*f.denominator(), BigInt::from(2));
        assert_eq!(frac(-3, -6).to_string(), "1/2");
    }

    #[test]
    fn rejects_zero_denominator() {
        assert_eq!(Fraction::new(1, 0), Err(FractionError::ZeroDenominator));
    }

    #[test]
    fn arithmetic_stays_exact() {
        let a = frac(1, 3);
        let b = frac(1, 6);
        assert_eq!((&a + &b).to_string(), "1/2");
        assert_eq!((&a - &b).to_string(), "1/6");
        assert_eq!((&a * &b).to_string(), "1/18");
        assert_eq!(a.divide(&b).unwrap().to_string(), "2");
        assert_eq!((-&a).to_string(), "-1/3");
    }

    #[test]
    fn divide_by_zero_fails() {
        let a = frac(1, 3);
        assert_eq!(a.divide(&Fraction::zero()), Err(FractionError::DivideByZero));
        assert_eq!(a.divide(&frac(0, 5)), Err(FractionError::DivideByZero));
    }

    #[test]
    fn from_f64_truncates_at_five_digits() {
        assert_eq!(Fraction::from_f64(0.5).unwrap().to_string(), "1/2");
        assert_eq!(Fraction::from_f64(2.25).unwrap().to_string(), "9/4");
        assert_eq!(Fraction::from_f64(-3.0).unwrap().to_string(), "-3");
        // Digits past 1e-5 are dropped.
        assert_eq!(
            Fraction::from_f64(0.123_456_789).unwrap().to_string(),
            "2469/20000"
        );
        assert!(matches!(
            Fraction::from_f64(f64::NAN),
            Err(FractionError::NotFinite(_))
        ));
    }

    #[test]
    fn converts_to_f64() {
        assert_relative_eq!(frac(3, 2).to_f64(), 1.5);
        assert_relative_eq!(frac(-1, 3).to_f64(), -1.0 / 3.0);
    }

    #[test]
    fn orders_by_value() {
        assert!(frac(1, 3) < frac(1, 2));
        assert!(frac(-1, 2) < frac(1, 3));
        assert_eq!(frac(-2, 3).abs(), frac(2, 3));
    }
}
