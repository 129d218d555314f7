//! Decimal display formats derived from a solver tolerance.
//!
//! A tolerance of `1e-4` shows four fractional digits, `0.05` shows two, and
//! anything at or above `0.1` shows one. The decimal separator is always `.`.

/// Fractional digits used when a value is plugged into an expression before
/// any tolerance has been applied.
pub const PLUG_IN_PLACES: usize = 3;

/// A fixed-point format with a set number of fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalFormat {
    places: usize,
}

impl DecimalFormat {
    /// The three-decimal plug-in format.
    pub const PLUG_IN: Self = Self::new(PLUG_IN_PLACES);

    /// Creates a format with `places` fractional digits.
    #[must_use]
    pub const fn new(places: usize) -> Self {
        Self { places }
    }

    /// Creates the format whose precision matches `tolerance`.
    #[must_use]
    pub fn for_tolerance(tolerance: f64) -> Self {
        Self::new(decimal_places(tolerance))
    }

    /// Returns the number of fractional digits.
    #[must_use]
    pub fn places(self) -> usize {
        self.places
    }

    /// Formats a value with exactly [`places`](Self::places) fractional digits.
    #[must_use]
    pub fn format(self, value: f64) -> String {
        format!("{value:.*}", self.places)
    }
}

impl Default for DecimalFormat {
    fn default() -> Self {
        Self::PLUG_IN
    }
}

/// Returns `max(1, ceil(-log10(tolerance)))`.
///
/// Non-positive or non-finite tolerances fall back to one digit.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn decimal_places(tolerance: f64) -> usize {
    let places = (-tolerance.log10()).ceil();
    if !places.is_finite() || places < 1.0 {
        1
    } else {
        places as usize
    }
}

/// The pair of formats a solver uses for its trace.
///
/// `decimal` formats every number written to the trace. `fixed` formats a
/// value substituted into the expression text. It starts at three decimals
/// and mirrors `decimal` once a tolerance is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formats {
    decimal: DecimalFormat,
    fixed: DecimalFormat,
}

impl Formats {
    /// Derives both formats from `tolerance`.
    #[must_use]
    pub fn for_tolerance(tolerance: f64) -> Self {
        let decimal = DecimalFormat::for_tolerance(tolerance);
        Self {
            decimal,
            fixed: decimal,
        }
    }

    /// Returns the tolerance-driven format.
    #[must_use]
    pub fn decimal(&self) -> DecimalFormat {
        self.decimal
    }

    /// Returns the format used for expression substitution.
    #[must_use]
    pub fn fixed(&self) -> DecimalFormat {
        self.fixed
    }
}

impl Default for Formats {
    fn default() -> Self {
        Self {
            decimal: DecimalFormat::PLUG_IN,
            fixed: DecimalFormat::PLUG_IN,
        }
    }
}
