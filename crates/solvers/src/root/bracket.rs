use super::Error;

/// An interval whose endpoint values have opposite signs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Bracket {
    a: f64,
    b: f64,
    fa: f64,
    fb: f64,
}

impl Bracket {
    /// Creates a bracket ordered so that `a < b`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSignChange`] unless `fa * fb < 0`.
    pub(super) fn new(a: f64, b: f64, fa: f64, fb: f64) -> Result<Self, Error> {
        if fa * fb >= 0.0 || fa.is_nan() || fb.is_nan() {
            return Err(Error::NoSignChange { a, b, fa, fb });
        }

        if a < b {
            Ok(Self { a, b, fa, fb })
        } else {
            Ok(Self {
                a: b,
                b: a,
                fa: fb,
                fb: fa,
            })
        }
    }

    /// Returns the left endpoint and its function value.
    pub(super) fn left(&self) -> (f64, f64) {
        (self.a, self.fa)
    }

    /// Returns the right endpoint and its function value.
    pub(super) fn right(&self) -> (f64, f64) {
        (self.b, self.fb)
    }

    /// Returns the midpoint of the bracket.
    pub(super) fn midpoint(&self) -> f64 {
        0.5 * (self.a + self.b)
    }

    /// Returns the bracket width.
    pub(super) fn width(&self) -> f64 {
        self.b - self.a
    }

    /// Returns where the chord through both endpoints crosses zero.
    pub(super) fn chord_root(&self) -> f64 {
        self.a - (self.fa * (self.b - self.a)) / (self.fb - self.fa)
    }

    /// Returns true if `x` is exactly one of the endpoints.
    #[allow(clippy::float_cmp)]
    pub(super) fn is_endpoint(&self, x: f64) -> bool {
        x == self.a || x == self.b
    }

    /// Keeps the half whose endpoints still bracket a sign change.
    pub(super) fn shrink(&mut self, x: f64, fx: f64) {
        if self.fa * fx < 0.0 {
            self.b = x;
            self.fb = fx;
        } else {
            self.a = x;
            self.fa = fx;
        }
    }
}
