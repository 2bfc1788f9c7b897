// ============================================================================
// Power and Approximate Roots
// Repeated squaring and capped Newton iteration over Dec arithmetic
// ============================================================================

use super::constants::MAX_APPROX_ROOT_ITERATIONS;
use super::dec::Dec;
use super::errors::{or_fatal, DecResult};
use num_bigint::BigInt;

impl Dec {
    /// Integer power by repeated squaring.
    ///
    /// Each squaring goes through `*`, so its rounding is re-applied at every
    /// step; results for inexact bases drift by a few units in the last place.
    #[track_caller]
    pub fn power(&self, exponent: u64) -> Dec {
        or_fatal(self.checked_power(exponent))
    }

    /// # Errors
    /// Returns `Overflow` if an intermediate square leaves the range.
    pub fn checked_power(&self, exponent: u64) -> DecResult<Dec> {
        if exponent == 0 {
            return Ok(Dec::one());
        }

        let mut base = self.clone();
        let mut acc = Dec::one();
        let mut i = exponent;
        while i > 1 {
            if i % 2 != 0 {
                acc = acc.checked_mul(&base)?;
            }
            i /= 2;
            base = base.checked_mul(&base)?;
        }
        base.checked_mul(&acc)
    }

    /// Approximate `self^(1/root)` with Newton's method.
    ///
    /// Negative inputs take the root of the magnitude and keep their sign,
    /// whatever the parity of `root`. Iteration stops once successive guesses
    /// differ by at most 10^-18, or after 100 rounds; some inputs cycle and
    /// the last guess is returned as is.
    ///
    /// # Errors
    /// Returns `Overflow` if an intermediate power leaves the range.
    pub fn approx_root(&self, root: u64) -> DecResult<Dec> {
        self.newton_root(root).map(|(guess, _)| guess)
    }

    /// `approx_root(2)`
    pub fn approx_sqrt(&self) -> DecResult<Dec> {
        self.approx_root(2)
    }

    /// Root plus the number of Newton rounds spent on it.
    pub(super) fn newton_root(&self, root: u64) -> DecResult<(Dec, usize)> {
        if self.is_negative() {
            let (guess, iterations) = (-self).newton_root(root)?;
            return Ok((-guess, iterations));
        }

        if root == 1 || self.is_zero() || *self == Dec::one() {
            return Ok((self.clone(), 0));
        }

        if root == 0 {
            return Ok((Dec::one(), 0));
        }

        let smallest = Dec::smallest();
        let divisor = BigInt::from(root);
        let mut guess = Dec::one();
        let mut delta = Dec::one();
        let mut iterations = 0;

        while delta.abs() > smallest && iterations < MAX_APPROX_ROOT_ITERATIONS {
            let mut prev = guess.checked_power(root - 1)?;
            if prev.is_zero() {
                prev = smallest.clone();
            }

            let step = self.checked_quo(&prev)?.checked_sub(&guess)?;
            delta = Dec::checked_from_raw(step.big_int() / &divisor)?;
            guess = guess.checked_add(&delta)?;
            iterations += 1;
        }

        if delta.abs() > smallest {
            tracing::debug!(
                value = %self,
                root,
                guess = %guess,
                "approx_root stopped at iteration cap without converging"
            );
        }

        Ok((guess, iterations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Dec {
        s.parse().unwrap()
    }

    fn assert_within_smallest(expected: &Dec, actual: &Dec, context: &str) {
        let diff = (expected - actual).abs();
        assert!(
            diff <= Dec::smallest(),
            "{}: expected {}, got {}",
            context,
            expected,
            actual
        );
    }

    #[test]
    fn test_power() {
        let cases = [
            (Dec::one(), 10, Dec::one()),
            (Dec::with_prec(5, 1), 2, Dec::with_prec(25, 2)),
            (Dec::with_prec(2, 1), 2, Dec::with_prec(4, 2)),
            (Dec::new(3), 3, Dec::new(27)),
            (Dec::new(-3), 4, Dec::new(81)),
            (Dec::new(-3), 3, Dec::new(-27)),
            (Dec::with_prec(1414213562373095049, 18), 2, Dec::new(2)),
            (Dec::new(7), 0, Dec::one()),
        ];

        for (i, (input, exponent, expected)) in cases.iter().enumerate() {
            let res = input.power(*exponent);
            assert_within_smallest(expected, &res, &format!("power case {}", i));
        }
    }

    #[test]
    fn test_power_overflow() {
        let big = Dec::new(10).power(30);
        assert!(big.checked_power(3).is_err());
    }

    #[test]
    fn test_approx_root() {
        let cases = [
            (Dec::new(2), 0, Dec::one()),
            (Dec::with_prec(4, 2), 0, Dec::one()),
            (Dec::new(0), 1, Dec::new(0)),
            (Dec::one(), 10, Dec::one()),
            (Dec::with_prec(25, 2), 2, Dec::with_prec(5, 1)),
            (Dec::with_prec(4, 2), 2, Dec::with_prec(2, 1)),
            (Dec::new(27), 3, Dec::new(3)),
            (Dec::new(-81), 4, Dec::new(-3)),
            (Dec::new(2), 2, Dec::with_prec(1414213562373095049, 18)),
            (Dec::with_prec(1005, 3), 31536000, dec("1.000000000158153904")),
            (Dec::smallest(), 2, Dec::with_prec(1, 9)),
            (Dec::smallest(), 3, dec("0.000000999999999997")),
            // cycles with period 5 from round 24 on; the cap returns round 100
            (Dec::with_prec(1, 8), 3, dec("0.002154434690031900")),
        ];

        for (i, (input, root, expected)) in cases.iter().enumerate() {
            let res = input.approx_root(*root).unwrap();
            assert_within_smallest(expected, &res, &format!("root case {}", i));
        }
    }

    #[test]
    fn test_approx_root_iteration_cap() {
        let (_, iterations) = Dec::with_prec(1, 8).newton_root(3).unwrap();
        assert_eq!(iterations, MAX_APPROX_ROOT_ITERATIONS);

        let (_, iterations) = Dec::new(2).newton_root(2).unwrap();
        assert!(iterations < MAX_APPROX_ROOT_ITERATIONS);
    }

    #[test]
    fn test_approx_root_converged_results_are_tight() {
        for (value, root) in [(Dec::new(2), 2), (Dec::new(27), 3), (Dec::with_prec(25, 2), 2)] {
            let (guess, iterations) = value.newton_root(root).unwrap();
            if iterations < MAX_APPROX_ROOT_ITERATIONS {
                assert_within_smallest(&value, &guess.power(root), "converged root");
            }
        }
    }

    #[test]
    fn test_approx_sqrt() {
        let cases = [
            (Dec::one(), Dec::one()),
            (Dec::with_prec(25, 2), Dec::with_prec(5, 1)),
            (Dec::with_prec(4, 2), Dec::with_prec(2, 1)),
            (Dec::new(9), Dec::new(3)),
            (Dec::new(-9), Dec::new(-3)),
            (Dec::new(2), Dec::with_prec(1414213562373095049, 18)),
        ];

        for (input, expected) in cases {
            assert_eq!(input.approx_sqrt().unwrap(), expected, "input {}", input);
        }
    }

    #[test]
    fn test_negative_even_root_keeps_sign() {
        assert_eq!(Dec::new(-4).approx_sqrt().unwrap(), Dec::new(-2));
        assert_eq!(Dec::new(-5).approx_root(0).unwrap(), Dec::new(-1));
    }
}
