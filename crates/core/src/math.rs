// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Tolerance-based floating-point comparison for price levels.
//!
//! Brick thresholds are advanced by repeated addition of the brick size, so the
//! stored levels drift away from the exact decimal values by a few ULPs over time.
//! Comparing a traded price against such a level with exact equality mis-classifies
//! prices that sit on the boundary, so every price comparison in the workspace goes
//! through a [`FloatComparator`].

use std::cmp::Ordering;

use serde::Serialize;

/// The fallback comparison tolerance when no price precision is known.
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// Macro for approximate floating-point equality comparison.
///
/// This macro compares two floating-point values with a specified epsilon tolerance,
/// providing a safe alternative to exact equality checks which can fail due to
/// floating-point precision issues.
///
/// # Usage
///
/// ```rust
/// use renkowick_core::approx_eq;
///
/// let a = 0.1 + 0.2;
/// let b = 0.3;
/// assert!(approx_eq!(f64, a, b, epsilon = 1e-10));
/// ```
#[macro_export]
macro_rules! approx_eq {
    ($type:ty, $left:expr, $right:expr, epsilon = $epsilon:expr) => {{
        let left_val: $type = $left;
        let right_val: $type = $right;
        (left_val - right_val).abs() < $epsilon
    }};
}

/// Compares prices using an absolute tolerance.
///
/// Two values closer than `epsilon` compare as [`Ordering::Equal`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FloatComparator {
    epsilon: f64,
}

impl FloatComparator {
    /// Creates a new [`FloatComparator`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `epsilon` is not finite and positive.
    #[must_use]
    pub fn new(epsilon: f64) -> Self {
        assert!(
            epsilon.is_finite() && epsilon > 0.0,
            "`epsilon` must be finite and positive, was {epsilon}"
        );
        Self { epsilon }
    }

    /// Creates a comparator whose tolerance sits two decimal places below the
    /// given price precision, e.g. precision 2 gives `1e-4`.
    #[must_use]
    pub fn from_precision(precision: u8) -> Self {
        Self::new(10f64.powi(-(i32::from(precision) + 2)))
    }

    /// Returns the tolerance of this comparator.
    #[must_use]
    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns the ordering of `a` relative to `b` within tolerance.
    #[inline]
    #[must_use]
    pub fn approx_cmp(&self, a: f64, b: f64) -> Ordering {
        if approx_eq!(f64, a, b, epsilon = self.epsilon) {
            Ordering::Equal
        } else if a < b {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Returns `true` if `a` equals `b` within tolerance.
    #[inline]
    #[must_use]
    pub fn approx_eq(&self, a: f64, b: f64) -> bool {
        self.approx_cmp(a, b) == Ordering::Equal
    }

    /// Returns `true` if `a` is greater than or equal to `b` within tolerance.
    #[inline]
    #[must_use]
    pub fn approx_ge(&self, a: f64, b: f64) -> bool {
        self.approx_cmp(a, b) != Ordering::Less
    }

    /// Returns `true` if `a` is less than or equal to `b` within tolerance.
    #[inline]
    #[must_use]
    pub fn approx_le(&self, a: f64, b: f64) -> bool {
        self.approx_cmp(a, b) != Ordering::Greater
    }

    /// Returns `true` if `value` is zero within tolerance.
    #[inline]
    #[must_use]
    pub fn approx_zero(&self, value: f64) -> bool {
        self.approx_eq(value, 0.0)
    }
}

impl Default for FloatComparator {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::*;

    use super::*;

    #[fixture]
    fn cmp() -> FloatComparator {
        FloatComparator::from_precision(2)
    }

    #[rstest]
    fn test_approx_eq_macro() {
        assert!(approx_eq!(f64, 0.1 + 0.2, 0.3, epsilon = 1e-10));
        assert!(!approx_eq!(f64, 0.1, 0.2, epsilon = 1e-10));
    }

    #[rstest]
    #[case(0, 1e-2)]
    #[case(2, 1e-4)]
    #[case(5, 1e-7)]
    fn test_from_precision(#[case] precision: u8, #[case] expected: f64) {
        let cmp = FloatComparator::from_precision(precision);
        assert!((cmp.epsilon() - expected).abs() < expected * 1e-9);
    }

    #[rstest]
    #[should_panic(expected = "`epsilon` must be finite and positive")]
    fn test_new_with_zero_epsilon_panics() {
        let _ = FloatComparator::new(0.0);
    }

    #[rstest]
    fn test_default_epsilon() {
        assert_eq!(FloatComparator::default().epsilon(), DEFAULT_EPSILON);
    }

    #[rstest]
    #[case(1.0, 1.0, Ordering::Equal)]
    #[case(1.000_01, 1.0, Ordering::Equal)]
    #[case(0.999_99, 1.0, Ordering::Equal)]
    #[case(1.01, 1.0, Ordering::Greater)]
    #[case(0.99, 1.0, Ordering::Less)]
    fn test_approx_cmp(
        cmp: FloatComparator,
        #[case] a: f64,
        #[case] b: f64,
        #[case] expected: Ordering,
    ) {
        assert_eq!(cmp.approx_cmp(a, b), expected);
    }

    #[rstest]
    fn test_accumulated_drift_is_absorbed(cmp: FloatComparator) {
        // 0.1 added ten times lands just short of 1.0
        let level = (0..10).fold(0.0, |acc, _| acc + 0.1);
        assert!(level < 1.0);
        assert!(cmp.approx_ge(level, 1.0));
        assert!(cmp.approx_le(1.0, level));
        assert!(cmp.approx_eq(level, 1.0));
    }

    #[rstest]
    fn test_approx_zero(cmp: FloatComparator) {
        assert!(cmp.approx_zero(0.0));
        assert!(cmp.approx_zero(-0.0));
        assert!(cmp.approx_zero(1e-12));
        assert!(!cmp.approx_zero(0.01));
    }

    proptest! {
        #[test]
        fn prop_ge_and_le_cover_every_pair(a in -1e6f64..1e6, b in -1e6f64..1e6) {
            let cmp = FloatComparator::from_precision(2);
            prop_assert!(cmp.approx_ge(a, b) || cmp.approx_le(a, b));
            prop_assert_eq!(cmp.approx_eq(a, b), cmp.approx_ge(a, b) && cmp.approx_le(a, b));
        }
    }
}
