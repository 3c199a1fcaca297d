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

//! Instrument metadata consumed by brick aggregation.

use renkowick_core::{
    FloatComparator,
    correctness::{FAILED, check_positive_f64, check_predicate_true},
};
use serde::Serialize;

/// The maximum supported price precision (decimal places).
pub const MAX_PRICE_PRECISION: u8 = 16;

/// Represents the pricing metadata of a tradable instrument.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct InstrumentSpec {
    tick_size: f64,
    price_precision: u8,
}

impl InstrumentSpec {
    /// Creates a new [`InstrumentSpec`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `tick_size` is not finite and positive.
    /// - `price_precision` exceeds [`MAX_PRICE_PRECISION`].
    pub fn new_checked(tick_size: f64, price_precision: u8) -> anyhow::Result<Self> {
        check_positive_f64(tick_size, stringify!(tick_size))?;
        check_predicate_true(
            price_precision <= MAX_PRICE_PRECISION,
            &format!("invalid `price_precision` {price_precision}, maximum is {MAX_PRICE_PRECISION}"),
        )?;

        Ok(Self {
            tick_size,
            price_precision,
        })
    }

    /// Creates a new [`InstrumentSpec`] instance.
    ///
    /// # Panics
    ///
    /// Panics if a correctness check fails. See [`InstrumentSpec::new_checked`] for more details.
    #[must_use]
    pub fn new(tick_size: f64, price_precision: u8) -> Self {
        Self::new_checked(tick_size, price_precision).expect(FAILED)
    }

    /// Creates a new [`InstrumentSpec`] with the price precision inferred from
    /// the decimal places of `tick_size`.
    ///
    /// # Errors
    ///
    /// Returns an error if `tick_size` is not finite and positive.
    pub fn from_tick_size(tick_size: f64) -> anyhow::Result<Self> {
        check_positive_f64(tick_size, stringify!(tick_size))?;
        Self::new_checked(tick_size, precision_from_tick_size(tick_size))
    }

    /// Returns the minimum price increment.
    #[must_use]
    pub const fn tick_size(&self) -> f64 {
        self.tick_size
    }

    /// Returns the number of decimal places of prices.
    #[must_use]
    pub const fn price_precision(&self) -> u8 {
        self.price_precision
    }

    /// Returns the price distance of `value` ticks.
    #[must_use]
    pub fn ticks_to_price(&self, value: u32) -> f64 {
        f64::from(value) * self.tick_size
    }

    /// Returns a price comparator whose tolerance is tied to the price precision.
    #[must_use]
    pub fn comparator(&self) -> FloatComparator {
        FloatComparator::from_precision(self.price_precision)
    }
}

/// Returns the number of decimal places in the shortest representation of `tick_size`.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn precision_from_tick_size(tick_size: f64) -> u8 {
    let repr = tick_size.to_string();
    match repr.split_once('.') {
        Some((_, decimals)) => decimals.len().min(MAX_PRICE_PRECISION as usize) as u8,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_new() {
        let spec = InstrumentSpec::new(0.25, 2);
        assert_eq!(spec.tick_size(), 0.25);
        assert_eq!(spec.price_precision(), 2);
        assert_eq!(spec.ticks_to_price(20), 5.0);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.25)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_new_checked_rejects_invalid_tick_size(#[case] tick_size: f64) {
        assert!(InstrumentSpec::new_checked(tick_size, 2).is_err());
    }

    #[rstest]
    fn test_new_checked_rejects_precision() {
        let err = InstrumentSpec::new_checked(0.01, 17).unwrap_err();
        assert!(err.to_string().contains("maximum is 16"));
    }

    #[rstest]
    #[should_panic(expected = "Condition failed")]
    fn test_new_panics_on_invalid() {
        let _ = InstrumentSpec::new(0.0, 2);
    }

    #[rstest]
    #[case(1.0, 0)]
    #[case(0.25, 2)]
    #[case(0.01, 2)]
    #[case(0.00001, 5)]
    #[case(0.5, 1)]
    fn test_precision_from_tick_size(#[case] tick_size: f64, #[case] expected: u8) {
        assert_eq!(precision_from_tick_size(tick_size), expected);
        let spec = InstrumentSpec::from_tick_size(tick_size).unwrap();
        assert_eq!(spec.price_precision(), expected);
    }

    #[rstest]
    fn test_comparator_epsilon() {
        let spec = InstrumentSpec::new(0.01, 2);
        let cmp = spec.comparator();
        assert!(cmp.approx_eq(1.0, 1.000_01));
        assert!(!cmp.approx_eq(1.0, 1.01));
    }
}
