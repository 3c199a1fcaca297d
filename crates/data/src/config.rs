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

//! Configuration for Renko wick brick aggregation.

use renkowick_core::FloatComparator;
use renkowick_model::instrument::InstrumentSpec;
use serde::{Deserialize, Serialize};

/// The default brick size in instrument ticks.
pub const DEFAULT_BRICK_VALUE: u32 = 20;

/// Represents an invalid aggregator configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The brick size in ticks was zero.
    #[error("Invalid config: `brick_value` must be positive, was {0}")]
    NonPositiveBrickValue(u32),
    /// The explicit comparison tolerance was not a finite positive number.
    #[error("Invalid config: `price_epsilon` must be finite and positive, was {0}")]
    InvalidEpsilon(f64),
    /// The comparison tolerance would merge prices half a brick apart.
    #[error(
        "Invalid config: comparison epsilon {epsilon} must be less than half the brick size {brick_size}"
    )]
    EpsilonExceedsBrickSize {
        /// The effective comparison tolerance.
        epsilon: f64,
        /// The brick size in price units.
        brick_size: f64,
    },
}

/// Configuration for `RenkoWicksAggregator` instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenkoWicksConfig {
    /// The brick size in instrument ticks (default 20).
    #[serde(default = "default_brick_value")]
    pub brick_value: u32,
    /// If brick state is reset when a new trading session starts.
    #[serde(default = "default_true")]
    pub reset_on_new_session: bool,
    /// The tolerance for price comparisons.
    /// If `None` (default), derived from the instrument price precision.
    #[serde(default)]
    pub price_epsilon: Option<f64>,
    /// If debug mode is active (will provide extra debug logging).
    #[serde(default)]
    pub debug: bool,
}

const fn default_brick_value() -> u32 {
    DEFAULT_BRICK_VALUE
}

const fn default_true() -> bool {
    true
}

impl Default for RenkoWicksConfig {
    fn default() -> Self {
        Self {
            brick_value: DEFAULT_BRICK_VALUE,
            reset_on_new_session: true,
            price_epsilon: None,
            debug: false,
        }
    }
}

impl RenkoWicksConfig {
    /// Creates a new [`RenkoWicksConfig`] with `brick_value` and defaults otherwise.
    #[must_use]
    pub fn with_brick_value(brick_value: u32) -> Self {
        Self {
            brick_value,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `brick_value` is zero.
    /// - `price_epsilon` is set and is not finite and positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.brick_value == 0 {
            return Err(ConfigError::NonPositiveBrickValue(self.brick_value));
        }
        if let Some(epsilon) = self.price_epsilon
            && !(epsilon.is_finite() && epsilon > 0.0)
        {
            return Err(ConfigError::InvalidEpsilon(epsilon));
        }
        Ok(())
    }

    /// Validates the configuration against the pricing of `instrument`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`RenkoWicksConfig::validate`] fails.
    /// - The effective comparison epsilon is at least half the brick size.
    pub fn validate_for(&self, instrument: &InstrumentSpec) -> Result<(), ConfigError> {
        self.validate()?;

        let epsilon = self.comparator(instrument).epsilon();
        let brick_size = self.brick_size(instrument);
        if epsilon >= brick_size / 2.0 {
            return Err(ConfigError::EpsilonExceedsBrickSize {
                epsilon,
                brick_size,
            });
        }
        Ok(())
    }

    /// Returns the display name of the brick series.
    #[must_use]
    pub fn name(&self) -> String {
        format!("Renko Wicks {}", self.brick_value)
    }

    /// Returns the brick size in price units for `instrument`.
    #[must_use]
    pub fn brick_size(&self, instrument: &InstrumentSpec) -> f64 {
        instrument.ticks_to_price(self.brick_value)
    }

    /// Returns the price comparator for `instrument`.
    ///
    /// An invalid `price_epsilon` falls back to the instrument comparator.
    #[must_use]
    pub fn comparator(&self, instrument: &InstrumentSpec) -> FloatComparator {
        match self.price_epsilon {
            Some(epsilon) if epsilon.is_finite() && epsilon > 0.0 => FloatComparator::new(epsilon),
            _ => instrument.comparator(),
        }
    }
}
