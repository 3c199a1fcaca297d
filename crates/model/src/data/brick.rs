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

//! A `Brick` data type representing one fixed-range Renko bar with true wicks.

use std::fmt::Display;

use renkowick_core::UnixNanos;
use serde::{Deserialize, Serialize};

use crate::enums::BrickDirection;

/// Represents a Renko brick.
///
/// For a closed brick `|close - open|` equals the brick size and `high`/`low`
/// contain both `open` and `close`; `high - low` may exceed the brick size where
/// price wicked beyond the body while the brick was forming. Gap-fill bricks span
/// the body exactly with zero volume, and a brick flattened by a session reset
/// carries `open == high == low == close`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    /// The open price.
    pub open: f64,
    /// The high price.
    pub high: f64,
    /// The low price.
    pub low: f64,
    /// The close price.
    pub close: f64,
    /// The volume traded while the brick was forming.
    pub volume: u64,
    /// UNIX timestamp (nanoseconds) of the last update to the brick.
    pub ts: UnixNanos,
}

impl Brick {
    /// Creates a new [`Brick`] instance.
    #[must_use]
    pub const fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
        ts: UnixNanos,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            ts,
        }
    }

    /// Creates a [`Brick`] with all four prices at `price`.
    #[must_use]
    pub const fn flat(price: f64, volume: u64, ts: UnixNanos) -> Self {
        Self::new(price, price, price, price, volume, ts)
    }

    /// Returns the direction of the body.
    #[must_use]
    pub fn direction(&self) -> BrickDirection {
        if self.close > self.open {
            BrickDirection::Up
        } else if self.close < self.open {
            BrickDirection::Down
        } else {
            BrickDirection::Flat
        }
    }

    /// Returns `true` if the close is above the open.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns `true` if the close is below the open.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Returns `true` if all four prices are equal.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_flat(&self) -> bool {
        self.open == self.close && self.high == self.low && self.open == self.high
    }

    /// Returns the absolute body height.
    #[must_use]
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Returns the full high-low range, wicks included.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns the excursion above the body.
    #[must_use]
    pub fn upper_wick(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    /// Returns the excursion below the body.
    #[must_use]
    pub fn lower_wick(&self) -> f64 {
        self.open.min(self.close) - self.low
    }
}

impl Display for Brick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{}",
            self.open, self.high, self.low, self.close, self.volume, self.ts,
        )
    }
}
