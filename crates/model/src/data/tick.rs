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

//! A `Tick` data type representing one incoming market data point.

use std::fmt::Display;

use renkowick_core::UnixNanos;
use serde::{Deserialize, Serialize};

/// Represents a market data point fed to a brick aggregator.
///
/// A live trade carries the same value in all four price fields. A synthetic
/// bar-close tick (`is_bar_tick`) carries the OHLC of the bar it summarizes, with
/// `ts` stamped at the bar close; session providers treat the two differently at
/// session boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// The open price.
    pub open: f64,
    /// The high price.
    pub high: f64,
    /// The low price.
    pub low: f64,
    /// The close (last) price.
    pub close: f64,
    /// The traded volume.
    pub volume: u64,
    /// UNIX timestamp (nanoseconds) of the data point.
    pub ts: UnixNanos,
    /// If the data point is a synthetic bar-close rather than a live tick.
    pub is_bar_tick: bool,
    /// The best bid at the time of the data point.
    pub bid: f64,
    /// The best ask at the time of the data point.
    pub ask: f64,
}

impl Tick {
    /// Creates a new [`Tick`] instance.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub const fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
        ts: UnixNanos,
        is_bar_tick: bool,
        bid: f64,
        ask: f64,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            ts,
            is_bar_tick,
            bid,
            ask,
        }
    }

    /// Creates a live [`Tick`] for a single trade at `price`.
    #[must_use]
    pub const fn from_trade(price: f64, volume: u64, ts: UnixNanos) -> Self {
        Self::new(price, price, price, price, volume, ts, false, price, price)
    }

    /// Creates a live [`Tick`] carrying intra-tick extremes around `close`.
    #[must_use]
    pub const fn with_range(high: f64, low: f64, close: f64, volume: u64, ts: UnixNanos) -> Self {
        Self::new(close, high, low, close, volume, ts, false, close, close)
    }

    /// Returns this tick flagged as a synthetic bar-close tick.
    #[must_use]
    pub const fn as_bar_tick(mut self) -> Self {
        self.is_bar_tick = true;
        self
    }
}

impl Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{}",
            self.open, self.high, self.low, self.close, self.volume, self.ts,
        )
    }
}
