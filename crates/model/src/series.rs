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

//! Output sinks for brick sequences.
//!
//! A sink holds at most one *building* brick, which is the only brick an aggregator
//! may mutate, plus whatever history of *closed* bricks it chooses to retain. Appending
//! a brick closes the current building brick and makes the appended brick the new
//! building brick.

use std::fmt::Debug;

use renkowick_core::UnixNanos;

use crate::data::Brick;

/// Represents the output side of a brick aggregator.
pub trait BrickSink {
    /// Returns the number of bricks in the sequence, the building brick included.
    fn len(&self) -> usize;

    /// Returns `true` if the sequence holds no bricks.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the brick currently forming, if any.
    fn building(&self) -> Option<&Brick>;

    /// Returns the most recently closed brick, if any.
    fn last_closed(&self) -> Option<&Brick>;

    /// Closes the building brick (if any) and makes `brick` the new building brick.
    fn append(&mut self, brick: Brick);

    /// Replaces the building brick with `brick`.
    ///
    /// Appends `brick` when no brick is building.
    fn replace_building(&mut self, brick: Brick);

    /// Updates the building brick in place, preserving its open.
    fn update_building(&mut self, high: f64, low: f64, close: f64, volume: u64, ts: UnixNanos);

    /// Records the last traded price of the series.
    fn set_last_price(&mut self, price: f64);
}

/// Provides an in-memory brick sequence retaining every closed brick.
#[derive(Clone, Debug, Default)]
pub struct BrickSeries {
    closed: Vec<Brick>,
    building: Option<Brick>,
    last_price: Option<f64>,
}

impl BrickSeries {
    /// Creates a new empty [`BrickSeries`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [`BrickSeries`] restored from previously built bricks.
    ///
    /// The last brick of `bricks` becomes the building brick.
    #[must_use]
    pub fn from_bricks(mut bricks: Vec<Brick>) -> Self {
        let building = bricks.pop();
        Self {
            closed: bricks,
            building,
            last_price: building.map(|brick| brick.close),
        }
    }

    /// Returns the closed bricks, oldest first.
    #[must_use]
    pub fn closed(&self) -> &[Brick] {
        &self.closed
    }

    /// Returns the closed brick `bars_ago` positions back from the most recent (0).
    #[must_use]
    pub fn closed_ago(&self, bars_ago: usize) -> Option<&Brick> {
        self.closed.iter().rev().nth(bars_ago)
    }

    /// Returns the last traded price recorded on the series.
    #[must_use]
    pub const fn last_price(&self) -> Option<f64> {
        self.last_price
    }

    /// Returns an iterator over all bricks, closed bricks first.
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.closed.iter().chain(self.building.iter())
    }

    /// Returns a copy of all bricks, closed bricks first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Brick> {
        self.iter().copied().collect()
    }

    /// Clears all bricks and the last price.
    pub fn clear(&mut self) {
        self.closed.clear();
        self.building = None;
        self.last_price = None;
    }
}

impl BrickSink for BrickSeries {
    fn len(&self) -> usize {
        self.closed.len() + usize::from(self.building.is_some())
    }

    fn building(&self) -> Option<&Brick> {
        self.building.as_ref()
    }

    fn last_closed(&self) -> Option<&Brick> {
        self.closed.last()
    }

    fn append(&mut self, brick: Brick) {
        if let Some(previous) = self.building.replace(brick) {
            self.closed.push(previous);
        }
    }

    fn replace_building(&mut self, brick: Brick) {
        self.building = Some(brick);
    }

    fn update_building(&mut self, high: f64, low: f64, close: f64, volume: u64, ts: UnixNanos) {
        if let Some(brick) = self.building.as_mut() {
            brick.high = high;
            brick.low = low;
            brick.close = close;
            brick.volume = volume;
            brick.ts = ts;
        } else {
            log::warn!("Ignoring update with no building brick: close={close}, ts={ts}");
        }
    }

    fn set_last_price(&mut self, price: f64) {
        self.last_price = Some(price);
    }
}

/// Provides a sink which sends each brick to a handler as it closes.
///
/// Only the building brick and the most recently closed brick are retained.
pub struct BrickHandlerSink<H>
where
    H: FnMut(Brick),
{
    handler: H,
    count: usize,
    building: Option<Brick>,
    last_closed: Option<Brick>,
    last_price: Option<f64>,
}

impl<H: FnMut(Brick)> Debug for BrickHandlerSink<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(BrickHandlerSink))
            .field("count", &self.count)
            .field("building", &self.building)
            .field("last_closed", &self.last_closed)
            .field("last_price", &self.last_price)
            .finish()
    }
}

impl<H> BrickHandlerSink<H>
where
    H: FnMut(Brick),
{
    /// Creates a new [`BrickHandlerSink`] instance.
    pub const fn new(handler: H) -> Self {
        Self {
            handler,
            count: 0,
            building: None,
            last_closed: None,
            last_price: None,
        }
    }

    /// Returns the last traded price recorded on the series.
    #[must_use]
    pub const fn last_price(&self) -> Option<f64> {
        self.last_price
    }

    /// Closes the building brick, sending it to the handler.
    ///
    /// Used when the feed ends and the host wants the final brick as it stands.
    pub fn flush(&mut self) {
        if let Some(brick) = self.building.take() {
            self.last_closed = Some(brick);
            (self.handler)(brick);
        }
    }
}

impl<H> BrickSink for BrickHandlerSink<H>
where
    H: FnMut(Brick),
{
    fn len(&self) -> usize {
        self.count
    }

    fn building(&self) -> Option<&Brick> {
        self.building.as_ref()
    }

    fn last_closed(&self) -> Option<&Brick> {
        self.last_closed.as_ref()
    }

    fn append(&mut self, brick: Brick) {
        if let Some(previous) = self.building.replace(brick) {
            self.last_closed = Some(previous);
            (self.handler)(previous);
        }
        self.count += 1;
    }

    fn replace_building(&mut self, brick: Brick) {
        if self.building.replace(brick).is_none() {
            self.count += 1;
        }
    }

    fn update_building(&mut self, high: f64, low: f64, close: f64, volume: u64, ts: UnixNanos) {
        if let Some(brick) = self.building.as_mut() {
            brick.high = high;
            brick.low = low;
            brick.close = close;
            brick.volume = volume;
            brick.ts = ts;
        } else {
            log::warn!("Ignoring update with no building brick: close={close}, ts={ts}");
        }
    }

    fn set_last_price(&mut self, price: f64) {
        self.last_price = Some(price);
    }
}
