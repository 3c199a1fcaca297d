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

//! Renko brick aggregation with true high/low wicks.
//!
//! A [`RenkoWicksAggregator`] consumes ticks and maintains a sequence of fixed-size bricks
//! in a [`BrickSink`]. Each brick body spans exactly one brick size, while its high and low
//! record how far price travelled beyond the body while the brick was forming. Breakout
//! thresholds sit one brick size either side of the open of the building brick, and every
//! price comparison against them goes through a tolerance-based [`FloatComparator`].
//!
//! Thresholds live on a lattice of whole brick sizes from an anchor price, fixed when the
//! levels are seeded. Every advance snaps back onto the lattice, so thousands of
//! consecutive bricks do not drift away from the prices they are meant to mark.

use std::{collections::HashMap, fmt::Debug};

use renkowick_core::{
    FloatComparator, UnixNanos,
    fsm::{FiniteStateMachine, InvalidStateTrigger},
};
use renkowick_model::{
    data::{Brick, Tick},
    enums::{AggregatorState, AggregatorTrigger, BrickDirection},
    instrument::InstrumentSpec,
    series::BrickSink,
    session::SessionProvider,
};

use crate::config::{ConfigError, RenkoWicksConfig};

/// Trait for aggregating incoming ticks into bricks.
pub trait BrickAggregator: Debug {
    /// Returns the display name of the brick series.
    fn name(&self) -> String;
    /// Returns the brick size in price units.
    fn brick_size(&self) -> f64;
    /// Returns the lifecycle state of the aggregator.
    fn state(&self) -> AggregatorState;
    /// If the aggregator is running and will process ticks.
    fn is_running(&self) -> bool {
        self.state() == AggregatorState::Running
    }
    /// Updates the aggregator with the given raw tick fields.
    #[allow(clippy::too_many_arguments)]
    fn update(
        &mut self,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        ts: UnixNanos,
        volume: u64,
        is_bar_tick: bool,
        bid: f64,
        ask: f64,
    );
    /// Updates the aggregator with the given tick.
    fn handle_tick(&mut self, tick: &Tick) {
        self.update(
            tick.open,
            tick.high,
            tick.low,
            tick.close,
            tick.ts,
            tick.volume,
            tick.is_bar_tick,
            tick.bid,
            tick.ask,
        );
    }
    /// Updates the aggregator with each of the given ticks in order.
    fn handle_ticks(&mut self, ticks: &[Tick]) {
        for tick in ticks {
            self.handle_tick(tick);
        }
    }
    /// Starts the aggregator.
    ///
    /// # Errors
    ///
    /// Returns an error if the aggregator cannot start from its current state.
    fn start(&mut self) -> Result<(), InvalidStateTrigger>;
    /// Stops the aggregator, ticks received while stopped are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the aggregator is not running.
    fn stop(&mut self) -> Result<(), InvalidStateTrigger>;
    /// Disposes of the aggregator, ticks received after disposal are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the aggregator is already disposed.
    fn dispose(&mut self) -> Result<(), InvalidStateTrigger>;
    /// Clears the breakout thresholds and wick extrema.
    fn reset(&mut self);
}

/// The outcome of comparing a close price against the breakout thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrickEvent {
    /// The close reached a threshold, closing the building brick in the given direction.
    Breakout(BrickDirection),
    /// The close stayed between the thresholds.
    Update,
}

/// Classifies `close` against the `renko_high` and `renko_low` thresholds.
///
/// An upward breakout takes precedence when both thresholds are reached.
#[must_use]
pub fn classify(
    close: f64,
    renko_high: f64,
    renko_low: f64,
    comparator: &FloatComparator,
) -> BrickEvent {
    if comparator.approx_ge(close, renko_high) {
        BrickEvent::Breakout(BrickDirection::Up)
    } else if comparator.approx_le(close, renko_low) {
        BrickEvent::Breakout(BrickDirection::Down)
    } else {
        BrickEvent::Update
    }
}

fn lifecycle_fsm() -> FiniteStateMachine<AggregatorState, AggregatorTrigger> {
    FiniteStateMachine::new(
        AggregatorState::Ready,
        HashMap::from([
            (
                (AggregatorState::Ready, AggregatorTrigger::Start),
                AggregatorState::Running,
            ),
            (
                (AggregatorState::Running, AggregatorTrigger::Stop),
                AggregatorState::Stopped,
            ),
            (
                (AggregatorState::Stopped, AggregatorTrigger::Start),
                AggregatorState::Running,
            ),
            (
                (AggregatorState::Ready, AggregatorTrigger::Dispose),
                AggregatorState::Disposed,
            ),
            (
                (AggregatorState::Running, AggregatorTrigger::Dispose),
                AggregatorState::Disposed,
            ),
            (
                (AggregatorState::Stopped, AggregatorTrigger::Dispose),
                AggregatorState::Disposed,
            ),
        ]),
    )
}

/// Provides a means of building Renko bricks with true wicks from ticks.
///
/// When price reaches a threshold the building brick is corrected to its final shape,
/// any whole brick sizes skipped by the same tick are filled with zero-volume bricks,
/// and a new building brick opens at the last threshold crossed. When the session
/// provider reports a new session (and the config resets on new sessions) the building
/// brick is flattened to its close and a fresh brick opens at the tick price.
///
/// A sink restored with existing bricks, or an aggregator after [`BrickAggregator::reset`],
/// derives its thresholds lazily from the last bricks on the next tick.
///
/// Ticks with a non-finite price, or whose price cannot resolve one brick size, are
/// dropped with a warning.
#[derive(Debug)]
pub struct RenkoWicksAggregator<K, S>
where
    K: BrickSink + Debug,
    S: SessionProvider + Debug,
{
    config: RenkoWicksConfig,
    instrument: InstrumentSpec,
    comparator: FloatComparator,
    fsm: FiniteStateMachine<AggregatorState, AggregatorTrigger>,
    sink: K,
    session: S,
    offset: f64,
    anchor: f64,
    renko_high: f64,
    renko_low: f64,
    wick_high: f64,
    wick_low: f64,
}

impl<K, S> RenkoWicksAggregator<K, S>
where
    K: BrickSink + Debug,
    S: SessionProvider + Debug,
{
    /// Creates a new [`RenkoWicksAggregator`] instance.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation for `instrument`.
    pub fn new(
        config: RenkoWicksConfig,
        instrument: InstrumentSpec,
        sink: K,
        session: S,
    ) -> Result<Self, ConfigError> {
        config.validate_for(&instrument)?;

        Ok(Self {
            comparator: config.comparator(&instrument),
            offset: config.brick_size(&instrument),
            config,
            instrument,
            fsm: lifecycle_fsm(),
            sink,
            session,
            anchor: 0.0,
            renko_high: 0.0,
            renko_low: 0.0,
            wick_high: 0.0,
            wick_low: 0.0,
        })
    }

    /// Returns the configuration of the aggregator.
    #[must_use]
    pub const fn config(&self) -> &RenkoWicksConfig {
        &self.config
    }

    /// Returns the instrument metadata the brick size is derived from.
    #[must_use]
    pub const fn instrument(&self) -> &InstrumentSpec {
        &self.instrument
    }

    /// Sets the instrument metadata, taking effect from the next tick.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid for `instrument`, in which case the
    /// current instrument is kept.
    pub fn set_instrument(&mut self, instrument: InstrumentSpec) -> Result<(), ConfigError> {
        self.config.validate_for(&instrument)?;
        self.instrument = instrument;
        self.comparator = self.config.comparator(&instrument);
        Ok(())
    }

    /// Returns the price comparator in use.
    #[must_use]
    pub const fn comparator(&self) -> &FloatComparator {
        &self.comparator
    }

    /// Returns the brick sink.
    #[must_use]
    pub const fn sink(&self) -> &K {
        &self.sink
    }

    /// Returns the brick sink mutably.
    pub const fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Returns the session provider.
    #[must_use]
    pub const fn session(&self) -> &S {
        &self.session
    }

    /// Consumes the aggregator, returning its sink and session provider.
    #[must_use]
    pub fn into_parts(self) -> (K, S) {
        (self.sink, self.session)
    }

    /// Returns the upper breakout threshold (zero until initialized).
    #[must_use]
    pub const fn renko_high(&self) -> f64 {
        self.renko_high
    }

    /// Returns the lower breakout threshold (zero until initialized).
    #[must_use]
    pub const fn renko_low(&self) -> f64 {
        self.renko_low
    }

    /// Returns the highest price seen since the building brick opened.
    #[must_use]
    pub const fn wick_high(&self) -> f64 {
        self.wick_high
    }

    /// Returns the lowest price seen since the building brick opened.
    #[must_use]
    pub const fn wick_low(&self) -> f64 {
        self.wick_low
    }

    /// Classifies `close` against the current thresholds.
    #[must_use]
    pub fn classify(&self, close: f64) -> BrickEvent {
        classify(close, self.renko_high, self.renko_low, &self.comparator)
    }

    fn levels_initialized(&self) -> bool {
        !(self.comparator.approx_zero(self.renko_high) || self.comparator.approx_zero(self.renko_low))
    }

    /// Returns `level` moved onto the nearest whole brick size from the anchor.
    fn snap(&self, level: f64) -> f64 {
        self.anchor + ((level - self.anchor) / self.offset).round() * self.offset
    }

    /// Returns `true` if one brick size is representable either side of `price`.
    fn resolves_brick(&self, price: f64) -> bool {
        price + self.offset > price && price - self.offset < price
    }

    /// Moves both thresholds up one brick size, returning `false` if they cannot move.
    fn step_up(&mut self) -> bool {
        let next = self.snap(self.renko_high + self.offset);
        if next <= self.renko_high {
            return false;
        }
        self.renko_high = next;
        self.renko_low = self.snap(next - 2.0 * self.offset);
        true
    }

    /// Moves both thresholds down one brick size, returning `false` if they cannot move.
    fn step_down(&mut self) -> bool {
        let next = self.snap(self.renko_low - self.offset);
        if next >= self.renko_low {
            return false;
        }
        self.renko_low = next;
        self.renko_high = self.snap(next + 2.0 * self.offset);
        true
    }

    fn process(
        &mut self,
        high: f64,
        low: f64,
        close: f64,
        ts: UnixNanos,
        volume: u64,
        is_bar_tick: bool,
    ) {
        let offset = self.config.brick_size(&self.instrument);
        if !self.comparator.approx_eq(offset, self.offset) {
            self.anchor = self.renko_high;
        }
        self.offset = offset;

        if !self.resolves_brick(close) {
            log::warn!(
                "{}: dropping tick close={close} ts={ts}, brick size {offset} below price resolution",
                self.config.name(),
            );
            return;
        }

        let new_session = self.session.is_new_session(ts, is_bar_tick);
        if new_session {
            self.session.advance(ts, is_bar_tick);
        }

        if self.sink.building().is_none() || (self.config.reset_on_new_session && new_session) {
            self.open_session(close, ts, volume);
            self.sink.set_last_price(close);
            return;
        }

        if !self.levels_initialized() {
            self.seed_wicks(close);
        }
        self.wick_high = self.wick_high.max(high).max(close);
        self.wick_low = self.wick_low.min(low).min(close);

        if !self.levels_initialized() {
            self.reseed_levels();
        }

        match self.classify(close) {
            BrickEvent::Breakout(BrickDirection::Up) => {
                self.breakout_up(close, ts, volume, is_bar_tick);
            }
            BrickEvent::Breakout(BrickDirection::Down) => {
                self.breakout_down(close, ts, volume, is_bar_tick);
            }
            BrickEvent::Breakout(BrickDirection::Flat) | BrickEvent::Update => {
                self.update_building(close, ts, volume);
            }
        }

        self.sink.set_last_price(close);
    }

    fn open_session(&mut self, close: f64, ts: UnixNanos, volume: u64) {
        if let Some(building) = self.sink.building().copied() {
            log::debug!(
                "{}: session reset at {ts}, flattening building brick at {}",
                self.config.name(),
                building.close,
            );
            self.sink
                .replace_building(Brick::flat(building.close, building.volume, building.ts));
        }

        self.anchor = close;
        self.renko_high = close + self.offset;
        self.renko_low = close - self.offset;
        self.wick_high = close;
        self.wick_low = close;
        self.sink.append(Brick::flat(close, volume, ts));
    }

    fn seed_wicks(&mut self, close: f64) {
        let (high, low) = self
            .sink
            .building()
            .map_or((close, close), |brick| (brick.high, brick.low));
        self.wick_high = high;
        self.wick_low = low;
    }

    fn reseed_levels(&mut self) {
        let Some(building) = self.sink.building().copied() else {
            return;
        };

        let offset = self.offset;
        (self.anchor, self.renko_high, self.renko_low) = match self.sink.last_closed() {
            None => (
                building.open,
                building.open + offset,
                building.open - offset,
            ),
            Some(previous) if previous.is_bullish() => (
                previous.close,
                previous.close + offset,
                previous.close - 2.0 * offset,
            ),
            Some(previous) => (
                previous.close,
                previous.close + 2.0 * offset,
                previous.close - offset,
            ),
        };

        log::debug!(
            "{}: reseeded thresholds renko_high={}, renko_low={}",
            self.config.name(),
            self.renko_high,
            self.renko_low,
        );
    }

    fn breakout_up(&mut self, close: f64, ts: UnixNanos, volume: u64, is_bar_tick: bool) {
        let offset = self.offset;
        let open = self.renko_high - offset;
        let high = open.max(self.wick_high.min(self.renko_high));
        let low = open.min(self.wick_low);
        self.correct_building(open, high, low, self.renko_high);

        let mut advanced = self.step_up();
        self.recheck_session(ts, is_bar_tick);

        let mut filled = 0_usize;
        while advanced && self.comparator.approx_ge(close, self.renko_high) {
            let open = self.renko_high - offset;
            self.sink
                .append(Brick::new(open, self.renko_high, open, self.renko_high, 0, ts));
            advanced = self.step_up();
            filled += 1;
        }
        self.log_gap_fill(filled, BrickDirection::Up, advanced);

        self.open_brick(self.renko_high - offset, close, ts, volume);
    }

    fn breakout_down(&mut self, close: f64, ts: UnixNanos, volume: u64, is_bar_tick: bool) {
        let offset = self.offset;
        let open = self.renko_low + offset;
        let high = open.max(self.wick_high);
        let low = open.min(self.wick_low.max(self.renko_low));
        self.correct_building(open, high, low, self.renko_low);

        let mut advanced = self.step_down();
        self.recheck_session(ts, is_bar_tick);

        let mut filled = 0_usize;
        while advanced && self.comparator.approx_le(close, self.renko_low) {
            let open = self.renko_low + offset;
            self.sink
                .append(Brick::new(open, open, self.renko_low, self.renko_low, 0, ts));
            advanced = self.step_down();
            filled += 1;
        }
        self.log_gap_fill(filled, BrickDirection::Down, advanced);

        self.open_brick(self.renko_low + offset, close, ts, volume);
    }

    /// Replaces the building brick with its final closed shape, unless already there.
    fn correct_building(&mut self, open: f64, high: f64, low: f64, close: f64) {
        let Some(building) = self.sink.building().copied() else {
            return;
        };

        let cmp = &self.comparator;
        let unchanged = cmp.approx_eq(building.open, open)
            && cmp.approx_eq(building.high, high)
            && cmp.approx_eq(building.low, low)
            && cmp.approx_eq(building.close, close);

        if !unchanged {
            self.sink.replace_building(Brick::new(
                open,
                high,
                low,
                close,
                building.volume,
                building.ts,
            ));
        }
    }

    fn recheck_session(&mut self, ts: UnixNanos, is_bar_tick: bool) {
        if self.session.is_new_session(ts, is_bar_tick) {
            self.session.advance(ts, is_bar_tick);
        }
    }

    fn open_brick(&mut self, open: f64, close: f64, ts: UnixNanos, volume: u64) {
        self.wick_high = close;
        self.wick_low = close;
        self.sink.append(Brick::new(
            open,
            open.max(close),
            open.min(close),
            close,
            volume,
            ts,
        ));
    }

    fn update_building(&mut self, close: f64, ts: UnixNanos, volume: u64) {
        let Some(building) = self.sink.building().copied() else {
            return;
        };

        self.sink.update_building(
            building.open.max(self.wick_high),
            building.open.min(self.wick_low),
            close,
            building.volume.saturating_add(volume),
            ts,
        );
    }

    fn log_gap_fill(&self, filled: usize, direction: BrickDirection, advanced: bool) {
        if !advanced {
            log::warn!(
                "{}: thresholds stalled at renko_high={}, renko_low={}",
                self.config.name(),
                self.renko_high,
                self.renko_low,
            );
        }
        if filled > 0 {
            log::debug!(
                "{}: filled {filled} {direction} gap brick(s)",
                self.config.name(),
            );
        }
    }
}

impl<K, S> BrickAggregator for RenkoWicksAggregator<K, S>
where
    K: BrickSink + Debug,
    S: SessionProvider + Debug,
{
    fn name(&self) -> String {
        self.config.name()
    }

    fn brick_size(&self) -> f64 {
        self.offset
    }

    fn state(&self) -> AggregatorState {
        self.fsm.state()
    }

    fn update(
        &mut self,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        ts: UnixNanos,
        volume: u64,
        is_bar_tick: bool,
        _bid: f64,
        _ask: f64,
    ) {
        if ![open, high, low, close].iter().all(|price| price.is_finite()) {
            log::warn!(
                "{}: dropping non-finite tick open={open} high={high} low={low} close={close} ts={ts}",
                self.config.name(),
            );
            return;
        }

        match self.fsm.state() {
            AggregatorState::Running => {}
            AggregatorState::Ready => {
                log::debug!("{}: starting on first tick", self.config.name());
                if let Err(e) = self.start() {
                    log::error!("{}: {e}", self.config.name());
                    return;
                }
            }
            state => {
                log::warn!(
                    "{}: dropping tick close={close} ts={ts}, state {state}",
                    self.config.name(),
                );
                return;
            }
        }

        if self.config.debug {
            log::trace!(
                "{}: tick high={high} low={low} close={close} volume={volume} ts={ts} bar={is_bar_tick}",
                self.config.name(),
            );
        }

        self.process(high, low, close, ts, volume, is_bar_tick);
    }

    fn start(&mut self) -> Result<(), InvalidStateTrigger> {
        self.fsm.trigger(AggregatorTrigger::Start).map(|_| ())
    }

    fn stop(&mut self) -> Result<(), InvalidStateTrigger> {
        self.fsm.trigger(AggregatorTrigger::Stop).map(|_| ())
    }

    fn dispose(&mut self) -> Result<(), InvalidStateTrigger> {
        self.fsm.trigger(AggregatorTrigger::Dispose).map(|_| ())
    }

    fn reset(&mut self) {
        self.anchor = 0.0;
        self.renko_high = 0.0;
        self.renko_low = 0.0;
        self.wick_high = 0.0;
        self.wick_low = 0.0;
    }
}
