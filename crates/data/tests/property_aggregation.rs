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

//! Property-based tests for Renko wick brick aggregation.
//!
//! These tests drive random tick walks through an aggregator and verify the
//! invariants that hold for every brick sequence it produces:
//! - Every closed brick body spans exactly one brick size
//! - Highs and lows contain the body of every brick
//! - Each brick opens where the previous brick closed
//! - Breakout thresholds sit one brick size either side of the building brick open

use proptest::prelude::*;
use renkowick_core::UnixNanos;
use renkowick_data::{
    aggregation::{BrickAggregator, RenkoWicksAggregator},
    config::RenkoWicksConfig,
};
use renkowick_model::{
    data::Tick,
    instrument::InstrumentSpec,
    series::{BrickSeries, BrickSink},
    session::NoSessions,
};
use rstest::rstest;

const TOLERANCE: f64 = 1e-6;

/// Generate a walk of tick-size steps, each with an intra-tick excursion above and below.
fn walk_strategy() -> impl Strategy<Value = Vec<(i32, u8, u8)>> {
    prop::collection::vec((-12i32..=12, 0u8..=4, 0u8..=4), 1..300)
}

fn run_walk(
    brick_value: u32,
    steps: &[(i32, u8, u8)],
) -> RenkoWicksAggregator<BrickSeries, NoSessions> {
    let instrument = InstrumentSpec::new(0.25, 2);
    let mut aggregator = RenkoWicksAggregator::new(
        RenkoWicksConfig::with_brick_value(brick_value),
        instrument,
        BrickSeries::new(),
        NoSessions,
    )
    .unwrap();

    let mut ticks: i64 = 40_000;
    for (i, &(step, up, down)) in steps.iter().enumerate() {
        ticks += i64::from(step);
        let close = ticks as f64 * 0.25;
        let high = close + f64::from(up) * 0.25;
        let low = close - f64::from(down) * 0.25;
        let ts = UnixNanos::new(i as u64 + 1);
        aggregator.handle_tick(&Tick::with_range(high, low, close, 1, ts));
    }

    aggregator
}

proptest! {
    /// Property: Every closed brick body equals the brick size.
    #[rstest]
    fn closed_bricks_span_one_brick_size(steps in walk_strategy(), brick_value in 1u32..=8) {
        let aggregator = run_walk(brick_value, &steps);
        let brick_size = aggregator.brick_size();

        for brick in aggregator.sink().closed() {
            prop_assert!(
                (brick.body() - brick_size).abs() < TOLERANCE,
                "Closed brick {brick} body should equal brick size {brick_size}",
            );
        }
    }

    /// Property: High and low contain open and close for every brick.
    #[rstest]
    fn wicks_contain_body(steps in walk_strategy(), brick_value in 1u32..=8) {
        let aggregator = run_walk(brick_value, &steps);

        for brick in aggregator.sink().iter() {
            prop_assert!(brick.high >= brick.open.max(brick.close) - TOLERANCE, "High below body: {brick}");
            prop_assert!(brick.low <= brick.open.min(brick.close) + TOLERANCE, "Low above body: {brick}");
        }
    }

    /// Property: Each brick opens at the close of the brick before it.
    #[rstest]
    fn bricks_are_continuous(steps in walk_strategy(), brick_value in 1u32..=8) {
        let aggregator = run_walk(brick_value, &steps);
        let bricks = aggregator.sink().to_vec();

        for pair in bricks.windows(2) {
            prop_assert!(
                (pair[1].open - pair[0].close).abs() < TOLERANCE,
                "Brick {} should open at previous close {}",
                pair[1],
                pair[0].close,
            );
        }
    }

    /// Property: Thresholds stay centered on the building brick open after every tick.
    #[rstest]
    fn thresholds_centered_on_building_open(steps in walk_strategy(), brick_value in 1u32..=8) {
        let aggregator = run_walk(brick_value, &steps);
        let brick_size = aggregator.brick_size();
        let open = aggregator.sink().building().unwrap().open;

        prop_assert!((aggregator.renko_high() - aggregator.renko_low() - 2.0 * brick_size).abs() < TOLERANCE);
        prop_assert!((aggregator.renko_high() - (open + brick_size)).abs() < TOLERANCE);
    }

    /// Property: The building brick close is the last traded price.
    #[rstest]
    fn building_close_is_last_price(steps in walk_strategy()) {
        let aggregator = run_walk(4, &steps);
        let series = aggregator.sink();

        prop_assert_eq!(series.building().map(|brick| brick.close), series.last_price());
    }
}
