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

use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use renkowick_core::UnixNanos;
use renkowick_data::{
    aggregation::{BrickAggregator, RenkoWicksAggregator},
    config::RenkoWicksConfig,
};
use renkowick_model::{
    data::{Brick, Tick},
    instrument::InstrumentSpec,
    series::{BrickHandlerSink, BrickSeries},
    session::{NoSessions, SessionSchedule},
};

const TICK_COUNT: u64 = 100_000;

/// Returns a deterministic oscillating tick walk on a 0.25 grid.
fn prepare_ticks() -> Vec<Tick> {
    (0..TICK_COUNT)
        .map(|i| {
            let step = ((i * 7_919) % 41) as f64 - 20.0;
            let drift = ((i / 500) % 80) as f64 - 40.0;
            let close = 4_500.0 + (step + drift) * 0.25;
            Tick::with_range(close + 0.25, close - 0.25, close, 1, UnixNanos::new(i + 1))
        })
        .collect()
}

fn bench_series(c: &mut Criterion) {
    let ticks = prepare_ticks();
    let instrument = InstrumentSpec::new(0.25, 2);

    c.bench_function("renko_wicks_series", |b| {
        b.iter_batched(
            || {
                RenkoWicksAggregator::new(
                    RenkoWicksConfig::with_brick_value(4),
                    instrument,
                    BrickSeries::new(),
                    NoSessions,
                )
                .unwrap()
            },
            |mut aggregator| {
                aggregator.handle_ticks(black_box(&ticks));
                black_box(aggregator.into_parts())
            },
            BatchSize::LargeInput,
        );
    });
}

fn bench_handler_with_sessions(c: &mut Criterion) {
    let ticks = prepare_ticks();
    let instrument = InstrumentSpec::new(0.25, 2);
    let opens: Vec<UnixNanos> = (1..10).map(|i| UnixNanos::new(i * 10_000)).collect();

    c.bench_function("renko_wicks_handler_sessions", |b| {
        b.iter_batched(
            || {
                let mut count = 0_usize;
                let sink = BrickHandlerSink::new(move |brick: Brick| {
                    count += 1;
                    black_box((brick, count));
                });
                RenkoWicksAggregator::new(
                    RenkoWicksConfig::with_brick_value(4),
                    instrument,
                    sink,
                    SessionSchedule::new(opens.clone()),
                )
                .unwrap()
            },
            |mut aggregator| {
                aggregator.handle_ticks(black_box(&ticks));
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_series, bench_handler_with_sessions);
criterion_main!(benches);
