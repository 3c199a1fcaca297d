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

//! Type stubs to facilitate testing.

use renkowick_core::UnixNanos;
use rstest::fixture;

use crate::{
    data::{Brick, Tick},
    instrument::InstrumentSpec,
    series::BrickSeries,
    session::SessionSchedule,
};

////////////////////////////////////////////////////////////////////////////////
// Instruments
////////////////////////////////////////////////////////////////////////////////
/// A whole-point instrument (tick size 1.0, no decimals).
#[fixture]
pub fn instrument_unit() -> InstrumentSpec {
    InstrumentSpec::new(1.0, 0)
}

/// An E-mini style instrument (tick size 0.25, two decimals).
#[fixture]
pub fn instrument_es() -> InstrumentSpec {
    InstrumentSpec::new(0.25, 2)
}

////////////////////////////////////////////////////////////////////////////////
// Data
////////////////////////////////////////////////////////////////////////////////
#[fixture]
pub fn stub_tick(
    #[default(100.0)] price: f64,
    #[default(1)] volume: u64,
    #[default(1)] ts: u64,
) -> Tick {
    Tick::from_trade(price, volume, UnixNanos::new(ts))
}

/// A series holding one closed up brick and a building brick with wicks.
#[fixture]
pub fn brick_series() -> BrickSeries {
    BrickSeries::from_bricks(vec![
        Brick::new(99.0, 100.0, 98.5, 100.0, 5, UnixNanos::new(1)),
        Brick::new(100.0, 101.0, 99.0, 100.4, 3, UnixNanos::new(2)),
    ])
}

/// A schedule with sessions opening at 1_000 and 2_000 nanoseconds.
#[fixture]
pub fn session_schedule() -> SessionSchedule {
    SessionSchedule::new(vec![UnixNanos::new(1_000), UnixNanos::new(2_000)])
}
