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

//! Enumerations for the brick domain model.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, FromRepr};

/// The direction of a brick body.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BrickDirection {
    /// The close equals the open (a freshly opened or flattened brick).
    Flat = 0,
    /// The close is above the open.
    Up = 1,
    /// The close is below the open.
    Down = 2,
}

/// The lifecycle state of a brick aggregator.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregatorState {
    /// Constructed and validated, no tick received yet.
    Ready = 0,
    /// Processing ticks.
    Running = 1,
    /// Paused by the host, ticks are dropped.
    Stopped = 2,
    /// Torn down with its series, ticks are dropped.
    Disposed = 3,
}

/// The lifecycle triggers of a brick aggregator.
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    AsRefStr,
    FromRepr,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregatorTrigger {
    /// Starts (or restarts) tick processing.
    Start = 0,
    /// Stops tick processing.
    Stop = 1,
    /// Disposes of the aggregator for good.
    Dispose = 2,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    #[rstest]
    fn test_brick_direction_display_and_parse() {
        assert_eq!(BrickDirection::Up.to_string(), "UP");
        assert_eq!(BrickDirection::from_str("down").unwrap(), BrickDirection::Down);
        assert_eq!(BrickDirection::from_repr(0), Some(BrickDirection::Flat));
    }

    #[rstest]
    fn test_aggregator_state_iter() {
        let states: Vec<AggregatorState> = AggregatorState::iter().collect();
        assert_eq!(
            states,
            vec![
                AggregatorState::Ready,
                AggregatorState::Running,
                AggregatorState::Stopped,
                AggregatorState::Disposed,
            ]
        );
        assert_eq!(AggregatorTrigger::Dispose.as_ref(), "DISPOSE");
    }
}
