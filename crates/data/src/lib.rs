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

//! Streaming Renko brick aggregation with true high/low wicks.
//!
//! The *data* crate hosts the aggregator which turns a stream of [`Tick`]s into a
//! sequence of fixed-range bricks, written to a [`BrickSink`] and driven across trading
//! sessions by a [`SessionProvider`]:
//!
//! - [`config`]: the serde-deserializable [`RenkoWicksConfig`](config::RenkoWicksConfig).
//! - [`aggregation`]: the [`BrickAggregator`](aggregation::BrickAggregator) trait and the
//!   [`RenkoWicksAggregator`](aggregation::RenkoWicksAggregator) state machine.
//!
//! An aggregator is single-threaded and not reentrant. Hosts delivering ticks from several
//! threads must serialize access per series.
//!
//! [`Tick`]: renkowick_model::data::Tick
//! [`BrickSink`]: renkowick_model::series::BrickSink
//! [`SessionProvider`]: renkowick_model::session::SessionProvider

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod aggregation;
pub mod config;
