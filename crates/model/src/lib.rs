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

//! Domain model for Renko wick brick aggregation.
//!
//! The *model* crate defines the data flowing into and out of a brick aggregator,
//! together with the collaborator contracts an aggregator is driven through:
//!
//! - **Data types**: the incoming [`Tick`](data::Tick) and the outgoing [`Brick`](data::Brick).
//! - **Instrument metadata**: [`InstrumentSpec`](instrument::InstrumentSpec) carrying the tick size.
//! - **Bar sink**: the [`BrickSink`](series::BrickSink) contract with in-memory and
//!   handler-driven implementations.
//! - **Session provider**: the [`SessionProvider`](session::SessionProvider) contract with
//!   scheduled and calendar-driven implementations.
//!
//! # Feature flags
//!
//! - `stubs`: Enables type stubs for use in testing scenarios.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod data;
pub mod enums;
pub mod instrument;
pub mod series;
pub mod session;

#[cfg(any(test, feature = "stubs"))]
pub mod stubs;
