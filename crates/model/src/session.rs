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

//! Trading session boundaries.
//!
//! A [`SessionProvider`] answers whether a timestamp starts a new trading session and
//! is explicitly advanced once the caller has acted on a boundary. A live tick stamped
//! exactly at a session open belongs to the new session. A synthetic bar-close tick is
//! stamped at the *end* of the bar it summarizes, so a bar closing exactly at the open
//! still belongs to the prior session.

use chrono::{Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use renkowick_core::UnixNanos;

/// Provides trading session boundaries to a brick aggregator.
pub trait SessionProvider {
    /// Returns `true` if `ts` falls in a session not yet advanced to.
    fn is_new_session(&self, ts: UnixNanos, is_bar_tick: bool) -> bool;

    /// Advances the provider to the session containing `ts`.
    fn advance(&mut self, ts: UnixNanos, is_bar_tick: bool);
}

/// Returns `true` if `ts` is at or beyond the session `open` for the tick kind.
#[inline]
#[must_use]
pub fn crosses_open(ts: UnixNanos, open: UnixNanos, is_bar_tick: bool) -> bool {
    if is_bar_tick { ts > open } else { ts >= open }
}

/// A provider for continuous series which never start a new session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoSessions;

impl SessionProvider for NoSessions {
    fn is_new_session(&self, _ts: UnixNanos, _is_bar_tick: bool) -> bool {
        false
    }

    fn advance(&mut self, _ts: UnixNanos, _is_bar_tick: bool) {}
}

/// Provides session boundaries from a host-supplied list of session open timestamps.
#[derive(Clone, Debug, Default)]
pub struct SessionSchedule {
    opens: Vec<UnixNanos>,
    next: usize,
}

impl SessionSchedule {
    /// Creates a new [`SessionSchedule`] instance.
    ///
    /// The opens are sorted and deduplicated.
    #[must_use]
    pub fn new(mut opens: Vec<UnixNanos>) -> Self {
        opens.sort_unstable();
        opens.dedup();
        Self { opens, next: 0 }
    }

    /// Returns the session opens of the schedule, sorted.
    #[must_use]
    pub fn opens(&self) -> &[UnixNanos] {
        &self.opens
    }

    /// Returns the open of the session most recently advanced to.
    #[must_use]
    pub fn current_open(&self) -> Option<UnixNanos> {
        self.next
            .checked_sub(1)
            .and_then(|index| self.opens.get(index).copied())
    }

    /// Returns the next session open not yet advanced to.
    #[must_use]
    pub fn next_open(&self) -> Option<UnixNanos> {
        self.opens.get(self.next).copied()
    }
}

impl SessionProvider for SessionSchedule {
    fn is_new_session(&self, ts: UnixNanos, is_bar_tick: bool) -> bool {
        self.next_open()
            .is_some_and(|open| crosses_open(ts, open, is_bar_tick))
    }

    fn advance(&mut self, ts: UnixNanos, is_bar_tick: bool) {
        while self.is_new_session(ts, is_bar_tick) {
            self.next += 1;
        }
    }
}

/// Provides daily session boundaries at a fixed local open time in an IANA time zone.
///
/// The first timestamp queried always starts a session. Where the local open time
/// does not exist (a daylight saving gap) the open moves one hour later.
#[derive(Clone, Debug)]
pub struct DailySessionCalendar {
    tz: Tz,
    open_time: NaiveTime,
    weekends_closed: bool,
    next_open: Option<UnixNanos>,
}

impl DailySessionCalendar {
    /// Creates a new [`DailySessionCalendar`] instance.
    #[must_use]
    pub const fn new(tz: Tz, open_time: NaiveTime) -> Self {
        Self {
            tz,
            open_time,
            weekends_closed: false,
            next_open: None,
        }
    }

    /// Returns the calendar with no sessions opening on Saturdays or Sundays.
    #[must_use]
    pub const fn with_weekends_closed(mut self) -> Self {
        self.weekends_closed = true;
        self
    }

    /// Returns the time zone of the calendar.
    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.tz
    }

    /// Returns the local session open time.
    #[must_use]
    pub const fn open_time(&self) -> NaiveTime {
        self.open_time
    }

    /// Returns the next session open, or `None` before the first advance.
    #[must_use]
    pub const fn next_open(&self) -> Option<UnixNanos> {
        self.next_open
    }

    /// Returns the first session open which `ts` has not yet crossed.
    #[must_use]
    pub fn open_after(&self, ts: UnixNanos, is_bar_tick: bool) -> Option<UnixNanos> {
        let local = ts.to_datetime_utc().with_timezone(&self.tz);
        let mut date = local.date_naive();

        // Two days covers any local offset, weekends add two more
        for _ in 0..5 {
            if !(self.weekends_closed && is_weekend(date)) {
                let open = self.open_on(date)?;
                if !crosses_open(ts, open, is_bar_tick) {
                    return Some(open);
                }
            }
            date = date.succ_opt()?;
        }

        None
    }

    fn open_on(&self, date: NaiveDate) -> Option<UnixNanos> {
        let naive = date.and_time(self.open_time);
        let local = match self.tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
            LocalResult::None => {
                let shifted = naive + Duration::hours(1);
                log::warn!(
                    "Session open {naive} does not exist in {}, using {shifted}",
                    self.tz
                );
                self.tz.from_local_datetime(&shifted).earliest()?
            }
        };

        match UnixNanos::try_from(local.with_timezone(&Utc)) {
            Ok(open) => Some(open),
            Err(e) => {
                log::warn!("Session open {naive} out of range: {e}");
                None
            }
        }
    }
}

impl SessionProvider for DailySessionCalendar {
    fn is_new_session(&self, ts: UnixNanos, is_bar_tick: bool) -> bool {
        match self.next_open {
            Some(open) => crosses_open(ts, open, is_bar_tick),
            None => true,
        }
    }

    fn advance(&mut self, ts: UnixNanos, is_bar_tick: bool) {
        self.next_open = self.open_after(ts, is_bar_tick);
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
