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

//! A `UnixNanos` type for working with timestamps in nanoseconds since the UNIX epoch.
//!
//! Tick and brick timestamps carry at least millisecond resolution; they are stored
//! as nanoseconds so that feeds with finer resolution lose nothing.
//!
//! # Limitations
//!
//! * Negative timestamps are invalid.
//! * Arithmetic operations will panic on overflow/underflow rather than wrapping.
#![allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]

use std::{
    fmt::Display,
    ops::{Add, Sub},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::datetime::NANOSECONDS_IN_MILLISECOND;

/// Represents a duration in nanoseconds.
pub type DurationNanos = u64;

/// Represents a timestamp in nanoseconds since the UNIX epoch.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UnixNanos(u64);

impl UnixNanos {
    /// Creates a new [`UnixNanos`] instance.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Creates a new [`UnixNanos`] instance from milliseconds since the UNIX epoch.
    ///
    /// # Panics
    ///
    /// Panics if the value overflows nanosecond range (beyond year 2554).
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        match millis.checked_mul(NANOSECONDS_IN_MILLISECOND) {
            Some(nanos) => Self(nanos),
            None => panic!("UnixNanos overflow converting from milliseconds"),
        }
    }

    /// Returns `true` if the value of this instance is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns the underlying value as `u64`.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns the value truncated to whole milliseconds.
    #[must_use]
    pub const fn as_millis(&self) -> u64 {
        self.0 / NANOSECONDS_IN_MILLISECOND
    }

    /// Returns the underlying value as `i64`.
    ///
    /// # Panics
    ///
    /// Panics if the value exceeds `i64::MAX` (approximately year 2262).
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        assert!(
            self.0 <= i64::MAX as u64,
            "UnixNanos value exceeds i64::MAX"
        );
        self.0 as i64
    }

    /// Converts the underlying value to a datetime (UTC).
    ///
    /// # Panics
    ///
    /// Panics if the value exceeds `i64::MAX` (approximately year 2262).
    #[must_use]
    pub const fn to_datetime_utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.as_i64())
    }

    /// Converts the underlying value to an ISO 8601 (RFC 3339) string.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.to_datetime_utc().to_rfc3339()
    }

    /// Calculates the duration in nanoseconds since another [`UnixNanos`] instance.
    ///
    /// Returns `None` if `other` is later than `self`.
    #[must_use]
    pub const fn duration_since(&self, other: &Self) -> Option<DurationNanos> {
        self.0.checked_sub(other.0)
    }

    /// Returns `Some(self + rhs)` or `None` if the addition would overflow.
    #[must_use]
    pub fn checked_add<T: Into<u64>>(self, rhs: T) -> Option<Self> {
        self.0.checked_add(rhs.into()).map(Self)
    }
}

impl From<u64> for UnixNanos {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<UnixNanos> for u64 {
    fn from(value: UnixNanos) -> Self {
        value.0
    }
}

impl TryFrom<DateTime<Utc>> for UnixNanos {
    type Error = anyhow::Error;

    fn try_from(value: DateTime<Utc>) -> Result<Self, Self::Error> {
        let nanos = value
            .timestamp_nanos_opt()
            .ok_or_else(|| anyhow::anyhow!("DateTime {value} out of range for UnixNanos"))?;

        if nanos < 0 {
            anyhow::bail!("DateTime {value} is before the UNIX epoch");
        }

        Ok(Self(nanos as u64))
    }
}

impl From<UnixNanos> for DateTime<Utc> {
    fn from(value: UnixNanos) -> Self {
        value.to_datetime_utc()
    }
}

/// Adds a `u64` nanosecond value to [`UnixNanos`].
///
/// # Panics
///
/// Panics on overflow. Use [`UnixNanos::checked_add()`] for explicit overflow handling.
impl Add<u64> for UnixNanos {
    type Output = Self;

    fn add(self, rhs: u64) -> Self::Output {
        Self(
            self.0
                .checked_add(rhs)
                .expect("UnixNanos overflow in addition"),
        )
    }
}

/// Subtracts a `u64` nanosecond value from [`UnixNanos`].
///
/// # Panics
///
/// Panics on underflow.
impl Sub<u64> for UnixNanos {
    type Output = Self;

    fn sub(self, rhs: u64) -> Self::Output {
        Self(
            self.0
                .checked_sub(rhs)
                .expect("UnixNanos underflow in subtraction"),
        )
    }
}

impl Display for UnixNanos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_new() {
        let nanos = UnixNanos::new(123);
        assert_eq!(nanos.as_u64(), 123);
        assert!(!nanos.is_zero());
        assert!(UnixNanos::default().is_zero());
    }

    #[rstest]
    fn test_from_millis_round_trip() {
        let nanos = UnixNanos::from_millis(1_700_000_000_123);
        assert_eq!(nanos.as_u64(), 1_700_000_000_123_000_000);
        assert_eq!(nanos.as_millis(), 1_700_000_000_123);
    }

    #[rstest]
    #[should_panic(expected = "UnixNanos overflow converting from milliseconds")]
    fn test_from_millis_overflow() {
        let _ = UnixNanos::from_millis(u64::MAX);
    }

    #[rstest]
    fn test_to_rfc3339() {
        let nanos = UnixNanos::from_millis(1_000);
        assert_eq!(nanos.to_rfc3339(), "1970-01-01T00:00:01+00:00");
    }

    #[rstest]
    fn test_try_from_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap();
        let nanos = UnixNanos::try_from(dt).unwrap();
        assert_eq!(nanos.to_datetime_utc(), dt);
    }

    #[rstest]
    fn test_try_from_datetime_before_epoch() {
        let dt = Utc.with_ymd_and_hms(1969, 12, 31, 23, 59, 59).unwrap();
        assert!(UnixNanos::try_from(dt).is_err());
    }

    #[rstest]
    fn test_duration_since() {
        let earlier = UnixNanos::new(100);
        let later = UnixNanos::new(250);
        assert_eq!(later.duration_since(&earlier), Some(150));
        assert_eq!(earlier.duration_since(&later), None);
    }

    #[rstest]
    fn test_arithmetic() {
        let nanos = UnixNanos::new(100);
        assert_eq!(nanos + 50, UnixNanos::new(150));
        assert_eq!(nanos - 50, UnixNanos::new(50));
        assert_eq!(UnixNanos::new(u64::MAX).checked_add(1u64), None);
    }

    #[rstest]
    fn test_serde_transparent() {
        let nanos = UnixNanos::new(42);
        let json = serde_json::to_string(&nanos).unwrap();
        assert_eq!(json, "42");
        let parsed: UnixNanos = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, nanos);
    }
}
