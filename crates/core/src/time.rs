//! Wall-clock time utilities for the slot computation.
//!
//! Court schedules and bookings are expressed as `HH:MM` wall-clock times at
//! minute precision. Availability is derived by walking fixed 60-minute slots
//! between a court's opening and closing time, so everything here is plain
//! minute arithmetic on a validated [`TimeOfDay`].
//!
//! Parsing is strict: a malformed or out-of-range time is an explicit
//! [`TimeParseError`], never a silently propagated bogus value.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Fixed duration of every bookable slot, in minutes.
pub const SLOT_MINUTES: u32 = 60;

const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("Invalid time format, expected HH:MM: {0:?}")]
    InvalidFormat(String),

    #[error("Time out of range: {0:?}")]
    OutOfRange(String),
}

/// A wall-clock time truncated to minute precision.
///
/// Stored as minutes since midnight, invariant `0 <= minutes < 1440`.
/// Serialized on the wire as a zero-padded `"HH:MM"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// Parses an `HH:MM` string into a `TimeOfDay`.
    ///
    /// Backend payloads occasionally carry seconds (`"HH:MM:SS"`); anything
    /// past the first five characters is ignored. Both components must be
    /// two digits, hours in `0..=23` and minutes in `0..=59`.
    pub fn parse(input: &str) -> Result<Self, TimeParseError> {
        let hhmm = match input.get(..5) {
            Some(prefix) if input.len() > 5 => prefix,
            _ => input,
        };

        let (hours, minutes) = hhmm
            .split_once(':')
            .ok_or_else(|| TimeParseError::InvalidFormat(input.to_string()))?;

        if hours.len() != 2 || minutes.len() != 2 {
            return Err(TimeParseError::InvalidFormat(input.to_string()));
        }

        let hours: u32 = hours
            .parse()
            .map_err(|_| TimeParseError::InvalidFormat(input.to_string()))?;
        let minutes: u32 = minutes
            .parse()
            .map_err(|_| TimeParseError::InvalidFormat(input.to_string()))?;

        if hours > 23 || minutes > 59 {
            return Err(TimeParseError::OutOfRange(input.to_string()));
        }

        Ok(Self(hours * 60 + minutes))
    }

    /// Builds a `TimeOfDay` from minutes since midnight.
    ///
    /// Values of 1440 or more do not wrap to the next day; they are rejected.
    pub fn from_minutes(minutes: u32) -> Result<Self, TimeParseError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(TimeParseError::OutOfRange(minutes.to_string()));
        }
        Ok(Self(minutes))
    }

    /// Minutes since midnight.
    pub const fn minutes(self) -> u32 {
        self.0
    }

    pub const fn hour(self) -> u32 {
        self.0 / 60
    }

    pub const fn minute(self) -> u32 {
        self.0 % 60
    }

    /// Adds `delta` minutes, or `None` if the result would cross midnight.
    pub fn checked_add_minutes(self, delta: u32) -> Option<Self> {
        let total = self.0 + delta;
        if total >= MINUTES_PER_DAY {
            None
        } else {
            Some(Self(total))
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<TimeOfDay> for NaiveTime {
    fn from(t: TimeOfDay) -> Self {
        NaiveTime::from_hms_opt(t.hour(), t.minute(), 0)
            .expect("TimeOfDay holds a valid wall-clock time")
    }
}

impl TryFrom<NaiveTime> for TimeOfDay {
    type Error = TimeParseError;

    /// Seconds are truncated; sub-minute precision is not part of the model.
    fn try_from(t: NaiveTime) -> Result<Self, Self::Error> {
        Self::from_minutes(t.hour() * 60 + t.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TimeOfDay::parse(&raw).map_err(de::Error::custom)
    }
}

/// Weekday index of a calendar date, 0 = Sunday .. 6 = Saturday.
///
/// Matches the index used by [`crate::models::local::HorarioFuncionamento`].
pub fn dia_semana(data: NaiveDate) -> u8 {
    data.weekday().num_days_from_sunday() as u8
}

/// Start times of the 60-minute slots between `abertura` and `fechamento`.
///
/// A slot is emitted for every start `t` with `t + 60 <= fechamento`, so a
/// window shorter than one hour yields no slots and a partial trailing hour
/// is never offered. The sequence depends only on the two boundaries.
pub fn slots_de_hora(abertura: TimeOfDay, fechamento: TimeOfDay) -> Vec<TimeOfDay> {
    let mut slots = Vec::new();
    let mut inicio = abertura.minutes();
    while inicio + SLOT_MINUTES <= fechamento.minutes() {
        slots.push(TimeOfDay(inicio));
        inicio += SLOT_MINUTES;
    }
    slots
}
