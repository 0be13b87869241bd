//! Time slot key.
//!
//! A slot is one hour of one day of the week. Days are indexed `0..=6`;
//! hours are wall-clock hours `0..24`, further restricted to business
//! hours by [`GridConfig`](crate::GridConfig).
//!
//! The persistence boundary encodes a slot as `"<day>,<hour>"`; inside the
//! crate it is a plain ordered struct so the grid iterates day-major,
//! hour-minor without string handling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GridError;

/// Days in a roster week.
pub const DAYS_PER_WEEK: u8 = 7;

/// One hour of one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeSlotKey {
    /// Day of week (0-6).
    pub day: u8,
    /// Hour of day.
    pub hour: u8,
}

impl TimeSlotKey {
    /// Creates a slot key.
    pub fn new(day: u8, hour: u8) -> Self {
        Self { day, hour }
    }
}

impl fmt::Display for TimeSlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.day, self.hour)
    }
}

impl FromStr for TimeSlotKey {
    type Err = GridError;

    /// Parses `"<day>,<hour>"`.
    ///
    /// Surrounding whitespace and leading zeros are tolerated on input;
    /// signs, extra fields, and out-of-range values are not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || GridError::MalformedSlotKey(s.to_string());

        let (day, hour) = s.split_once(',').ok_or_else(malformed)?;
        let day = parse_component(day).ok_or_else(malformed)?;
        let hour = parse_component(hour).ok_or_else(malformed)?;

        if day >= DAYS_PER_WEEK || hour >= 24 {
            return Err(malformed());
        }
        Ok(Self { day, hour })
    }
}

fn parse_component(raw: &str) -> Option<u8> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_has_no_padding() {
        assert_eq!(TimeSlotKey::new(0, 9).to_string(), "0,9");
        assert_eq!(TimeSlotKey::new(6, 23).to_string(), "6,23");
    }

    #[test]
    fn test_parse_canonical() {
        assert_eq!("2,14".parse::<TimeSlotKey>().unwrap(), TimeSlotKey::new(2, 14));
    }

    #[test]
    fn test_parse_tolerates_padding() {
        assert_eq!(" 1, 09".parse::<TimeSlotKey>().unwrap(), TimeSlotKey::new(1, 9));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "1", "1,", ",9", "a,9", "1,9,3", "-1,9", "+1,9", "7,9", "1,24", "1;9"] {
            let err = bad.parse::<TimeSlotKey>().unwrap_err();
            assert!(
                matches!(err, GridError::MalformedSlotKey(ref k) if k == bad),
                "expected malformed for {bad:?}"
            );
        }
    }

    #[test]
    fn test_ordering_is_day_major() {
        let mut keys = vec![
            TimeSlotKey::new(1, 9),
            TimeSlotKey::new(0, 16),
            TimeSlotKey::new(1, 8),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                TimeSlotKey::new(0, 16),
                TimeSlotKey::new(1, 8),
                TimeSlotKey::new(1, 9)
            ]
        );
    }
}
