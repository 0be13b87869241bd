//! Roster configuration.
//!
//! Business hours bound every slot in the grid: a slot `(day, hour)` exists
//! only for `start_hour <= hour < end_hour`. Interactive edits arrive as
//! fractional hours and are snapped to `snap_minutes` before they are
//! validated.
//!
//! # Example
//!
//! ```
//! use u_roster::GridConfig;
//!
//! let config = GridConfig::from_toml_str(
//!     "start_hour = 8\nend_hour = 20\nsnap_minutes = 30\n",
//! ).unwrap();
//! assert_eq!(config.hours().count(), 12);
//! assert_eq!(config.snap(9.2), 9.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Business hours and edit precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// First bookable hour (inclusive).
    pub start_hour: u8,
    /// Closing hour (exclusive).
    pub end_hour: u8,
    /// Snap granularity for sub-hour edits (minutes, divides 60).
    pub snap_minutes: u32,
    /// Shortest shift a resize may produce (minutes).
    pub min_shift_minutes: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
            snap_minutes: 15,
            min_shift_minutes: 15,
        }
    }
}

impl GridConfig {
    /// Creates the default configuration (09:00-17:00, 15-minute snapping).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the business-hour window `[start_hour, end_hour)`.
    pub fn with_business_hours(mut self, start_hour: u8, end_hour: u8) -> Self {
        self.start_hour = start_hour;
        self.end_hour = end_hour;
        self
    }

    /// Sets the snap granularity.
    pub fn with_snap_minutes(mut self, minutes: u32) -> Self {
        self.snap_minutes = minutes;
        self
    }

    /// Sets the minimum shift length.
    pub fn with_min_shift_minutes(mut self, minutes: u32) -> Self {
        self.min_shift_minutes = minutes;
        self
    }

    /// Parses and validates a TOML document. Missing keys take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: GridConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the window and snap settings.
    pub fn validate(&self) -> Result<()> {
        if self.start_hour >= self.end_hour {
            return Err(GridError::InvalidConfig(format!(
                "start_hour {} must be before end_hour {}",
                self.start_hour, self.end_hour
            )));
        }
        if self.end_hour > 24 {
            return Err(GridError::InvalidConfig(format!(
                "end_hour {} is past midnight",
                self.end_hour
            )));
        }
        if self.snap_minutes == 0 || 60 % self.snap_minutes != 0 {
            return Err(GridError::InvalidConfig(format!(
                "snap_minutes {} must divide 60",
                self.snap_minutes
            )));
        }
        if self.min_shift_minutes == 0 {
            return Err(GridError::InvalidConfig(
                "min_shift_minutes must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Bookable hours in ascending order.
    pub fn hours(&self) -> impl Iterator<Item = u8> {
        self.start_hour..self.end_hour
    }

    /// Number of bookable hours per day.
    #[inline]
    pub fn hours_per_day(&self) -> usize {
        usize::from(self.end_hour.saturating_sub(self.start_hour))
    }

    /// Whether an hour is inside business hours.
    #[inline]
    pub fn contains_hour(&self, hour: u8) -> bool {
        hour >= self.start_hour && hour < self.end_hour
    }

    /// Whether `[start, end)` lies within business hours.
    pub fn contains_range(&self, start: f64, end: f64) -> bool {
        start >= f64::from(self.start_hour) && end <= f64::from(self.end_hour)
    }

    /// Snaps a fractional hour to the nearest increment.
    pub fn snap(&self, hour: f64) -> f64 {
        let steps = f64::from(60 / self.snap_minutes.max(1));
        (hour * steps).round() / steps
    }

    /// Builds the error for a range outside business hours.
    pub(crate) fn out_of_hours(&self, start: f64, end: f64) -> GridError {
        GridError::OutOfBusinessHours {
            start,
            end,
            open: self.start_hour,
            close: self.end_hour,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = GridConfig::default();
        assert_eq!((c.start_hour, c.end_hour), (9, 17));
        assert_eq!(c.hours_per_day(), 8);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_snap_quarter_hours() {
        let c = GridConfig::default();
        assert_eq!(c.snap(9.07), 9.0);
        assert_eq!(c.snap(13.92), 14.0);
        assert_eq!(c.snap(10.13), 10.25);
        assert_eq!(c.snap(10.5), 10.5);
    }

    #[test]
    fn test_contains_range() {
        let c = GridConfig::default();
        assert!(c.contains_range(9.0, 17.0));
        assert!(c.contains_range(9.25, 9.5));
        assert!(!c.contains_range(8.75, 10.0));
        assert!(!c.contains_range(16.0, 17.25));
    }

    #[test]
    fn test_from_toml_partial() {
        let c = GridConfig::from_toml_str("start_hour = 6\nend_hour = 22\n").unwrap();
        assert_eq!(c.start_hour, 6);
        assert_eq!(c.end_hour, 22);
        assert_eq!(c.snap_minutes, 15);
    }

    #[test]
    fn test_invalid_configs() {
        assert!(GridConfig::new().with_business_hours(17, 9).validate().is_err());
        assert!(GridConfig::new().with_business_hours(9, 25).validate().is_err());
        assert!(GridConfig::new().with_snap_minutes(7).validate().is_err());
        assert!(GridConfig::new().with_snap_minutes(0).validate().is_err());
        assert!(GridConfig::new().with_min_shift_minutes(0).validate().is_err());
    }

    #[test]
    fn test_from_toml_rejects_bad_window() {
        let err = GridConfig::from_toml_str("start_hour = 20\nend_hour = 8\n").unwrap_err();
        assert!(matches!(err, GridError::InvalidConfig(_)));
    }
}
