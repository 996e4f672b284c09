//! # Time Range
//!
//! $$
//! \{1y,2y,5y\}\mapsto\{252,504,1260\}
//! $$
//!
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::FrontierError;

/// Trading days in one year; the annualization factor used across the crate.
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Supported look-back horizons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
  #[default]
  #[serde(rename = "1y")]
  OneYear,
  #[serde(rename = "2y")]
  TwoYears,
  #[serde(rename = "5y")]
  FiveYears,
}

impl TimeRange {
  pub const ALL: [TimeRange; 3] = [TimeRange::OneYear, TimeRange::TwoYears, TimeRange::FiveYears];

  /// Approximate number of trading days covered by the horizon.
  pub fn trading_days(&self) -> usize {
    match self {
      TimeRange::OneYear => TRADING_DAYS_PER_YEAR,
      TimeRange::TwoYears => 2 * TRADING_DAYS_PER_YEAR,
      TimeRange::FiveYears => 5 * TRADING_DAYS_PER_YEAR,
    }
  }

  /// Calendar look-back a quote source should request.
  pub fn calendar_days(&self) -> i64 {
    match self {
      TimeRange::OneYear => 365,
      TimeRange::TwoYears => 730,
      TimeRange::FiveYears => 1825,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      TimeRange::OneYear => "1y",
      TimeRange::TwoYears => "2y",
      TimeRange::FiveYears => "5y",
    }
  }

  pub fn parse(s: &str) -> Result<Self, FrontierError> {
    match s.trim().to_ascii_lowercase().as_str() {
      "1y" | "1" => Ok(TimeRange::OneYear),
      "2y" | "2" => Ok(TimeRange::TwoYears),
      "5y" | "5" => Ok(TimeRange::FiveYears),
      other => Err(FrontierError::InvalidConfig(format!(
        "invalid time range '{other}', expected one of: 1y | 2y | 5y"
      ))),
    }
  }
}

impl FromStr for TimeRange {
  type Err = FrontierError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

impl fmt::Display for TimeRange {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
