//! # Calendar Alignment
//!
//! $$
//! \mathcal T=\bigcap_i \mathcal T_i,\qquad r_t=\frac{p_t-p_{t-1}}{p_{t-1}}
//! $$
//!
//! Exchanges close on different holidays, so series are reduced to the dates
//! every ticker traded before any return is computed.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use ndarray::Array2;

use super::source::PriceSeries;

/// Index a series by date. Duplicate dates keep the last price seen.
pub fn price_map(series: &PriceSeries) -> BTreeMap<NaiveDate, f64> {
  series
    .dates
    .iter()
    .copied()
    .zip(series.prices.iter().copied())
    .collect()
}

/// `true` when every price is finite and strictly positive.
pub fn has_valid_prices(series: &PriceSeries) -> bool {
  series.prices.iter().all(|p| p.is_finite() && *p > 0.0)
}

/// Dates present in every series, ascending.
pub fn common_calendar(maps: &[BTreeMap<NaiveDate, f64>]) -> Vec<NaiveDate> {
  let Some((first, rest)) = maps.split_first() else {
    return Vec::new();
  };

  let mut common: BTreeSet<NaiveDate> = first.keys().copied().collect();
  for map in rest {
    common.retain(|d| map.contains_key(d));
  }
  common.into_iter().collect()
}

/// Simple per-period returns of a price path.
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
  prices
    .windows(2)
    .map(|w| (w[1] - w[0]) / w[0])
    .collect()
}

/// Return matrix (assets × periods) restricted to `calendar`.
///
/// Every map must contain every date of `calendar`; callers obtain the calendar
/// from [`common_calendar`] over the same maps.
pub fn aligned_returns(maps: &[BTreeMap<NaiveDate, f64>], calendar: &[NaiveDate]) -> Array2<f64> {
  let periods = calendar.len().saturating_sub(1);
  let mut out = Array2::<f64>::zeros((maps.len(), periods));

  for (i, map) in maps.iter().enumerate() {
    let prices: Vec<f64> = calendar
      .iter()
      .map(|d| map.get(d).copied().unwrap_or(f64::NAN))
      .collect();
    for (t, r) in simple_returns(&prices).into_iter().enumerate() {
      out[[i, t]] = r;
    }
  }

  out
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;

  use super::*;

  fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
  }

  #[test]
  fn intersection_is_sorted_and_drops_holidays() {
    let a = PriceSeries::new(vec![day(5), day(1), day(4), day(2)], vec![5.0, 1.0, 4.0, 2.0]);
    let b = PriceSeries::new(vec![day(1), day(2), day(5)], vec![10.0, 20.0, 50.0]);
    let maps = vec![price_map(&a), price_map(&b)];

    assert_eq!(common_calendar(&maps), vec![day(1), day(2), day(5)]);
  }

  #[test]
  fn returns_only_use_common_dates() {
    let a = PriceSeries::new(vec![day(1), day(2), day(3), day(4)], vec![100.0, 110.0, 55.0, 121.0]);
    let b = PriceSeries::new(vec![day(1), day(2), day(4)], vec![10.0, 10.0, 12.0]);
    let maps = vec![price_map(&a), price_map(&b)];
    let calendar = common_calendar(&maps);
    let r = aligned_returns(&maps, &calendar);

    assert_eq!(r.dim(), (2, 2));
    assert_abs_diff_eq!(r[[0, 0]], 0.1, epsilon = 1e-12);
    // day 3 is skipped: 110 -> 121
    assert_abs_diff_eq!(r[[0, 1]], 0.1, epsilon = 1e-12);
    assert_abs_diff_eq!(r[[1, 0]], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(r[[1, 1]], 0.2, epsilon = 1e-12);
  }

  #[test]
  fn duplicate_dates_keep_last_price() {
    let s = PriceSeries::new(vec![day(1), day(1)], vec![1.0, 2.0]);
    assert_eq!(price_map(&s).get(&day(1)), Some(&2.0));
  }

  #[test]
  fn price_validation_rejects_zero_and_nan() {
    assert!(has_valid_prices(&PriceSeries::new(vec![day(1)], vec![1.0])));
    assert!(!has_valid_prices(&PriceSeries::new(vec![day(1)], vec![0.0])));
    assert!(!has_valid_prices(&PriceSeries::new(vec![day(1)], vec![f64::NAN])));
  }

  #[test]
  fn empty_inputs_yield_empty_outputs() {
    assert!(common_calendar(&[]).is_empty());
    assert!(simple_returns(&[1.0]).is_empty());
  }
}
