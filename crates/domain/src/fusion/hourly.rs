//! Hourly value selection
//!
//! Picks the entry of an Open-Meteo series that belongs to the current hour
//! at the forecast location.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Timelike, Utc};

use crate::entities::{HourlyMetric, HourlySeries};

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parse an hourly timestamp, `None` if it matches no known format
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

fn same_hour(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date() && a.hour() == b.hour()
}

/// Select the value for the reference hour from parallel sequences
///
/// The first timestamp in the reference hour decides the index. Without a
/// match the first value is used. An index past the end of `values` yields
/// `None`.
#[must_use]
pub fn select_hourly(
    time: &[String],
    values: &[Option<f64>],
    reference: NaiveDateTime,
) -> Option<f64> {
    let matched = time
        .iter()
        .position(|t| parse_timestamp(t).is_some_and(|ts| same_hour(ts, reference)));

    match matched {
        Some(index) => values.get(index).copied().flatten(),
        None => values.first().copied().flatten(),
    }
    .filter(|v| v.is_finite())
}

impl HourlySeries {
    /// Value of `metric` for the reference hour
    #[must_use]
    pub fn value_at(&self, metric: HourlyMetric, reference: NaiveDateTime) -> Option<f64> {
        self.values(metric)
            .and_then(|values| select_hourly(&self.time, values, reference))
    }

    /// Wall-clock time at the forecast location
    ///
    /// Uses the provider's UTC offset and falls back to the machine's local
    /// zone when the offset is missing or out of range.
    #[must_use]
    pub fn local_reference(&self, now: DateTime<Utc>) -> NaiveDateTime {
        self.utc_offset_seconds
            .and_then(FixedOffset::east_opt)
            .map_or_else(
                || now.with_timezone(&Local).naive_local(),
                |offset| now.with_timezone(&offset).naive_local(),
            )
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use super::*;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|d| d.and_hms_opt(hour, 17, 0))
            .unwrap()
    }

    fn two_hour_series() -> HourlySeries {
        HourlySeries::new(vec![
            "2025-01-01T10:00".to_string(),
            "2025-01-01T11:00".to_string(),
        ])
        .with_metric(HourlyMetric::Temperature, vec![Some(20.0), Some(22.0)])
    }

    #[test]
    fn test_selects_matching_hour() {
        let series = two_hour_series();
        assert_eq!(series.value_at(HourlyMetric::Temperature, at(11)), Some(22.0));
        assert_eq!(series.value_at(HourlyMetric::Temperature, at(10)), Some(20.0));
    }

    #[test]
    fn test_falls_back_to_first_entry() {
        let series = two_hour_series();
        assert_eq!(series.value_at(HourlyMetric::Temperature, at(15)), Some(20.0));
    }

    #[test]
    fn test_missing_metric_is_absent() {
        let series = two_hour_series();
        assert_eq!(series.value_at(HourlyMetric::Visibility, at(11)), None);
    }

    #[test]
    fn test_empty_series_is_absent() {
        let series = HourlySeries::default().with_metric(HourlyMetric::Temperature, vec![]);
        assert_eq!(series.value_at(HourlyMetric::Temperature, at(11)), None);
    }

    #[test]
    fn test_matched_index_past_values_is_absent() {
        let series = HourlySeries::new(vec![
            "2025-01-01T10:00".to_string(),
            "2025-01-01T11:00".to_string(),
        ])
        .with_metric(HourlyMetric::Temperature, vec![Some(20.0)]);
        assert_eq!(series.value_at(HourlyMetric::Temperature, at(11)), None);
    }

    #[test]
    fn test_null_entry_is_absent() {
        let series = HourlySeries::new(vec!["2025-01-01T11:00".to_string()])
            .with_metric(HourlyMetric::Temperature, vec![None]);
        assert_eq!(series.value_at(HourlyMetric::Temperature, at(11)), None);
    }

    #[test]
    fn test_unparseable_timestamps_never_match() {
        let series = HourlySeries::new(vec!["yesterday".to_string(), "2025-01-01T11:00".to_string()])
            .with_metric(HourlyMetric::Temperature, vec![Some(1.0), Some(2.0)]);
        assert_eq!(series.value_at(HourlyMetric::Temperature, at(11)), Some(2.0));
        assert_eq!(series.value_at(HourlyMetric::Temperature, at(3)), Some(1.0));
    }

    #[test]
    fn test_different_day_same_hour_does_not_match() {
        let series = HourlySeries::new(vec![
            "2024-12-31T11:00".to_string(),
            "2025-01-01T11:00".to_string(),
        ])
        .with_metric(HourlyMetric::Temperature, vec![Some(5.0), Some(6.0)]);
        assert_eq!(series.value_at(HourlyMetric::Temperature, at(11)), Some(6.0));
    }

    #[test]
    fn test_parses_both_timestamp_formats() {
        assert!(parse_timestamp("2025-01-01T10:00").is_some());
        assert!(parse_timestamp("2025-01-01T10:00:00").is_some());
        assert!(parse_timestamp("2025-01-01 10:00").is_none());
    }

    #[test]
    fn test_local_reference_applies_offset() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 5, 30, 0).unwrap();
        let series = HourlySeries::default().with_utc_offset(19_800);
        let local = series.local_reference(now);
        assert_eq!(local.hour(), 11);
        assert_eq!(local.minute(), 0);
    }

    #[test]
    fn test_invalid_offset_falls_back_to_machine_zone() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 5, 30, 0).unwrap();
        let series = HourlySeries::default().with_utc_offset(i32::MAX);
        assert_eq!(
            series.local_reference(now),
            now.with_timezone(&Local).naive_local()
        );
    }
}
