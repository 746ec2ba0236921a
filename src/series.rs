//! Multi-day schedule generation.

use crate::error::{Error, Result};
use crate::solar::{self, AngleConfig};
use crate::timezone::ZoneSpec;
use crate::types::{GeoCoordinate, ScheduleSeries};
use chrono::NaiveDate;

/// One schedule per calendar day, `start` inclusive, `day_count` days.
///
/// Fails as a whole if any single day fails (for instance a polar date): a
/// partially filled series would reach consumers as a silently gapped
/// schedule, which is worse than no schedule.
pub fn generate_series(
    location: GeoCoordinate,
    start: NaiveDate,
    day_count: u32,
    zone: &ZoneSpec,
    config: &AngleConfig,
) -> Result<ScheduleSeries> {
    if day_count == 0 {
        return Err(Error::InvalidRange("day count must be at least 1".into()));
    }

    let mut schedules = Vec::with_capacity(day_count as usize);
    let mut date = start;
    for _ in 0..day_count {
        schedules.push(solar::compute(location, date, zone, config)?);
        date = date
            .succ_opt()
            .ok_or_else(|| Error::InvalidRange(format!("calendar overflow after {}", date)))?;
    }

    Ok(ScheduleSeries::new(location, schedules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solar::CalculationMethod;
    use chrono::Duration;

    fn istanbul() -> GeoCoordinate {
        GeoCoordinate::new(41.0082, 28.9784).unwrap()
    }

    #[test]
    fn test_series_has_consecutive_dates() {
        let zone: ZoneSpec = "+03:00".parse().unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();
        let config = CalculationMethod::MuslimWorldLeague.angles();

        let series = generate_series(istanbul(), start, 7, &zone, &config).unwrap();
        assert_eq!(series.len(), 7);
        for (offset, schedule) in series.schedules().iter().enumerate() {
            assert_eq!(schedule.date(), start + Duration::days(offset as i64));
        }
    }

    #[test]
    fn test_zero_days_is_invalid() {
        let zone: ZoneSpec = "+03:00".parse().unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();
        let config = CalculationMethod::MuslimWorldLeague.angles();

        assert!(matches!(
            generate_series(istanbul(), start, 0, &zone, &config),
            Err(Error::InvalidRange(_))
        ));
    }

    #[test]
    fn test_series_fails_whole_on_polar_day() {
        // A window that runs into the polar day must not return a partial series
        let tromso = GeoCoordinate::new(69.6492, 18.9553).unwrap();
        let zone: ZoneSpec = "+02:00".parse().unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 6, 19).unwrap();
        let config = CalculationMethod::MuslimWorldLeague.angles();

        assert!(matches!(
            generate_series(tromso, start, 5, &zone, &config),
            Err(Error::NoSolutionAtLatitude { .. })
        ));
    }
}
