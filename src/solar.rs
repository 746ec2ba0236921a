//! Daily schedule computation on top of the SPA solar model.
//!
//! All six instants come from the same astronomical engine: sunrise, transit
//! and sunset from the standard horizon, pre-dawn and night from custom
//! depression-angle horizons, and the afternoon instant from the descending
//! crossing of the shadow-length altitude. The computation is pure: the same
//! (location, date, zone, config) always produces identical timestamps.

use crate::error::{Error, Result};
use crate::timezone::ZoneSpec;
use crate::types::{DailySchedule, GeoCoordinate, InstantKind, ScheduleInstant};
use chrono::{DateTime, FixedOffset, NaiveDate};
use solar_positioning::time::DeltaT;
use solar_positioning::{Horizon, SunriseResult, spa};
use std::str::FromStr;

/// Shadow-length factor for the afternoon instant: the event occurs when an
/// object's shadow equals its noon shadow plus `factor` times its height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfternoonShadow {
    Standard,
    Hanafi,
}

impl AfternoonShadow {
    fn factor(self) -> f64 {
        match self {
            AfternoonShadow::Standard => 1.0,
            AfternoonShadow::Hanafi => 2.0,
        }
    }
}

impl FromStr for AfternoonShadow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "standard" => Ok(AfternoonShadow::Standard),
            "hanafi" => Ok(AfternoonShadow::Hanafi),
            _ => Err(Error::InvalidRange(format!(
                "unknown afternoon method: {} (use standard or hanafi)",
                s
            ))),
        }
    }
}

/// Calculation knobs the engine refuses to hardcode: the depression angles
/// for pre-dawn and night vary by regional convention, so they arrive as
/// configuration. Angles are positive degrees below the horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleConfig {
    pub pre_dawn_angle: f64,
    pub night_angle: f64,
    pub afternoon_shadow: AfternoonShadow,
    /// ΔT in seconds; `None` estimates it from the date.
    pub delta_t: Option<f64>,
}

/// Named presets for the common regional conventions. These only resolve to
/// an `AngleConfig`; nothing downstream knows which authority was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationMethod {
    MuslimWorldLeague,
    Isna,
    Egyptian,
    Karachi,
}

impl CalculationMethod {
    pub fn angles(self) -> AngleConfig {
        let (pre_dawn_angle, night_angle) = match self {
            CalculationMethod::MuslimWorldLeague => (18.0, 17.0),
            CalculationMethod::Isna => (15.0, 15.0),
            CalculationMethod::Egyptian => (19.5, 17.5),
            CalculationMethod::Karachi => (18.0, 18.0),
        };
        AngleConfig {
            pre_dawn_angle,
            night_angle,
            afternoon_shadow: AfternoonShadow::Standard,
            delta_t: None,
        }
    }
}

impl FromStr for CalculationMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mwl" => Ok(CalculationMethod::MuslimWorldLeague),
            "isna" => Ok(CalculationMethod::Isna),
            "egyptian" => Ok(CalculationMethod::Egyptian),
            "karachi" => Ok(CalculationMethod::Karachi),
            _ => Err(Error::InvalidRange(format!(
                "unknown calculation method: {} (use mwl, isna, egyptian or karachi)",
                s
            ))),
        }
    }
}

/// Compute the six instants for one (location, date) pair.
pub fn compute(
    location: GeoCoordinate,
    date: NaiveDate,
    zone: &ZoneSpec,
    config: &AngleConfig,
) -> Result<DailySchedule> {
    validate_angle("pre-dawn", config.pre_dawn_angle)?;
    validate_angle("night", config.night_angle)?;

    let anchor = zone.at_noon(date)?;
    let lat = location.latitude();
    let lon = location.longitude();
    let delta_t = config
        .delta_t
        .unwrap_or_else(|| DeltaT::estimate_from_date_like(anchor).unwrap_or(0.0));

    let (sunrise, transit, sunset) =
        crossings(anchor, lat, lon, delta_t, Horizon::SunriseSunset, date)?;
    let (pre_dawn, _, _) = crossings(
        anchor,
        lat,
        lon,
        delta_t,
        Horizon::Custom(-config.pre_dawn_angle),
        date,
    )?;
    let (_, _, night) = crossings(
        anchor,
        lat,
        lon,
        delta_t,
        Horizon::Custom(-config.night_angle),
        date,
    )?;
    let afternoon = afternoon_crossing(
        anchor,
        lat,
        lon,
        delta_t,
        transit,
        config.afternoon_shadow,
        date,
    )?;

    DailySchedule::from_instants(
        date,
        location,
        [
            ScheduleInstant {
                kind: InstantKind::PreDawn,
                timestamp: pre_dawn,
            },
            ScheduleInstant {
                kind: InstantKind::Sunrise,
                timestamp: sunrise,
            },
            ScheduleInstant {
                kind: InstantKind::Midday,
                timestamp: transit,
            },
            ScheduleInstant {
                kind: InstantKind::Afternoon,
                timestamp: afternoon,
            },
            ScheduleInstant {
                kind: InstantKind::Sunset,
                timestamp: sunset,
            },
            ScheduleInstant {
                kind: InstantKind::Night,
                timestamp: night,
            },
        ],
    )
}

fn validate_angle(name: &str, angle: f64) -> Result<()> {
    if !angle.is_finite() || angle <= 0.0 || angle >= 90.0 {
        return Err(Error::InvalidRange(format!(
            "{} depression angle {} out of range (0, 90)",
            name, angle
        )));
    }
    Ok(())
}

/// Rising, transit and setting crossings of a horizon. A polar day or night
/// for the requested horizon is a typed failure, never an approximation.
fn crossings(
    anchor: DateTime<FixedOffset>,
    lat: f64,
    lon: f64,
    delta_t: f64,
    horizon: Horizon,
    date: NaiveDate,
) -> Result<(
    DateTime<FixedOffset>,
    DateTime<FixedOffset>,
    DateTime<FixedOffset>,
)> {
    match spa::sunrise_sunset_for_horizon(anchor, lat, lon, delta_t, horizon) {
        Ok(SunriseResult::RegularDay {
            sunrise,
            transit,
            sunset,
        }) => Ok((sunrise, transit, sunset)),
        Ok(_) => Err(Error::NoSolutionAtLatitude {
            latitude: lat,
            date,
        }),
        Err(e) => Err(Error::Calculation(e.to_string())),
    }
}

/// The afternoon instant via the shadow-length condition. The declination is
/// recovered from the refraction-free solar position at transit (zenith plus
/// culmination side), the target altitude is
/// `atan(1 / (factor + tan(|lat - decl|)))`, and the event is the descending
/// crossing of that altitude.
fn afternoon_crossing(
    anchor: DateTime<FixedOffset>,
    lat: f64,
    lon: f64,
    delta_t: f64,
    transit: DateTime<FixedOffset>,
    shadow: AfternoonShadow,
    date: NaiveDate,
) -> Result<DateTime<FixedOffset>> {
    let position = spa::solar_position(transit, lat, lon, 0.0, delta_t, None)
        .map_err(|e| Error::Calculation(e.to_string()))?;

    // At culmination the zenith angle is |lat - decl|; the azimuth says on
    // which side of the zenith the sun stands.
    let culminates_south = (90.0..270.0).contains(&position.azimuth());
    let declination = if culminates_south {
        lat - position.zenith_angle()
    } else {
        lat + position.zenith_angle()
    };

    let altitude = (1.0 / (shadow.factor() + (lat - declination).abs().to_radians().tan()))
        .atan()
        .to_degrees();

    let (_, _, afternoon) = crossings(anchor, lat, lon, delta_t, Horizon::Custom(altitude), date)?;
    Ok(afternoon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn istanbul() -> GeoCoordinate {
        GeoCoordinate::new(41.0082, 28.9784).unwrap()
    }

    fn mwl() -> AngleConfig {
        CalculationMethod::MuslimWorldLeague.angles()
    }

    #[test]
    fn test_istanbul_solstice_schedule_is_ordered() {
        let zone: ZoneSpec = "Europe/Istanbul".parse().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let schedule = compute(istanbul(), date, &zone, &mwl()).unwrap();

        let instants = schedule.instants();
        for pair in instants.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }

        // midsummer at 41°N: sunrise in the early morning, sunset in the
        // late evening, transit shortly after 13:00 local (+03:00, lon 29°E)
        assert_eq!(instants[1].timestamp.hour(), 5);
        assert_eq!(instants[2].timestamp.hour(), 13);
        assert_eq!(instants[4].timestamp.hour(), 20);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let zone: ZoneSpec = "+03:00".parse().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let first = compute(istanbul(), date, &zone, &mwl()).unwrap();
        let second = compute(istanbul(), date, &zone, &mwl()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_hanafi_afternoon_is_later() {
        let zone: ZoneSpec = "+03:00".parse().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();

        let standard = compute(istanbul(), date, &zone, &mwl()).unwrap();
        let hanafi_config = AngleConfig {
            afternoon_shadow: AfternoonShadow::Hanafi,
            ..mwl()
        };
        let hanafi = compute(istanbul(), date, &zone, &hanafi_config).unwrap();

        let standard_afternoon = standard.instant(InstantKind::Afternoon).timestamp;
        let hanafi_afternoon = hanafi.instant(InstantKind::Afternoon).timestamp;
        assert!(hanafi_afternoon > standard_afternoon);

        // the other instants are untouched by the afternoon method
        assert_eq!(
            standard.instant(InstantKind::Sunset).timestamp,
            hanafi.instant(InstantKind::Sunset).timestamp
        );
    }

    #[test]
    fn test_polar_midsummer_has_no_solution() {
        // Longyearbyen: continuous daylight in June
        let svalbard = GeoCoordinate::new(78.2232, 15.6267).unwrap();
        let zone: ZoneSpec = "+02:00".parse().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();

        assert!(matches!(
            compute(svalbard, date, &zone, &mwl()),
            Err(Error::NoSolutionAtLatitude { .. })
        ));
    }

    #[test]
    fn test_rejects_nonsense_angles() {
        let zone: ZoneSpec = "+03:00".parse().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();

        let bad = AngleConfig {
            pre_dawn_angle: 0.0,
            ..mwl()
        };
        assert!(matches!(
            compute(istanbul(), date, &zone, &bad),
            Err(Error::InvalidRange(_))
        ));

        let bad = AngleConfig {
            night_angle: 95.0,
            ..mwl()
        };
        assert!(matches!(
            compute(istanbul(), date, &zone, &bad),
            Err(Error::InvalidRange(_))
        ));
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!(
            "mwl".parse::<CalculationMethod>().unwrap(),
            CalculationMethod::MuslimWorldLeague
        );
        assert_eq!(
            "egyptian".parse::<CalculationMethod>().unwrap().angles().pre_dawn_angle,
            19.5
        );
        assert!("unknown".parse::<CalculationMethod>().is_err());
        assert_eq!(
            "hanafi".parse::<AfternoonShadow>().unwrap(),
            AfternoonShadow::Hanafi
        );
    }
}
