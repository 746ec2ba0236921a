//! Timezone resolution for schedule computation.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;
use std::sync::OnceLock;

/// Either a fixed UTC offset (`+03:00`) or an IANA zone (`Europe/Istanbul`).
/// Named zones resolve to the offset in effect on the requested date, so DST
/// is handled per day.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneSpec {
    Fixed(FixedOffset),
    Named(Tz),
}

/// Cached system timezone, detected once at first access.
static SYSTEM_TIMEZONE: OnceLock<Tz> = OnceLock::new();

fn system_timezone() -> Tz {
    *SYSTEM_TIMEZONE.get_or_init(|| {
        // TZ env var first, so tests and overrides win
        if let Ok(tz_str) = std::env::var("TZ")
            && let Ok(tz) = tz_str.parse::<Tz>()
        {
            return tz;
        }

        iana_time_zone::get_timezone()
            .ok()
            .and_then(|name| name.parse::<Tz>().ok())
            .unwrap_or(chrono_tz::UTC)
    })
}

impl ZoneSpec {
    /// The system timezone (TZ env var, then platform detection, then UTC).
    pub fn system() -> Self {
        ZoneSpec::Named(system_timezone())
    }

    /// Local noon of `date` in this zone, as an offset-qualified instant.
    /// Noon is the anchor for a day's solar computation; unlike midnight it
    /// cannot fall into a DST gap in any real zone.
    pub fn at_noon(&self, date: NaiveDate) -> Result<DateTime<FixedOffset>> {
        let naive = date.and_hms_opt(12, 0, 0).unwrap();
        match self {
            ZoneSpec::Fixed(offset) => match offset.from_local_datetime(&naive) {
                chrono::LocalResult::Single(dt) => Ok(dt),
                _ => Err(Error::InvalidRange(format!(
                    "{} is not a valid instant at offset {}",
                    naive, offset
                ))),
            },
            ZoneSpec::Named(tz) => match tz.from_local_datetime(&naive) {
                chrono::LocalResult::Single(dt) => Ok(dt.fixed_offset()),
                chrono::LocalResult::Ambiguous(dt, _) => Ok(dt.fixed_offset()),
                chrono::LocalResult::None => Err(Error::InvalidRange(format!(
                    "{} does not exist in timezone {}",
                    naive, tz
                ))),
            },
        }
    }

    /// The current instant expressed in this zone.
    pub fn now(&self) -> DateTime<FixedOffset> {
        let utc = Utc::now();
        match self {
            ZoneSpec::Fixed(offset) => utc.with_timezone(offset),
            ZoneSpec::Named(tz) => utc.with_timezone(tz).fixed_offset(),
        }
    }

    /// Today's calendar date in this zone.
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

impl FromStr for ZoneSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(offset) = parse_offset(s) {
            return Ok(ZoneSpec::Fixed(offset));
        }
        match s {
            "UTC" | "GMT" => Ok(ZoneSpec::Named(chrono_tz::UTC)),
            _ => s.parse::<Tz>().map(ZoneSpec::Named).map_err(|_| {
                Error::InvalidTimezone(format!(
                    "{}: use an offset like +03:00 or an IANA name like Europe/Istanbul",
                    s
                ))
            }),
        }
    }
}

/// Parse a `+HH:MM` / `-HH:MM` offset.
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let rest = s.strip_prefix(['+', '-'])?;
    let (hours, minutes) = rest.split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    let seconds = hours * 3600 + minutes * 60;
    if s.starts_with('-') {
        FixedOffset::west_opt(seconds)
    } else {
        FixedOffset::east_opt(seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_parsing() {
        let ZoneSpec::Fixed(offset) = "+03:00".parse::<ZoneSpec>().unwrap() else {
            panic!("expected fixed offset");
        };
        assert_eq!(offset.local_minus_utc(), 3 * 3600);

        let ZoneSpec::Fixed(offset) = "-05:30".parse::<ZoneSpec>().unwrap() else {
            panic!("expected fixed offset");
        };
        assert_eq!(offset.local_minus_utc(), -(5 * 3600 + 30 * 60));

        assert!("+0300".parse::<ZoneSpec>().is_err());
        assert!("03:00".parse::<ZoneSpec>().is_err());
        assert!("+03:99".parse::<ZoneSpec>().is_err());
    }

    #[test]
    fn test_named_zone_parsing() {
        assert_eq!(
            "UTC".parse::<ZoneSpec>().unwrap(),
            ZoneSpec::Named(chrono_tz::UTC)
        );
        assert!("Europe/Istanbul".parse::<ZoneSpec>().is_ok());
        assert!(matches!(
            "Atlantis/Nowhere".parse::<ZoneSpec>(),
            Err(Error::InvalidTimezone(_))
        ));
    }

    #[test]
    fn test_noon_anchor_carries_dst_offset() {
        let berlin: ZoneSpec = "Europe/Berlin".parse().unwrap();

        let summer = berlin
            .at_noon(NaiveDate::from_ymd_opt(2024, 6, 21).unwrap())
            .unwrap();
        assert_eq!(summer.offset().local_minus_utc(), 2 * 3600);

        let winter = berlin
            .at_noon(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .unwrap();
        assert_eq!(winter.offset().local_minus_utc(), 3600);
    }

    #[test]
    fn test_system_zone_resolves() {
        // Any zone is acceptable in CI; it just has to produce a valid anchor
        let zone = ZoneSpec::system();
        assert!(
            zone.at_noon(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap())
                .is_ok()
        );
    }
}
