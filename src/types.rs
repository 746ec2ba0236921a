//! Core value types shared by all engine components.

use crate::error::{Error, Result};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use std::fmt;

/// A validated geographic position. Out-of-range values are rejected at
/// construction and never reach the calculation code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    /// The Kaaba in Mecca, the reference point for qibla bearings.
    pub const KAABA: GeoCoordinate = GeoCoordinate {
        latitude: 21.3891,
        longitude: 39.8579,
    };

    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::InvalidCoordinate(format!(
                "latitude {} out of range [-90, 90]",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidCoordinate(format!(
                "longitude {} out of range [-180, 180]",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// The six daily events, in the fixed order they occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InstantKind {
    PreDawn,
    Sunrise,
    Midday,
    Afternoon,
    Sunset,
    Night,
}

impl InstantKind {
    pub const ALL: [InstantKind; 6] = [
        InstantKind::PreDawn,
        InstantKind::Sunrise,
        InstantKind::Midday,
        InstantKind::Afternoon,
        InstantKind::Sunset,
        InstantKind::Night,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InstantKind::PreDawn => "pre-dawn",
            InstantKind::Sunrise => "sunrise",
            InstantKind::Midday => "midday",
            InstantKind::Afternoon => "afternoon",
            InstantKind::Sunset => "sunset",
            InstantKind::Night => "night",
        }
    }
}

impl fmt::Display for InstantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One event of a daily schedule: a kind plus its absolute timestamp
/// (date, time and UTC offset).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleInstant {
    pub kind: InstantKind,
    pub timestamp: DateTime<FixedOffset>,
}

/// The six instants for one (date, location) pair. Immutable once produced;
/// a new date or location requires a new schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySchedule {
    date: NaiveDate,
    location: GeoCoordinate,
    instants: [ScheduleInstant; 6],
}

impl DailySchedule {
    /// Builds a schedule, enforcing the kind order and strictly increasing
    /// timestamps. This is the only way to construct one, so a consumer
    /// rebuilding schedules from a cache cannot introduce an out-of-order day.
    pub fn from_instants(
        date: NaiveDate,
        location: GeoCoordinate,
        instants: [ScheduleInstant; 6],
    ) -> Result<Self> {
        for (instant, expected) in instants.iter().zip(InstantKind::ALL) {
            if instant.kind != expected {
                return Err(Error::InvalidSchedule(format!(
                    "expected {} at position of {}",
                    expected, instant.kind
                )));
            }
        }
        for pair in instants.windows(2) {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(Error::InvalidSchedule(format!(
                    "{} ({}) does not follow {} ({})",
                    pair[1].kind, pair[1].timestamp, pair[0].kind, pair[0].timestamp
                )));
            }
        }
        Ok(Self {
            date,
            location,
            instants,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn location(&self) -> GeoCoordinate {
        self.location
    }

    pub fn instants(&self) -> &[ScheduleInstant; 6] {
        &self.instants
    }

    pub fn instant(&self, kind: InstantKind) -> &ScheduleInstant {
        // ALL and the instants array share the same fixed order
        let idx = InstantKind::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or(0);
        &self.instants[idx]
    }

    /// First instant strictly after `now`, if the day is not yet exhausted.
    pub fn first_after(&self, now: DateTime<FixedOffset>) -> Option<ScheduleInstant> {
        self.instants
            .iter()
            .find(|instant| instant.timestamp > now)
            .copied()
    }
}

/// Consecutive daily schedules for one location: strictly increasing dates,
/// no gaps, no duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSeries {
    location: GeoCoordinate,
    schedules: Vec<DailySchedule>,
}

impl ScheduleSeries {
    pub(crate) fn new(location: GeoCoordinate, schedules: Vec<DailySchedule>) -> Self {
        Self {
            location,
            schedules,
        }
    }

    pub fn location(&self) -> GeoCoordinate {
        self.location
    }

    pub fn schedules(&self) -> &[DailySchedule] {
        &self.schedules
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}

/// A mosque (or any ranked point), owned by the directory collaborator.
/// Distance is attached per ranking call, never stored here.
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    pub id: String,
    pub name: String,
    pub location: GeoCoordinate,
}

/// Compass bearing toward the Kaaba, degrees from true north in [0, 360).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QiblaBearing(f64);

impl QiblaBearing {
    pub(crate) fn from_degrees(degrees: f64) -> Self {
        let wrapped = degrees.rem_euclid(360.0);
        // rem_euclid of a tiny negative rounds to exactly 360
        Self(if wrapped >= 360.0 { 0.0 } else { wrapped })
    }

    pub fn degrees(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for QiblaBearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}°", self.0)
    }
}

/// Snapshot produced by the next-event tracker on each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NextEventState {
    pub as_of: DateTime<FixedOffset>,
    pub upcoming: ScheduleInstant,
    pub remaining: Duration,
}
