//! Text and CSV rendering of engine results.

use crate::types::{DailySchedule, GeoCoordinate, NextEventState, QiblaBearing};
use chrono::{DateTime, Duration, FixedOffset};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {} (use text or csv)", s)),
        }
    }
}

fn format_timestamp(dt: &DateTime<FixedOffset>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S%:z").to_string()
}

fn format_remaining(remaining: Duration) -> String {
    let total = remaining.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

pub fn print_schedules(schedules: &[DailySchedule], format: OutputFormat, headers: bool) {
    match format {
        OutputFormat::Text => {
            for (idx, schedule) in schedules.iter().enumerate() {
                if idx > 0 {
                    println!();
                }
                println!("date              : {}", schedule.date());
                println!("location          : {}", schedule.location());
                for instant in schedule.instants() {
                    println!(
                        "{:<18}: {}",
                        instant.kind.name(),
                        format_timestamp(&instant.timestamp)
                    );
                }
            }
        }
        OutputFormat::Csv => {
            if headers {
                println!("date,latitude,longitude,pre_dawn,sunrise,midday,afternoon,sunset,night");
            }
            for schedule in schedules {
                let times: Vec<String> = schedule
                    .instants()
                    .iter()
                    .map(|instant| format_timestamp(&instant.timestamp))
                    .collect();
                println!(
                    "{},{:.5},{:.5},{}",
                    schedule.date(),
                    schedule.location().latitude(),
                    schedule.location().longitude(),
                    times.join(",")
                );
            }
        }
    }
}

pub fn print_qibla(origin: GeoCoordinate, bearing: QiblaBearing, format: OutputFormat, headers: bool) {
    match format {
        OutputFormat::Text => {
            println!("location          : {}", origin);
            println!("qibla             : {}", bearing);
        }
        OutputFormat::Csv => {
            if headers {
                println!("latitude,longitude,qibla");
            }
            println!(
                "{:.5},{:.5},{:.5}",
                origin.latitude(),
                origin.longitude(),
                bearing.degrees()
            );
        }
    }
}

pub fn print_next(state: &NextEventState, format: OutputFormat, headers: bool) {
    match format {
        OutputFormat::Text => {
            println!("as of             : {}", format_timestamp(&state.as_of));
            println!("upcoming          : {}", state.upcoming.kind);
            println!("at                : {}", format_timestamp(&state.upcoming.timestamp));
            println!("remaining         : {}", format_remaining(state.remaining));
        }
        OutputFormat::Csv => {
            if headers {
                println!("as_of,upcoming,at,remaining_seconds");
            }
            println!(
                "{},{},{},{}",
                format_timestamp(&state.as_of),
                state.upcoming.kind,
                format_timestamp(&state.upcoming.timestamp),
                state.remaining.num_seconds().max(0)
            );
        }
    }
}
