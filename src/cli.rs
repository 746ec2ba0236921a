//! Command-line parsing and validation.

use crate::error::Error;
use crate::output::OutputFormat;
use crate::solar::{AngleConfig, CalculationMethod};
use crate::timezone::ZoneSpec;
use crate::types::GeoCoordinate;
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// Print message to stdout and exit with code 0 (help/version).
    Exit(String),
    /// Print message to stderr and exit with code 1.
    Message(String),
}

impl From<String> for CliError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

impl From<&str> for CliError {
    fn from(value: &str) -> Self {
        Self::Message(value.to_string())
    }
}

impl From<Error> for CliError {
    fn from(value: Error) -> Self {
        Self::Message(value.to_string())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Exit(msg) | CliError::Message(msg) => write!(f, "{}", msg),
        }
    }
}

type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Schedule,
    Qibla,
    Next,
}

#[derive(Debug)]
pub struct Params {
    pub location: GeoCoordinate,
    pub date: Option<NaiveDate>,
    pub command: Command,
    pub zone: Option<ZoneSpec>,
    pub config: AngleConfig,
    pub days: u32,
    pub format: OutputFormat,
    pub headers: bool,
}

pub fn usage() -> String {
    format!(
        "minaret {} - location-aware prayer schedule calculator

Usage: minaret [OPTIONS] <latitude> <longitude> [date] <command>

Commands:
  schedule    daily prayer times (one day, or --days=N consecutive days)
  qibla       compass bearing to the Kaaba
  next        upcoming instant and countdown against the current clock

Arguments:
  <latitude>   decimal degrees, -90 to 90
  <longitude>  decimal degrees, -180 to 180
  [date]       YYYY-MM-DD (default: today in the selected timezone)

Options:
  --timezone=<tz>      +HH:MM offset or IANA name (default: system timezone)
  --method=<name>      mwl, isna, egyptian or karachi (default: mwl)
  --fajr-angle=<deg>   override the pre-dawn depression angle
  --isha-angle=<deg>   override the night depression angle
  --asr=<method>       standard or hanafi (default: standard)
  --days=<n>           number of consecutive days for schedule (default: 1)
  --deltat[=<sec>]     pin delta-T in seconds (default: estimate per date)
  --format=<fmt>       text or csv (default: text)
  --headers            emit CSV header row (default)
  --no-headers         suppress CSV header row
  --help               show this help
  --version            show version",
        env!("CARGO_PKG_VERSION")
    )
}

struct RawOptions {
    zone: Option<ZoneSpec>,
    method: CalculationMethod,
    fajr_angle: Option<f64>,
    isha_angle: Option<f64>,
    asr: Option<String>,
    days: Option<u32>,
    deltat: Option<f64>,
    format: OutputFormat,
    headers: bool,
}

impl Default for RawOptions {
    fn default() -> Self {
        Self {
            zone: None,
            method: CalculationMethod::MuslimWorldLeague,
            fajr_angle: None,
            isha_angle: None,
            asr: None,
            days: None,
            deltat: None,
            format: OutputFormat::Text,
            headers: true,
        }
    }
}

pub fn parse_cli(args: Vec<String>) -> CliResult<Params> {
    let mut options = RawOptions::default();
    let mut positionals: Vec<String> = Vec::new();

    for arg in args.into_iter().skip(1) {
        if arg == "--help" || arg == "-h" {
            return Err(CliError::Exit(usage()));
        }
        if arg == "--version" || arg == "-V" {
            return Err(CliError::Exit(format!(
                "minaret {}",
                env!("CARGO_PKG_VERSION")
            )));
        }
        if let Some(option) = arg.strip_prefix("--") {
            apply_option(option, &mut options)?;
        } else {
            positionals.push(arg);
        }
    }

    let command = match positionals.last().map(String::as_str) {
        Some("schedule") => Command::Schedule,
        Some("qibla") => Command::Qibla,
        Some("next") => Command::Next,
        Some(other) => {
            return Err(format!(
                "Unknown command: {} (use schedule, qibla or next)",
                other
            )
            .into());
        }
        None => return Err(CliError::Exit(usage())),
    };
    positionals.pop();

    let (latitude, longitude, date) = match positionals.len() {
        2 | 3 => {
            let latitude = parse_f64("latitude", &positionals[0])?;
            let longitude = parse_f64("longitude", &positionals[1])?;
            let date = match positionals.get(2) {
                Some(raw) => Some(
                    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                        .map_err(|_| format!("Invalid date: {} (expected YYYY-MM-DD)", raw))?,
                ),
                None => None,
            };
            (latitude, longitude, date)
        }
        0 | 1 => return Err("Missing arguments: <latitude> <longitude> required".into()),
        _ => return Err("Too many arguments".into()),
    };

    let location = GeoCoordinate::new(latitude, longitude)?;

    let days = options.days.unwrap_or(1);
    if days == 0 {
        return Err("--days must be at least 1".into());
    }
    if options.days.is_some() && command != Command::Schedule {
        return Err("--days only applies to the schedule command".into());
    }

    let mut config = options.method.angles();
    if let Some(angle) = options.fajr_angle {
        config.pre_dawn_angle = angle;
    }
    if let Some(angle) = options.isha_angle {
        config.night_angle = angle;
    }
    if let Some(asr) = &options.asr {
        config.afternoon_shadow = asr.parse()?;
    }
    config.delta_t = options.deltat;

    Ok(Params {
        location,
        date,
        command,
        zone: options.zone,
        config,
        days,
        format: options.format,
        headers: options.headers,
    })
}

fn apply_option(option: &str, options: &mut RawOptions) -> CliResult<()> {
    let (name, value) = match option.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (option, None),
    };

    match name {
        "timezone" => {
            options.zone = Some(required_value(name, value)?.parse::<ZoneSpec>()?);
        }
        "method" => {
            options.method = required_value(name, value)?.parse::<CalculationMethod>()?;
        }
        "fajr-angle" => {
            options.fajr_angle = Some(parse_f64(name, required_value(name, value)?)?);
        }
        "isha-angle" => {
            options.isha_angle = Some(parse_f64(name, required_value(name, value)?)?);
        }
        "asr" => {
            options.asr = Some(required_value(name, value)?.to_string());
        }
        "days" => {
            let raw = required_value(name, value)?;
            options.days = Some(
                raw.parse::<u32>()
                    .map_err(|_| format!("Invalid days value: {}", raw))?,
            );
        }
        "deltat" => {
            // bare --deltat keeps the per-date estimate
            options.deltat = match value {
                Some(raw) => Some(parse_f64(name, raw)?),
                None => None,
            };
        }
        "format" => {
            options.format = required_value(name, value)?
                .parse::<OutputFormat>()
                .map_err(CliError::from)?;
        }
        "headers" => options.headers = true,
        "no-headers" => options.headers = false,
        _ => return Err(format!("Unknown option: --{}", name).into()),
    }
    Ok(())
}

fn required_value<'a>(name: &str, value: Option<&'a str>) -> CliResult<&'a str> {
    value.ok_or_else(|| CliError::Message(format!("Option --{} requires a value", name)))
}

fn parse_f64(name: &str, value: &str) -> CliResult<f64> {
    value
        .parse::<f64>()
        .map_err(|_| CliError::Message(format!("Invalid {} value: {}", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solar::AfternoonShadow;

    fn parse(args: &[&str]) -> CliResult<Params> {
        let mut full = vec!["minaret".to_string()];
        full.extend(args.iter().map(|s| s.to_string()));
        parse_cli(full)
    }

    #[test]
    fn test_basic_schedule_invocation() {
        let params = parse(&["41.0082", "28.9784", "2024-06-21", "schedule"]).unwrap();
        assert_eq!(params.command, Command::Schedule);
        assert_eq!(params.location.latitude(), 41.0082);
        assert_eq!(
            params.date,
            Some(NaiveDate::from_ymd_opt(2024, 6, 21).unwrap())
        );
        assert_eq!(params.days, 1);
        // MWL default
        assert_eq!(params.config.pre_dawn_angle, 18.0);
        assert_eq!(params.config.night_angle, 17.0);
    }

    #[test]
    fn test_method_and_overrides() {
        let params = parse(&[
            "--method=isna",
            "--isha-angle=16.5",
            "--asr=hanafi",
            "41.0",
            "29.0",
            "schedule",
        ])
        .unwrap();
        assert_eq!(params.config.pre_dawn_angle, 15.0);
        assert_eq!(params.config.night_angle, 16.5);
        assert_eq!(params.config.afternoon_shadow, AfternoonShadow::Hanafi);
    }

    #[test]
    fn test_qibla_needs_no_date() {
        let params = parse(&["21.3891", "39.8579", "qibla"]).unwrap();
        assert_eq!(params.command, Command::Qibla);
        assert!(params.date.is_none());
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(matches!(
            parse(&["91.0", "0.0", "schedule"]),
            Err(CliError::Message(_))
        ));
        assert!(matches!(
            parse(&["41.0", "29.0", "fly"]),
            Err(CliError::Message(_))
        ));
        assert!(matches!(
            parse(&["--days=0", "41.0", "29.0", "schedule"]),
            Err(CliError::Message(_))
        ));
        assert!(matches!(
            parse(&["--days=3", "41.0", "29.0", "qibla"]),
            Err(CliError::Message(_))
        ));
        assert!(matches!(
            parse(&["--frobnicate", "41.0", "29.0", "schedule"]),
            Err(CliError::Message(_))
        ));
    }

    #[test]
    fn test_help_exits_cleanly() {
        assert!(matches!(parse(&["--help"]), Err(CliError::Exit(_))));
        assert!(matches!(parse(&[]), Err(CliError::Exit(_))));
    }
}
