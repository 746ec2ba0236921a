//! Prayer schedule calculator CLI - entry point.

use minaret::cli::{self, CliError, Command, Params};
use minaret::timezone::ZoneSpec;
use minaret::tracker::NextEventTracker;
use minaret::{geo, output, series, solar};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    match cli::parse_cli(args).and_then(run) {
        Ok(()) => {}
        Err(CliError::Exit(message)) => {
            println!("{}", message);
        }
        Err(CliError::Message(message)) => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
    }
}

fn run(params: Params) -> Result<(), CliError> {
    let zone = params.zone.clone().unwrap_or_else(ZoneSpec::system);

    match params.command {
        Command::Qibla => {
            let bearing = geo::qibla(params.location);
            output::print_qibla(params.location, bearing, params.format, params.headers);
        }
        Command::Schedule => {
            let start = params.date.unwrap_or_else(|| zone.today());
            let series =
                series::generate_series(params.location, start, params.days, &zone, &params.config)?;
            output::print_schedules(series.schedules(), params.format, params.headers);
        }
        Command::Next => {
            let today_date = params.date.unwrap_or_else(|| zone.today());
            let tomorrow_date = today_date
                .succ_opt()
                .ok_or_else(|| CliError::Message(format!("calendar overflow after {}", today_date)))?;

            let today = solar::compute(params.location, today_date, &zone, &params.config)?;
            let tomorrow = solar::compute(params.location, tomorrow_date, &zone, &params.config)?;

            let mut tracker = NextEventTracker::new();
            let state = tracker.tick(zone.now(), &today, Some(&tomorrow))?;
            output::print_next(&state, params.format, params.headers);
        }
    }

    Ok(())
}
