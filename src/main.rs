use std::path::PathBuf;

use clap::Parser;
use log::{debug, error, LevelFilter};
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use thiserror::Error;

use holidayset::configuration::Configuration;
use holidayset::manager::managererror::ManagerError;
use holidayset::time::calendar::holidaycalendar::HolidayCalendar;
use holidayset::time::calendar::holidayerror::HolidayError;
use holidayset::time::calendar::holidayset::{HolidaySet, HolidaySetOptions};
use holidayset::time::calendar::holidaysetmanager::ConfiguredHolidaySet;
use holidayset::time::datekey::DateKey;

#[derive(Debug, Error)]
enum Error {
    #[error("Failed to configure logging: {0}")]
    LogConfig(#[from] log4rs::config::runtime::ConfigErrors),
    #[error("Failed to initialise logging: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error(transparent)]
    Manager(#[from] ManagerError),
    #[error(transparent)]
    Holiday(#[from] HolidayError)
}

/// Prints which of the given dates are holidays.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Country whose holidays to use.
    #[arg(long, default_value = "SE")]
    country: String,

    /// Year to populate up front; may be repeated.
    #[arg(long = "year")]
    years: Vec<i32>,

    /// Leave Sundays out.
    #[arg(long)]
    no_sundays: bool,

    /// Load holiday sets from this JSON file instead of using --country.
    #[arg(long, requires = "name")]
    config: Option<PathBuf>,

    /// Name of the holiday set in the --config file.
    #[arg(long, requires = "config")]
    name: Option<String>,

    /// Log what is being computed.
    #[arg(short, long)]
    verbose: bool,

    /// Dates, datetimes or Unix timestamps in seconds.
    #[arg(required = true)]
    dates: Vec<String>
}

fn init_logging(level: LevelFilter) -> Result<(), Error> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn holiday_set(args: &Args) -> Result<ConfiguredHolidaySet, Error> {
    if let (Some(config), Some(name)) = (&args.config, &args.name) {
        let configuration = Configuration::from_reader(config)?;
        return Ok(configuration.holiday_set(name)?);
    }

    let options = HolidaySetOptions::for_years(args.years.iter().copied()).include_sundays(!args.no_sundays);
    Ok(HolidaySet::for_country(&args.country, &options)?.into())
}

fn run(args: &Args) -> Result<(), Error> {
    let mut holidays = holiday_set(args)?;
    let keys = args.dates
        .iter()
        .map(|arg| arg.parse::<DateKey>())
        .collect::<Result<Vec<_>, _>>()?;
    let annotated = holidays.annotate(keys)?;
    debug!("{} holidays known after annotating", holidays.len());
    for (input, (d, label)) in args.dates.iter().zip(annotated) {
        if let Some(label) = label {
            println!("{}\t{}\t{}", input, d, label);
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    if let Err(err) = init_logging(level) {
        eprintln!("{err}");
        std::process::exit(1)
    }

    if let Err(err) = run(&args) {
        error!("{err}");
        std::process::exit(1)
    }
}
