use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::{
    CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
};
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

use crate::config::LoggingSettings;
use crate::errors::DbError;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
const ROLL_SIZE: u64 = 10 * 1024 * 1024;
const KEEP: u32 = 7;

/// Target used by the `dev6!` macro.
pub const DEV6_TARGET: &str = "bsonfilter::dev6";

/// Initializes logging from `log4rs.yaml` in the working directory, if present.
pub fn init() -> Result<(), DbError> {
    let path = Path::new("log4rs.yaml");
    if path.exists() { init_path(path) } else { Ok(()) }
}

/// Initializes logging from a specific log4rs config file.
///
/// # Errors
/// Returns an error if the file cannot be read or a logger is already installed.
pub fn init_path(path: &Path) -> Result<(), DbError> {
    log4rs::init_file(path, log4rs::config::Deserializers::default())
        .map_err(|e| DbError::Config(format!("log4rs {}: {e}", path.display())))
}

#[must_use]
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Installs a stderr appender plus, when `settings.dir` is set, a rolling
/// `bsonfilter.log` in that directory. A configured `config_file` takes
/// precedence over both.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a logger is
/// already installed for the process.
pub fn configure_logging(settings: &LoggingSettings) -> Result<(), DbError> {
    if let Some(file) = &settings.config_file {
        return init_path(file);
    }
    let lvl = settings.level.as_deref().map_or(LevelFilter::Info, parse_level);
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    let mut builder =
        Config::builder().appender(Appender::builder().build("console", Box::new(console)));
    let mut root = Root::builder().appender("console");

    if let Some(dir) = &settings.dir {
        std::fs::create_dir_all(dir)?;
        let roller = FixedWindowRoller::builder()
            .build(&format!("{}", dir.join("bsonfilter.{}.log").display()), KEEP)
            .map_err(|e| DbError::Config(e.to_string()))?;
        let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE)), Box::new(roller));
        let file = RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build(dir.join("bsonfilter.log"), Box::new(policy))?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    let dev_level = if settings.dev6 { LevelFilter::Trace } else { LevelFilter::Off };
    let config = builder
        .logger(Logger::builder().build(DEV6_TARGET, dev_level))
        .build(root.build(lvl))
        .map_err(|e| DbError::Config(e.to_string()))?;
    log4rs::init_config(config).map_err(|e| DbError::Config(e.to_string()))?;
    Ok(())
}
