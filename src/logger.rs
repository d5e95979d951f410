use std::{
    fmt::Display,
    fs::OpenOptions,
    io::{self, Write},
    path::Path
};

use env_logger::{Builder, Target, WriteStyle};
use log::Record;

/// Overrides the log filter, `env_logger` syntax.
pub const LOG_ENV: &str = "LEDTOGGLE_LOG";

/// A non-empty LEDTOGGLE_LOG wins, otherwise `warn` (`debug` with --verbose).
#[must_use]
pub fn filter_spec(env_value: Option<String>, verbose: bool) -> String {
    match env_value {
        Some(spec) if !spec.trim().is_empty() => spec,
        _ => if verbose { "debug" } else { "warn" }.to_owned()
    }
}

///
/// One line per record:
///   [2024-05-01T10:20:30Z] WARN EC didn't become ready after 3 attempts
///
/// # Errors
///
/// Passes through the errors of `out`.
///
pub fn write_record(out: &mut impl Write, timestamp: &impl Display, record: &Record) -> io::Result<()> {
    writeln!(out, "[{timestamp}] {} {}", record.level(), record.args())
}

fn builder(filter_spec: &str) -> Builder {
    let mut builder = Builder::new();
    builder.parse_filters(filter_spec);
    builder.format(|buf, record| {
        let timestamp = buf.timestamp_seconds();
        write_record(buf, &timestamp, record)
    });
    builder
}

///
/// Routes the `log` records into the append-only error log.
/// Falls back to stderr if the log file can't be opened.
///
pub fn init(log_path: &Path, verbose: bool) {
    let mut builder = builder(&filter_spec(std::env::var(LOG_ENV).ok(), verbose));

    match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(file) => {
            builder.target(Target::Pipe(Box::new(file))).write_style(WriteStyle::Never);
        }
        Err(err) => eprintln!("Unable to open the log file {}: {err}", log_path.display())
    }

    if let Err(err) = builder.try_init() {
        eprintln!("Unable to initialize the logger: {err}");
    }
}



#[cfg(test)]
mod tests {
    use log::{Level, LevelFilter};

    use super::*;

    fn max_level(env_value: Option<&str>, verbose: bool) -> LevelFilter {
        builder(&filter_spec(env_value.map(str::to_owned), verbose)).build().filter()
    }

    #[test]
    fn record_line_layout() {
        let mut out = Vec::new();
        write_record(
            &mut out,
            &"2026-10-16T04:30:41Z",
            &Record::builder()
                .args(format_args!("EC didn't become ready after {} attempts", 3))
                .level(Level::Warn)
                .build()
        ).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[2026-10-16T04:30:41Z] WARN EC didn't become ready after 3 attempts\n"
        );
    }

    #[test]
    fn warnings_only_by_default() {
        assert_eq!(filter_spec(None, false), "warn");
        assert_eq!(max_level(None, false), LevelFilter::Warn);
    }

    #[test]
    fn verbose_enables_debug() {
        assert_eq!(filter_spec(None, true), "debug");
        assert_eq!(max_level(None, true), LevelFilter::Debug);
    }

    #[test]
    fn environment_overrides_the_filter() {
        assert_eq!(max_level(Some("trace"), false), LevelFilter::Trace);
        assert_eq!(max_level(Some("error"), true), LevelFilter::Error);
        assert_eq!(max_level(Some("ec=debug"), false), LevelFilter::Debug);
    }

    #[test]
    fn empty_environment_value_is_ignored() {
        assert_eq!(filter_spec(Some(String::new()), false), "warn");
        assert_eq!(filter_spec(Some("  ".to_owned()), true), "debug");
    }
}
