use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Environment variable that overrides the build-mode default level.
pub const LOG_LEVEL_VAR: &str = "RPS_LOG";

/// Writes log lines to stdout.
pub struct StdoutLogger;

/// Writes log lines to `<dir>/YYYY-MM-DD.log`, switching files at UTC midnight.
pub struct FileLogger {
    state: Mutex<DailyFile>,
}

struct DailyFile {
    dir: PathBuf,
    date: String,
    file: File,
}

impl DailyFile {
    fn open(dir: &Path, date: &str) -> std::io::Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(format!("{date}.log")))
    }

    fn roll_if_stale(&mut self) {
        let today = format_today();
        if today == self.date {
            return;
        }
        match Self::open(&self.dir, &today) {
            Ok(file) => {
                self.file = file;
                self.date = today;
            }
            // keep writing to the previous day's file
            Err(e) => eprintln!("cannot open log file for {today}: {e}"),
        }
    }
}

impl FileLogger {
    /// Create the directory if needed and open today's file for appending.
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let date = format_today();
        let file = DailyFile::open(&dir, &date)?;
        Ok(Self {
            state: Mutex::new(DailyFile { dir, date, file }),
        })
    }
}

/// `TIMESTAMP [LEVEL] [thread:ID] file:line - message`
pub fn format_record(record: &Record) -> String {
    format!(
        "{} [{}] [thread:{:?}] {}:{} - {}",
        format_timestamp(),
        record.level(),
        std::thread::current().id(),
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0),
        record.args()
    )
}

impl Log for StdoutLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        println!("{}", format_record(record));
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

impl Log for FileLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.roll_if_stale();

        let line = format_record(record);
        if let Err(e) = writeln!(state.file, "{line}") {
            eprintln!("log write failed ({e}): {line}");
        }
    }

    fn flush(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.file.flush().ok();
    }
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS`.
pub fn format_timestamp() -> String {
    let secs = unix_seconds();
    let (year, month, day) = civil_from_days((secs / 86400) as i64);
    let time_of_day = secs % 86400;
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        year,
        month,
        day,
        time_of_day / 3600,
        (time_of_day % 3600) / 60,
        time_of_day % 60
    )
}

/// Current UTC date as `YYYY-MM-DD`.
pub fn format_today() -> String {
    let (year, month, day) = civil_from_days((unix_seconds() / 86400) as i64);
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// Days since the Unix epoch to a civil (year, month, day).
/// Howard Hinnant's algorithm, http://howardhinnant.github.io/date_algorithms.html
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    (if m <= 2 { y + 1 } else { y }, m, d)
}

/// Parse a level name as accepted in `RPS_LOG`.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    match name.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// `RPS_LOG` if set and valid, otherwise Debug in debug builds and Info in release.
pub fn max_level() -> LevelFilter {
    let default = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    std::env::var(LOG_LEVEL_VAR)
        .ok()
        .and_then(|v| parse_level(&v))
        .unwrap_or(default)
}

/// Install `StdoutLogger` as the global logger.
///
/// Only the first logger installed in a process takes effect; later calls are ignored.
pub fn init_stdout_logger() {
    static LOGGER: StdoutLogger = StdoutLogger;
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(max_level());
    }
}

/// Install a `FileLogger` writing into `dir` as the global logger.
///
/// Fails if the directory or today's file cannot be created.
pub fn init_file_logger(dir: impl Into<PathBuf>) -> std::io::Result<()> {
    let logger = FileLogger::new(dir)?;
    // set_logger needs a &'static; leaked once per process
    if log::set_logger(Box::leak(Box::new(logger))).is_ok() {
        log::set_max_level(max_level());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_civil_from_days_epoch() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
    }

    #[test]
    fn test_civil_from_days_leap_day() {
        assert_eq!(civil_from_days(11016), (2000, 2, 29));
    }

    #[test]
    fn test_civil_from_days_new_years_eve() {
        assert_eq!(civil_from_days(20088), (2024, 12, 31));
    }

    #[test]
    fn test_timestamp_layout() {
        let ts = format_timestamp();
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], "T");
        assert_eq!(&ts[16..17], ":");
    }

    #[test]
    fn test_file_logger_rolls_to_new_day() {
        let dir = std::env::temp_dir().join(format!("rps-log-test-{}-roll", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let logger = FileLogger::new(&dir).unwrap();
        let stale = dir.join("1999-01-01.log");
        {
            let mut state = logger.state.lock().unwrap();
            state.date = "1999-01-01".to_string();
            state.file = DailyFile::open(&dir, "1999-01-01").unwrap();
        }

        logger.log(
            &log::RecordBuilder::new()
                .level(log::Level::Info)
                .file(Some("roll.rs"))
                .line(Some(7))
                .args(format_args!("after midnight"))
                .build(),
        );
        logger.flush();

        let today = dir.join(format!("{}.log", format_today()));
        assert!(stale.exists());
        assert_eq!(fs::read_to_string(&stale).unwrap(), "");
        assert!(fs::read_to_string(&today).unwrap().contains("after midnight"));
        assert_eq!(logger.state.lock().unwrap().date, format_today());

        fs::remove_dir_all(&dir).ok();
    }
}
