/// Logging bridge for termlayer
///
/// Routes every `log::` macro in the workspace to stderr so stdout stays
/// clean for command output. Level precedence:
/// - `--log-level` on the command line
/// - the `TERMLAYER_LOG` environment variable
/// - `warn`
///
/// Lines look like `[1700000000.123456] [WARN ] [termlayer_config::warnings] message`.
use parking_lot::Mutex;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable consulted when no level is given on the command line
pub const LOG_ENV_VAR: &str = "TERMLAYER_LOG";

/// Stderr logger
struct StderrLogger {
    out: Mutex<Box<dyn Write + Send>>,
}

impl StderrLogger {
    fn write_raw(&self, msg: &str) {
        let mut out = self.out.lock();
        let _ = out.write_all(msg.as_bytes());
        let _ = out.flush();
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.write_raw(&format_line(
            &get_timestamp(),
            record.level(),
            record.target(),
            &record.args().to_string(),
        ));
    }

    fn flush(&self) {
        let _ = self.out.lock().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

fn format_line(timestamp: &str, level: log::Level, target: &str, msg: &str) -> String {
    format!("[{}] [{:<5}] [{}] {}\n", timestamp, level, target, msg)
}

/// Parse a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`).
pub fn parse_level(text: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(text.trim()).ok()
}

/// Pick the effective level: explicit flag, then environment, then `warn`.
pub fn resolve_level(flag: Option<LevelFilter>, env: Option<&str>) -> LevelFilter {
    flag.or_else(|| env.and_then(parse_level))
        .unwrap_or(LevelFilter::Warn)
}

/// Install the stderr logger. Later calls only adjust the level.
pub fn init_log_bridge(flag: Option<LevelFilter>) {
    let env = std::env::var(LOG_ENV_VAR).ok();
    let level = resolve_level(flag, env.as_deref());

    let logger = LOGGER.get_or_init(|| StderrLogger {
        out: Mutex::new(Box::new(io::stderr())),
    });
    // Fails if some other logger got there first; keep that one.
    let _ = log::set_logger(logger);
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_level_precedence() {
        assert_eq!(
            resolve_level(Some(LevelFilter::Trace), Some("error")),
            LevelFilter::Trace
        );
        assert_eq!(resolve_level(None, Some("info")), LevelFilter::Info);
        assert_eq!(resolve_level(None, Some("nonsense")), LevelFilter::Warn);
        assert_eq!(resolve_level(None, None), LevelFilter::Warn);
    }

    #[test]
    fn test_format_line() {
        let line = format_line("1.000001", log::Level::Info, "termlayer", "hello");
        assert_eq!(line, "[1.000001] [INFO ] [termlayer] hello\n");
    }
}
