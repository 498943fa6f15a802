//! Logging bootstrap
//!
//! Diagnostics go to stderr so that stdout stays reserved for artifacts. Library crates
//! emit `event=<name> key=value` lines through the `log` facade; this module only decides
//! where they go and how verbose they are.

use flexi_logger::{Logger, LoggerHandle, WriteMode};

/// Level used when `--log-level` is absent
pub const DEFAULT_LEVEL: &str = "warn";

/// Start the stderr logger
///
/// The returned handle must stay alive for as long as logging is wanted.
///
/// # Errors
/// - Returns an error when `level` is unsupported.
/// - Returns an error when logger backend setup fails.
pub fn init_logging(level: &str) -> Result<LoggerHandle, String> {
    let level = normalize_level(level)?;
    Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_stderr()
        .write_mode(WriteMode::Direct)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))
}

pub fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}
