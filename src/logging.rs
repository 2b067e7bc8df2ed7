//! Logging setup for host applications.
//!
//! The library logs through `log`; this wires those records into the
//! rolling file logger when the configuration names a directory.

use crate::config::ClientConfig;

pub const APP_NAME: &str = "EosDashboard";

/// Start the rolling logger under `config.log_dir`.
///
/// Returns `Ok(false)` without installing anything when no directory is
/// configured. Errors if a global logger is already installed.
pub fn init_logging(config: &ClientConfig) -> Result<bool, String> {
    let Some(dir) = config.log_dir.as_ref() else {
        return Ok(false);
    };
    rolling_logger::init_logger(dir, APP_NAME)?;
    let _ = rolling_logger::info(&format!(
        "eos-dashboard {} started, api {}",
        env!("CARGO_PKG_VERSION"),
        config.api_base
    ));
    Ok(true)
}

/// Most recent log lines, for an in-app log viewer
pub fn recent_log_lines() -> Vec<String> {
    rolling_logger::recent_lines()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_dir_installs_nothing() {
        let config = ClientConfig::default();
        assert_eq!(init_logging(&config), Ok(false));
        assert!(recent_log_lines().is_empty());
    }
}
