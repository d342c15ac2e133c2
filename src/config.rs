//! Runtime configuration of the simulator binary.

use std::env;
use std::path::PathBuf;

/// Environment variable naming the audit log file.
pub const AUDIT_LOG_ENV: &str = "BANK_SIM_AUDIT_LOG";

/// Audit log file used when nothing else is configured.
pub const DEFAULT_AUDIT_LOG: &str = "log.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub audit_log: PathBuf,
}

impl Config {
    /// Builds the configuration from the process arguments and environment.
    pub fn from_env() -> Self {
        Self::resolve(env::args().nth(1), env::var(AUDIT_LOG_ENV).ok())
    }

    /// The first argument wins over the environment, which wins over the default.
    pub fn resolve(arg: Option<String>, env_value: Option<String>) -> Self {
        let usable = |path: &String| !path.trim().is_empty();
        let audit_log = arg
            .filter(usable)
            .or_else(|| env_value.filter(usable))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_AUDIT_LOG));

        Config { audit_log }
    }
}
