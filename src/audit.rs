//! Audit trail of operator commands.
//!
//! Each wrapped command appends one line to a text file recording when it
//! ran, with which arguments and what it returned. Failing to write the line
//! never affects the command itself.

use chrono::Local;
use log::warn;
use std::fmt::Debug;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Appends audit lines to a file.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: Option<PathBuf>,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        AuditLog {
            path: Some(path.into()),
        }
    }

    /// An audit log that records nothing.
    pub fn disabled() -> Self {
        AuditLog { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Runs `f`, then records `operation`, `args` and its outcome.
    pub fn wrap<T: Debug>(&self, operation: &str, args: &str, f: impl FnOnce() -> T) -> T {
        let outcome = f();
        self.record(operation, args, &outcome);
        outcome
    }

    /// Appends one audit line. Write errors are reported on stderr and dropped.
    pub fn record<T: Debug>(&self, operation: &str, args: &str, outcome: &T) {
        let Some(path) = &self.path else {
            return;
        };

        let line = format!(
            "[{}] Operation '{}' executed with arguments ({}). Returned {:?}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            operation,
            args,
            outcome
        );

        if let Err(e) = append_line(path, &line) {
            warn!("Could not write audit log {}: {}", path.display(), e);
            if e.kind() == io::ErrorKind::PermissionDenied {
                eprintln!("Error: no permission to write the audit log.");
            } else {
                eprintln!("Error writing the audit log: {}", e);
            }
        }
    }
}

fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())
}
