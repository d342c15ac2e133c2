//! Bank Simulator CLI
//!
//! Runs the operator menu on stdin/stdout over a fresh in-memory registry.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- [audit-log.txt]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `info` to control logging verbosity
//! - `BANK_SIM_AUDIT_LOG`: Audit log path when no argument is given

use bank_sim::{AuditLog, Config, Result, Shell};
use log::info;
use std::io;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::from_env();
    info!("Writing audit log to {}", config.audit_log.display());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock(), AuditLog::new(config.audit_log));
    shell.run()
}
