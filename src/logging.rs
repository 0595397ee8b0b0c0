#![cfg(feature = "std")]

use crate::config::{LOG_ENV_VAR, LOG_FILE_ENV_VAR};
use log::{LevelFilter, Metadata, Record};
use std::env;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::Mutex;

/// Writes records to a log file when one is configured, else to stderr.
/// The terminal UI owns stdout, so records never go there.
struct SimpleLogger {
    file: Mutex<Option<File>>,
}

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("{} [{}] {}", record.level(), record.target(), record.args());
        match self.file.lock() {
            Ok(mut guard) => match guard.as_mut() {
                Some(file) => {
                    let _ = writeln!(file, "{}", line);
                }
                None => eprintln!("{}", line),
            },
            Err(_) => eprintln!("{}", line),
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

/// Parse a level filter, falling back to `warn`.
fn parse_level(value: Option<String>) -> LevelFilter {
    value
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(LevelFilter::Warn)
}

fn open_log_file(path: Option<&str>) -> io::Result<Option<File>> {
    path.map(|p| OpenOptions::new().create(true).append(true).open(p))
        .transpose()
}

/// Initialize logging with a level taken from the `TICTACTOE_LOG` environment
/// variable. Defaults to `warn` if the variable is not set or invalid.
/// `TICTACTOE_LOG_FILE` redirects records into the named file; if that file
/// cannot be opened, the failure is reported and logging stays off.
pub fn init_logging() {
    let level = parse_level(env::var(LOG_ENV_VAR).ok());
    let path = env::var(LOG_FILE_ENV_VAR).ok();
    let file = match open_log_file(path.as_deref()) {
        Ok(file) => file,
        Err(err) => {
            // falling back to stderr would garble the raw-mode screen
            eprintln!(
                "cannot open log file {}: {}; logging disabled",
                path.unwrap_or_default(),
                err
            );
            return;
        }
    };
    let logger = SimpleLogger {
        file: Mutex::new(file),
    };
    let _ = log::set_boxed_logger(Box::new(logger)).map(|()| log::set_max_level(level));
}
