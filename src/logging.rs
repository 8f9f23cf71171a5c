#![cfg(feature = "std")]
//! Stderr logger configured from `GRIDLOCK_LOG`.
//!
//! The variable holds a default level and optional per-module overrides,
//! e.g. `warn,gridlock::sync=debug`. The most specific matching module
//! prefix wins.

use log::{LevelFilter, Metadata, Record};
use std::env;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "GRIDLOCK_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Filter {
    default: LevelFilter,
    /// Sorted longest prefix first.
    modules: Vec<(String, LevelFilter)>,
}

impl Filter {
    fn parse(value: Option<&str>) -> Self {
        let mut default = LevelFilter::Info;
        let mut modules = Vec::new();
        for part in value.unwrap_or("").split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.split_once('=') {
                Some((module, level)) => {
                    if let Ok(level) = level.trim().parse() {
                        modules.push((module.trim().to_string(), level));
                    }
                }
                None => {
                    if let Ok(level) = part.parse() {
                        default = level;
                    }
                }
            }
        }
        modules.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { default, modules }
    }

    fn level_for(&self, target: &str) -> LevelFilter {
        self.modules
            .iter()
            .find(|(module, _)| {
                target == module
                    || target
                        .strip_prefix(module.as_str())
                        .is_some_and(|rest| rest.starts_with("::"))
            })
            .map(|(_, level)| *level)
            .unwrap_or(self.default)
    }

    fn max_level(&self) -> LevelFilter {
        self.modules
            .iter()
            .map(|(_, level)| *level)
            .fold(self.default, Ord::max)
    }
}

struct StderrLogger {
    filter: Filter,
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter.level_for(metadata.target())
    }

    // stdout belongs to the terminal board view.
    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} [{}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Install the stderr logger. Later calls keep the first logger.
pub fn init_logging() {
    let filter = Filter::parse(env::var(LOG_ENV).ok().as_deref());
    let max = filter.max_level();
    if log::set_boxed_logger(Box::new(StderrLogger { filter })).is_ok() {
        log::set_max_level(max);
    }
}
