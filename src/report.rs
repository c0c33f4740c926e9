//! Progress reporting
//!
//! The fetcher and the search runner never print directly. They report
//! through a [`Reporter`], which the binary backs with colored console output
//! and tests back with a recorder.

use colored::{ColoredString, Colorize};
use tracing::{error, info, warn};

/// Kind of a reported message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Step completed
    Ok,
    /// Something worth attention that does not stop the run
    Warn,
    /// Failure
    Error,
    /// Informational line or list item
    List,
}

impl Status {
    /// Single character shown between brackets on the console
    pub fn symbol(&self) -> char {
        match self {
            Self::Ok => '+',
            Self::Warn => '!',
            Self::Error => 'x',
            Self::List => '*',
        }
    }

    fn icon(&self) -> String {
        let symbol: ColoredString = match self {
            Self::Ok => self.symbol().to_string().green(),
            Self::Warn => self.symbol().to_string().yellow(),
            Self::Error => self.symbol().to_string().red(),
            Self::List => self.symbol().to_string().cyan(),
        };
        format!("[{}]", symbol)
    }
}

/// Sink for user-facing progress messages
pub trait Reporter: Send + Sync {
    fn report(&self, status: Status, message: &str);

    fn ok(&self, message: &str) {
        self.report(Status::Ok, message);
    }

    fn warn(&self, message: &str) {
        self.report(Status::Warn, message);
    }

    fn error(&self, message: &str) {
        self.report(Status::Error, message);
    }

    fn list(&self, message: &str) {
        self.report(Status::List, message);
    }
}

/// Forwards messages to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, status: Status, message: &str) {
        match status {
            Status::Ok | Status::List => info!("{}", message),
            Status::Warn => warn!("{}", message),
            Status::Error => error!("{}", message),
        }
    }
}

/// Prints messages to stdout prefixed with a colored status icon
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, status: Status, message: &str) {
        println!("{} {}", status.icon(), message);
    }
}

/// Keeps every message in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: std::sync::Mutex<Vec<(Status, String)>>,
}

#[cfg(test)]
impl RecordingReporter {
    pub fn messages(&self) -> Vec<(Status, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn with_status(&self, status: Status) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(s, _)| *s == status)
            .map(|(_, m)| m)
            .collect()
    }
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn report(&self, status: Status, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((status, message.to_string()));
    }
}
