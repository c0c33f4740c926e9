//! Result export
//!
//! Writes matched hosts as a single comma-separated line.

use crate::error::Result;
use crate::report::Reporter;
use crate::types::HostId;
use std::path::Path;

/// Render hosts as `a,b,c`
pub fn to_csv(hosts: &[HostId]) -> String {
    hosts
        .iter()
        .map(HostId::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Write hosts to `path`, replacing any existing file
pub fn write_csv<P: AsRef<Path>>(path: P, hosts: &[HostId]) -> Result<()> {
    std::fs::write(path, to_csv(hosts))?;
    Ok(())
}

/// Write hosts to `path` and report the outcome
///
/// A failed write is reported as an error and otherwise ignored; the matches
/// are already on screen and the run still counts as successful.
pub fn export_results(path: &Path, hosts: &[HostId], reporter: &dyn Reporter) -> bool {
    reporter.warn(&format!(
        "Attempting to write results to file: {}",
        path.display()
    ));
    match write_csv(path, hosts) {
        Ok(()) => {
            reporter.ok(&format!(
                "The results were successfully exported to: {}",
                path.display()
            ));
            true
        }
        Err(e) => {
            reporter.error(&format!("Failed to write file due to an error: {}", e));
            false
        }
    }
}
