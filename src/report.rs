//! Status line rendering: level prefix, human message, and perfdata.
//!
//! Both variants must be reproducible byte-for-byte; the supervisor parses
//! the line and the perfdata segment mechanically.

use crate::error::CheckError;
use crate::state::ServiceState;

/// Generate the perfdata segment: `|'Percentage delayed'=<value>%;<w>;<c>`.
///
/// `value` renders as the literal `U` when no percentage was computed;
/// absent thresholds render as empty strings, never as `0`.
pub fn perfdata(value: Option<u8>, warning: Option<u8>, critical: Option<u8>) -> String {
    let render = |v: Option<u8>| v.map(|n| n.to_string()).unwrap_or_default();
    let value = value.map_or_else(|| "U".to_string(), |n| n.to_string());
    format!(
        "|'Percentage delayed'={}%;{};{}",
        value,
        render(warning),
        render(critical)
    )
}

/// A completed metric report, ready to render.
#[derive(Debug, Clone)]
pub struct Report {
    pub state: ServiceState,
    pub percentage: u8,
    pub site_name: Option<String>,
    pub minutes: u32,
    pub warning: Option<u8>,
    pub critical: Option<u8>,
}

impl Report {
    /// Render the status line. The compact variant carries only the level
    /// and percentage; the verbose variant spells out the site and the
    /// minute threshold.
    pub fn render(&self, verbose: bool) -> String {
        let perfdata = perfdata(Some(self.percentage), self.warning, self.critical);

        if !verbose {
            return format!("{}: {}%{}", self.state.label(), self.percentage, perfdata);
        }

        // Omitted entirely when no name is available.
        let name_clause = match &self.site_name {
            Some(name) => format!("at {name} "),
            None => String::new(),
        };
        let minute_word = if self.minutes == 1 { "minute" } else { "minutes" };

        format!(
            "{}: {}% of the departures {}are delayed more than {} {}{}",
            self.state.label(),
            self.percentage,
            name_clause,
            self.minutes,
            minute_word,
            perfdata
        )
    }
}

/// Render a fatal diagnostic: `<LEVEL>: <message>`, no percentage, no
/// perfdata.
pub fn failure_line(error: &CheckError) -> String {
    format!("{}: {}", error.state().label(), error)
}

/// Render a configuration rejection, same shape as [`failure_line`] but with
/// the config-error level.
pub fn config_error_line(message: &str) -> String {
    format!("{}: {}", ServiceState::ConfigError.label(), message)
}
