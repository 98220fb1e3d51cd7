//! Service state (verdict) and the threshold decision policy.
//!
//! Exit codes and level labels follow the monitoring-plugin contract and are
//! consumed by the supervisor; they must not change.

/// Verdict of a single check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ServiceState {
    Ok,
    Warning,
    Critical,
    Unknown,
    ConfigError,
}

impl ServiceState {
    /// Process exit status for this verdict.
    pub fn exit_code(self) -> i32 {
        match self {
            ServiceState::Ok => 0,
            ServiceState::Warning => 1,
            ServiceState::Critical => 2,
            ServiceState::Unknown => 3,
            ServiceState::ConfigError => 4,
        }
    }

    /// Textual level used as the status line prefix.
    pub fn label(self) -> &'static str {
        match self {
            ServiceState::Ok => "OK",
            ServiceState::Warning => "WARNING",
            ServiceState::Critical => "CRITICAL",
            ServiceState::Unknown => "UNKNOWN",
            ServiceState::ConfigError => "ERROR",
        }
    }

    /// True for the diagnostic states that carry an error message instead of
    /// a percentage.
    pub fn is_diagnostic(self) -> bool {
        matches!(self, ServiceState::Unknown | ServiceState::ConfigError)
    }
}

/// Map a percentage and the optional thresholds to a verdict.
///
/// Critical is checked before warning so that when both thresholds are met,
/// critical wins. A threshold set to 0 is present and fires at any
/// percentage; thresholds are opt-in, so with neither supplied the verdict
/// is always OK. The engine never cross-checks warning against critical;
/// that validation belongs to the CLI layer.
pub fn determine_state(percentage: u8, warning: Option<u8>, critical: Option<u8>) -> ServiceState {
    if critical.is_some_and(|c| percentage >= c) {
        return ServiceState::Critical;
    }
    if warning.is_some_and(|w| percentage >= w) {
        return ServiceState::Warning;
    }
    ServiceState::Ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ServiceState::Ok.exit_code(), 0);
        assert_eq!(ServiceState::Warning.exit_code(), 1);
        assert_eq!(ServiceState::Critical.exit_code(), 2);
        assert_eq!(ServiceState::Unknown.exit_code(), 3);
        assert_eq!(ServiceState::ConfigError.exit_code(), 4);
    }

    #[test]
    fn test_no_thresholds_is_always_ok() {
        assert_eq!(determine_state(0, None, None), ServiceState::Ok);
        assert_eq!(determine_state(100, None, None), ServiceState::Ok);
    }

    #[test]
    fn test_warning_threshold() {
        assert_eq!(determine_state(99, Some(100), None), ServiceState::Ok);
        assert_eq!(determine_state(100, Some(1), None), ServiceState::Warning);
        assert_eq!(determine_state(20, Some(20), None), ServiceState::Warning);
    }

    #[test]
    fn test_critical_overrides_warning() {
        for pct in [10u8, 50, 100] {
            assert_eq!(
                determine_state(pct, Some(0), Some(10)),
                ServiceState::Critical
            );
        }
        // Below critical, warning still applies.
        assert_eq!(
            determine_state(9, Some(0), Some(10)),
            ServiceState::Warning
        );
    }

    #[test]
    fn test_zero_threshold_is_present() {
        // A configured 0 fires at any percentage; it is not "absent".
        assert_eq!(determine_state(0, Some(0), None), ServiceState::Warning);
        assert_eq!(determine_state(0, None, Some(0)), ServiceState::Critical);
    }

    #[test]
    fn test_diagnostic_states() {
        assert!(ServiceState::Unknown.is_diagnostic());
        assert!(ServiceState::ConfigError.is_diagnostic());
        assert!(!ServiceState::Ok.is_diagnostic());
        assert!(!ServiceState::Warning.is_diagnostic());
        assert!(!ServiceState::Critical.is_diagnostic());
    }
}
