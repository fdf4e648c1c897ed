//! Preflight checks run before an experiment.
//!
//! These checks help explain a failed recovery against the variable-time
//! comparator. They never stop an experiment.
//!
//! # Checks Performed
//!
//! - **Resolution**: per-byte delay against the clock resolution
//! - **Sleep granularity**: how far `DelayMode::Sleep` overshoots
//! - **System**: platform-specific checks (e.g., CPU governor on Linux)

mod resolution;
mod system;

pub use resolution::{resolution_check, sleep_granularity_check, ResolutionWarning};
pub use system::{system_check, SystemWarning};

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::measurement::Timer;

/// Result of running all preflight checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreflightResult {
    /// Warnings from the resolution and sleep granularity checks.
    pub resolution: Vec<ResolutionWarning>,

    /// Warnings from system checks.
    pub system: Vec<SystemWarning>,

    /// Whether any critical warning was found.
    pub has_critical: bool,
}

impl Default for PreflightResult {
    fn default() -> Self {
        Self::new()
    }
}

impl PreflightResult {
    /// Create an empty preflight result.
    pub fn new() -> Self {
        Self {
            resolution: Vec::new(),
            system: Vec::new(),
            has_critical: false,
        }
    }

    /// Add a resolution warning.
    pub fn add_resolution_warning(&mut self, warning: ResolutionWarning) {
        if warning.is_critical() {
            self.has_critical = true;
        }
        self.resolution.push(warning);
    }

    /// Add a system warning.
    pub fn add_system_warning(&mut self, warning: SystemWarning) {
        self.system.push(warning);
    }

    /// Check if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.resolution.is_empty() || !self.system.is_empty()
    }

    /// Descriptions of every warning, resolution warnings first.
    pub fn descriptions(&self) -> Vec<String> {
        self.resolution
            .iter()
            .map(ResolutionWarning::description)
            .chain(self.system.iter().map(SystemWarning::description))
            .collect()
    }
}

/// Run every preflight check for `config` using `timer`'s resolution.
pub fn run_all_checks(config: &Config, timer: &Timer) -> PreflightResult {
    let mut result = PreflightResult::new();

    if let Some(warning) = resolution_check(timer.resolution_secs(), config.per_byte_delay) {
        result.add_resolution_warning(warning);
    }
    if let Some(warning) = sleep_granularity_check(config.per_byte_delay, config.delay_mode) {
        result.add_resolution_warning(warning);
    }
    for warning in system_check() {
        result.add_system_warning(warning);
    }

    result
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_empty_result() {
        let result = PreflightResult::new();
        assert!(!result.has_warnings());
        assert!(!result.has_critical);
        assert!(result.descriptions().is_empty());
    }

    #[test]
    fn test_critical_resolution_warning_flags_result() {
        let mut result = PreflightResult::new();
        result.add_system_warning(SystemWarning::VirtualMachineDetected);
        assert!(!result.has_critical);

        result.add_resolution_warning(ResolutionWarning::InsufficientResolution {
            timer_resolution_secs: 1e-6,
            per_byte_delay_secs: 1e-6,
        });
        assert!(result.has_critical);
        assert!(result.has_warnings());

        let descriptions = result.descriptions();
        assert_eq!(descriptions.len(), 2);
        assert!(descriptions[0].contains("CRITICAL"));
    }

    #[test]
    fn test_run_all_checks_flags_tiny_delay() {
        let config = Config::quick().with_per_byte_delay(Duration::from_nanos(50));
        let timer = Timer::with_resolution(1e-7);
        let result = run_all_checks(&config, &timer);
        assert!(result.has_critical);
    }
}
