//! System-level preflight checks.
//!
//! A millisecond-scale delay survives most environments, but frequency
//! scaling, virtualization and a busy machine all widen the spread of the
//! per-candidate means. None of these checks is critical.

use serde::{Deserialize, Serialize};

/// 1-minute load average above which the machine is considered busy.
const LOAD_THRESHOLD: f64 = 1.0;

/// Warning from system checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SystemWarning {
    /// CPU frequency scaling is not set to performance mode.
    CpuGovernorNotPerformance {
        /// Current governor setting.
        current: String,
    },

    /// Running under a hypervisor.
    VirtualMachineDetected,

    /// High system load detected.
    HighSystemLoad {
        /// Current 1-minute load average.
        load_average: f64,
        /// Threshold exceeded.
        threshold: f64,
    },
}

impl SystemWarning {
    /// System warnings are informational only.
    pub fn is_critical(&self) -> bool {
        false
    }

    /// Get a human-readable description of the warning.
    pub fn description(&self) -> String {
        match self {
            SystemWarning::CpuGovernorNotPerformance { current } => format!(
                "CPU frequency governor is '{}'; 'performance' gives steadier timings.",
                current
            ),
            SystemWarning::VirtualMachineDetected => {
                "Running in a virtual machine. Scheduling jitter may blur the timing signal."
                    .to_string()
            }
            SystemWarning::HighSystemLoad {
                load_average,
                threshold,
            } => format!(
                "High system load: {:.2} (threshold: {:.2}). Contention adds noise.",
                load_average, threshold
            ),
        }
    }
}

/// Perform all system checks.
///
/// On platforms other than Linux, returns an empty vector.
pub fn system_check() -> Vec<SystemWarning> {
    #[allow(unused_mut)]
    let mut warnings = Vec::new();

    #[cfg(target_os = "linux")]
    {
        warnings.extend(linux::cpu_governor());
        warnings.extend(linux::virtual_machine());
        warnings.extend(linux::load());
    }

    warnings
}

/// Parse the 1-minute load average from `/proc/loadavg` contents.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_load_average(contents: &str) -> Option<f64> {
    contents.split_whitespace().next()?.parse().ok()
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn load_warning(load_average: f64) -> Option<SystemWarning> {
    (load_average > LOAD_THRESHOLD).then_some(SystemWarning::HighSystemLoad {
        load_average,
        threshold: LOAD_THRESHOLD,
    })
}

#[cfg(target_os = "linux")]
mod linux {
    use super::{load_warning, parse_load_average, SystemWarning};

    fn read_trimmed(path: &str) -> Option<String> {
        std::fs::read_to_string(path)
            .ok()
            .map(|s| s.trim().to_lowercase())
    }

    pub(super) fn cpu_governor() -> Option<SystemWarning> {
        // Missing cpufreq (containers, VMs) is not worth a warning.
        let governor = read_trimmed("/sys/devices/system/cpu/cpu0/cpufreq/scaling_governor")?;
        (governor != "performance").then_some(SystemWarning::CpuGovernorNotPerformance {
            current: governor,
        })
    }

    pub(super) fn virtual_machine() -> Option<SystemWarning> {
        let cpuinfo = read_trimmed("/proc/cpuinfo")?;
        cpuinfo
            .contains("hypervisor")
            .then_some(SystemWarning::VirtualMachineDetected)
    }

    pub(super) fn load() -> Option<SystemWarning> {
        let contents = read_trimmed("/proc/loadavg")?;
        load_warning(parse_load_average(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_check_runs() {
        // Just verify it doesn't panic
        let _warnings = system_check();
    }

    #[test]
    fn test_parse_load_average() {
        assert_eq!(parse_load_average("0.52 0.58 0.59 1/467 12345"), Some(0.52));
        assert_eq!(parse_load_average(""), None);
        assert_eq!(parse_load_average("busy"), None);
    }

    #[test]
    fn test_load_warning_threshold() {
        assert!(load_warning(0.5).is_none());
        let warning = load_warning(2.5).expect("2.5 exceeds the threshold");
        assert!(warning.description().contains("2.50"));
    }

    #[test]
    fn test_warnings_are_not_critical() {
        let warnings = [
            SystemWarning::CpuGovernorNotPerformance {
                current: "powersave".to_string(),
            },
            SystemWarning::VirtualMachineDetected,
            SystemWarning::HighSystemLoad {
                load_average: 2.0,
                threshold: 1.0,
            },
        ];

        for warning in &warnings {
            assert!(!warning.is_critical(), "System warnings should not be critical");
        }
        assert!(warnings[0].description().contains("powersave"));
        assert!(warnings[1].description().contains("virtual machine"));
    }
}
