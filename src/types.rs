//! Type aliases and common types.

use serde::{Deserialize, Serialize};

use crate::comparator::{Comparator, ConstantTimeComparator, VariableTimeComparator};
use crate::config::Config;

/// A candidate value for one byte position.
pub type Candidate = u8;

/// Comparison strategy under attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Early-exit comparison with a delay after every matching byte.
    VariableTime,
    /// Comparison whose running time depends only on the input length.
    ConstantTime,
}

impl Strategy {
    /// Both strategies, in the order an experiment runs them.
    pub const ALL: [Strategy; 2] = [Strategy::VariableTime, Strategy::ConstantTime];

    /// Short label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Strategy::VariableTime => "variable-time",
            Strategy::ConstantTime => "constant-time",
        }
    }

    /// Build the comparator for this strategy.
    pub fn comparator(self, config: &Config) -> Box<dyn Comparator> {
        match self {
            Strategy::VariableTime => Box::new(VariableTimeComparator::new(
                config.per_byte_delay,
                config.delay_mode,
            )),
            Strategy::ConstantTime => Box::new(ConstantTimeComparator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparator_matches_strategy() {
        let config = Config::quick();
        for strategy in Strategy::ALL {
            let comparator = strategy.comparator(&config);
            assert_eq!(comparator.name(), strategy.label());
        }
    }
}
