use std::fmt;

use serde::{Deserialize, Serialize};

/// Which revenue model the dashboard is projected under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanningMode {
    /// Bill every available hour at the blended service rates.
    #[default]
    FullCapacity,
    /// Sell fixed monthly packages instead of loose hours.
    Package,
}

impl PlanningMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullCapacity => "full-capacity",
            Self::Package => "package",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "full-capacity" => Some(Self::FullCapacity),
            "package" => Some(Self::Package),
            _ => None,
        }
    }
}

impl fmt::Display for PlanningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
