use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Billable service lines offered by the practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    Direct,
    Parent,
    Respite,
    Group,
}

impl ServiceKind {
    /// All service kinds in display order.
    pub const ALL: [ServiceKind; 4] = [
        ServiceKind::Direct,
        ServiceKind::Parent,
        ServiceKind::Respite,
        ServiceKind::Group,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Parent => "parent",
            Self::Respite => "respite",
            Self::Group => "group",
        }
    }

    /// Human-readable label used on reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Direct => "1:1 Direct BCBA",
            Self::Parent => "Parent Training",
            Self::Respite => "Respite Care",
            Self::Group => "Group Therapy",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "direct" => Some(Self::Direct),
            "parent" => Some(Self::Parent),
            "respite" => Some(Self::Respite),
            "group" => Some(Self::Group),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hourly billing rates keyed by service kind.
///
/// A kind with no entry bills at zero rather than failing, so a partially
/// configured table still produces a dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    rates: BTreeMap<ServiceKind, Decimal>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (ServiceKind, Decimal)>) -> Self {
        Self {
            rates: pairs.into_iter().collect(),
        }
    }

    /// Returns the hourly rate for `kind`, or zero when none is configured.
    pub fn rate(&self, kind: ServiceKind) -> Decimal {
        self.rates.get(&kind).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn set(
        &mut self,
        kind: ServiceKind,
        rate: Decimal,
    ) {
        self.rates.insert(kind, rate);
    }

    pub fn iter(&self) -> impl Iterator<Item = (ServiceKind, Decimal)> + '_ {
        self.rates.iter().map(|(kind, rate)| (*kind, *rate))
    }
}

/// How the owner's billable week splits across service kinds, in percent.
///
/// Percentages are free-form and need not sum to 100; the blended rate
/// calculation weights by whatever total is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceMix {
    percents: BTreeMap<ServiceKind, Decimal>,
}

impl ServiceMix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (ServiceKind, Decimal)>) -> Self {
        Self {
            percents: pairs.into_iter().collect(),
        }
    }

    /// Returns the mix percentage for `kind`, or zero when none is configured.
    pub fn percent(&self, kind: ServiceKind) -> Decimal {
        self.percents.get(&kind).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn set(
        &mut self,
        kind: ServiceKind,
        percent: Decimal,
    ) {
        self.percents.insert(kind, percent);
    }

    /// Sum of all configured percentages.
    pub fn total(&self) -> Decimal {
        self.percents.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ServiceKind, Decimal)> + '_ {
        self.percents.iter().map(|(kind, percent)| (*kind, *percent))
    }
}
