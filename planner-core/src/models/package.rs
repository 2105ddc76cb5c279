use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::service::ServiceKind;

/// A block of hours for one service kind inside a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAllocation {
    pub kind: ServiceKind,
    pub hours: Decimal,
}

impl ServiceAllocation {
    pub fn new(
        kind: ServiceKind,
        hours: Decimal,
    ) -> Self {
        Self { kind, hours }
    }
}

/// A monthly service bundle sold at a discount off the sum of its parts.
///
/// Pricing is derived from the current [`RateTable`](crate::models::RateTable)
/// at calculation time; only the hour allocations and the discount are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Stable identifier used for lookups and report element ids.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Hour allocations per service kind; always at least one entry.
    pub services: Vec<ServiceAllocation>,
    /// Fractional discount in `0..=1` applied to the summed base cost.
    pub discount: Decimal,
}

impl Package {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        services: Vec<ServiceAllocation>,
        discount: Decimal,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            services,
            discount,
        }
    }

    /// Total monthly hours across all allocations.
    pub fn total_hours(&self) -> Decimal {
        self.services.iter().map(|s| s.hours).sum()
    }
}

/// The ordered set of packages on offer.
///
/// Order is the order packages were defined in, and is preserved across
/// edits so reports and scenario tables stay stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageCatalog {
    packages: Vec<Package>,
}

impl PackageCatalog {
    pub fn new(packages: Vec<Package>) -> Self {
        Self { packages }
    }

    pub fn get(&self, key: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.key == key)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Package> {
        self.packages.iter_mut().find(|p| p.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Package> {
        self.packages.iter()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl<'a> IntoIterator for &'a PackageCatalog {
    type Item = &'a Package;
    type IntoIter = std::slice::Iter<'a, Package>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.iter()
    }
}
