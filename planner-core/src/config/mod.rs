//! Practice configuration: packages, rates, and the owner service mix.
//!
//! The [`ConfigStore`] owns the editable configuration. Small edits go
//! through targeted methods ([`ConfigStore::update_package`] and friends);
//! bulk edits go through a [`ConfigPatch`] drafted from the store and
//! applied back atomically, so a validation failure never leaves the store
//! half-updated.

pub mod defaults;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::{Package, PackageCatalog, RateTable, ServiceAllocation, ServiceKind, ServiceMix};

/// Errors raised when a configuration edit fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The referenced package key is not in the catalog.
    #[error("unknown package '{0}'")]
    UnknownPackage(String),

    /// A package would be left with no service allocations.
    #[error("package '{key}' must contain at least one service")]
    NoServices { key: String },

    /// A package discount outside the `0..=1` range.
    #[error("discount {discount} for package '{key}' is outside 0..=1")]
    DiscountOutOfRange { key: String, discount: Decimal },

    /// A service allocation with zero or negative hours.
    #[error("non-positive hours {hours} for service '{kind}' in package '{key}'")]
    NonPositiveHours {
        key: String,
        kind: ServiceKind,
        hours: Decimal,
    },

    /// A negative hourly rate.
    #[error("negative rate {rate} for service '{kind}'")]
    NegativeRate { kind: ServiceKind, rate: Decimal },

    /// A negative service mix percentage.
    #[error("negative mix percentage {percent} for service '{kind}'")]
    NegativeMixPercent { kind: ServiceKind, percent: Decimal },

    /// An applied patch would leave the catalog empty.
    #[error("catalog must contain at least one package")]
    EmptyCatalog,
}

/// A partial edit to one package. `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackagePatch {
    pub name: Option<String>,
    pub discount: Option<Decimal>,
    pub services: Option<Vec<ServiceAllocation>>,
}

/// An editable copy of the whole configuration.
///
/// Drafted from [`ConfigStore::draft`], mutated freely, then handed back to
/// [`ConfigStore::apply`], which validates everything before committing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigPatch {
    pub rates: RateTable,
    pub mix: ServiceMix,
    pub packages: Vec<Package>,
}

impl ConfigPatch {
    pub fn package_mut(&mut self, key: &str) -> Option<&mut Package> {
        self.packages.iter_mut().find(|p| p.key == key)
    }
}

/// The live practice configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigStore {
    packages: PackageCatalog,
    rates: RateTable,
    mix: ServiceMix,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    /// Creates a store holding the factory defaults.
    pub fn new() -> Self {
        Self {
            packages: defaults::default_packages(),
            rates: defaults::default_rates(),
            mix: defaults::default_mix(),
        }
    }

    pub fn packages(&self) -> &PackageCatalog {
        &self.packages
    }

    pub fn service_rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn service_mix(&self) -> &ServiceMix {
        &self.mix
    }

    /// Applies a partial edit to one package.
    ///
    /// The patched package is validated as a whole before anything is
    /// stored, so a rejected edit leaves the package untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownPackage`] for a key not in the catalog,
    /// or the relevant validation error when the patched package would be
    /// invalid.
    pub fn update_package(
        &mut self,
        key: &str,
        patch: PackagePatch,
    ) -> Result<(), ConfigError> {
        let current = self
            .packages
            .get(key)
            .ok_or_else(|| ConfigError::UnknownPackage(key.to_string()))?;

        let mut candidate = current.clone();
        if let Some(name) = patch.name {
            candidate.name = name;
        }
        if let Some(discount) = patch.discount {
            candidate.discount = discount;
        }
        if let Some(services) = patch.services {
            candidate.services = services;
        }
        validate_package(&candidate)?;

        if let Some(package) = self.packages.get_mut(key) {
            *package = candidate;
        }
        Ok(())
    }

    /// Appends a fresh service allocation (1:1 direct, 4 hours) to a package.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownPackage`] for a key not in the catalog.
    pub fn add_service(&mut self, key: &str) -> Result<(), ConfigError> {
        let package = self
            .packages
            .get_mut(key)
            .ok_or_else(|| ConfigError::UnknownPackage(key.to_string()))?;
        package
            .services
            .push(ServiceAllocation::new(ServiceKind::Direct, Decimal::from(4)));
        Ok(())
    }

    /// Removes the service allocation at `index` from a package.
    ///
    /// A package always keeps at least one service: removing the last one,
    /// or passing an out-of-range index, is a logged no-op rather than an
    /// error so interactive callers can wire this straight to a button.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownPackage`] for a key not in the catalog.
    pub fn remove_service(
        &mut self,
        key: &str,
        index: usize,
    ) -> Result<(), ConfigError> {
        let package = self
            .packages
            .get_mut(key)
            .ok_or_else(|| ConfigError::UnknownPackage(key.to_string()))?;

        if package.services.len() <= 1 {
            warn!(package = %key, "cannot remove the last service from a package");
            return Ok(());
        }
        if index >= package.services.len() {
            warn!(package = %key, index, "service index out of range; nothing removed");
            return Ok(());
        }
        package.services.remove(index);
        Ok(())
    }

    /// Returns an editable copy of the full configuration.
    pub fn draft(&self) -> ConfigPatch {
        ConfigPatch {
            rates: self.rates.clone(),
            mix: self.mix.clone(),
            packages: self.packages.iter().cloned().collect(),
        }
    }

    /// Validates a drafted patch and commits it in one step.
    ///
    /// Validation covers every package, rate, and mix entry before any part
    /// of the store changes; on error the store is exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found in the patch.
    pub fn apply(&mut self, patch: ConfigPatch) -> Result<(), ConfigError> {
        if patch.packages.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for package in &patch.packages {
            validate_package(package)?;
        }
        for (kind, rate) in patch.rates.iter() {
            if rate < Decimal::ZERO {
                return Err(ConfigError::NegativeRate { kind, rate });
            }
        }
        for (kind, percent) in patch.mix.iter() {
            if percent < Decimal::ZERO {
                return Err(ConfigError::NegativeMixPercent { kind, percent });
            }
        }

        self.rates = patch.rates;
        self.mix = patch.mix;
        self.packages = PackageCatalog::new(patch.packages);
        Ok(())
    }

    /// Discards all edits and restores the factory defaults.
    pub fn reset_to_defaults(&mut self) {
        *self = Self::new();
    }
}

fn validate_package(package: &Package) -> Result<(), ConfigError> {
    if package.services.is_empty() {
        return Err(ConfigError::NoServices {
            key: package.key.clone(),
        });
    }
    if package.discount < Decimal::ZERO || package.discount > Decimal::ONE {
        return Err(ConfigError::DiscountOutOfRange {
            key: package.key.clone(),
            discount: package.discount,
        });
    }
    for service in &package.services {
        if service.hours <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveHours {
                key: package.key.clone(),
                kind: service.kind,
                hours: service.hours,
            });
        }
    }
    Ok(())
}
