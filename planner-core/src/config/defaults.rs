//! Factory-default practice configuration.
//!
//! These are the rates, mix, and packages the planner starts from and
//! returns to on reset. They are plain data; validation lives in
//! [`ConfigStore`](crate::config::ConfigStore).

use rust_decimal::Decimal;

use crate::models::{Package, PackageCatalog, RateTable, ServiceAllocation, ServiceKind, ServiceMix};

/// Default hourly rates per service kind.
pub fn default_rates() -> RateTable {
    RateTable::from_pairs([
        (ServiceKind::Direct, Decimal::from(140)),
        (ServiceKind::Parent, Decimal::from(100)),
        (ServiceKind::Respite, Decimal::from(40)),
        (ServiceKind::Group, Decimal::from(60)),
    ])
}

/// Default owner service mix, in percent.
pub fn default_mix() -> ServiceMix {
    ServiceMix::from_pairs([
        (ServiceKind::Direct, Decimal::from(70)),
        (ServiceKind::Parent, Decimal::from(20)),
        (ServiceKind::Respite, Decimal::from(10)),
        (ServiceKind::Group, Decimal::ZERO),
    ])
}

/// The five stock packages, from lightest to heaviest.
pub fn default_packages() -> PackageCatalog {
    PackageCatalog::new(vec![
        Package::new(
            "starter",
            "Starter",
            vec![ServiceAllocation::new(ServiceKind::Parent, Decimal::from(4))],
            Decimal::ZERO,
        ),
        Package::new(
            "support",
            "Support",
            vec![
                ServiceAllocation::new(ServiceKind::Parent, Decimal::from(4)),
                ServiceAllocation::new(ServiceKind::Direct, Decimal::from(8)),
                ServiceAllocation::new(ServiceKind::Respite, Decimal::from(4)),
            ],
            Decimal::new(15, 2),
        ),
        Package::new(
            "parentSupport",
            "Parent Support",
            vec![
                ServiceAllocation::new(ServiceKind::Parent, Decimal::from(8)),
                ServiceAllocation::new(ServiceKind::Direct, Decimal::from(4)),
                ServiceAllocation::new(ServiceKind::Respite, Decimal::from(12)),
            ],
            Decimal::new(15, 2),
        ),
        Package::new(
            "intensive",
            "Intensive",
            vec![
                ServiceAllocation::new(ServiceKind::Parent, Decimal::from(20)),
                ServiceAllocation::new(ServiceKind::Direct, Decimal::from(20)),
                ServiceAllocation::new(ServiceKind::Respite, Decimal::from(4)),
            ],
            Decimal::new(20, 2),
        ),
        Package::new(
            "comprehensive",
            "Comprehensive",
            vec![
                ServiceAllocation::new(ServiceKind::Parent, Decimal::from(4)),
                ServiceAllocation::new(ServiceKind::Direct, Decimal::from(40)),
                ServiceAllocation::new(ServiceKind::Respite, Decimal::from(4)),
            ],
            Decimal::new(25, 2),
        ),
    ])
}
