mod mode;
mod package;
mod service;
mod snapshot;

pub use mode::PlanningMode;
pub use package::{Package, PackageCatalog, ServiceAllocation};
pub use service::{RateTable, ServiceKind, ServiceMix};
pub use snapshot::{InputSnapshot, RawInputs, parse_currency};
