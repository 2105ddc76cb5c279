pub mod calculations;
pub mod config;
pub mod engine;
pub mod models;
pub mod report;
pub mod scenarios;

pub use config::{ConfigError, ConfigPatch, ConfigStore, PackagePatch};
pub use engine::{Dashboard, DashboardEngine};
pub use models::*;
pub use report::{DashboardReport, render};
