//! Calculation modules for the practice planner.
//!
//! Each module holds a family of pure calculators: blended and effective
//! rates, package pricing, hour allocation, and income projections. All of
//! them take the current models by reference and return unrounded decimals.

pub mod common;
pub mod hours;
pub mod income;
pub mod packages;
pub mod rates;

pub use hours::{HoursAllocation, allocate_hours};
pub use income::{EmployeeEconomics, LighthouseIncome, employee_economics, lighthouse_income};
pub use packages::{package_base_cost, package_revenue};
pub use rates::{blended_hourly_rate, effective_hourly_rate};
