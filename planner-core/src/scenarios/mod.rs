//! Scenario projection tables.
//!
//! Each module re-runs the rate and package calculators over a fixed grid
//! of synthetic inputs: hour splits for growth, headcounts for staffing,
//! and package quantities for sales. Row counts are fixed regardless of
//! input values so downstream tables keep a stable shape.

pub mod growth;
pub mod sales;
pub mod staffing;

pub use growth::{GrowthRow, growth_scenarios};
pub use sales::{SALES_QUANTITIES, SalesRow, sales_scenarios};
pub use staffing::{STAFFING_HEADCOUNTS, StaffingRow, staffing_scenarios};
