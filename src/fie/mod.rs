//! Fully-Insured-Equivalent rate engine
//!
//! Builds the total annual liability of a self-funded program (admin,
//! specific and aggregate stop-loss premium, lasers) and allocates it back
//! to tier-level monthly rates for each benefit plan.

mod costs;
mod engine;
mod plan;
mod results;

pub use costs::{AdminCostMode, AdminLineItem, CostComponents, Laser};
pub use engine::{calculate_fie, MIN_TOTAL_EMPLOYEES};
pub use plan::{plan_differentials, PlanData};
pub use results::{FieResults, PepmBreakdown, PlanAllocation};
