//! Actuarial Value engine
//!
//! Converts plan cost-sharing parameters into an actuarial value and an
//! ACA metal tier classification.

mod compliance;
mod engine;
mod inputs;
mod metal;

pub use compliance::Compliance;
pub use engine::{calculate_av, AvResult, CategoryBreakdown};
pub use inputs::{DeductibleType, PlanCostSharing};
pub use metal::{MetalTier, TierRange, TierRanges};
