//! Benefits Calculation Core - calculation engines for self-funded plan analysis
//!
//! This library provides:
//! - Actuarial value calculation and ACA metal-tier classification
//! - Fully-Insured Equivalent (FIE) liability build-up and rate allocation
//! - ISL deductible trending and quote comparison
//! - Trend-rate sensitivity sweeps

pub mod av;
pub mod deductible;
pub mod error;
pub mod fie;
pub mod scenario;
pub mod tiers;

// Re-export commonly used types
pub use av::{calculate_av, AvResult, MetalTier, PlanCostSharing};
pub use deductible::{analyze_deductibles, AnalyzerInput, AnalyzerResults};
pub use error::{CalcError, CalcResult};
pub use fie::{calculate_fie, CostComponents, FieResults, PlanData};
pub use scenario::SweepRunner;
pub use tiers::{TierCode, TierConfig, TierMap};
