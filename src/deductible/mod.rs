//! ISL deductible trend and comparison engine
//!
//! Trends historical high-cost-claimant experience forward and compares
//! the employer's retained claims and premium across alternative specific
//! deductible quotes.

mod claimant;
mod engine;
mod loader;
mod results;

pub use claimant::{AnalyzerInput, ClaimantData, CurrentSetup, DeductibleOption};
pub use engine::analyze_deductibles;
pub use loader::load_claimants;
pub use results::{
    AnalyzerResults, ClaimsAnalysisRow, PremiumComparisonRow, Recommendation,
};
