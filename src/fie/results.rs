//! Output types for the FIE build-up

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tiers::TierMap;

/// Liability components restated per employee per month.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PepmBreakdown {
    pub admin: f64,
    pub specific: f64,
    pub aggregate: f64,
    pub laser: f64,
    pub total: f64,
}

/// Share of the total liability allocated to one plan, with the
/// tier rates that fund it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanAllocation {
    pub plan_name: String,
    pub differential: f64,
    /// Annual liability allocated to this plan
    pub allocation: f64,
    /// Monthly funding rates by tier
    pub fie_rates: TierMap,
}

/// Complete FIE build-up output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieResults {
    pub admin_annual_cost: f64,
    pub specific_annual_premium: f64,
    pub aggregate_annual_premium: f64,
    pub laser_annual_cost: f64,
    /// Total maximum annual liability (fully-insured equivalent cost)
    pub fie_annual_cost: f64,
    pub pepm: PepmBreakdown,
    pub allocations: Vec<PlanAllocation>,
    pub current_annual_cost: f64,
    /// Positive when the self-funded arrangement is cheaper
    pub annual_savings: f64,
    /// None when there is no current premium to compare against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_percentage: Option<f64>,
    pub total_employees: usize,
    pub aggregate_corridor: f64,
    pub calculated_at: DateTime<Utc>,
}
