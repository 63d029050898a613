//! Output types for the deductible analyzer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Employer-retained claims at one deductible level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimsAnalysisRow {
    pub deductible_level: f64,
    /// Trended retained claims per historical year, aligned to the input's
    /// claim years; None when no claimant had data that year
    pub yearly_retained: Vec<Option<f64>>,
    /// Average over populated complete years
    pub average_isl_claims: f64,
    /// Claims newly retained relative to the current deductible; None when
    /// the level retains nothing extra (rendered as a dash)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_claims: Option<f64>,
}

/// Premium and net-savings comparison for one quoted option.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumComparisonRow {
    pub carrier: String,
    pub deductible_amount: f64,
    pub annual_premium: f64,
    pub premium_savings: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_claims: Option<f64>,
    pub net_projected_savings: f64,
}

/// The analyzer's single recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub retain_current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    pub deductible: f64,
    pub net_projected_savings: f64,
    pub message: String,
}

/// Complete deductible analysis output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerResults {
    pub effective_year: i32,
    pub claim_years: Vec<i32>,
    pub trend_rate: f64,
    /// Current level first, then each comparable option
    pub claims_analysis: Vec<ClaimsAnalysisRow>,
    pub premium_comparison: Vec<PremiumComparisonRow>,
    pub recommendation: Recommendation,
    pub calculated_at: DateTime<Utc>,
}
