//! Claimant history and analyzer input types

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult, check_positive};

/// One high-cost claimant's annual claim totals, aligned to the analyzer's
/// ordered claim years.
///
/// `Some(0.0)` is a verified zero-claims year; `None` is a year with no
/// data. Carrier claim reports conventionally enter `0` for "no data", so
/// [`ClaimantData::from_raw_amounts`] normalizes zeros to `None`; build the
/// struct directly when a genuine zero-claims year must be preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimantData {
    pub name: String,
    pub claims: Vec<Option<f64>>,
}

impl ClaimantData {
    /// Build from raw report amounts, treating `0` as "no data".
    pub fn from_raw_amounts(name: impl Into<String>, amounts: &[f64]) -> Self {
        Self {
            name: name.into(),
            claims: amounts
                .iter()
                .map(|&amount| if amount > 0.0 { Some(amount) } else { None })
                .collect(),
        }
    }

    /// True when at least one year has claim data
    pub fn has_data(&self) -> bool {
        self.claims.iter().any(|c| c.is_some())
    }
}

/// The in-force specific deductible and its annual premium.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentSetup {
    pub deductible: f64,
    pub premium: f64,
}

/// A quoted alternative specific deductible.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductibleOption {
    pub amount: f64,
    pub carrier: String,
    pub annual_premium: f64,
}

impl DeductibleOption {
    /// Quotes missing an amount or premium are excluded from comparison
    /// rather than defaulted to zero.
    pub fn is_comparable(&self) -> bool {
        self.amount > 0.0 && self.annual_premium > 0.0
    }
}

/// Complete input to the deductible analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerInput {
    /// Plan year all claim history is trended to
    pub effective_year: i32,
    /// Historical years in ascending order; the last is treated as the
    /// in-progress year and excluded from averages
    pub claim_years: Vec<i32>,
    pub claimants: Vec<ClaimantData>,
    pub current: CurrentSetup,
    #[serde(default)]
    pub options: Vec<DeductibleOption>,
    /// Annual medical trend as a fraction, e.g. 0.07
    pub trend_rate: f64,
}

impl AnalyzerInput {
    pub(super) fn validate(&self) -> CalcResult<()> {
        if self.claimants.is_empty() {
            return Err(CalcError::invalid(
                "claimants",
                "at least one claimant is required",
            ));
        }
        if self.claim_years.is_empty() {
            return Err(CalcError::invalid(
                "claimYears",
                "at least one claim year is required",
            ));
        }
        for window in self.claim_years.windows(2) {
            if window[1] <= window[0] {
                return Err(CalcError::invalid(
                    "claimYears",
                    "claim years must be strictly ascending",
                ));
            }
        }
        if let Some(&last) = self.claim_years.last() {
            if last > self.effective_year {
                return Err(CalcError::invalid(
                    "claimYears",
                    "claim years cannot be later than the effective year",
                ));
            }
        }
        if !(0.0..1.0).contains(&self.trend_rate) {
            return Err(CalcError::invalid(
                "trendRate",
                "trend rate must be at least 0 and below 1",
            ));
        }
        check_positive("current.deductible", self.current.deductible)?;
        check_positive("current.premium", self.current.premium)?;

        for (i, claimant) in self.claimants.iter().enumerate() {
            if claimant.claims.len() != self.claim_years.len() {
                return Err(CalcError::invalid(
                    format!("claimants[{}].claims", i),
                    format!(
                        "expected {} yearly entries, found {}",
                        self.claim_years.len(),
                        claimant.claims.len()
                    ),
                ));
            }
            for (j, claim) in claimant.claims.iter().enumerate() {
                if let Some(amount) = claim {
                    if amount.is_nan() || *amount < 0.0 {
                        return Err(CalcError::invalid(
                            format!("claimants[{}].claims[{}]", i, j),
                            "claim amount cannot be negative",
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    /// Options that carry both an amount and a premium
    pub(super) fn comparable_options(&self) -> Vec<&DeductibleOption> {
        self.options.iter().filter(|o| o.is_comparable()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_input() -> AnalyzerInput {
        AnalyzerInput {
            effective_year: 2025,
            claim_years: vec![2022, 2023, 2024],
            claimants: vec![ClaimantData::from_raw_amounts(
                "Claimant A",
                &[300_000.0, 310_000.0, 0.0],
            )],
            current: CurrentSetup {
                deductible: 225_000.0,
                premium: 480_000.0,
            },
            options: Vec::new(),
            trend_rate: 0.07,
        }
    }

    #[test]
    fn test_raw_zero_becomes_no_data() {
        let claimant = ClaimantData::from_raw_amounts("A", &[120_000.0, 0.0]);
        assert_eq!(claimant.claims, vec![Some(120_000.0), None]);
    }

    #[test]
    fn test_years_must_ascend() {
        let mut input = base_input();
        input.claim_years = vec![2023, 2022, 2024];
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_claims_length_must_match_years() {
        let mut input = base_input();
        input.claimants[0].claims.pop();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_incomplete_quotes_excluded() {
        let mut input = base_input();
        input.options = vec![
            DeductibleOption {
                amount: 250_000.0,
                carrier: "Carrier A".into(),
                annual_premium: 440_000.0,
            },
            DeductibleOption {
                amount: 0.0,
                carrier: "Carrier B".into(),
                annual_premium: 400_000.0,
            },
            DeductibleOption {
                amount: 300_000.0,
                carrier: "Carrier C".into(),
                annual_premium: 0.0,
            },
        ];
        assert_eq!(input.comparable_options().len(), 1);
    }
}
