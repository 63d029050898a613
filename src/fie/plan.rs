//! Benefit plan census and rate data

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};
use crate::tiers::{TierCode, TierConfig, TierMap};

/// Census and current premium rates for one benefit plan.
///
/// Census values are employee counts per tier; current rates are the
/// in-force monthly premiums the FIE rates are compared against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanData {
    pub name: String,
    pub census: TierMap,
    pub current_rates: TierMap,
}

impl PlanData {
    /// Number of census employees in a tier (missing tiers count zero)
    pub fn census_count(&self, code: TierCode) -> f64 {
        self.census.get(&code).copied().unwrap_or(0.0)
    }

    /// Current monthly rate for a tier (missing tiers count zero)
    pub fn current_rate(&self, code: TierCode) -> f64 {
        self.current_rates.get(&code).copied().unwrap_or(0.0)
    }

    /// Total employees across all tiers
    pub fn total_employees(&self) -> f64 {
        self.census.values().sum()
    }

    /// Census weighted by tier ratios, before the plan differential
    pub fn weighted_units(&self, config: &TierConfig) -> f64 {
        config
            .tiers()
            .iter()
            .map(|tier| self.census_count(tier.code) * tier.ratio)
            .sum()
    }

    /// Employee-Only monthly rate, the anchor for plan differentials
    pub fn employee_only_rate(&self) -> f64 {
        self.current_rate(TierCode::EmployeeOnly)
    }

    pub(super) fn validate(&self, config: &TierConfig, index: usize) -> CalcResult<()> {
        config.validate_keys("census", &self.census)?;
        config.validate_keys("currentRates", &self.current_rates)?;

        for (code, &count) in &self.census {
            let field = format!("plans[{}].census.{}", index, code.as_str());
            if count.is_nan() || count < 0.0 {
                return Err(CalcError::invalid(field, "census cannot be negative"));
            }
            if count.fract() != 0.0 {
                return Err(CalcError::invalid(field, "census must be a whole count"));
            }
        }

        for (code, &rate) in &self.current_rates {
            if rate.is_nan() || rate < 0.0 {
                return Err(CalcError::invalid(
                    format!("plans[{}].currentRates.{}", index, code.as_str()),
                    "rate cannot be negative",
                ));
            }
        }

        // The differential derivation needs a real Employee-Only rate on
        // every plan.
        if self.employee_only_rate() <= 0.0 {
            return Err(CalcError::invalid(
                format!("plans[{}].currentRates.EO", index),
                "a positive Employee-Only rate is required to derive the plan differential",
            ));
        }

        Ok(())
    }
}

/// Recompute every plan's differential from its Employee-Only rate relative
/// to the first (base) plan. Pure function over the full plan list: editing
/// any rate means recomputing all differentials, and the base plan is
/// always exactly 1.0.
pub fn plan_differentials(plans: &[PlanData]) -> CalcResult<Vec<f64>> {
    let base = plans
        .first()
        .ok_or_else(|| CalcError::invalid("plans", "at least one plan is required"))?;

    let base_rate = base.employee_only_rate();
    if base_rate <= 0.0 {
        return Err(CalcError::invalid(
            "plans[0].currentRates.EO",
            "base plan requires a positive Employee-Only rate",
        ));
    }

    Ok(plans
        .iter()
        .enumerate()
        .map(|(i, plan)| {
            if i == 0 {
                1.0
            } else {
                plan.employee_only_rate() / base_rate
            }
        })
        .collect())
}
