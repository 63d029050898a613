//! Cost-side inputs to the FIE build-up: administration, stop-loss
//! premiums, and lasered members.

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult, check_non_negative};
use crate::tiers::{TierConfig, TierMap};

/// One named administrative fee, quoted per employee per month.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLineItem {
    pub name: String,
    pub pepm: f64,
}

/// Administrative costs are entered either as a single PEPM or as an
/// itemized fee schedule that sums to one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum AdminCostMode {
    Simple { pepm: f64 },
    Detailed { items: Vec<AdminLineItem> },
}

impl AdminCostMode {
    /// Effective per-employee-per-month admin cost
    pub fn pepm(&self) -> f64 {
        match self {
            AdminCostMode::Simple { pepm } => *pepm,
            AdminCostMode::Detailed { items } => items.iter().map(|item| item.pepm).sum(),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        match self {
            AdminCostMode::Simple { pepm } => check_non_negative("adminCosts.pepm", *pepm),
            AdminCostMode::Detailed { items } => {
                for (i, item) in items.iter().enumerate() {
                    check_non_negative(&format!("adminCosts.items[{}].pepm", i), item.pepm)?;
                }
                Ok(())
            }
        }
    }
}

/// A member carved out of pooled specific coverage at a higher retention.
/// The amount above the group's specific deductible is a flat annual
/// liability of the employer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Laser {
    pub member_id: String,
    pub amount: f64,
    pub plan_index: usize,
}

/// Everything on the cost side of the FIE build-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostComponents {
    pub admin: AdminCostMode,
    pub specific_deductible: f64,
    /// Monthly specific stop-loss premium per employee, by tier
    pub specific_rates: TierMap,
    /// Aggregate attachment corridor, typically 1.25
    #[serde(default = "default_corridor")]
    pub aggregate_corridor: f64,
    /// Monthly aggregate stop-loss premium per employee
    pub aggregate_rate: f64,
    /// Override for the per-tier aggregate claim factors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_factors: Option<TierMap>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lasers: Vec<Laser>,
}

fn default_corridor() -> f64 {
    1.25
}

impl CostComponents {
    pub(super) fn validate(&self, config: &TierConfig, plan_count: usize) -> CalcResult<()> {
        self.admin.validate()?;

        if !(self.specific_deductible > 0.0) {
            return Err(CalcError::invalid(
                "specificDeductible",
                "specific deductible must be positive",
            ));
        }

        config.validate_keys("specificRates", &self.specific_rates)?;
        for (code, &rate) in &self.specific_rates {
            check_non_negative(&format!("specificRates.{}", code.as_str()), rate)?;
        }

        if !(1.20..=1.30).contains(&self.aggregate_corridor) {
            return Err(CalcError::invalid(
                "aggregateCorridor",
                "aggregate corridor must be between 1.20 and 1.30",
            ));
        }

        check_non_negative("aggregateRate", self.aggregate_rate)?;

        if let Some(factors) = &self.aggregate_factors {
            config.validate_keys("aggregateFactors", factors)?;
            for (code, &factor) in factors {
                check_non_negative(&format!("aggregateFactors.{}", code.as_str()), factor)?;
            }
        }

        for (i, laser) in self.lasers.iter().enumerate() {
            if laser.amount <= self.specific_deductible {
                return Err(CalcError::invalid(
                    format!("lasers[{}].amount", i),
                    "laser amount must exceed the specific deductible",
                ));
            }
            if laser.plan_index >= plan_count {
                return Err(CalcError::invalid(
                    format!("lasers[{}].planIndex", i),
                    format!("plan index {} is out of range", laser.plan_index),
                ));
            }
        }

        Ok(())
    }

    /// Flat annual laser liability: each lasered member's full amount is
    /// funded by the employer, not pooled under specific coverage.
    pub fn laser_liability(&self) -> f64 {
        self.lasers.iter().map(|laser| laser.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiers::TierCode;
    use approx::assert_relative_eq;

    fn base_costs() -> CostComponents {
        let mut specific_rates = TierMap::new();
        specific_rates.insert(TierCode::EmployeeOnly, 45.0);
        CostComponents {
            admin: AdminCostMode::Simple { pepm: 35.0 },
            specific_deductible: 100_000.0,
            specific_rates,
            aggregate_corridor: 1.25,
            aggregate_rate: 15.0,
            aggregate_factors: None,
            lasers: Vec::new(),
        }
    }

    #[test]
    fn test_detailed_admin_sums_line_items() {
        let admin = AdminCostMode::Detailed {
            items: vec![
                AdminLineItem { name: "TPA".into(), pepm: 22.0 },
                AdminLineItem { name: "Network access".into(), pepm: 8.5 },
                AdminLineItem { name: "Broker".into(), pepm: 4.5 },
            ],
        };
        assert_relative_eq!(admin.pepm(), 35.0, epsilon = 1e-12);
    }

    #[test]
    fn test_corridor_outside_band_rejected() {
        let config = TierConfig::four_tier();
        let mut costs = base_costs();
        costs.aggregate_corridor = 1.50;
        assert!(costs.validate(&config, 1).is_err());
    }

    #[test]
    fn test_laser_must_exceed_specific_deductible() {
        let config = TierConfig::four_tier();
        let mut costs = base_costs();
        costs.lasers.push(Laser {
            member_id: "M-100".into(),
            amount: 80_000.0,
            plan_index: 0,
        });
        assert!(costs.validate(&config, 1).is_err());
    }

    #[test]
    fn test_laser_liability_is_flat_sum_of_amounts() {
        let mut costs = base_costs();
        costs.lasers.push(Laser {
            member_id: "M-100".into(),
            amount: 250_000.0,
            plan_index: 0,
        });
        costs.lasers.push(Laser {
            member_id: "M-200".into(),
            amount: 150_000.0,
            plan_index: 0,
        });
        assert_relative_eq!(costs.laser_liability(), 400_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_single_laser_funds_the_full_amount() {
        let mut costs = base_costs();
        costs.lasers.push(Laser {
            member_id: "M-300".into(),
            amount: 150_000.0,
            plan_index: 0,
        });
        assert_relative_eq!(costs.laser_liability(), 150_000.0, epsilon = 1e-9);
    }
}
