//! Fully-Insured Equivalent build-up.
//!
//! The maximum annual liability of a self-funded arrangement is the sum of
//! administration, specific and aggregate stop-loss premium, and flat laser
//! liability. That total is allocated across plans by differential-weighted
//! census units and restated as monthly funding rates per tier.

use chrono::Utc;

use crate::error::{CalcError, CalcResult};
use crate::tiers::{TierConfig, TierMap};

use super::costs::CostComponents;
use super::plan::{plan_differentials, PlanData};
use super::results::{FieResults, PepmBreakdown, PlanAllocation};

/// Groups below this census size are not credible self-funding candidates.
pub const MIN_TOTAL_EMPLOYEES: usize = 10;

const MONTHS: f64 = 12.0;

/// Run the full FIE build-up for a set of plans against one cost structure.
pub fn calculate_fie(
    plans: &[PlanData],
    costs: &CostComponents,
    tier_config: &TierConfig,
) -> CalcResult<FieResults> {
    if plans.is_empty() {
        return Err(CalcError::invalid("plans", "at least one plan is required"));
    }
    for (i, plan) in plans.iter().enumerate() {
        plan.validate(tier_config, i)?;
    }
    costs.validate(tier_config, plans.len())?;

    let total_employees: f64 = plans.iter().map(|p| p.total_employees()).sum();
    if (total_employees as usize) < MIN_TOTAL_EMPLOYEES {
        return Err(CalcError::invalid(
            "plans",
            format!(
                "total census of {} is below the minimum of {} employees",
                total_employees as usize, MIN_TOTAL_EMPLOYEES
            ),
        ));
    }

    // Aggregate factor overrides replace the configuration defaults.
    let config = match &costs.aggregate_factors {
        Some(factors) => tier_config.clone().with_aggregate_factors(factors)?,
        None => tier_config.clone(),
    };

    let admin_annual = costs.admin.pepm() * total_employees * MONTHS;

    let specific_annual: f64 = plans
        .iter()
        .map(|plan| {
            config
                .tiers()
                .iter()
                .map(|tier| {
                    costs.specific_rates.get(&tier.code).copied().unwrap_or(0.0)
                        * plan.census_count(tier.code)
                        * MONTHS
                })
                .sum::<f64>()
        })
        .sum();

    let aggregate_annual: f64 = plans
        .iter()
        .map(|plan| {
            config
                .tiers()
                .iter()
                .map(|tier| {
                    costs.aggregate_rate
                        * plan.census_count(tier.code)
                        * tier.aggregate_factor
                        * MONTHS
                })
                .sum::<f64>()
        })
        .sum();

    let laser_annual = costs.laser_liability();
    let fie_annual = admin_annual + specific_annual + aggregate_annual + laser_annual;

    let differentials = plan_differentials(plans)?;

    // Allocation weights are census units scaled by the plan differential;
    // rates divide the allocation back out by unscaled units so the
    // differential shifts dollars between plans without inflating the
    // group total.
    let mut units = Vec::with_capacity(plans.len());
    let mut weights = Vec::with_capacity(plans.len());
    for (i, plan) in plans.iter().enumerate() {
        let plan_units = plan.weighted_units(&config);
        if plan_units <= 0.0 {
            return Err(CalcError::invalid(
                format!("plans[{}].census", i),
                "plan has no enrolled employees",
            ));
        }
        units.push(plan_units);
        weights.push(plan_units * differentials[i]);
    }
    let total_weight: f64 = weights.iter().sum();

    let mut allocations = Vec::with_capacity(plans.len());
    for (i, plan) in plans.iter().enumerate() {
        let allocation = fie_annual * weights[i] / total_weight;
        let monthly_unit_rate = allocation / units[i] / MONTHS;

        let mut fie_rates = TierMap::new();
        for tier in config.tiers() {
            fie_rates.insert(tier.code, monthly_unit_rate * tier.ratio);
        }

        allocations.push(PlanAllocation {
            plan_name: plan.name.clone(),
            differential: differentials[i],
            allocation,
            fie_rates,
        });
    }

    let current_annual: f64 = plans
        .iter()
        .map(|plan| {
            config
                .tiers()
                .iter()
                .map(|tier| plan.current_rate(tier.code) * plan.census_count(tier.code) * MONTHS)
                .sum::<f64>()
        })
        .sum();

    let annual_savings = current_annual - fie_annual;
    let savings_percentage = if current_annual > 0.0 {
        Some(annual_savings / current_annual * 100.0)
    } else {
        None
    };

    let member_months = total_employees * MONTHS;
    let pepm = PepmBreakdown {
        admin: costs.admin.pepm(),
        specific: specific_annual / member_months,
        aggregate: aggregate_annual / member_months,
        laser: laser_annual / member_months,
        total: fie_annual / member_months,
    };

    Ok(FieResults {
        admin_annual_cost: admin_annual,
        specific_annual_premium: specific_annual,
        aggregate_annual_premium: aggregate_annual,
        laser_annual_cost: laser_annual,
        fie_annual_cost: fie_annual,
        pepm,
        allocations,
        current_annual_cost: current_annual,
        annual_savings,
        savings_percentage,
        total_employees: total_employees as usize,
        aggregate_corridor: costs.aggregate_corridor,
        calculated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fie::costs::{AdminCostMode, Laser};
    use crate::tiers::TierCode;
    use approx::assert_relative_eq;

    fn tier_map(entries: &[(TierCode, f64)]) -> TierMap {
        entries.iter().copied().collect()
    }

    fn single_plan(census_eo: f64, rate_eo: f64) -> Vec<PlanData> {
        vec![PlanData {
            name: "PPO".into(),
            census: tier_map(&[(TierCode::EmployeeOnly, census_eo)]),
            current_rates: tier_map(&[(TierCode::EmployeeOnly, rate_eo)]),
        }]
    }

    fn zeroed_costs() -> CostComponents {
        CostComponents {
            admin: AdminCostMode::Simple { pepm: 0.0 },
            specific_deductible: 100_000.0,
            specific_rates: TierMap::new(),
            aggregate_corridor: 1.25,
            aggregate_rate: 0.0,
            aggregate_factors: None,
            lasers: Vec::new(),
        }
    }

    #[test]
    fn test_census_below_minimum_rejected() {
        let plans = single_plan(9.0, 500.0);
        let err = calculate_fie(&plans, &zeroed_costs(), &TierConfig::four_tier());
        assert!(err.is_err());
    }

    #[test]
    fn test_single_plan_specific_only_rate_identity() {
        // One plan, EO census only, specific premium the only component:
        // the FIE rate must reproduce the specific rate exactly.
        let plans = single_plan(12.0, 500.0);
        let mut costs = zeroed_costs();
        costs.specific_rates = tier_map(&[(TierCode::EmployeeOnly, 45.0)]);

        let results = calculate_fie(&plans, &costs, &TierConfig::four_tier()).unwrap();

        assert_relative_eq!(results.fie_annual_cost, 45.0 * 12.0 * 12.0, epsilon = 1e-9);
        let rate = results.allocations[0].fie_rates[&TierCode::EmployeeOnly];
        assert_relative_eq!(rate, 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_allocations_conserve_total_liability() {
        let plans = vec![
            PlanData {
                name: "Base".into(),
                census: tier_map(&[(TierCode::EmployeeOnly, 40.0), (TierCode::Family, 25.0)]),
                current_rates: tier_map(&[(TierCode::EmployeeOnly, 480.0), (TierCode::Family, 1350.0)]),
            },
            PlanData {
                name: "Buy-up".into(),
                census: tier_map(&[(TierCode::EmployeeOnly, 18.0), (TierCode::Family, 12.0)]),
                current_rates: tier_map(&[(TierCode::EmployeeOnly, 600.0), (TierCode::Family, 1700.0)]),
            },
        ];
        let mut costs = zeroed_costs();
        costs.admin = AdminCostMode::Simple { pepm: 35.0 };
        costs.specific_rates =
            tier_map(&[(TierCode::EmployeeOnly, 50.0), (TierCode::Family, 140.0)]);
        costs.aggregate_rate = 12.0;
        costs.lasers.push(Laser {
            member_id: "M-9".into(),
            amount: 275_000.0,
            plan_index: 0,
        });

        let results = calculate_fie(&plans, &costs, &TierConfig::four_tier()).unwrap();

        let allocated: f64 = results.allocations.iter().map(|a| a.allocation).sum();
        assert_relative_eq!(allocated, results.fie_annual_cost, epsilon = 1e-6);
        // The laser enters the build-up at its full amount
        assert_relative_eq!(results.laser_annual_cost, 275_000.0, epsilon = 1e-9);
        assert_eq!(results.allocations[0].differential, 1.0);
        assert_relative_eq!(results.allocations[1].differential, 1.25, epsilon = 1e-12);
    }

    #[test]
    fn test_four_tier_group_build_up() {
        let plans = vec![PlanData {
            name: "Open access".into(),
            census: tier_map(&[
                (TierCode::EmployeeOnly, 100.0),
                (TierCode::EmployeeSpouse, 20.0),
                (TierCode::EmployeeChildren, 15.0),
                (TierCode::Family, 65.0),
            ]),
            current_rates: tier_map(&[
                (TierCode::EmployeeOnly, 520.0),
                (TierCode::EmployeeSpouse, 1118.0),
                (TierCode::EmployeeChildren, 884.0),
                (TierCode::Family, 1482.0),
            ]),
        }];
        let costs = CostComponents {
            admin: AdminCostMode::Simple { pepm: 35.0 },
            specific_deductible: 100_000.0,
            specific_rates: tier_map(&[
                (TierCode::EmployeeOnly, 45.0),
                (TierCode::EmployeeSpouse, 95.0),
                (TierCode::EmployeeChildren, 75.0),
                (TierCode::Family, 125.0),
            ]),
            aggregate_corridor: 1.25,
            aggregate_rate: 15.0,
            aggregate_factors: None,
            lasers: Vec::new(),
        };

        let results = calculate_fie(&plans, &costs, &TierConfig::four_tier()).unwrap();

        assert!(results.fie_annual_cost > 0.0);
        assert_eq!(results.allocations.len(), 1);
        assert_eq!(results.total_employees, 200);

        // Funding the rates across the census recovers the full liability.
        let plan = &plans[0];
        let funded: f64 = results.allocations[0]
            .fie_rates
            .iter()
            .map(|(code, rate)| rate * plan.census_count(*code) * 12.0)
            .sum();
        assert_relative_eq!(funded, results.fie_annual_cost, epsilon = 1e-6);
    }

    #[test]
    fn test_savings_compare_against_current_premium() {
        let plans = single_plan(12.0, 500.0);
        let mut costs = zeroed_costs();
        costs.specific_rates = tier_map(&[(TierCode::EmployeeOnly, 45.0)]);

        let results = calculate_fie(&plans, &costs, &TierConfig::four_tier()).unwrap();
        assert_relative_eq!(
            results.current_annual_cost,
            500.0 * 12.0 * 12.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            results.annual_savings,
            results.current_annual_cost - results.fie_annual_cost,
            epsilon = 1e-9
        );
        let pct = results.savings_percentage.unwrap();
        assert_relative_eq!(pct, 91.0, epsilon = 1e-9);
    }

    #[test]
    fn test_aggregate_factor_override_applies() {
        let plans = single_plan(20.0, 500.0);
        let mut costs = zeroed_costs();
        costs.aggregate_rate = 10.0;
        costs.aggregate_factors = Some(tier_map(&[(TierCode::EmployeeOnly, 20.0)]));

        let results = calculate_fie(&plans, &costs, &TierConfig::four_tier()).unwrap();
        // 10 rate x 20 census x 20 factor x 12 months
        assert_relative_eq!(results.aggregate_annual_premium, 48_000.0, epsilon = 1e-9);
    }
}
