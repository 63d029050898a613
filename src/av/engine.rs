//! Actuarial value calculation against a standard population
//!
//! The plan's expected payment share is computed per utilization category
//! (primary care, specialty, emergency, inpatient, outpatient/imaging,
//! pharmacy) against fixed standard-population allowed costs, with the
//! deductible consumed in a fixed category order and cumulative enrollee
//! spend capped at the individual MOOP.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::compliance::{check_compliance, Compliance};
use super::inputs::{DeductibleType, PlanCostSharing};
use super::metal::{MetalTier, TierRanges};
use crate::error::CalcResult;

// Standard-population allowed costs, annual dollars per member
const STD_PRIMARY_CARE: f64 = 900.0;
const STD_SPECIALTY: f64 = 1_400.0;
const STD_EMERGENCY: f64 = 1_100.0;
const STD_INPATIENT: f64 = 5_200.0;
const STD_OUTPATIENT_PROCEDURES: f64 = 2_200.0;
const STD_IMAGING: f64 = 800.0;
const STD_XRAY: f64 = 400.0;
const STD_PHARMACY: f64 = 2_600.0;
const STD_PREVENTIVE: f64 = 600.0; // always plan-paid per ACA

// Standard annual utilization counts
const PRIMARY_CARE_VISITS: f64 = 4.0;
const SPECIALIST_VISITS: f64 = 3.0;
const ER_VISITS: f64 = 0.5;
const URGENT_CARE_VISITS: f64 = 1.0;
const LAB_TESTS: f64 = 3.0;
const GENERIC_SCRIPTS: f64 = 20.0;
const PREFERRED_BRAND_SCRIPTS: f64 = 5.0;
const NON_PREFERRED_BRAND_SCRIPTS: f64 = 2.0;
const SPECIALTY_SCRIPTS: f64 = 1.0;

// Share of pharmacy allowed cost by drug tier
const GENERIC_SHARE: f64 = 0.40;
const PREFERRED_BRAND_SHARE: f64 = 0.25;
const NON_PREFERRED_BRAND_SHARE: f64 = 0.15;
const SPECIALTY_SHARE: f64 = 0.20;

const STD_OUTPATIENT: f64 = STD_OUTPATIENT_PROCEDURES + STD_IMAGING + STD_XRAY;

fn total_standard_cost() -> f64 {
    STD_PRIMARY_CARE
        + STD_SPECIALTY
        + STD_EMERGENCY
        + STD_INPATIENT
        + STD_OUTPATIENT
        + STD_PHARMACY
        + STD_PREVENTIVE
}

/// Plan-paid fraction per utilization category
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub primary_care: f64,
    pub specialty: f64,
    pub emergency: f64,
    pub inpatient: f64,
    pub outpatient: f64,
    pub pharmacy: f64,
}

/// Result of an actuarial value calculation. Created fresh per request,
/// never partially updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvResult {
    /// Actuarial value as a fraction (0.72 = 72%)
    pub actuarial_value: f64,
    pub metal_tier: MetalTier,
    pub plan_pays_percentage: f64,
    pub enrollee_pays_percentage: f64,
    pub tier_ranges: TierRanges,
    pub category_breakdown: CategoryBreakdown,
    pub compliance: Compliance,
    pub calculated_at: DateTime<Utc>,
}

/// Tracks the shared deductible and the enrollee's remaining MOOP headroom
/// as categories are processed in order.
struct Accumulator {
    deductible_remaining: f64,
    moop_remaining: f64,
}

impl Accumulator {
    fn new(plan: &PlanCostSharing) -> Self {
        Self {
            deductible_remaining: plan.individual_deductible,
            moop_remaining: plan.individual_moop,
        }
    }

    /// Enrollee share of an allowed cost under deductible-then-coinsurance
    /// rules, before the MOOP cap.
    fn cost_share(&mut self, cost: f64, coinsurance: f64, subject_to_deductible: bool) -> f64 {
        if subject_to_deductible && self.deductible_remaining > 0.0 {
            let deductible_portion = cost.min(self.deductible_remaining);
            self.deductible_remaining -= deductible_portion;
            deductible_portion + (cost - deductible_portion) * coinsurance
        } else {
            cost * coinsurance
        }
    }

    /// Cap a category's enrollee cost at the remaining MOOP headroom.
    /// Cost-sharing stops accruing once cumulative spend reaches the MOOP.
    fn capped(&mut self, enrollee_cost: f64) -> f64 {
        let capped = enrollee_cost.min(self.moop_remaining);
        self.moop_remaining -= capped;
        capped
    }
}

/// Calculate the actuarial value for a plan design.
///
/// Input validation runs first; no computation happens on invalid input. A
/// plan with zero deductible, zero MOOP, zero coinsurance, and no copays
/// yields exactly 1.0.
pub fn calculate_av(plan: &PlanCostSharing) -> CalcResult<AvResult> {
    plan.validate()?;

    let mut acc = Accumulator::new(plan);

    // Primary care: copay structure when a copay is set, otherwise
    // medical coinsurance (optionally behind the deductible).
    let primary_care = if plan.primary_care_copay > 0.0 {
        plan.primary_care_copay * PRIMARY_CARE_VISITS
    } else {
        acc.cost_share(
            STD_PRIMARY_CARE,
            plan.medical_coinsurance,
            plan.primary_care_subject_to_deductible,
        )
    };
    let primary_care = acc.capped(primary_care);

    let specialty = if plan.specialist_copay > 0.0 {
        plan.specialist_copay * SPECIALIST_VISITS
    } else {
        acc.cost_share(
            STD_SPECIALTY,
            plan.medical_coinsurance,
            plan.specialist_subject_to_deductible,
        )
    };
    let specialty = acc.capped(specialty);

    // Emergency spending is always subject to the deductible when no copay
    // applies.
    let emergency = if plan.er_copay > 0.0 || plan.urgent_care_copay > 0.0 {
        plan.er_copay * ER_VISITS + plan.urgent_care_copay * URGENT_CARE_VISITS
    } else {
        acc.cost_share(STD_EMERGENCY, plan.medical_coinsurance, true)
    };
    let emergency = acc.capped(emergency);

    let inpatient = acc.capped(STD_INPATIENT * plan.inpatient_coinsurance);

    // Outpatient: procedures run through the deductible at medical
    // coinsurance; imaging and x-ray are straight coinsurance; lab is a
    // per-test copay when set.
    let outpatient_raw = acc.cost_share(STD_OUTPATIENT_PROCEDURES, plan.medical_coinsurance, true)
        + STD_IMAGING * plan.imaging_coinsurance
        + STD_XRAY * plan.xray_coinsurance
        + if plan.lab_copay > 0.0 {
            plan.lab_copay * LAB_TESTS
        } else {
            0.0
        };
    let outpatient = acc.capped(outpatient_raw);

    let mut drug_acc = acc_for_drugs(plan, &acc);
    let pharmacy_raw = pharmacy_enrollee_cost(plan, &mut drug_acc);
    let pharmacy = acc.capped(pharmacy_raw);

    let total_enrollee = primary_care + specialty + emergency + inpatient + outpatient + pharmacy;

    // HSA contributions offset the enrollee burden but never drive it
    // below zero.
    let net_enrollee = (total_enrollee - plan.hsa_contribution).max(0.0);

    let total_cost = total_standard_cost();
    let actuarial_value = (1.0 - net_enrollee / total_cost).clamp(0.0, 1.0);

    let metal_tier = MetalTier::from_av(actuarial_value);
    let compliance = check_compliance(plan, actuarial_value, metal_tier);

    Ok(AvResult {
        actuarial_value,
        metal_tier,
        plan_pays_percentage: actuarial_value,
        enrollee_pays_percentage: 1.0 - actuarial_value,
        tier_ranges: TierRanges::standard(),
        category_breakdown: CategoryBreakdown {
            primary_care: plan_paid_share(primary_care, STD_PRIMARY_CARE),
            specialty: plan_paid_share(specialty, STD_SPECIALTY),
            emergency: plan_paid_share(emergency, STD_EMERGENCY),
            inpatient: plan_paid_share(inpatient, STD_INPATIENT),
            outpatient: plan_paid_share(outpatient, STD_OUTPATIENT),
            pharmacy: plan_paid_share(pharmacy, STD_PHARMACY),
        },
        compliance,
        calculated_at: Utc::now(),
    })
}

/// Plan-paid fraction of a category's standard cost. Copay structures can
/// collect more than the category's allowed cost, so the fraction clamps
/// to [0, 1].
fn plan_paid_share(enrollee_cost: f64, standard_cost: f64) -> f64 {
    (1.0 - enrollee_cost / standard_cost).clamp(0.0, 1.0)
}

/// Drug tiers only draw from the medical deductible under an integrated
/// deductible; a separate drug deductible is out of this model's scope, so
/// "separate" simply exempts drug spending.
fn acc_for_drugs(plan: &PlanCostSharing, medical: &Accumulator) -> Accumulator {
    Accumulator {
        deductible_remaining: match plan.deductible_type {
            DeductibleType::Integrated => medical.deductible_remaining,
            DeductibleType::Separate => 0.0,
        },
        moop_remaining: f64::INFINITY, // MOOP cap applied by the caller
    }
}

fn pharmacy_enrollee_cost(plan: &PlanCostSharing, acc: &mut Accumulator) -> f64 {
    let tiers = [
        (
            plan.generic_copay,
            GENERIC_SCRIPTS,
            GENERIC_SHARE,
            plan.generic_subject_to_deductible,
        ),
        (
            plan.preferred_brand_copay,
            PREFERRED_BRAND_SCRIPTS,
            PREFERRED_BRAND_SHARE,
            plan.preferred_brand_subject_to_deductible,
        ),
        (
            plan.non_preferred_brand_copay,
            NON_PREFERRED_BRAND_SCRIPTS,
            NON_PREFERRED_BRAND_SHARE,
            plan.non_preferred_brand_subject_to_deductible,
        ),
        (
            plan.specialty_copay,
            SPECIALTY_SCRIPTS,
            SPECIALTY_SHARE,
            plan.specialty_subject_to_deductible,
        ),
    ];

    tiers
        .iter()
        .map(|&(copay, scripts, share, subject)| {
            if copay > 0.0 {
                copay * scripts
            } else {
                acc.cost_share(STD_PHARMACY * share, plan.drug_coinsurance, subject)
            }
        })
        .sum()
}
