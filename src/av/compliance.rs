//! ACA compliance checks
//!
//! Issues are hard compliance failures (federal MOOP limits); warnings are
//! unusual-but-legal combinations surfaced for review. Deductible-above-MOOP
//! is rejected during input validation and never reaches this stage.

use serde::{Deserialize, Serialize};

use super::inputs::PlanCostSharing;
use super::metal::MetalTier;

// Federal out-of-pocket limits, 2025 plan year
const MAX_INDIVIDUAL_MOOP: f64 = 9_450.0;
const MAX_FAMILY_MOOP: f64 = 18_900.0;

// De minimis allowance around a tier's target AV
const DE_MINIMIS: f64 = 0.02;

/// Outcome of the compliance review
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compliance {
    pub is_aca_compliant: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub issues: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<String>,
}

pub(super) fn check_compliance(
    plan: &PlanCostSharing,
    av: f64,
    assigned_tier: MetalTier,
) -> Compliance {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    if plan.individual_moop > MAX_INDIVIDUAL_MOOP {
        issues.push(format!(
            "Individual MOOP exceeds the federal limit of ${:.0}",
            MAX_INDIVIDUAL_MOOP
        ));
    }
    if plan.family_moop > MAX_FAMILY_MOOP {
        issues.push(format!(
            "Family MOOP exceeds the federal limit of ${:.0}",
            MAX_FAMILY_MOOP
        ));
    }

    if plan.individual_deductible > 0.0
        && plan.family_deductible < plan.individual_deductible * 2.0
    {
        warnings.push(
            "Family deductible is less than 2x the individual deductible - verify this is intentional"
                .to_string(),
        );
    }

    let range = assigned_tier.range();
    if !range.contains(av) {
        warnings.push(format!(
            "AV of {:.2}% is outside the standard {} range",
            av * 100.0,
            assigned_tier.as_str()
        ));
    } else if assigned_tier != MetalTier::Catastrophic
        && (av - range.midpoint()).abs() > DE_MINIMIS
    {
        warnings.push(format!(
            "AV varies by more than 2% from the {} tier target - may require actuarial certification",
            assigned_tier.as_str()
        ));
    }

    if let Some(hint) = plan.metal_tier_hint {
        if hint != assigned_tier {
            warnings.push(format!(
                "Calculated AV supports {}, not the stated {} tier",
                assigned_tier.as_str(),
                hint.as_str()
            ));
        }
    }

    Compliance {
        is_aca_compliant: issues.is_empty(),
        issues,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_plan() -> PlanCostSharing {
        PlanCostSharing {
            individual_deductible: 2_000.0,
            family_deductible: 4_000.0,
            individual_moop: 6_000.0,
            family_moop: 12_000.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_moop_limit_is_an_issue() {
        let plan = PlanCostSharing {
            individual_moop: 10_000.0,
            family_moop: 20_000.0,
            ..base_plan()
        };
        let compliance = check_compliance(&plan, 0.70, MetalTier::Silver);
        assert!(!compliance.is_aca_compliant);
        assert_eq!(compliance.issues.len(), 2);
    }

    #[test]
    fn test_tier_hint_mismatch_is_a_warning() {
        let plan = PlanCostSharing {
            metal_tier_hint: Some(MetalTier::Gold),
            ..base_plan()
        };
        let compliance = check_compliance(&plan, 0.70, MetalTier::Silver);
        assert!(compliance.is_aca_compliant);
        assert!(compliance
            .warnings
            .iter()
            .any(|w| w.contains("not the stated Gold tier")));
    }

    #[test]
    fn test_thin_family_deductible_warns() {
        let plan = PlanCostSharing {
            family_deductible: 3_000.0,
            ..base_plan()
        };
        let compliance = check_compliance(&plan, 0.70, MetalTier::Silver);
        assert!(compliance
            .warnings
            .iter()
            .any(|w| w.contains("less than 2x")));
    }

    #[test]
    fn test_mid_range_av_is_clean() {
        let compliance = check_compliance(&base_plan(), 0.70, MetalTier::Silver);
        assert!(compliance.is_aca_compliant);
        assert!(compliance.issues.is_empty());
        assert!(compliance.warnings.is_empty());
    }
}
