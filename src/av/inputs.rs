//! Plan cost-sharing input model

use serde::{Deserialize, Serialize};

use super::metal::MetalTier;
use crate::error::{check_fraction, check_non_negative, CalcError, CalcResult};

/// Whether medical and drug spending share one deductible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeductibleType {
    /// One combined deductible; drug cost-sharing draws from it
    Integrated,
    /// Drug spending never accumulates toward the medical deductible
    Separate,
}

impl Default for DeductibleType {
    fn default() -> Self {
        DeductibleType::Integrated
    }
}

/// Cost-sharing parameters for a single plan design.
///
/// Coinsurance fields are enrollee-paid fractions in [0, 1]; copays are
/// per-visit or per-script dollar amounts. All fields default to zero /
/// not-subject so partial inputs describe a plan that covers everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanCostSharing {
    pub plan_name: Option<String>,

    /// Caller's intended tier; divergence is flagged as a warning
    pub metal_tier_hint: Option<MetalTier>,

    // Deductibles & MOOP
    pub individual_deductible: f64,
    pub family_deductible: f64,
    pub individual_moop: f64,
    pub family_moop: f64,
    pub deductible_type: DeductibleType,

    // Coinsurance (enrollee share)
    pub medical_coinsurance: f64,
    pub drug_coinsurance: f64,

    // Office visits
    pub primary_care_copay: f64,
    pub primary_care_subject_to_deductible: bool,
    pub specialist_copay: f64,
    pub specialist_subject_to_deductible: bool,

    // Emergency & hospital
    pub er_copay: f64,
    pub urgent_care_copay: f64,
    pub inpatient_coinsurance: f64,

    // Imaging & tests
    pub imaging_coinsurance: f64,
    pub xray_coinsurance: f64,
    pub lab_copay: f64,

    // Prescription drugs
    pub generic_copay: f64,
    pub generic_subject_to_deductible: bool,
    pub preferred_brand_copay: f64,
    pub preferred_brand_subject_to_deductible: bool,
    pub non_preferred_brand_copay: f64,
    pub non_preferred_brand_subject_to_deductible: bool,
    pub specialty_copay: f64,
    pub specialty_subject_to_deductible: bool,

    /// Annual employer HSA contribution, offsets enrollee spend
    pub hsa_contribution: f64,
}

impl PlanCostSharing {
    /// Validate every field before any computation. The first offending
    /// field is reported; no partial results are ever produced.
    pub fn validate(&self) -> CalcResult<()> {
        let dollars = [
            ("individualDeductible", self.individual_deductible),
            ("familyDeductible", self.family_deductible),
            ("individualMOOP", self.individual_moop),
            ("familyMOOP", self.family_moop),
            ("primaryCareCopay", self.primary_care_copay),
            ("specialistCopay", self.specialist_copay),
            ("erCopay", self.er_copay),
            ("urgentCareCopay", self.urgent_care_copay),
            ("labCopay", self.lab_copay),
            ("genericCopay", self.generic_copay),
            ("preferredBrandCopay", self.preferred_brand_copay),
            ("nonPreferredBrandCopay", self.non_preferred_brand_copay),
            ("specialtyCopay", self.specialty_copay),
            ("hsaContribution", self.hsa_contribution),
        ];
        for (field, value) in dollars {
            check_non_negative(field, value)?;
        }

        let fractions = [
            ("medicalCoinsurance", self.medical_coinsurance),
            ("drugCoinsurance", self.drug_coinsurance),
            ("inpatientCoinsurance", self.inpatient_coinsurance),
            ("imagingCoinsurance", self.imaging_coinsurance),
            ("xrayCoinsurance", self.xray_coinsurance),
        ];
        for (field, value) in fractions {
            check_fraction(field, value)?;
        }

        // Deductible must not exceed MOOP on either track; hard error,
        // never silently clamped.
        if self.individual_deductible > self.individual_moop {
            return Err(CalcError::invalid(
                "individualDeductible",
                "deductible cannot exceed individual MOOP",
            ));
        }
        if self.family_deductible > self.family_moop {
            return Err(CalcError::invalid(
                "familyDeductible",
                "deductible cannot exceed family MOOP",
            ));
        }

        if self.family_deductible < self.individual_deductible {
            return Err(CalcError::invalid(
                "familyDeductible",
                "family deductible must be at least the individual deductible",
            ));
        }
        if self.family_moop < self.individual_moop {
            return Err(CalcError::invalid(
                "familyMOOP",
                "family MOOP must be at least the individual MOOP",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_passes_validation() {
        assert!(PlanCostSharing::default().validate().is_ok());
    }

    #[test]
    fn test_deductible_above_moop_rejected() {
        let plan = PlanCostSharing {
            individual_deductible: 7000.0,
            individual_moop: 6000.0,
            family_deductible: 7000.0,
            family_moop: 14000.0,
            ..Default::default()
        };
        let err = plan.validate().unwrap_err();
        assert!(err.to_string().contains("individualDeductible"));

        let plan = PlanCostSharing {
            individual_deductible: 2000.0,
            individual_moop: 6000.0,
            family_deductible: 15000.0,
            family_moop: 14000.0,
            ..Default::default()
        };
        let err = plan.validate().unwrap_err();
        assert!(err.to_string().contains("familyDeductible"));
    }

    #[test]
    fn test_nan_and_negative_rejected() {
        let plan = PlanCostSharing {
            primary_care_copay: -25.0,
            ..Default::default()
        };
        assert!(plan.validate().is_err());

        let plan = PlanCostSharing {
            individual_moop: f64::NAN,
            ..Default::default()
        };
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_coinsurance_out_of_range_rejected() {
        let plan = PlanCostSharing {
            medical_coinsurance: 1.2,
            ..Default::default()
        };
        assert!(plan.validate().is_err());

        let plan = PlanCostSharing {
            drug_coinsurance: -0.1,
            ..Default::default()
        };
        assert!(plan.validate().is_err());
    }
}
