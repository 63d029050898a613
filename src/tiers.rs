//! Coverage tier reference data
//!
//! Census counting and rate allocation run over a closed set of coverage
//! tiers. Groups rate on 2, 3, or 4 tiers; the tier ratios express each
//! tier's relative cost versus Employee-Only, and the aggregate factors
//! express expected aggregate claims dollars per employee per month.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{check_non_negative, CalcError, CalcResult};

/// Closed set of coverage tier codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TierCode {
    /// Employee-Only ("EO")
    #[serde(rename = "EO")]
    EmployeeOnly,
    /// Employee + Spouse ("ES")
    #[serde(rename = "ES")]
    EmployeeSpouse,
    /// Employee + Child(ren) ("EC")
    #[serde(rename = "EC")]
    EmployeeChildren,
    /// Family ("F")
    #[serde(rename = "F")]
    Family,
}

impl TierCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TierCode::EmployeeOnly => "EO",
            TierCode::EmployeeSpouse => "ES",
            TierCode::EmployeeChildren => "EC",
            TierCode::Family => "F",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TierCode::EmployeeOnly => "Employee Only",
            TierCode::EmployeeSpouse => "Employee + Spouse",
            TierCode::EmployeeChildren => "Employee + Children",
            TierCode::Family => "Family",
        }
    }
}

/// Mapping from tier code to a dollar amount or count
pub type TierMap = BTreeMap<TierCode, f64>;

/// A single coverage tier with its rating factors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tier {
    pub code: TierCode,

    /// Relative cost weight versus Employee-Only (EO = 1.00)
    pub ratio: f64,

    /// Expected aggregate claims liability, dollars per member per month
    pub aggregate_factor: f64,
}

/// Ordered list of the tiers a group rates on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierConfig {
    tiers: Vec<Tier>,
}

impl TierConfig {
    fn tier(code: TierCode) -> Tier {
        let (ratio, aggregate_factor) = match code {
            TierCode::EmployeeOnly => (1.00, 15.0),
            TierCode::EmployeeSpouse => (2.15, 32.0),
            TierCode::EmployeeChildren => (1.70, 25.0),
            TierCode::Family => (2.85, 41.0),
        };
        Tier {
            code,
            ratio,
            aggregate_factor,
        }
    }

    /// Employee-Only / Family
    pub fn two_tier() -> Self {
        Self {
            tiers: vec![
                Self::tier(TierCode::EmployeeOnly),
                Self::tier(TierCode::Family),
            ],
        }
    }

    /// Employee-Only / Employee+Spouse / Family
    pub fn three_tier() -> Self {
        Self {
            tiers: vec![
                Self::tier(TierCode::EmployeeOnly),
                Self::tier(TierCode::EmployeeSpouse),
                Self::tier(TierCode::Family),
            ],
        }
    }

    /// Full four-tier system
    pub fn four_tier() -> Self {
        Self {
            tiers: vec![
                Self::tier(TierCode::EmployeeOnly),
                Self::tier(TierCode::EmployeeSpouse),
                Self::tier(TierCode::EmployeeChildren),
                Self::tier(TierCode::Family),
            ],
        }
    }

    /// Build a config from a tier count (2, 3, or 4)
    pub fn from_tier_count(count: u32) -> CalcResult<Self> {
        match count {
            2 => Ok(Self::two_tier()),
            3 => Ok(Self::three_tier()),
            4 => Ok(Self::four_tier()),
            _ => Err(CalcError::invalid(
                "numberOfTiers",
                "tier count must be 2, 3, or 4",
            )),
        }
    }

    /// Replace the default aggregate factors with per-tier overrides
    pub fn with_aggregate_factors(mut self, factors: &TierMap) -> CalcResult<Self> {
        self.validate_keys("aggregateFactors", factors)?;
        for tier in &mut self.tiers {
            if let Some(&factor) = factors.get(&tier.code) {
                check_non_negative("aggregateFactors", factor)?;
                tier.aggregate_factor = factor;
            }
        }
        Ok(self)
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn contains(&self, code: TierCode) -> bool {
        self.tiers.iter().any(|t| t.code == code)
    }

    pub fn ratio(&self, code: TierCode) -> Option<f64> {
        self.tiers.iter().find(|t| t.code == code).map(|t| t.ratio)
    }

    pub fn aggregate_factor(&self, code: TierCode) -> Option<f64> {
        self.tiers
            .iter()
            .find(|t| t.code == code)
            .map(|t| t.aggregate_factor)
    }

    /// Human-readable name for error messages ("2-tier", "4-tier", ...)
    pub fn name(&self) -> String {
        format!("{}-tier", self.tiers.len())
    }

    /// Reject tier maps carrying codes outside this configuration
    pub fn validate_keys(&self, field: &str, map: &TierMap) -> CalcResult<()> {
        for code in map.keys() {
            if !self.contains(*code) {
                return Err(CalcError::UnknownTier {
                    code: format!("{} ({})", code.as_str(), field),
                    config: self.name(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ratios() {
        let config = TierConfig::four_tier();
        assert_eq!(config.ratio(TierCode::EmployeeOnly), Some(1.00));
        assert_eq!(config.ratio(TierCode::EmployeeSpouse), Some(2.15));
        assert_eq!(config.ratio(TierCode::EmployeeChildren), Some(1.70));
        assert_eq!(config.ratio(TierCode::Family), Some(2.85));
    }

    #[test]
    fn test_smaller_systems_drop_middle_tiers() {
        let two = TierConfig::two_tier();
        assert_eq!(two.len(), 2);
        assert!(two.contains(TierCode::EmployeeOnly));
        assert!(two.contains(TierCode::Family));
        assert!(!two.contains(TierCode::EmployeeSpouse));

        let three = TierConfig::three_tier();
        assert_eq!(three.len(), 3);
        assert!(!three.contains(TierCode::EmployeeChildren));
    }

    #[test]
    fn test_unknown_code_rejected() {
        let two = TierConfig::two_tier();
        let mut census = TierMap::new();
        census.insert(TierCode::EmployeeSpouse, 5.0);
        assert!(two.validate_keys("census", &census).is_err());
    }

    #[test]
    fn test_aggregate_factor_override() {
        let mut factors = TierMap::new();
        factors.insert(TierCode::EmployeeOnly, 18.5);
        let config = TierConfig::four_tier()
            .with_aggregate_factors(&factors)
            .unwrap();
        assert_eq!(config.aggregate_factor(TierCode::EmployeeOnly), Some(18.5));
        // Other tiers keep the defaults
        assert_eq!(config.aggregate_factor(TierCode::Family), Some(41.0));
    }

    #[test]
    fn test_tier_count_constructor() {
        assert!(TierConfig::from_tier_count(4).is_ok());
        assert!(TierConfig::from_tier_count(5).is_err());
    }
}
