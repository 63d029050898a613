//! ACA metal tier classification

use serde::{Deserialize, Serialize};

/// ACA metal tier, ordered from leanest to richest coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetalTier {
    Catastrophic,
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl MetalTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetalTier::Catastrophic => "Catastrophic",
            MetalTier::Bronze => "Bronze",
            MetalTier::Silver => "Silver",
            MetalTier::Gold => "Gold",
            MetalTier::Platinum => "Platinum",
        }
    }

    /// The standard AV range for this tier
    pub fn range(&self) -> TierRange {
        match self {
            MetalTier::Catastrophic => TierRange::new(0.0, 0.60),
            MetalTier::Bronze => TierRange::new(0.58, 0.62),
            MetalTier::Silver => TierRange::new(0.68, 0.72),
            MetalTier::Gold => TierRange::new(0.78, 0.82),
            MetalTier::Platinum => TierRange::new(0.88, 0.92),
        }
    }

    const ASCENDING: [MetalTier; 5] = [
        MetalTier::Catastrophic,
        MetalTier::Bronze,
        MetalTier::Silver,
        MetalTier::Gold,
        MetalTier::Platinum,
    ];

    /// Classify an actuarial value.
    ///
    /// The configured ranges overlap at the Bronze/Catastrophic boundary and
    /// leave gaps between the named tiers, so the lookup is two-stage: the
    /// first containing range in ascending tier order wins; a value inside a
    /// gap is assigned the tier whose range midpoint is closest (ascending
    /// order also breaks midpoint ties). Every AV classifies.
    pub fn from_av(av: f64) -> MetalTier {
        for tier in MetalTier::ASCENDING {
            if tier.range().contains(av) {
                return tier;
            }
        }

        let mut best = MetalTier::Catastrophic;
        let mut best_dist = f64::INFINITY;
        for tier in MetalTier::ASCENDING {
            let dist = (av - tier.range().midpoint()).abs();
            if dist < best_dist {
                best = tier;
                best_dist = dist;
            }
        }
        best
    }
}

/// Inclusive AV range for a metal tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TierRange {
    pub min: f64,
    pub max: f64,
}

impl TierRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, av: f64) -> bool {
        av >= self.min && av <= self.max
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// All tier ranges, echoed back in results for charting
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TierRanges {
    pub catastrophic: TierRange,
    pub bronze: TierRange,
    pub silver: TierRange,
    pub gold: TierRange,
    pub platinum: TierRange,
}

impl TierRanges {
    pub fn standard() -> Self {
        Self {
            catastrophic: MetalTier::Catastrophic.range(),
            bronze: MetalTier::Bronze.range(),
            silver: MetalTier::Silver.range(),
            gold: MetalTier::Gold.range(),
            platinum: MetalTier::Platinum.range(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_lookup() {
        assert_eq!(MetalTier::from_av(0.70), MetalTier::Silver);
        assert_eq!(MetalTier::from_av(0.80), MetalTier::Gold);
        assert_eq!(MetalTier::from_av(0.90), MetalTier::Platinum);
        assert_eq!(MetalTier::from_av(0.40), MetalTier::Catastrophic);
    }

    #[test]
    fn test_overlap_resolves_ascending() {
        // 0.59 is inside both the Catastrophic and Bronze ranges
        assert_eq!(MetalTier::from_av(0.59), MetalTier::Catastrophic);
    }

    #[test]
    fn test_gap_maps_to_nearest_midpoint() {
        // 0.66 sits in the gap between Bronze [0.58, 0.62] and Silver
        // [0.68, 0.72], closer to the Silver midpoint
        assert_eq!(MetalTier::from_av(0.66), MetalTier::Silver);
        assert_eq!(MetalTier::from_av(0.63), MetalTier::Bronze);
        // 0.75 ties between the Silver and Gold midpoints; ascending order
        // keeps the lower tier
        assert_eq!(MetalTier::from_av(0.75), MetalTier::Silver);
        assert_eq!(MetalTier::from_av(0.76), MetalTier::Gold);
    }

    #[test]
    fn test_above_platinum_classifies_platinum() {
        assert_eq!(MetalTier::from_av(1.0), MetalTier::Platinum);
    }
}
