//! Sweep runner for trend-rate sensitivity analysis
//!
//! Holds a base analyzer input once, then re-runs the deductible analysis
//! across many trend rates. The engines are pure functions over their
//! inputs, so the sweep parallelizes without synchronization.

use rayon::prelude::*;

use crate::deductible::{analyze_deductibles, AnalyzerInput, AnalyzerResults};
use crate::error::CalcResult;

/// Pre-validated base input for repeated deductible analyses.
#[derive(Debug, Clone)]
pub struct SweepRunner {
    base: AnalyzerInput,
}

impl SweepRunner {
    pub fn new(base: AnalyzerInput) -> Self {
        Self { base }
    }

    /// Run one analysis at a specific trend rate
    pub fn run(&self, trend_rate: f64) -> CalcResult<AnalyzerResults> {
        let mut input = self.base.clone();
        input.trend_rate = trend_rate;
        analyze_deductibles(&input)
    }

    /// Run the analysis across every trend rate in parallel.
    /// The first invalid rate fails the whole sweep.
    pub fn trend_sweep(&self, rates: &[f64]) -> CalcResult<Vec<(f64, AnalyzerResults)>> {
        rates
            .par_iter()
            .map(|&rate| Ok((rate, self.run(rate)?)))
            .collect()
    }

    pub fn base(&self) -> &AnalyzerInput {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deductible::{ClaimantData, CurrentSetup, DeductibleOption};

    fn base_input() -> AnalyzerInput {
        AnalyzerInput {
            effective_year: 2025,
            claim_years: vec![2022, 2023, 2024],
            claimants: vec![ClaimantData::from_raw_amounts(
                "A",
                &[180_000.0, 240_000.0, 0.0],
            )],
            current: CurrentSetup {
                deductible: 225_000.0,
                premium: 480_000.0,
            },
            options: vec![DeductibleOption {
                amount: 300_000.0,
                carrier: "Carrier A".into(),
                annual_premium: 430_000.0,
            }],
            trend_rate: 0.07,
        }
    }

    #[test]
    fn test_sweep_returns_one_result_per_rate() {
        let runner = SweepRunner::new(base_input());
        let rates = [0.0, 0.05, 0.07, 0.10];

        let results = runner.trend_sweep(&rates).unwrap();
        assert_eq!(results.len(), rates.len());
        for (i, (rate, result)) in results.iter().enumerate() {
            assert_eq!(*rate, rates[i]);
            assert_eq!(result.trend_rate, rates[i]);
        }
    }

    #[test]
    fn test_higher_trend_never_lowers_retained_claims() {
        let runner = SweepRunner::new(base_input());
        let results = runner.trend_sweep(&[0.0, 0.05, 0.10]).unwrap();

        let averages: Vec<f64> = results
            .iter()
            .map(|(_, r)| r.claims_analysis[0].average_isl_claims)
            .collect();
        assert!(averages[1] >= averages[0]);
        assert!(averages[2] >= averages[1]);
    }

    #[test]
    fn test_invalid_rate_fails_sweep() {
        let runner = SweepRunner::new(base_input());
        assert!(runner.trend_sweep(&[0.05, 1.5]).is_err());
    }
}
