//! Deductible trend and comparison analysis.
//!
//! Historical claims are trended to the effective year with compound
//! growth, capped at each candidate deductible to get the employer's
//! retained claims, and averaged across complete years. Raising the
//! deductible trades premium savings against the additional claims the
//! employer would have retained.

use chrono::Utc;

use crate::error::CalcResult;

use super::claimant::AnalyzerInput;
use super::results::{
    AnalyzerResults, ClaimsAnalysisRow, PremiumComparisonRow, Recommendation,
};

/// Run the full trend and comparison analysis.
pub fn analyze_deductibles(input: &AnalyzerInput) -> CalcResult<AnalyzerResults> {
    input.validate()?;

    let options = input.comparable_options();

    let current_row = claims_analysis(input, input.current.deductible);
    let current_average = current_row.average_isl_claims;

    let mut claims_rows = vec![current_row];
    let mut comparison_rows = Vec::with_capacity(options.len());

    for option in &options {
        let mut row = claims_analysis(input, option.amount);
        let additional = row.average_isl_claims - current_average;
        row.additional_claims = if additional > 0.0 { Some(additional) } else { None };

        let premium_savings = input.current.premium - option.annual_premium;
        let net = premium_savings - row.additional_claims.unwrap_or(0.0);

        comparison_rows.push(PremiumComparisonRow {
            carrier: option.carrier.clone(),
            deductible_amount: option.amount,
            annual_premium: option.annual_premium,
            premium_savings,
            additional_claims: row.additional_claims,
            net_projected_savings: net,
        });
        claims_rows.push(row);
    }

    let recommendation = recommend(&comparison_rows, input.current.deductible);

    Ok(AnalyzerResults {
        effective_year: input.effective_year,
        claim_years: input.claim_years.clone(),
        trend_rate: input.trend_rate,
        claims_analysis: claims_rows,
        premium_comparison: comparison_rows,
        recommendation,
        calculated_at: Utc::now(),
    })
}

/// Retained claims per year at one deductible level, with the average over
/// populated complete years. The final year is in-progress: displayed in
/// the yearly breakdown but never averaged.
fn claims_analysis(input: &AnalyzerInput, level: f64) -> ClaimsAnalysisRow {
    let year_count = input.claim_years.len();
    let mut yearly_retained = Vec::with_capacity(year_count);

    for (year_idx, &year) in input.claim_years.iter().enumerate() {
        let years_forward = (input.effective_year - year) as f64;
        let growth = (1.0 + input.trend_rate).powf(years_forward);

        let mut total = 0.0;
        let mut populated = false;
        for claimant in &input.claimants {
            if let Some(raw) = claimant.claims[year_idx] {
                total += (raw * growth).min(level);
                populated = true;
            }
        }
        yearly_retained.push(if populated { Some(total) } else { None });
    }

    let complete = &yearly_retained[..year_count.saturating_sub(1)];
    let populated: Vec<f64> = complete.iter().filter_map(|v| *v).collect();
    let average = if populated.is_empty() {
        0.0
    } else {
        populated.iter().sum::<f64>() / populated.len() as f64
    };

    ClaimsAnalysisRow {
        deductible_level: level,
        yearly_retained,
        average_isl_claims: average,
        additional_claims: None,
    }
}

fn recommend(comparison: &[PremiumComparisonRow], current_deductible: f64) -> Recommendation {
    let mut best: Option<&PremiumComparisonRow> = None;
    for row in comparison {
        let better = match best {
            None => row.net_projected_savings > 0.0,
            Some(current_best) => {
                row.net_projected_savings > current_best.net_projected_savings
                    || (row.net_projected_savings == current_best.net_projected_savings
                        && row.deductible_amount < current_best.deductible_amount)
            }
        };
        if better {
            best = Some(row);
        }
    }

    match best {
        Some(row) => Recommendation {
            retain_current: false,
            carrier: Some(row.carrier.clone()),
            deductible: row.deductible_amount,
            net_projected_savings: row.net_projected_savings,
            message: format!(
                "Move to the {} quote at a ${:.0} specific deductible for a projected \
                 net annual savings of ${:.0}.",
                row.carrier, row.deductible_amount, row.net_projected_savings
            ),
        },
        None => Recommendation {
            retain_current: true,
            carrier: None,
            deductible: current_deductible,
            net_projected_savings: 0.0,
            message: format!(
                "No quoted option projects positive net savings; retain the current \
                 ${:.0} specific deductible.",
                current_deductible
            ),
        },
    }
}
