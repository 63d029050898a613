//! Benefits Calculation Core CLI
//!
//! Command-line interface for running the AV, FIE, and deductible engines
//! against JSON input files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use serde::Deserialize;

use benefits_calc::deductible::load_claimants;
use benefits_calc::{
    analyze_deductibles, calculate_av, calculate_fie, AnalyzerInput, CostComponents,
    PlanCostSharing, PlanData, SweepRunner, TierConfig,
};

#[derive(Parser)]
#[command(name = "benefits_calc", version, about = "Benefits calculation engines")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Calculate actuarial value and metal tier for a plan design
    Av {
        /// JSON file with the plan cost-sharing parameters
        input: PathBuf,
        /// Write the full result as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Run the Fully-Insured Equivalent build-up
    Fie {
        /// JSON file with plans and cost components
        input: PathBuf,
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Analyze specific deductible options against claim history
    Deductible {
        /// JSON file with the analyzer input
        input: PathBuf,
        /// Replace the input's claimants with a CSV claim report
        #[arg(long)]
        claimants_csv: Option<PathBuf>,
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Deductible analysis across a range of trend rates
    Sweep {
        /// JSON file with the analyzer input
        input: PathBuf,
        /// Comma-separated trend rates, e.g. 0.05,0.07,0.09
        #[arg(long, value_delimiter = ',')]
        rates: Vec<f64>,
    },
}

/// FIE request file: plans plus costs, with the tier system inferred
/// from the tier count unless overridden.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieRequest {
    plans: Vec<PlanData>,
    costs: CostComponents,
    #[serde(default = "default_tier_count")]
    tier_count: u32,
}

fn default_tier_count() -> u32 {
    4
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("parsing {}", path.display()))
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let contents = serde_json::to_string_pretty(value)?;
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    println!("\nFull results written to: {}", path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Av { input, json } => {
            let plan: PlanCostSharing = read_json(&input)?;
            info!("running AV calculation for {}", input.display());
            let result = calculate_av(&plan)?;

            println!("Actuarial Value Calculation");
            println!("===========================\n");
            println!("  Actuarial Value: {:.1}%", result.actuarial_value * 100.0);
            println!("  Metal Tier:      {}", result.metal_tier.as_str());
            println!("  Plan Pays:       {:.1}%", result.plan_pays_percentage * 100.0);
            println!("  Enrollee Pays:   {:.1}%", result.enrollee_pays_percentage * 100.0);
            println!("\nCategory breakdown (plan-paid share):");
            let b = &result.category_breakdown;
            println!("  {:<22} {:>6.1}%", "Primary care", b.primary_care * 100.0);
            println!("  {:<22} {:>6.1}%", "Specialty care", b.specialty * 100.0);
            println!("  {:<22} {:>6.1}%", "Emergency", b.emergency * 100.0);
            println!("  {:<22} {:>6.1}%", "Inpatient", b.inpatient * 100.0);
            println!("  {:<22} {:>6.1}%", "Outpatient/imaging", b.outpatient * 100.0);
            println!("  {:<22} {:>6.1}%", "Pharmacy", b.pharmacy * 100.0);
            println!(
                "\nACA compliant: {}",
                if result.compliance.is_aca_compliant { "yes" } else { "no" }
            );
            for issue in &result.compliance.issues {
                println!("  issue: {}", issue);
            }
            for warning in &result.compliance.warnings {
                println!("  warning: {}", warning);
            }

            if let Some(path) = json {
                write_json(&path, &result)?;
            }
        }
        Command::Fie { input, json } => {
            let request: FieRequest = read_json(&input)?;
            let config = TierConfig::from_tier_count(request.tier_count)
                .context("unsupported tier count")?;
            info!(
                "running FIE build-up for {} plan(s), {} system",
                request.plans.len(),
                config.name()
            );
            let result = calculate_fie(&request.plans, &request.costs, &config)?;

            println!("Fully-Insured Equivalent Build-Up");
            println!("=================================\n");
            println!("  Total employees:    {}", result.total_employees);
            println!("  Admin:              ${:>14.2}", result.admin_annual_cost);
            println!("  Specific premium:   ${:>14.2}", result.specific_annual_premium);
            println!("  Aggregate premium:  ${:>14.2}", result.aggregate_annual_premium);
            println!("  Laser liability:    ${:>14.2}", result.laser_annual_cost);
            println!("  FIE annual cost:    ${:>14.2}", result.fie_annual_cost);
            println!("  Current annual:     ${:>14.2}", result.current_annual_cost);
            println!("  Annual savings:     ${:>14.2}", result.annual_savings);
            if let Some(pct) = result.savings_percentage {
                println!("  Savings:            {:>15.1}%", pct);
            }

            println!("\nPEPM breakdown:");
            let pepm = &result.pepm;
            println!("  admin ${:.2}  specific ${:.2}  aggregate ${:.2}  laser ${:.2}  total ${:.2}",
                pepm.admin, pepm.specific, pepm.aggregate, pepm.laser, pepm.total);

            for allocation in &result.allocations {
                println!(
                    "\nPlan: {} (differential {:.4}, allocation ${:.2})",
                    allocation.plan_name, allocation.differential, allocation.allocation
                );
                for (code, rate) in &allocation.fie_rates {
                    println!("  {:<4} ${:>10.2}/mo", code.as_str(), rate);
                }
            }

            if let Some(path) = json {
                write_json(&path, &result)?;
            }
        }
        Command::Deductible { input, claimants_csv, json } => {
            let mut analyzer: AnalyzerInput = read_json(&input)?;
            if let Some(csv_path) = claimants_csv {
                let (years, claimants) = load_claimants(&csv_path)?;
                info!(
                    "loaded {} claimants over {} year(s) from {}",
                    claimants.len(),
                    years.len(),
                    csv_path.display()
                );
                analyzer.claim_years = years;
                analyzer.claimants = claimants;
            }
            let result = analyze_deductibles(&analyzer)?;
            print_deductible_results(&result);

            if let Some(path) = json {
                write_json(&path, &result)?;
            }
        }
        Command::Sweep { input, rates } => {
            let analyzer: AnalyzerInput = read_json(&input)?;
            let rates = if rates.is_empty() {
                vec![0.05, 0.06, 0.07, 0.08, 0.09, 0.10]
            } else {
                rates
            };
            let runner = SweepRunner::new(analyzer);
            let results = runner.trend_sweep(&rates)?;

            println!("Trend Sensitivity Sweep");
            println!("=======================\n");
            println!("{:>7} {:>18} {:>14} {:>12}",
                "Trend", "Avg ISL (current)", "Best net", "Recommended");
            println!("{}", "-".repeat(56));
            for (rate, result) in &results {
                let rec = &result.recommendation;
                let label = if rec.retain_current {
                    "retain current".to_string()
                } else {
                    format!("${:.0}", rec.deductible)
                };
                println!(
                    "{:>6.1}% {:>18.2} {:>14.2} {:>12}",
                    rate * 100.0,
                    result.claims_analysis[0].average_isl_claims,
                    rec.net_projected_savings,
                    label
                );
            }
        }
    }

    Ok(())
}

fn print_deductible_results(result: &benefits_calc::AnalyzerResults) {
    println!("ISL Deductible Analysis");
    println!("=======================\n");
    println!(
        "  Effective year: {}   Trend: {:.1}%",
        result.effective_year,
        result.trend_rate * 100.0
    );

    println!("\nClaims analysis (employer-retained, trended):");
    print!("{:>12}", "Deductible");
    for year in &result.claim_years {
        print!(" {:>14}", year);
    }
    println!(" {:>14}", "Avg ISL");
    println!("{}", "-".repeat(12 + 15 * (result.claim_years.len() + 1)));
    for row in &result.claims_analysis {
        print!("{:>12.0}", row.deductible_level);
        for retained in &row.yearly_retained {
            match retained {
                Some(amount) => print!(" {:>14.2}", amount),
                None => print!(" {:>14}", "-"),
            }
        }
        println!(" {:>14.2}", row.average_isl_claims);
    }

    if !result.premium_comparison.is_empty() {
        println!("\nPremium comparison:");
        println!("{:<16} {:>12} {:>14} {:>14} {:>14} {:>14}",
            "Carrier", "Deductible", "Premium", "Prem. savings", "Add'l claims", "Net savings");
        println!("{}", "-".repeat(88));
        for row in &result.premium_comparison {
            let additional = match row.additional_claims {
                Some(amount) => format!("{:.2}", amount),
                None => "-".to_string(),
            };
            println!(
                "{:<16} {:>12.0} {:>14.2} {:>14.2} {:>14} {:>14.2}",
                row.carrier,
                row.deductible_amount,
                row.annual_premium,
                row.premium_savings,
                additional,
                row.net_projected_savings
            );
        }
    }

    println!("\nRecommendation: {}", result.recommendation.message);
}
