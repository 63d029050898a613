//! CSV-based claimant history loader
//!
//! Expected layout: a `name` column followed by one column per claim year,
//! e.g. `name,2022,2023,2024`. Blank cells and `0` are read as "no data"
//! per the carrier report entry convention.

use std::fs::File;
use std::path::Path;

use crate::error::{CalcError, CalcResult};

use super::claimant::ClaimantData;

/// Load claim years and claimant history from a CSV file.
/// Returns the years parsed from the header and one record per row.
pub fn load_claimants(path: &Path) -> CalcResult<(Vec<i32>, Vec<ClaimantData>)> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers()?.clone();
    if headers.len() < 2 {
        return Err(CalcError::invalid(
            "claimants csv",
            "expected a name column and at least one claim year column",
        ));
    }

    let mut years = Vec::with_capacity(headers.len() - 1);
    for header in headers.iter().skip(1) {
        let year: i32 = header.trim().parse().map_err(|_| {
            CalcError::invalid(
                "claimants csv",
                format!("header `{}` is not a claim year", header),
            )
        })?;
        years.push(year);
    }

    let mut claimants = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() != headers.len() {
            return Err(CalcError::invalid(
                "claimants csv",
                format!("row {} has {} columns, expected {}", row + 2, record.len(), headers.len()),
            ));
        }

        let name = record[0].trim().to_string();
        let mut claims = Vec::with_capacity(years.len());
        for (col, cell) in record.iter().skip(1).enumerate() {
            let cell = cell.trim();
            if cell.is_empty() {
                claims.push(None);
                continue;
            }
            let amount: f64 = cell.parse().map_err(|_| {
                CalcError::invalid(
                    "claimants csv",
                    format!("row {} year {} has a non-numeric amount `{}`", row + 2, years[col], cell),
                )
            })?;
            claims.push(if amount > 0.0 { Some(amount) } else { None });
        }

        claimants.push(ClaimantData { name, claims });
    }

    Ok((years, claimants))
}
