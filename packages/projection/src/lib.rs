#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Deterministic synthetic GDP projection.
//!
//! Extrapolates a base-year dataset to an arbitrary target year with
//! compound growth, producing the provisional dataset shown while an
//! authoritative fetch is pending (or permanently, for locked years).
//! The projection is a pure function: identical inputs always produce
//! identical output, so the UI never flickers between renders of the
//! same year.

use gdp_globe_economy_models::{CountryRecord, MIN_GDP, rerank};

/// Projects `base` from `base_year` to `target_year`.
///
/// Each record grows at its own rate plus a small deterministic
/// perturbation derived from the name length, so neighboring economies
/// drift apart instead of moving in lockstep. Projected GDP is rounded
/// to the nearest integer (half away from zero) and clamped to
/// [`MIN_GDP`]. The result is re-ranked by descending GDP with ties
/// keeping base order, and colors are reassigned from the new ranks.
///
/// The input is not mutated. Precondition: `base` is non-empty.
#[must_use]
pub fn project(base: &[CountryRecord], base_year: i32, target_year: i32) -> Vec<CountryRecord> {
    let years_elapsed = target_year - base_year;

    let mut projected: Vec<CountryRecord> = base
        .iter()
        .map(|record| {
            let rate = (record.growth_rate + perturbation(&record.country)) / 100.0;
            let grown = record.gdp * (1.0 + rate).powi(years_elapsed);
            let mut next = record.clone();
            next.gdp = grown.round().max(MIN_GDP);
            next
        })
        .collect();

    rerank(&mut projected);
    projected
}

/// Deterministic per-record rate perturbation, in percentage points.
///
/// Derived from the display name length so the same input always yields
/// the same output. Range: 0.0 to 0.4 in 0.1 steps.
fn perturbation(country: &str) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let step = (country.len() % 5) as f64;
    step * 0.1
}
