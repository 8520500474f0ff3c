#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Economic dataset types shared across the gdp-globe system.
//!
//! Defines the per-country record shape, the rank-derived color palette,
//! the supported display languages, and the bundled year-2024 reference
//! dataset that seeds synthetic projections when no authoritative data
//! is available.

pub mod localization;
pub mod reference;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The year the bundled reference dataset describes.
pub const REFERENCE_YEAR: i32 = 2024;

/// Earliest selectable year.
pub const MIN_YEAR: i32 = 2015;

/// Latest selectable year.
pub const MAX_YEAR: i32 = 2030;

/// First year of the locked range. Years at or beyond this never trigger
/// an authoritative fetch and remain synthetic-only.
pub const LOCKED_YEAR_START: i32 = 2026;

/// Floor for GDP values, in billions USD. Projections and remote payloads
/// are clamped to this to avoid zero or negative artifacts.
pub const MIN_GDP: f64 = 10.0;

/// Cyclic palette assigned by rank: rank 1 gets the first color, rank 11
/// wraps back around.
pub const RANK_PALETTE: [&str; 10] = [
    "#ef4444", // Red
    "#f97316", // Orange
    "#f59e0b", // Amber
    "#84cc16", // Lime
    "#10b981", // Emerald
    "#06b6d4", // Cyan
    "#3b82f6", // Blue
    "#6366f1", // Indigo
    "#8b5cf6", // Violet
    "#d946ef", // Fuchsia
];

/// Returns the presentation color for a 1-based rank.
///
/// Rank 0 is out of contract but maps to the first palette entry rather
/// than panicking.
#[must_use]
pub fn rank_color(rank: u32) -> &'static str {
    let index = rank.saturating_sub(1) as usize % RANK_PALETTE.len();
    RANK_PALETTE[index]
}

/// One country's economic snapshot within a single year's dataset.
///
/// `code` is the stable identity key across years and languages; the
/// display `country` name is subject to localization overlay and is not
/// part of identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    /// Display name (localizable).
    pub country: String,
    /// ISO-3166 alpha-3 code.
    pub code: String,
    /// Approximate centroid latitude, degrees.
    pub lat: f64,
    /// Approximate centroid longitude, degrees.
    pub lng: f64,
    /// Nominal GDP in billions USD. Always >= [`MIN_GDP`].
    pub gdp: f64,
    /// Annual growth rate, percent, signed.
    pub growth_rate: f64,
    /// 1-based position by descending GDP within the dataset.
    pub rank: u32,
    /// Presentation color, a function of `rank` only.
    pub color: String,
}

/// Narrative analysis for a single country/year pair, produced by the
/// remote generative service or substituted by a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    /// Two-sentence overview of the economic state.
    pub summary: String,
    /// Top driving industries.
    pub key_sectors: Vec<String>,
    /// Short prediction for the subsequent year.
    pub outlook: String,
}

/// Supported display languages.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    /// English.
    En,
    /// Chinese (Simplified).
    Zh,
    /// French.
    Fr,
    /// Japanese.
    Ja,
}

impl Language {
    /// The language name as spelled out in prompts to the generative
    /// service.
    #[must_use]
    pub const fn prompt_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Zh => "Chinese (Simplified)",
            Self::Fr => "French",
            Self::Ja => "Japanese",
        }
    }
}

/// Re-ranks a dataset in place by descending GDP and reassigns colors.
///
/// Ties keep their existing relative order (stable sort), so callers can
/// rely on input order as the tiebreak.
pub fn rerank(records: &mut [CountryRecord]) {
    records.sort_by(|a, b| b.gdp.partial_cmp(&a.gdp).unwrap_or(std::cmp::Ordering::Equal));
    for (index, record) in records.iter_mut().enumerate() {
        let rank = u32::try_from(index + 1).unwrap_or(u32::MAX);
        record.rank = rank;
        record.color = rank_color(rank).to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, gdp: f64) -> CountryRecord {
        CountryRecord {
            country: country.to_string(),
            code: country[..3.min(country.len())].to_uppercase(),
            lat: 0.0,
            lng: 0.0,
            gdp,
            growth_rate: 1.0,
            rank: 0,
            color: String::new(),
        }
    }

    #[test]
    fn palette_wraps_after_ten() {
        assert_eq!(rank_color(1), "#ef4444");
        assert_eq!(rank_color(10), "#d946ef");
        assert_eq!(rank_color(11), "#ef4444");
        assert_eq!(rank_color(25), "#10b981");
    }

    #[test]
    fn rerank_is_contiguous_and_descending() {
        let mut records = vec![record("Alpha", 100.0), record("Beta", 300.0), record("Gamma", 200.0)];
        rerank(&mut records);

        assert_eq!(records[0].country, "Beta");
        assert_eq!(records[1].country, "Gamma");
        assert_eq!(records[2].country, "Alpha");
        assert_eq!(
            records.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(records[0].color, "#ef4444");
    }

    #[test]
    fn rerank_ties_keep_input_order() {
        let mut records = vec![record("First", 100.0), record("Second", 100.0)];
        rerank(&mut records);
        assert_eq!(records[0].country, "First");
        assert_eq!(records[1].country, "Second");
    }

    #[test]
    fn year_domain_brackets_reference_and_lock() {
        // The year picker spans MIN_YEAR..=MAX_YEAR; the reference year
        // must be selectable and the locked range must begin inside the
        // domain (after it, locking would be unreachable).
        assert!(MIN_YEAR < REFERENCE_YEAR);
        assert!(REFERENCE_YEAR < LOCKED_YEAR_START);
        assert!(LOCKED_YEAR_START <= MAX_YEAR);
    }

    #[test]
    fn language_wire_codes() {
        assert_eq!(Language::En.to_string(), "en");
        assert_eq!("zh".parse::<Language>().unwrap(), Language::Zh);
        assert_eq!(Language::Ja.prompt_name(), "Japanese");
    }

    #[test]
    fn record_serializes_camel_case() {
        let json = serde_json::to_value(record("Alpha", 100.0)).unwrap();
        assert!(json.get("growthRate").is_some());
        assert!(json.get("growth_rate").is_none());
    }
}
