//! Bundled year-2024 reference dataset.
//!
//! A fixed baseline covering the top 25 economies, used as the
//! extrapolation seed whenever no cached or remote dataset is available.
//! This is the system's only static state. Figures are approximate
//! IMF/World Bank nominal GDP estimates in billions USD.

use crate::{CountryRecord, rank_color};

/// `(name, iso3, lat, lng, gdp_billions, growth_rate_pct)` — ordered by
/// descending GDP so the table index is `rank - 1`.
const REFERENCE_TABLE: [(&str, &str, f64, f64, f64, f64); 25] = [
    ("United States", "USA", 37.1, -95.7, 29167.0, 2.8),
    ("China", "CHN", 35.9, 104.2, 18273.0, 4.8),
    ("Germany", "DEU", 51.2, 10.4, 4711.0, 0.1),
    ("Japan", "JPN", 36.2, 138.3, 4070.0, 0.3),
    ("India", "IND", 20.6, 79.0, 3889.0, 6.5),
    ("United Kingdom", "GBR", 55.4, -3.4, 3587.0, 1.1),
    ("France", "FRA", 46.2, 2.2, 3174.0, 1.1),
    ("Italy", "ITA", 41.9, 12.6, 2376.0, 0.7),
    ("Canada", "CAN", 56.1, -106.3, 2215.0, 1.3),
    ("Russia", "RUS", 61.5, 105.3, 2184.0, 3.6),
    ("Brazil", "BRA", -14.2, -51.9, 2179.0, 3.0),
    ("Mexico", "MEX", 23.6, -102.6, 1848.0, 1.5),
    ("Australia", "AUS", -25.3, 133.8, 1802.0, 1.2),
    ("Spain", "ESP", 40.5, -3.7, 1731.0, 3.0),
    ("South Korea", "KOR", 35.9, 127.8, 1713.0, 2.2),
    ("Indonesia", "IDN", -0.8, 113.9, 1396.0, 5.0),
    ("Turkey", "TUR", 39.0, 35.2, 1323.0, 3.0),
    ("Netherlands", "NLD", 52.1, 5.3, 1218.0, 0.9),
    ("Saudi Arabia", "SAU", 23.9, 45.1, 1100.0, 1.4),
    ("Switzerland", "CHE", 46.8, 8.2, 938.0, 1.3),
    ("Poland", "POL", 51.9, 19.1, 862.0, 2.9),
    ("Belgium", "BEL", 50.5, 4.5, 662.0, 1.0),
    ("Sweden", "SWE", 60.1, 18.6, 609.0, 0.6),
    ("Argentina", "ARG", -38.4, -63.6, 604.0, -3.5),
    ("United Arab Emirates", "ARE", 23.4, 53.8, 545.0, 4.0),
];

/// Builds the reference dataset for [`crate::REFERENCE_YEAR`].
///
/// Ranks are assigned from table order and colors derived from rank, so
/// the output satisfies the dataset invariants without further
/// processing.
#[must_use]
pub fn reference_dataset() -> Vec<CountryRecord> {
    REFERENCE_TABLE
        .iter()
        .enumerate()
        .map(|(index, &(country, code, lat, lng, gdp, growth_rate))| {
            let rank = u32::try_from(index + 1).unwrap_or(u32::MAX);
            CountryRecord {
                country: country.to_string(),
                code: code.to_string(),
                lat,
                lng,
                gdp,
                growth_rate,
                rank,
                color: rank_color(rank).to_string(),
            }
        })
        .collect()
}
