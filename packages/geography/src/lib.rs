#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Country boundary data for the globe.
//!
//! Fetches the Natural Earth admin-0 country polygons once at startup
//! and merges them with the active economic dataset by ISO-3 code, so
//! the renderer can highlight and extrude matched polygons. Countries
//! without a matching polygon (or polygons without data) are simply not
//! highlighted — never an error.

use gdp_globe_economy_models::CountryRecord;
use geojson::{Feature, FeatureCollection};
use thiserror::Error;

/// Default boundary source: Natural Earth 1:110m admin-0 countries.
///
/// The low-resolution set is deliberate — the 1:50m polygons caused
/// visible lag during globe rotation.
pub const NE_110M_COUNTRIES_URL: &str = "https://raw.githubusercontent.com/vasturiano/react-globe.gl/master/example/datasets/ne_110m_admin_0_countries.geojson";

/// Errors that can occur while loading boundary data.
#[derive(Debug, Error)]
pub enum GeoError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GeoJSON parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// Server returned a non-success status.
    #[error("Boundary fetch failed: HTTP {status}")]
    Status {
        /// The HTTP status code.
        status: reqwest::StatusCode,
    },
}

/// A boundary polygon paired with the economic record it matched, if
/// any.
#[derive(Debug)]
pub struct BoundaryCountry {
    /// The GeoJSON feature (polygon geometry plus source properties).
    pub feature: Feature,
    /// The matched economic record, or `None` when the feature has no
    /// counterpart in the dataset.
    pub record: Option<CountryRecord>,
}

/// Fetches and parses the country boundary `GeoJSON` document.
///
/// Called once at startup; the result is reused across year changes
/// since boundaries do not vary by year.
///
/// # Errors
///
/// Returns [`GeoError`] if the request fails, the server responds with
/// a non-success status, or the body is not valid `GeoJSON`.
pub async fn fetch_boundaries(url: &str) -> Result<FeatureCollection, GeoError> {
    let resp = reqwest::get(url).await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(GeoError::Status { status });
    }

    let body = resp.text().await?;
    let collection: FeatureCollection = body.parse()?;
    log::info!(
        "loaded {} boundary features from {url}",
        collection.features.len()
    );
    Ok(collection)
}

/// Merges boundary features with an economic dataset.
///
/// Matching tries, in order: the feature's `ISO_A3` code, its `ADM0_A3`
/// code (Natural Earth sets `ISO_A3` to `-99` for a handful of
/// countries, France among them), then the display names `NAME` and
/// `NAME_LONG`. Unmatched features come back with `record: None`.
#[must_use]
pub fn merge_records(
    collection: FeatureCollection,
    records: &[CountryRecord],
) -> Vec<BoundaryCountry> {
    collection
        .features
        .into_iter()
        .map(|feature| {
            let record = match_record(&feature, records).cloned();
            BoundaryCountry { feature, record }
        })
        .collect()
}

fn match_record<'a>(
    feature: &Feature,
    records: &'a [CountryRecord],
) -> Option<&'a CountryRecord> {
    let iso = property_str(feature, "ISO_A3");
    let adm0 = property_str(feature, "ADM0_A3");
    let name = property_str(feature, "NAME");
    let name_long = property_str(feature, "NAME_LONG");

    let code = remap_code(iso, name, adm0);

    records.iter().find(|record| {
        Some(record.code.as_str()) == code
            || (adm0.is_some() && Some(record.code.as_str()) == adm0)
            || (name.is_some() && Some(record.country.as_str()) == name)
            || (name_long.is_some() && Some(record.country.as_str()) == name_long)
    })
}

/// Fixed disputed-territory policy: the Taiwan polygon is displayed
/// with China's data. Preserved verbatim for compatibility with the
/// shipped behavior; not configurable.
fn remap_code<'a>(
    iso: Option<&'a str>,
    name: Option<&str>,
    adm0: Option<&str>,
) -> Option<&'a str> {
    if iso == Some("TWN") || name == Some("Taiwan") || adm0 == Some("TWN") {
        return Some("CHN");
    }
    iso
}

fn property_str<'a>(feature: &'a Feature, key: &str) -> Option<&'a str> {
    feature
        .properties
        .as_ref()
        .and_then(|props| props.get(key))
        .and_then(serde_json::Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdp_globe_economy_models::reference::reference_dataset;

    fn feature(props: serde_json::Value) -> Feature {
        let geometry = geojson::Geometry::new(geojson::Value::Polygon(vec![vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 0.0],
        ]]));
        Feature {
            bbox: None,
            geometry: Some(geometry),
            id: None,
            properties: match props {
                serde_json::Value::Object(map) => Some(map),
                _ => None,
            },
            foreign_members: None,
        }
    }

    fn collection(features: Vec<Feature>) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    #[test]
    fn matches_by_iso_code() {
        let features = collection(vec![feature(serde_json::json!({
            "ISO_A3": "JPN",
            "ADM0_A3": "JPN",
            "NAME": "Japan",
        }))]);

        let merged = merge_records(features, &reference_dataset());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].record.as_ref().unwrap().code, "JPN");
    }

    #[test]
    fn falls_back_to_adm0_when_iso_is_missing_marker() {
        // Natural Earth ships ISO_A3 = "-99" for France.
        let features = collection(vec![feature(serde_json::json!({
            "ISO_A3": "-99",
            "ADM0_A3": "FRA",
            "NAME": "France",
        }))]);

        let merged = merge_records(features, &reference_dataset());
        assert_eq!(merged[0].record.as_ref().unwrap().code, "FRA");
    }

    #[test]
    fn matches_by_display_name() {
        let features = collection(vec![feature(serde_json::json!({
            "NAME_LONG": "United Kingdom",
        }))]);

        let merged = merge_records(features, &reference_dataset());
        assert_eq!(merged[0].record.as_ref().unwrap().code, "GBR");
    }

    #[test]
    fn taiwan_polygon_maps_to_china() {
        let features = collection(vec![feature(serde_json::json!({
            "ISO_A3": "TWN",
            "ADM0_A3": "TWN",
            "NAME": "Taiwan",
        }))]);

        let merged = merge_records(features, &reference_dataset());
        assert_eq!(merged[0].record.as_ref().unwrap().code, "CHN");
    }

    #[test]
    fn unmatched_feature_carries_no_record() {
        let features = collection(vec![feature(serde_json::json!({
            "ISO_A3": "ATA",
            "NAME": "Antarctica",
        }))]);

        let merged = merge_records(features, &reference_dataset());
        assert_eq!(merged.len(), 1);
        assert!(merged[0].record.is_none());
    }

    #[test]
    fn featureless_properties_do_not_panic() {
        let features = collection(vec![feature(serde_json::Value::Null)]);
        let merged = merge_records(features, &reference_dataset());
        assert!(merged[0].record.is_none());
    }
}
