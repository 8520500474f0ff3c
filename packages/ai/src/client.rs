//! Dataset and analysis fetch contracts with fallback substitution.
//!
//! [`AnalyticsClient`] is the single entry point the rest of the system
//! talks to. Its two public methods never fail: the dataset contract
//! substitutes a synthetic projection of the reference data, the
//! analysis contract a fixed placeholder.

use gdp_globe_economy_models::{
    AiAnalysis, CountryRecord, Language, MIN_GDP, REFERENCE_YEAR, rank_color,
    reference::reference_dataset,
};
use serde::Deserialize;

use crate::AiError;
use crate::providers::GenerativeProvider;

/// Number of countries requested from the remote service.
const DATASET_SIZE: usize = 25;

/// Client for the remote generative analytics service.
pub struct AnalyticsClient {
    provider: Box<dyn GenerativeProvider>,
    reference: Vec<CountryRecord>,
    reference_year: i32,
}

/// One country as returned by the remote service — the six required
/// fields, without the derived `color`. A missing or mistyped field
/// fails deserialization, which funnels into the fallback path.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteCountry {
    country: String,
    code: String,
    lat: f64,
    lng: f64,
    gdp: f64,
    growth_rate: f64,
    rank: u32,
}

impl AnalyticsClient {
    /// Creates a client backed by the given provider, seeded with the
    /// bundled reference dataset.
    #[must_use]
    pub fn new(provider: Box<dyn GenerativeProvider>) -> Self {
        Self::with_reference(provider, reference_dataset(), REFERENCE_YEAR)
    }

    /// Creates a client with an explicit reference dataset and base year
    /// for fallback projections.
    #[must_use]
    pub fn with_reference(
        provider: Box<dyn GenerativeProvider>,
        reference: Vec<CountryRecord>,
        reference_year: i32,
    ) -> Self {
        Self {
            provider,
            reference,
            reference_year,
        }
    }

    /// Fetches the top-25 dataset for `year` from the remote service.
    ///
    /// Never fails: any transport error, malformed payload, or empty
    /// response is logged and replaced by a deterministic synthetic
    /// projection of the reference dataset.
    pub async fn fetch_dataset(&self, year: i32) -> Vec<CountryRecord> {
        match self.try_fetch_dataset(year).await {
            Ok(records) => records,
            Err(e) => {
                log::warn!(
                    "Remote dataset unavailable for year {year}, \
                     switching to calculated fallback dataset: {e}"
                );
                gdp_globe_projection::project(&self.reference, self.reference_year, year)
            }
        }
    }

    async fn try_fetch_dataset(&self, year: i32) -> Result<Vec<CountryRecord>, AiError> {
        let prompt = format!(
            "Return a JSON array of the top {DATASET_SIZE} countries by GDP (Nominal) \
             for the year {year}. If {year} is in the future, use IMF/World Bank \
             projections. If past, use historical data. For each country include: \
             'country', 'code' (ISO 3), 'lat', 'lng', 'gdp' (Billions USD), \
             'growthRate' (%), 'rank'."
        );

        let text = self
            .provider
            .generate_json(&prompt, &dataset_schema())
            .await?;

        let remote: Vec<RemoteCountry> = parse_dataset_payload(&text)?;
        if remote.is_empty() {
            return Err(AiError::Contract {
                message: "remote service returned an empty dataset".to_string(),
            });
        }

        Ok(remote
            .into_iter()
            .map(|record| CountryRecord {
                country: record.country,
                code: record.code,
                lat: record.lat,
                lng: record.lng,
                gdp: record.gdp.max(MIN_GDP),
                growth_rate: record.growth_rate,
                rank: record.rank,
                color: rank_color(record.rank).to_string(),
            })
            .collect())
    }

    /// Fetches a short narrative analysis for a single country/year
    /// snapshot, in the requested language.
    ///
    /// Never fails: on any error a clearly-labeled placeholder in the
    /// requested language is returned instead.
    pub async fn fetch_analysis(
        &self,
        country: &str,
        gdp: f64,
        language: Language,
        year: i32,
    ) -> AiAnalysis {
        match self.try_fetch_analysis(country, gdp, language, year).await {
            Ok(analysis) => analysis,
            Err(e) => {
                log::warn!("Analysis failed for {country} ({year}), returning placeholder: {e}");
                fallback_analysis(language)
            }
        }
    }

    async fn try_fetch_analysis(
        &self,
        country: &str,
        gdp: f64,
        language: Language,
        year: i32,
    ) -> Result<AiAnalysis, AiError> {
        let lang_name = language.prompt_name();
        let prompt = format!(
            "Provide a concise economic analysis for {country} in {year} \
             (GDP approx ${gdp} Billion). Respond strictly in {lang_name}. \
             Return JSON with: \
             1. 'summary': A 2-sentence overview of their economic state in {year}. \
             2. 'keySectors': Array of top 3 driving industries. \
             3. 'outlook': A very short prediction for the subsequent year."
        );

        let text = self
            .provider
            .generate_json(&prompt, &analysis_schema())
            .await?;

        Ok(serde_json::from_str(&text)?)
    }
}

/// Parses the dataset payload, tolerating one quirk of `OpenAI` JSON
/// mode: it can only emit a top-level object, so a wrapped
/// `{"countries": [...]}` is unwrapped to its first array value.
fn parse_dataset_payload(text: &str) -> Result<Vec<RemoteCountry>, AiError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let array = match value {
        serde_json::Value::Array(_) => value,
        serde_json::Value::Object(map) => map
            .into_iter()
            .map(|(_, v)| v)
            .find(serde_json::Value::is_array)
            .ok_or_else(|| AiError::Contract {
                message: "response object contains no array".to_string(),
            })?,
        _ => {
            return Err(AiError::Contract {
                message: "response is neither an array nor an object".to_string(),
            });
        }
    };
    Ok(serde_json::from_value(array)?)
}

/// Placeholder analysis shown when the remote service is unreachable.
fn fallback_analysis(language: Language) -> AiAnalysis {
    let (summary, sector, outlook) = match language {
        Language::En => (
            "Unable to generate real-time analysis at this moment.",
            "Data Unavailable",
            "Neutral",
        ),
        Language::Zh => ("暂时无法生成实时分析。", "数据不可用", "中性"),
        Language::Fr => (
            "Impossible de générer une analyse en temps réel pour le moment.",
            "Données indisponibles",
            "Neutre",
        ),
        Language::Ja => ("現時点ではリアルタイム分析を生成できません。", "データなし", "中立"),
    };
    AiAnalysis {
        summary: summary.to_string(),
        key_sectors: vec![sector.to_string()],
        outlook: outlook.to_string(),
    }
}

/// Response schema for the dataset request, in the Gemini
/// `responseSchema` dialect.
fn dataset_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "country": { "type": "STRING" },
                "code": { "type": "STRING" },
                "lat": { "type": "NUMBER" },
                "lng": { "type": "NUMBER" },
                "gdp": { "type": "NUMBER" },
                "growthRate": { "type": "NUMBER" },
                "rank": { "type": "INTEGER" },
            },
            "required": ["country", "code", "lat", "lng", "gdp", "growthRate", "rank"],
        },
    })
}

/// Response schema for the analysis request.
fn analysis_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "keySectors": { "type": "ARRAY", "items": { "type": "STRING" } },
            "outlook": { "type": "STRING" },
        },
        "required": ["summary", "keySectors", "outlook"],
    })
}
