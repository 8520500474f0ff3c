#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Generative AI client for GDP datasets and per-country analysis.
//!
//! Wraps a remote generative text service behind a provider abstraction
//! (Gemini, or any `OpenAI`-compatible server via `AI_BASE_URL`) and
//! exposes two fetch contracts: a full top-25 dataset for a given year,
//! and a short narrative analysis for a single country/year pair.
//!
//! Both contracts are infallible from the caller's point of view: any
//! network error, malformed payload, or empty response is logged as a
//! warning and substituted locally — the dataset contract falls back to
//! a deterministic synthetic projection of the bundled reference data,
//! the analysis contract to a language-appropriate placeholder.

pub mod client;
pub mod providers;

pub use client::AnalyticsClient;

use thiserror::Error;

/// Errors that can occur while talking to the generative service.
///
/// These never escape [`AnalyticsClient`]'s public fetch methods; they
/// exist so the provider layer and the fallback substitution have a
/// precise boundary.
#[derive(Debug, Error)]
pub enum AiError {
    /// HTTP request to the provider failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider-specific error (non-2xx status, empty candidate list,
    /// refusal, etc.).
    #[error("Provider error: {message}")]
    Provider {
        /// Description of what went wrong.
        message: String,
    },

    /// Response arrived but did not satisfy the expected data contract.
    #[error("Contract error: {message}")]
    Contract {
        /// Which part of the contract was violated.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// Description.
        message: String,
    },
}
