//! Batch conversion of candidate URLs into short referral links.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::services::conversion_error::ConversionError;
use crate::application::services::referral_service::ReferralUrlBuilder;
use crate::infrastructure::shortener::LinkShortener;

/// Why a pipeline run produced no links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// The message carried no candidate URLs at all.
    NoUrlsFound,
    /// Candidates were found but every one of them failed.
    NoMatchingUrls,
}

impl Diagnostic {
    /// Reply shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NoUrlsFound => "No URLs found 😢",
            Self::NoMatchingUrls => "No matching URLs found 😢",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NoUrlsFound => "no_urls",
            Self::NoMatchingUrls => "no_matching_urls",
        }
    }
}

/// A candidate that was dropped, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCandidate {
    pub candidate: String,
    pub error: ConversionError,
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Short referral URLs, in candidate order.
    pub short_urls: Vec<String>,
    pub skipped: Vec<SkippedCandidate>,
    /// Set exactly when `short_urls` is empty.
    pub diagnostic: Option<Diagnostic>,
}

impl PipelineReport {
    fn empty_input() -> Self {
        Self {
            short_urls: Vec::new(),
            skipped: Vec::new(),
            diagnostic: Some(Diagnostic::NoUrlsFound),
        }
    }
}

/// Runs every candidate through the referral builder and the shortener.
///
/// Candidates are processed one at a time, in order. A failing candidate is
/// logged and skipped; it never prevents the others from being converted.
pub struct PipelineService {
    builder: Arc<ReferralUrlBuilder>,
    shortener: Arc<dyn LinkShortener>,
}

impl PipelineService {
    pub fn new(builder: Arc<ReferralUrlBuilder>, shortener: Arc<dyn LinkShortener>) -> Self {
        Self { builder, shortener }
    }

    /// Converts candidates into short referral URLs.
    ///
    /// An empty candidate list returns [`Diagnostic::NoUrlsFound`] without any
    /// network call. If nothing converts, [`Diagnostic::NoMatchingUrls`] is set.
    pub async fn process(&self, candidates: &[String]) -> PipelineReport {
        if candidates.is_empty() {
            return PipelineReport::empty_input();
        }

        let mut short_urls = Vec::with_capacity(candidates.len());
        let mut skipped = Vec::new();

        for candidate in candidates {
            match self.convert(candidate).await {
                Ok(short_url) => {
                    metrics::counter!("refbot_candidates_total", "outcome" => "converted")
                        .increment(1);
                    short_urls.push(short_url);
                }
                Err(error) => {
                    warn!(
                        candidate = %candidate,
                        kind = error.kind(),
                        "Skipping candidate: {}",
                        error
                    );
                    metrics::counter!(
                        "refbot_candidates_total",
                        "outcome" => "skipped",
                        "kind" => error.kind()
                    )
                    .increment(1);
                    skipped.push(SkippedCandidate {
                        candidate: candidate.clone(),
                        error,
                    });
                }
            }
        }

        info!(
            candidates = candidates.len(),
            converted = short_urls.len(),
            skipped = skipped.len(),
            "Pipeline finished"
        );

        let diagnostic = short_urls
            .is_empty()
            .then_some(Diagnostic::NoMatchingUrls);

        PipelineReport {
            short_urls,
            skipped,
            diagnostic,
        }
    }

    /// Builds the referral URL for one candidate and shortens it.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConversionError`] hit along the way.
    pub async fn convert(&self, candidate: &str) -> Result<String, ConversionError> {
        let referral = self.builder.build(candidate).await?;

        self.shortener
            .shorten(&referral)
            .await
            .map_err(ConversionError::ShorteningService)
    }
}
