//! Per-candidate conversion failures.

use crate::infrastructure::resolver::ResolveError;
use crate::infrastructure::shortener::ShortenError;

/// Why a single candidate URL could not be turned into a short referral link.
///
/// These errors never abort a batch; the pipeline records them and moves on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("{candidate} is not a valid URL: {reason}")]
    Parse { candidate: String, reason: String },

    #[error("unable to resolve {candidate}: {source}")]
    Resolution {
        candidate: String,
        #[source]
        source: ResolveError,
    },

    #[error("domain not supported for URL {url}")]
    UnsupportedDomain { url: String },

    #[error("error while shortening the URL: {0}")]
    ShorteningService(#[source] ShortenError),
}

impl ConversionError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "parse_error",
            Self::Resolution { .. } => "resolution_error",
            Self::UnsupportedDomain { .. } => "unsupported_domain",
            Self::ShorteningService(_) => "shortening_service_error",
        }
    }
}
