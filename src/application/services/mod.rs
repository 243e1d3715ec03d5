//! Business logic services for the application layer.

pub mod command_service;
pub mod conversion_error;
pub mod pipeline_service;
pub mod referral_service;
pub mod update_service;

pub use command_service::CommandService;
pub use conversion_error::ConversionError;
pub use pipeline_service::{Diagnostic, PipelineReport, PipelineService, SkippedCandidate};
pub use referral_service::{ReferralSettings, ReferralUrlBuilder};
pub use update_service::{UpdateOutcome, UpdateService};
