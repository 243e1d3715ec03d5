//! Application layer services implementing the bot's behavior.
//!
//! Services consume the repository and infrastructure traits and are wired
//! together once at startup.
//!
//! # Available Services
//!
//! - [`services::referral_service::ReferralUrlBuilder`] - Candidate URL to referral URL
//! - [`services::pipeline_service::PipelineService`] - Batch conversion with skip-on-failure
//! - [`services::command_service::CommandService`] - Bot commands and broadcasts
//! - [`services::update_service::UpdateService`] - Per-message orchestration and replies

pub mod services;
