//! Domain layer containing business entities and repository contracts.
//!
//! - [`entities`] - Chat messages, bot users and link requests
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits are implemented in [`crate::infrastructure`].

pub mod entities;
pub mod repositories;
