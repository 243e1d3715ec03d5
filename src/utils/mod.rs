//! Pure helper functions used across the application.
//!
//! - [`path_canonicalizer`] - Cut product paths down to the product id
//! - [`domain_matcher`] - Target domain validation
//! - [`url_extractor`] - Candidate URLs from message entities
//! - [`formatting`] - Reply text formatting

pub mod domain_matcher;
pub mod formatting;
pub mod path_canonicalizer;
pub mod url_extractor;
