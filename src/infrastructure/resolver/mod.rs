//! Redirect resolution for shortened or indirect product links.
//!
//! - [`RedirectResolver`] - Resolver trait
//! - [`HttpRedirectResolver`] - HEAD request via `reqwest`

mod http_resolver;
mod service;

pub use http_resolver::HttpRedirectResolver;
pub use service::{RedirectResolver, ResolveError};

#[cfg(test)]
pub use service::MockRedirectResolver;
