//! Referral URL construction.

use std::sync::Arc;

use tracing::debug;
use url::{ParseError, Url};

use crate::application::services::conversion_error::ConversionError;
use crate::infrastructure::resolver::RedirectResolver;
use crate::utils::domain_matcher::DomainMatcher;
use crate::utils::path_canonicalizer::{ProductMarkers, canonicalize_path};

/// Query parameter carrying the referral identifier.
const REFERRAL_PARAM: &str = "tag";

/// Read-only settings the builder needs, fixed at construction time.
#[derive(Debug, Clone)]
pub struct ReferralSettings {
    pub referral_id: String,
    pub domain_matcher: DomainMatcher,
    pub product_markers: ProductMarkers,
}

/// Turns a candidate URL into a canonical referral URL.
///
/// Steps: parse (defaulting to `http` when the scheme is missing), resolve
/// redirects, check the target domain, cut the path at the product id, and
/// replace query and fragment with the referral tag.
pub struct ReferralUrlBuilder {
    resolver: Arc<dyn RedirectResolver>,
    settings: ReferralSettings,
}

impl ReferralUrlBuilder {
    pub fn new(resolver: Arc<dyn RedirectResolver>, settings: ReferralSettings) -> Self {
        Self { resolver, settings }
    }

    /// Builds the referral URL for one candidate.
    ///
    /// # Errors
    ///
    /// - [`ConversionError::Parse`] if the candidate is not a URL
    /// - [`ConversionError::Resolution`] if following redirects fails
    /// - [`ConversionError::UnsupportedDomain`] if the final host is not the target domain
    pub async fn build(&self, candidate: &str) -> Result<String, ConversionError> {
        let parsed = parse_candidate(candidate)?;

        let resolved = self.resolver.resolve(&parsed).await.map_err(|source| {
            ConversionError::Resolution {
                candidate: candidate.to_string(),
                source,
            }
        })?;

        let host = resolved.host_str().unwrap_or_default();
        if !self.settings.domain_matcher.is_target_domain(host) {
            return Err(ConversionError::UnsupportedDomain {
                url: resolved.to_string(),
            });
        }

        let referral = self.rewrite(resolved);
        debug!(candidate, referral = %referral, "Referral URL built");

        Ok(referral.into())
    }

    fn rewrite(&self, mut url: Url) -> Url {
        let path = canonicalize_path(url.path(), &self.settings.product_markers);
        url.set_path(&path);
        url.set_query(None);
        url.query_pairs_mut()
            .append_pair(REFERRAL_PARAM, &self.settings.referral_id);
        url.set_fragment(None);
        url
    }
}

/// Parses a candidate, prefixing `http://` when the scheme is missing.
///
/// Some chat clients auto-link bare `host/path` text without a scheme.
fn parse_candidate(candidate: &str) -> Result<Url, ConversionError> {
    let trimmed = candidate.trim();

    let parsed = match Url::parse(trimmed) {
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("http://{trimmed}")),
        other => other,
    };

    parsed.map_err(|e| ConversionError::Parse {
        candidate: candidate.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::resolver::{MockRedirectResolver, ResolveError};
    use crate::utils::domain_matcher::DomainMatch;

    fn settings() -> ReferralSettings {
        ReferralSettings {
            referral_id: "refbot-21".to_string(),
            domain_matcher: DomainMatcher::new("amazon.it", DomainMatch::LabelBoundary),
            product_markers: ProductMarkers::default(),
        }
    }

    fn resolving_to(target: &'static str) -> MockRedirectResolver {
        let mut resolver = MockRedirectResolver::new();
        resolver
            .expect_resolve()
            .times(1)
            .returning(move |_| Ok(Url::parse(target).unwrap()));
        resolver
    }

    fn builder(resolver: MockRedirectResolver) -> ReferralUrlBuilder {
        ReferralUrlBuilder::new(Arc::new(resolver), settings())
    }

    #[tokio::test]
    async fn test_build_short_link() {
        let builder = builder(resolving_to(
            "https://www.amazon.it/gp/product/B0794VJ18B/a-lot-of-things?psc=1&ref_=abc#reviews",
        ));

        let result = builder.build("https://amzn.to/2lVEfGs").await;

        assert_eq!(
            result.unwrap(),
            "https://www.amazon.it/gp/product/B0794VJ18B/?tag=refbot-21"
        );
    }

    #[tokio::test]
    async fn test_build_discards_original_query() {
        let builder = builder(resolving_to(
            "https://www.amazon.it/Buono-Regalo-Amazon-it-Da-stampare/dp/B005VEAJK6/extra?tag=someone-else-21",
        ));

        let result = builder
            .build("https://www.amazon.it/Buono-Regalo-Amazon-it-Da-stampare/dp/B005VEAJK6/extra?tag=someone-else-21")
            .await
            .unwrap();

        assert_eq!(
            result,
            "https://www.amazon.it/Buono-Regalo-Amazon-it-Da-stampare/dp/B005VEAJK6/?tag=refbot-21"
        );
    }

    #[tokio::test]
    async fn test_build_defaults_missing_scheme_to_http() {
        let mut resolver = MockRedirectResolver::new();
        resolver
            .expect_resolve()
            .withf(|url| url.as_str() == "http://amzn.to/2lVEfGs")
            .times(1)
            .returning(|_| Ok(Url::parse("https://www.amazon.it/dp/B078WST5RK/x").unwrap()));

        let result = builder(resolver).build("amzn.to/2lVEfGs").await;

        assert_eq!(
            result.unwrap(),
            "https://www.amazon.it/dp/B078WST5RK/?tag=refbot-21"
        );
    }

    #[tokio::test]
    async fn test_build_trims_whitespace() {
        let mut resolver = MockRedirectResolver::new();
        resolver
            .expect_resolve()
            .withf(|url| url.as_str() == "https://amzn.to/abc")
            .times(1)
            .returning(|_| Ok(Url::parse("https://www.amazon.it/dp/B078WST5RK").unwrap()));

        let result = builder(resolver).build("  https://amzn.to/abc\n").await;
        assert_eq!(
            result.unwrap(),
            "https://www.amazon.it/dp/B078WST5RK/?tag=refbot-21"
        );
    }

    #[tokio::test]
    async fn test_build_parse_error_skips_resolution() {
        let mut resolver = MockRedirectResolver::new();
        resolver.expect_resolve().times(0);

        let result = builder(resolver).build("http://[not-a-host/dp/x").await;

        assert!(matches!(result, Err(ConversionError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_build_empty_candidate_is_parse_error() {
        let mut resolver = MockRedirectResolver::new();
        resolver.expect_resolve().times(0);

        let result = builder(resolver).build("").await;

        assert!(matches!(result, Err(ConversionError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_build_wraps_resolution_error() {
        let mut resolver = MockRedirectResolver::new();
        resolver
            .expect_resolve()
            .times(1)
            .returning(|_| Err(ResolveError::Network("connection refused".to_string())));

        let result = builder(resolver).build("https://amzn.to/2lVEfGs").await;

        assert_eq!(
            result,
            Err(ConversionError::Resolution {
                candidate: "https://amzn.to/2lVEfGs".to_string(),
                source: ResolveError::Network("connection refused".to_string()),
            })
        );
    }

    #[tokio::test]
    async fn test_build_rejects_other_domain() {
        let builder = builder(resolving_to("https://bitly.com/"));

        let result = builder.build("https://bitly.is/1g3AhR6").await;

        assert_eq!(
            result,
            Err(ConversionError::UnsupportedDomain {
                url: "https://bitly.com/".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_build_rejects_lookalike_domain() {
        let builder = builder(resolving_to("https://evilamazon.it/dp/B078WST5RK"));

        let result = builder.build("https://evilamazon.it/dp/B078WST5RK").await;

        assert!(matches!(
            result,
            Err(ConversionError::UnsupportedDomain { .. })
        ));
    }

    #[tokio::test]
    async fn test_build_accepts_lookalike_domain_in_suffix_mode() {
        let mut settings = settings();
        settings.domain_matcher = DomainMatcher::new("amazon.it", DomainMatch::Suffix);
        let builder = ReferralUrlBuilder::new(
            Arc::new(resolving_to("https://evilamazon.it/dp/B078WST5RK")),
            settings,
        );

        let result = builder.build("https://evilamazon.it/dp/B078WST5RK").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_build_encodes_referral_id() {
        let mut settings = settings();
        settings.referral_id = "a b&c".to_string();
        let builder = ReferralUrlBuilder::new(
            Arc::new(resolving_to("https://www.amazon.it/dp/B078WST5RK")),
            settings,
        );

        let result = builder.build("https://www.amazon.it/dp/B078WST5RK").await;

        assert_eq!(
            result.unwrap(),
            "https://www.amazon.it/dp/B078WST5RK/?tag=a+b%26c"
        );
    }

    #[test]
    fn test_parse_candidate_keeps_explicit_scheme() {
        let url = parse_candidate("https://www.amazon.it/dp/B078WST5RK").unwrap();
        assert_eq!(url.scheme(), "https");
    }
}
