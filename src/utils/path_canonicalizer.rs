//! Product path canonicalization.
//!
//! Marketplace product pages carry a lot of noise after the product identifier
//! (slugs, tracking segments, review anchors). The canonical form keeps the path
//! up to and including the segment that follows a product marker token.

/// Marker tokens recognized out of the box.
pub const DEFAULT_PRODUCT_MARKERS: &[&str] = &["product", "dp", "d"];

/// Ordered set of path segments that announce a product identifier.
///
/// The segment immediately after a marker is treated as the product id
/// (e.g. the ASIN in `/dp/B005VEAJK6`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductMarkers {
    tokens: Vec<String>,
}

impl ProductMarkers {
    /// Builds a marker set, dropping blanks and duplicates while keeping order.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for token in tokens {
            let token = token.as_ref().trim();
            if !token.is_empty() && !unique.iter().any(|t| t == token) {
                unique.push(token.to_string());
            }
        }
        Self { tokens: unique }
    }

    /// Parses a comma-separated list such as `product,dp,d`.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn contains(&self, segment: &str) -> bool {
        self.tokens.iter().any(|t| t == segment)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }
}

impl Default for ProductMarkers {
    fn default() -> Self {
        Self::new(DEFAULT_PRODUCT_MARKERS)
    }
}

/// Returns the shortest prefix of `path` that still identifies the product.
///
/// The path is split on `/` and rebuilt segment by segment, each one followed by
/// a `/`. Rebuilding stops right after the segment whose predecessor is a marker.
/// Without any marker the whole path comes back, with a trailing separator.
///
/// ```ignore
/// let markers = ProductMarkers::default();
/// assert_eq!(
///     canonicalize_path("/Buono-Regalo/dp/B005VEAJK6/ref=sr_1_1", &markers),
///     "/Buono-Regalo/dp/B005VEAJK6/"
/// );
/// ```
pub fn canonicalize_path(path: &str, markers: &ProductMarkers) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    let mut canonical = String::with_capacity(path.len() + 1);

    for (index, segment) in segments.iter().enumerate() {
        canonical.push_str(segment);
        canonical.push('/');

        if index > 0 && markers.contains(segments[index - 1]) {
            break;
        }
    }

    canonical
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(path: &str) -> String {
        canonicalize_path(path, &ProductMarkers::default())
    }

    #[test]
    fn test_canonicalize_named_dp_path() {
        assert_eq!(
            canonical("/Buono-Regalo-Amazon-it-Da-stampare/dp/B005VEAJK6/extra-ignored-segment"),
            "/Buono-Regalo-Amazon-it-Da-stampare/dp/B005VEAJK6/"
        );
    }

    #[test]
    fn test_canonicalize_bare_dp_path() {
        assert_eq!(canonical("/dp/B078WST5RK/extra"), "/dp/B078WST5RK/");
    }

    #[test]
    fn test_canonicalize_mobile_d_path() {
        assert_eq!(
            canonical("/gp/aw/d/B0794VJ18B/a-lot-of-things"),
            "/gp/aw/d/B0794VJ18B/"
        );
    }

    #[test]
    fn test_canonicalize_gp_product_path() {
        assert_eq!(
            canonical("/gp/product/B0794VJ18B/ref=ppx_yo_dt_b_asin_title"),
            "/gp/product/B0794VJ18B/"
        );
    }

    #[test]
    fn test_canonicalize_marker_as_first_segment() {
        assert_eq!(canonical("dp/B078WST5RK/extra"), "dp/B078WST5RK/");
    }

    #[test]
    fn test_canonicalize_without_marker_keeps_path() {
        assert_eq!(canonical("/gp/help/customer"), "/gp/help/customer/");
    }

    #[test]
    fn test_canonicalize_trailing_slash_is_not_doubled() {
        assert_eq!(canonical("/dp/B078WST5RK/"), "/dp/B078WST5RK/");
    }

    #[test]
    fn test_canonicalize_empty_path() {
        assert_eq!(canonical(""), "/");
    }

    #[test]
    fn test_canonicalize_single_segment() {
        assert_eq!(canonical("B078WST5RK"), "B078WST5RK/");
    }

    #[test]
    fn test_canonicalize_stops_at_first_marker() {
        assert_eq!(
            canonical("/product/B000000001/dp/B000000002/"),
            "/product/B000000001/"
        );
    }

    #[test]
    fn test_canonicalize_marker_is_last_segment() {
        assert_eq!(canonical("/gp/product"), "/gp/product/");
    }

    #[test]
    fn test_canonicalize_is_idempotent_on_marker_output() {
        let once = canonical("/Some-Name/dp/B005VEAJK6/ref=abc");
        assert_eq!(canonical(&once), once);
    }

    #[test]
    fn test_canonicalize_markers_are_case_sensitive() {
        assert_eq!(canonical("/DP/B078WST5RK/extra"), "/DP/B078WST5RK/extra/");
    }

    #[test]
    fn test_canonicalize_custom_markers() {
        let markers = ProductMarkers::parse("itm");
        assert_eq!(
            canonicalize_path("/itm/123456789/tracking", &markers),
            "/itm/123456789/"
        );
        assert_eq!(
            canonicalize_path("/dp/B078WST5RK/extra", &markers),
            "/dp/B078WST5RK/extra/"
        );
    }

    #[test]
    fn test_product_markers_parse_trims_and_dedups() {
        let markers = ProductMarkers::parse(" product , dp,,d,dp ");
        assert_eq!(markers.as_slice(), &["product", "dp", "d"]);
        assert!(!markers.is_empty());
    }

    #[test]
    fn test_product_markers_parse_empty() {
        assert!(ProductMarkers::parse(" , ,").is_empty());
    }
}
