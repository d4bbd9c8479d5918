//! ASIN extraction from Amazon product URLs

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    /// `/dp/<ASIN>` and `/gp/product/<ASIN>` path segments
    static ref PRODUCT_PATH: Regex = Regex::new(r"/(?:dp|gp/product)/([A-Z0-9]{10})").unwrap();
    /// Any standalone 10-character segment ending at `/`, `?` or end of string
    static ref BARE_SEGMENT: Regex = Regex::new(r"/([A-Z0-9]{10})(?:[/?]|$)").unwrap();
}

/// 10-character product identifier on the Amazon marketplace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Asin(String);

impl Asin {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Asin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pull the ASIN out of almost any Amazon product URL.
///
/// The product-path pattern wins over the bare-segment fallback even when
/// the fallback would match earlier in the string.
pub fn extract_asin(url: &str) -> Option<Asin> {
    PRODUCT_PATH
        .captures(url)
        .or_else(|| BARE_SEGMENT.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| Asin(m.as_str().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asin(url: &str) -> Option<String> {
        extract_asin(url).map(|a| a.to_string())
    }

    #[test]
    fn finds_dp_segment() {
        assert_eq!(
            asin("https://www.amazon.com/dp/B00ABCDEFG").as_deref(),
            Some("B00ABCDEFG")
        );
    }

    #[test]
    fn finds_dp_segment_after_slug_and_before_query() {
        let url = "https://www.amazon.com/Some-Product-Name/dp/B07XJ8C8F5/ref=sr_1_1?keywords=x";
        assert_eq!(asin(url).as_deref(), Some("B07XJ8C8F5"));
    }

    #[test]
    fn finds_gp_product_segment() {
        let url = "https://www.amazon.com/gp/product/0596520689?tag=abc";
        assert_eq!(asin(url).as_deref(), Some("0596520689"));
    }

    #[test]
    fn product_path_takes_precedence_over_bare_segment() {
        let url = "https://www.amazon.com/ABCDEFGHIJ/dp/B00ZZZZZZZ";
        assert_eq!(asin(url).as_deref(), Some("B00ZZZZZZZ"));
    }

    #[test]
    fn falls_back_to_bare_segment() {
        assert_eq!(
            asin("https://www.amazon.com/B01N5IB20Q?th=1").as_deref(),
            Some("B01N5IB20Q")
        );
        assert_eq!(
            asin("https://smile.amazon.com/product/B01N5IB20Q").as_deref(),
            Some("B01N5IB20Q")
        );
    }

    #[test]
    fn bare_segment_must_be_bounded() {
        // 11 characters: neither pattern applies
        assert_eq!(asin("https://www.amazon.com/B01N5IB20QX"), None);
        // followed by a character other than '/', '?' or end of string
        assert_eq!(asin("https://www.amazon.com/B01N5IB20Q#reviews"), None);
    }

    #[test]
    fn lowercase_identifiers_are_not_matched() {
        assert_eq!(asin("https://www.amazon.com/dp/b00abcdefg"), None);
    }

    #[test]
    fn url_without_identifier_is_not_found() {
        assert_eq!(asin("https://www.amazon.com/gp/cart/view.html"), None);
        assert_eq!(asin(""), None);
    }
}
