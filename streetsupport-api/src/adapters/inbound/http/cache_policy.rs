use axum::http::{header, HeaderMap, HeaderName, HeaderValue};

use crate::domain::models::DirectoryPage;

const X_CACHE: HeaderName = HeaderName::from_static("x-cache");
const X_RATE_LIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const X_RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
const X_RATE_LIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Response headers for services listings.
///
/// The `X-RateLimit-*` values are fixed placeholders; no limiter sits behind
/// them.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpCachePolicy {
    test_mode: bool,
}

impl HttpCachePolicy {
    pub fn new(test_mode: bool) -> Self {
        Self { test_mode }
    }

    pub fn headers(&self, result: &DirectoryPage) -> HeaderMap {
        let mut headers = HeaderMap::new();

        let cache_control = if self.test_mode {
            "no-store"
        } else {
            "public, max-age=300, stale-while-revalidate=600"
        };
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(cache_control));

        let etag = format!(
            "\"{}-{}-{}\"",
            result.cache_key.fingerprint(),
            result.page.total,
            result.page.page
        );
        if let Ok(etag) = HeaderValue::from_str(&etag) {
            headers.insert(header::ETAG, etag);
        }

        headers.insert(X_CACHE, HeaderValue::from_static(result.cache_status.as_str()));
        headers.insert(header::VARY, HeaderValue::from_static("Accept-Encoding"));
        headers.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );

        if !self.test_mode {
            headers.insert(X_RATE_LIMIT_LIMIT, HeaderValue::from_static("100"));
            headers.insert(X_RATE_LIMIT_REMAINING, HeaderValue::from_static("99"));
            headers.insert(X_RATE_LIMIT_RESET, HeaderValue::from_static("60"));
        }

        headers
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{
        models::{CacheStatus, ServiceQuery, ServicesPage},
        CacheKey,
    };

    fn result(cache_status: CacheStatus) -> DirectoryPage {
        DirectoryPage {
            page: Arc::new(ServicesPage {
                total: 42,
                page: 2,
                limit: 20,
                results: vec![],
            }),
            cache_key: CacheKey::generate(&ServiceQuery::default()),
            cache_status,
        }
    }

    #[test]
    fn production_headers() {
        let page = result(CacheStatus::Miss);
        let headers = HttpCachePolicy::new(false).headers(&page);

        assert!(headers[header::CACHE_CONTROL]
            .to_str()
            .unwrap()
            .starts_with("public"));
        assert_eq!(
            headers[header::ETAG].to_str().unwrap(),
            format!("\"{}-42-2\"", page.cache_key.fingerprint())
        );
        assert_eq!(headers["x-cache"], "MISS");
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(headers["x-ratelimit-limit"], "100");
    }

    #[test]
    fn test_mode_disables_caching_and_rate_limit_headers() {
        let headers = HttpCachePolicy::new(true).headers(&result(CacheStatus::Hit));

        assert_eq!(headers[header::CACHE_CONTROL], "no-store");
        assert_eq!(headers["x-cache"], "HIT");
        assert!(headers.get("x-ratelimit-limit").is_none());
    }
}
