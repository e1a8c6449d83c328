use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use thiserror::Error;

/// Non-success HTTP outcomes from GitHub or the aggregation endpoint.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad credentials - check GITHUB_TOKEN")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// `reset_at` is the Unix time GitHub reports the quota refills, when known
    #[error("Rate limit exceeded")]
    RateLimited { reset_at: Option<i64> },

    #[error("Upstream error (HTTP {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Unexpected HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

impl ApiError {
    /// Cut a response body down to a loggable size on a char boundary
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    /// Classify a failed response.
    ///
    /// GitHub answers an exhausted quota with 403 and
    /// `x-ratelimit-remaining: 0` as well as with 429.
    pub fn from_response(status: StatusCode, headers: &HeaderMap, body: &str) -> Self {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
        let quota_exhausted = header(RATE_LIMIT_REMAINING) == Some("0");
        let reset_at = header(RATE_LIMIT_RESET).and_then(|v| v.parse().ok());

        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 if quota_exhausted => ApiError::RateLimited { reset_at },
            429 => ApiError::RateLimited { reset_at },
            403 => ApiError::Forbidden(Self::truncate_body(body)),
            404 => ApiError::NotFound(Self::truncate_body(body)),
            code @ 500..=599 => ApiError::Upstream {
                status: code,
                body: Self::truncate_body(body),
            },
            code => ApiError::UnexpectedStatus {
                status: code,
                body: Self::truncate_body(body),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn classify(status: StatusCode) -> ApiError {
        ApiError::from_response(status, &HeaderMap::new(), "body")
    }

    #[test]
    fn test_status_classification() {
        assert!(matches!(classify(StatusCode::UNAUTHORIZED), ApiError::Unauthorized));
        assert!(matches!(classify(StatusCode::FORBIDDEN), ApiError::Forbidden(_)));
        assert!(matches!(classify(StatusCode::NOT_FOUND), ApiError::NotFound(_)));
        assert!(matches!(
            classify(StatusCode::TOO_MANY_REQUESTS),
            ApiError::RateLimited { reset_at: None }
        ));
        assert!(matches!(classify(StatusCode::BAD_GATEWAY), ApiError::Upstream { status: 502, .. }));
        assert!(matches!(
            classify(StatusCode::IM_A_TEAPOT),
            ApiError::UnexpectedStatus { status: 418, .. }
        ));
    }

    #[test]
    fn test_forbidden_with_exhausted_quota_is_rate_limit() {
        let mut headers = HeaderMap::new();
        headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from_static("0"));
        headers.insert(RATE_LIMIT_RESET, HeaderValue::from_static("1750000000"));

        let err = ApiError::from_response(StatusCode::FORBIDDEN, &headers, "API rate limit exceeded");
        assert!(matches!(err, ApiError::RateLimited { reset_at: Some(1_750_000_000) }));
    }

    #[test]
    fn test_long_body_truncated() {
        let body = "é".repeat(400);
        match ApiError::from_response(StatusCode::NOT_FOUND, &HeaderMap::new(), &body) {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("truncated, 800 total bytes"));
                assert!(msg.len() < body.len());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
