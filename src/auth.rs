use std::convert::Infallible;

use axum::{
    extract::OptionalFromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use axum_extra::extract::cookie::Cookie;

/// Name of the cookie carrying the session token issued by the auth service.
pub const TOKEN_COOKIE: &str = "token";

/// SessionToken
///
/// The opaque credential presented via the `token` cookie. The gate never decodes or
/// verifies it: presence of a non-empty value is all it looks at. Validation happens in
/// the auth service and the API behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a raw cookie value. Empty values count as "no session".
    pub(crate) fn from_cookie_value(value: &str) -> Option<Self> {
        (!value.is_empty()).then(|| Self(value.to_string()))
    }

    /// from_headers
    ///
    /// Scans every `Cookie` header for a non-empty `token` pair. Values are taken verbatim:
    /// no percent-decoding, so `token=abc%ff` is as present as `token=abc123`. Pairs that do
    /// not parse at all (no `=`, empty name) are skipped.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| std::str::from_utf8(value.as_bytes()).ok())
            .flat_map(|value| Cookie::split_parse(value))
            .filter_map(Result::ok)
            .filter(|cookie| cookie.name() == TOKEN_COOKIE)
            .find_map(|cookie| Self::from_cookie_value(cookie.value()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Extracted as `Option<SessionToken>` by the route guard: a missing token is an ordinary
/// outcome, never a rejection.
impl<S> OptionalFromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
