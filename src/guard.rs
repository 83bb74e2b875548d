use axum::response::{IntoResponse, Redirect, Response};

use crate::{auth::SessionToken, paths::ProtectedPaths};

/// Where unauthenticated visitors of a protected page are sent.
pub const SIGN_IN_PATH: &str = "/sign-in";
/// Query parameter the sign-in page reads to send the user back afterwards.
pub const REDIRECT_PARAM: &str = "redirect";

/// GuardDecision
///
/// The terminal action of one guard evaluation. `Forward` passes the original request on
/// untouched; `Redirect` carries the response to answer with instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Forward,
    Redirect(SignInRedirect),
}

impl GuardDecision {
    /// Short outcome name recorded on the request span.
    pub fn label(&self) -> &'static str {
        match self {
            GuardDecision::Forward => "forward",
            GuardDecision::Redirect(_) => "redirect",
        }
    }
}

/// SignInRedirect
///
/// 307 to the sign-in page, remembering where the visitor was headed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInRedirect {
    location: String,
}

impl SignInRedirect {
    /// Redirect back to `path`, exactly as it was requested.
    pub fn returning_to(path: &str) -> Self {
        Self {
            location: sign_in_location(path),
        }
    }
}

impl IntoResponse for SignInRedirect {
    fn into_response(self) -> Response {
        Redirect::temporary(&self.location).into_response()
    }
}

/// evaluate
///
/// Decides the fate of one request from its path and session token alone.
/// Total and pure: the same inputs always produce the same decision.
///
/// - Path outside the protected set: forward, whatever the cookies say.
/// - Protected (or unresolvable) path with a token: forward. The token is not inspected.
/// - Protected (or unresolvable) path without a token: redirect to sign-in, remembering
///   the original path.
pub fn evaluate(
    paths: &ProtectedPaths,
    path: &str,
    token: Option<&SessionToken>,
) -> GuardDecision {
    let protection = paths.protection(path);
    if !protection.requires_session() || token.is_some() {
        return GuardDecision::Forward;
    }

    tracing::debug!(path, ?protection, "no session token on protected path, redirecting to sign-in");
    GuardDecision::Redirect(SignInRedirect::returning_to(path))
}

/// sign_in_location
///
/// `/sign-in?redirect=<path>`, with the path percent-encoded as a query value
/// (`/dashboard/settings` becomes `%2Fdashboard%2Fsettings`).
pub fn sign_in_location(path: &str) -> String {
    format!(
        "{SIGN_IN_PATH}?{REDIRECT_PARAM}={}",
        urlencoding::encode(path)
    )
}
