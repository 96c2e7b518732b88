use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::debug;

use super::{cookies::read_cookie, token::SessionToken};
use crate::{config::SessionConfig, error::AppError};

/// Guard for meal routes: pulls the session token out of its cookie.
///
/// The token is not looked up; any non-empty value passes.
#[async_trait]
impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
    SessionConfig: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = SessionConfig::from_ref(state);
        read_cookie(&parts.headers, &config.cookie_name)
            .and_then(SessionToken::from_presented)
            .ok_or_else(|| {
                debug!(uri = %parts.uri, "no session cookie");
                AppError::Unauthorized
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::http::{header, Request};

    fn parts_with_cookie(cookie: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/v1/meals");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn rejects_request_without_cookie() {
        let state = AppState::fake();
        let mut parts = parts_with_cookie(None);
        let err = SessionToken::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn rejects_empty_cookie() {
        let state = AppState::fake();
        let mut parts = parts_with_cookie(Some("sessionId="));
        let err = SessionToken::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn accepts_token_no_user_holds() {
        let state = AppState::fake();
        let mut parts = parts_with_cookie(Some("sessionId=never-registered"));
        let token = SessionToken::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(token.as_str(), "never-registered");
    }
}
