use anyhow::Context;
use axum::http::{header, HeaderMap, HeaderValue};

use super::token::SessionToken;
use crate::config::SessionConfig;

/// Finds cookie `name` across every `Cookie` header of the request.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}

/// `Set-Cookie` value handing a freshly issued token to the client.
pub fn session_cookie(config: &SessionConfig, token: &SessionToken) -> anyhow::Result<HeaderValue> {
    let cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly",
        config.cookie_name,
        token.as_str(),
        config.max_age_secs()
    );
    HeaderValue::from_str(&cookie).context("build session cookie")
}
