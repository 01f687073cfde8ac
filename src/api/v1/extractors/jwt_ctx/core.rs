use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::services::auth::{RequestState, extract_claims, extract_verified_token_string};

use super::{JwtPayload, JwtToken};

fn request_state(parts: &Parts) -> RequestState {
    parts
        .extensions
        .get::<RequestState>()
        .cloned()
        .unwrap_or_default()
}

/// Never rejects: a route outside the gate simply sees an empty state.
impl<S> FromRequestParts<S> for RequestState
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(request_state(parts))
    }
}

impl<S> FromRequestParts<S> for JwtPayload
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<RequestState>()
            .map(extract_claims)
            .unwrap_or_default();
        Ok(JwtPayload(claims))
    }
}

impl<S> FromRequestParts<S> for JwtToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .extensions
            .get::<RequestState>()
            .map(|state| extract_verified_token_string(state).to_string())
            .unwrap_or_default();
        Ok(JwtToken(token))
    }
}
