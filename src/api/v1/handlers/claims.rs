/*
 * Responsibility
 * - GET /auth/hello: gate を通過したリクエストの claims をそのまま返す
 * - GET /public/claims: gate を通さないルート。claims は常に空
 */
use axum::Json;

use crate::api::v1::extractors::JwtPayload;
use crate::services::auth::{ClaimsSet, RequestState, extract_claims};

pub async fn hello(JwtPayload(claims): JwtPayload) -> Json<ClaimsSet> {
    Json(claims)
}

pub async fn public_claims(state: RequestState) -> Json<ClaimsSet> {
    Json(extract_claims(&state))
}
