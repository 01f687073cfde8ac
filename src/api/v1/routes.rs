/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - gate が必要な範囲 (/auth 配下) だけに access middleware を掛ける
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{
    claims::{hello, public_claims},
    health::health,
};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new().route("/hello", get(hello));
    let protected = middleware::auth::access::apply(protected, state);

    Router::new()
        .route("/health", get(health))
        .route("/public/claims", get(public_claims))
        .nest("/auth", protected)
}
