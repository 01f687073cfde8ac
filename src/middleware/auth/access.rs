//! access token (RSA JWT) 検証 → RequestState を extensions に入れる
//!
//! - 検証は `JwtGate::evaluate` に任せ、ここでは結果を HTTP に写すだけ。
//! - 失敗理由はログにのみ残し、クライアントには一律 401 を返す。
//! - 成功時は `<header>: <prefix> <token>` をレスポンスに付け直す (設定で無効化可)。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::GateOutcome;
use crate::state::AppState;

/// 認証が必要なルートに gate を掛ける。
///
/// 例：
/// ```ignore
/// let protected = Router::new().route("/hello", get(hello));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// router = router.nest("/auth", protected);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let request_state = match state.gate.evaluate(req.headers()) {
        GateOutcome::Authorized(request_state) => request_state,
        GateOutcome::Rejected { stage, reason } => {
            tracing::warn!(
                ?stage,
                error = %reason,
                method = %req.method(),
                path = req.uri().path(),
                "access token rejected"
            );
            return Err(reason.into());
        }
    };

    debug_assert!(request_state.is_authorized());
    tracing::debug!(
        path = req.uri().path(),
        authorized = request_state.is_authorized(),
        "access token verified"
    );

    let echo = state.gate.echo_header(&request_state);

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(request_state);

    let mut res = next.run(req).await;
    if let Some((name, value)) = echo {
        res.headers_mut().insert(name, value);
    }
    Ok(res)
}
