/*
 * Responsibility
 * - middleware の公開インターフェース
 *   - auth::access: JWT gate (保護ルートのみ)
 *   - http: request-id / trace / panic / limit / timeout (全ルート)
 */
pub mod auth;
pub mod http;
