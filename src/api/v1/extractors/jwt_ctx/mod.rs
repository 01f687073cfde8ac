/*!
 * JWT context extractors
 *
 * Responsibility:
 * - gate が extensions に入れた RequestState を handler に提供する
 * - axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - JwtPayload (検証済み claims, 未認証なら空)
 * - JwtToken (検証済み raw token, 未認証なら "")
 * - RequestState 自体も extractor として使える
 */

mod core;
mod types;

pub use types::{JwtPayload, JwtToken};
