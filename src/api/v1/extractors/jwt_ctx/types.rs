/*
 * Responsibility
 * - Handler から見える「検証済みコンテキスト」の型
 *
 * Notes
 * - 検証そのものは middleware/services 側の責務
 * - gate を通っていないルートでは空の値になる (エラーにはしない)
 */

use crate::services::auth::ClaimsSet;

/// Verified claims of the current request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JwtPayload(pub ClaimsSet);

/// Verified raw token of the current request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JwtToken(pub String);
