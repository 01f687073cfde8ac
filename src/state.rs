/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - gate: 起動時に鍵を読み込んだ JwtGate (読み取り専用)
 * - Clone 前提で持つ (内部は Arc で cheap)
 */
use std::sync::Arc;

use crate::services::auth::JwtGate;

#[derive(Clone, Debug)]
pub struct AppState {
    pub gate: Arc<JwtGate>,
}

impl AppState {
    pub fn new(gate: Arc<JwtGate>) -> Self {
        Self { gate }
    }
}
