use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// One immutable snapshot of a bar's menu. `menu_json` holds the canonical
/// serialized document; `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MenuRecord {
    pub id: i64,
    pub bar_id: i32,
    pub menu_json: String,
    pub created_at: DateTime<Utc>,
}
