use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: i64,
    pub workplace_id: i64,
    pub worker_id: Option<i64>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub end_at: DateTime<Utc>,
}
