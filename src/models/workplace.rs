use serde::{Deserialize, Serialize};

/// Status code the API uses for an active workplace.
pub const ACTIVE_STATUS: i32 = 0;

#[derive(Debug, Clone, Deserialize)]
pub struct Workplace {
    pub id: i64,
    pub name: String,
    pub status: i32,
}

impl Workplace {
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }
}

/// One row of the report: a workplace and its completed-shift count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkplaceResult {
    pub name: String,
    pub shifts: usize,
}
