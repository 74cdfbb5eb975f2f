use super::downtime::MARKER_MACHINE;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Machine {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

impl Machine {
    pub fn is_marker(&self) -> bool {
        self.name == MARKER_MACHINE
    }
}
