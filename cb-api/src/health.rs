use serde::{Serialize, Deserialize};

pub const STATUS_UP: &str = "UP";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

impl Health {
    pub fn is_up(&self) -> bool {
        self.status == STATUS_UP
    }
}
