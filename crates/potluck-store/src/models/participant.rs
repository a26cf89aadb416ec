use serde::{Deserialize, Serialize};

/// Event membership, independent of any item assignment
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Participant {
    pub name: String,
    pub joined_at: i64,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            joined_at: super::now_millis(),
        }
    }
}
