use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A system user. Accounts are owned elsewhere; the tracker only checks
/// that an id exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
