use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A resolved user of the host media catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,
    /// Display name
    pub name: String,
}

impl User {
    /// Creates a new user with a random identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
