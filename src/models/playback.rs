use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A "play now" command issued to one of a user's sessions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaybackCommand {
    pub session_id: String,
    pub user_id: Uuid,
    pub episode_id: Uuid,
    pub issued_at: DateTime<Utc>,
}
