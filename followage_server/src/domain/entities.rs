use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Resolved platform account, scoped to a single request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub login: String,
}

// Result of a batched two-login lookup. `None` means upstream did not know the login.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserPair {
    pub streamer: Option<Identity>,
    pub viewer: Option<Identity>,
}

// Follow relationship lookup result. `followed_at: None` means "not following".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FollowRecord {
    pub followed_at: Option<DateTime<Utc>>,
}

impl FollowRecord {
    pub fn following_since(followed_at: DateTime<Utc>) -> Self {
        Self {
            followed_at: Some(followed_at),
        }
    }

    pub fn not_following() -> Self {
        Self { followed_at: None }
    }
}
