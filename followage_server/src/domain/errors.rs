use thiserror::Error;

// Unsubstituted chat-bot template variable found in a path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceholderError {
    #[error("streamer is the nightbot $(channel) variable")]
    NightbotChannel,
    #[error("viewer is the nightbot $(touser) variable")]
    NightbotToUser,
    #[error("streamer is the {{StreamerUsername}} template")]
    StreamerTemplate,
    #[error("viewer is the {{ViewerUsername}} template")]
    ViewerTemplate,
}

// Failures reported by the user lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserLookupError {
    // Upstream rejected the logins themselves.
    #[error("bad identifiers")]
    BadIdentifiers,
    // Anything else; `message` may carry the raw upstream payload.
    #[error("{message}")]
    Upstream { message: String },
}

// Failures reported by the follow relationship service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FollowLookupError {
    #[error("auth was revoked")]
    AuthRevoked,
    #[error("not logged in")]
    NotLoggedIn,
    #[error("not a moderator for the broadcaster")]
    NotModerator,
    #[error("{message}")]
    Upstream { message: String },
}

impl UserLookupError {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }
}

impl FollowLookupError {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }
}
