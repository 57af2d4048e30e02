// Maps upstream lookup failures onto the fixed set of user-facing outcomes.
//
// Collaborators report structured reasons where they can. Free-text upstream
// messages still go through the substring rules below so older payloads keep
// classifying the same way.

use serde::Deserialize;

use crate::domain::{FollowLookupError, UserLookupError};

const BAD_IDENTIFIERS: &str = "bad identifiers";
const AUTH_REVOKED: &str = "auth was revoked";
const NOT_LOGGED_IN: &str = "not logged in";
const NOT_MODERATOR: &str = "not a moderator for the broadcaster";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFailure {
    InvalidUsernames,
    Unavailable,
    NotFoundBoth,
    NotFoundStreamer,
    NotFoundViewer,
}

impl UserFailure {
    pub fn message(&self, streamer: &str, viewer: &str) -> String {
        match self {
            UserFailure::InvalidUsernames => format!(
                "Could not get users from Twitch API, one or more of the usernames are not valid. Streamer: {streamer}, Viewer: {viewer}"
            ),
            UserFailure::Unavailable => format!(
                "Could not get users from Twitch API, please try again later and ensure the usernames are valid. Streamer: {streamer}, Viewer: {viewer}"
            ),
            UserFailure::NotFoundBoth => {
                format!("Could not find the following Twitch accounts: @{streamer}, @{viewer}.")
            }
            UserFailure::NotFoundStreamer => {
                format!("Could not find a Twitch account for the streamer: @{streamer}.")
            }
            UserFailure::NotFoundViewer => {
                format!("Could not find a Twitch account for the user: @{viewer}")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowFailure {
    ModeratorRevoked,
    StreamerRevoked,
    ModeratorNotLoggedIn,
    StreamerNotLoggedIn,
    NotModerator,
    Unavailable,
}

impl FollowFailure {
    pub fn message(&self) -> &'static str {
        match self {
            FollowFailure::ModeratorRevoked => {
                "The moderator provided in the request has revoked access to the application, please have them login to the application to use this command."
            }
            FollowFailure::StreamerRevoked => {
                "The authentication token for the streamer has been revoked, please have them login to the application to use this command."
            }
            FollowFailure::ModeratorNotLoggedIn => {
                "The moderator provided in the request is not logged into the application, please have them login to the application to use this command."
            }
            FollowFailure::StreamerNotLoggedIn => {
                "In order to use this API the streamer must login to the application."
            }
            FollowFailure::NotModerator => {
                "The moderatorId provided in the request is not a moderator for the streamer. Please ensure the user is a moderator or remove the moderatorId from the request."
            }
            FollowFailure::Unavailable => {
                "Unable to get the users followage due to an error internally or with the Twitch API. Authenticating again may fix this issue, or try again later."
            }
        }
    }
}

// Error envelope some upstreams serialize into the failure message.
#[derive(Debug, Deserialize)]
struct UpstreamErrorPayload {
    message: String,
}

pub fn classify_user_error(err: &UserLookupError) -> UserFailure {
    match err {
        UserLookupError::BadIdentifiers => UserFailure::InvalidUsernames,
        UserLookupError::Upstream { message } if is_bad_identifiers_payload(message) => {
            UserFailure::InvalidUsernames
        }
        UserLookupError::Upstream { .. } => UserFailure::Unavailable,
    }
}

fn is_bad_identifiers_payload(message: &str) -> bool {
    serde_json::from_str::<UpstreamErrorPayload>(message)
        .map(|payload| payload.message.to_lowercase().contains(BAD_IDENTIFIERS))
        .unwrap_or(false)
}

pub fn classify_follow_error(err: &FollowLookupError, has_moderator: bool) -> FollowFailure {
    match err {
        FollowLookupError::AuthRevoked => revoked(has_moderator),
        FollowLookupError::NotLoggedIn => not_logged_in(has_moderator),
        FollowLookupError::NotModerator => FollowFailure::NotModerator,
        FollowLookupError::Upstream { message } => classify_follow_message(message, has_moderator),
    }
}

fn classify_follow_message(message: &str, has_moderator: bool) -> FollowFailure {
    let message = message.to_lowercase();

    if message.contains(AUTH_REVOKED) {
        revoked(has_moderator)
    } else if message.contains(NOT_LOGGED_IN) {
        not_logged_in(has_moderator)
    } else if message.contains(NOT_MODERATOR) {
        FollowFailure::NotModerator
    } else {
        FollowFailure::Unavailable
    }
}

fn revoked(has_moderator: bool) -> FollowFailure {
    if has_moderator {
        FollowFailure::ModeratorRevoked
    } else {
        FollowFailure::StreamerRevoked
    }
}

fn not_logged_in(has_moderator: bool) -> FollowFailure {
    if has_moderator {
        FollowFailure::ModeratorNotLoggedIn
    } else {
        FollowFailure::StreamerNotLoggedIn
    }
}
