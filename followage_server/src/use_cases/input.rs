use crate::domain::PlaceholderError;

const NIGHTBOT_CHANNEL: &str = "$(channel)";
const NIGHTBOT_TOUSER: &str = "$(touser)";
// Seen in the wild from a doubled closing parenthesis in bot templates.
const NIGHTBOT_TOUSER_MALFORMED: &str = "$(touser))";
const STREAMER_TEMPLATE: &str = "{StreamerUsername}";
const VIEWER_TEMPLATE: &str = "{ViewerUsername}";

// Rejects path segments that are still unsubstituted chat-bot variables.
pub fn validate_placeholders(streamer: &str, viewer: &str) -> Result<(), PlaceholderError> {
    if streamer == NIGHTBOT_CHANNEL {
        return Err(PlaceholderError::NightbotChannel);
    }
    if viewer == NIGHTBOT_TOUSER || viewer == NIGHTBOT_TOUSER_MALFORMED {
        return Err(PlaceholderError::NightbotToUser);
    }
    if streamer == STREAMER_TEMPLATE {
        return Err(PlaceholderError::StreamerTemplate);
    }
    if viewer == VIEWER_TEMPLATE {
        return Err(PlaceholderError::ViewerTemplate);
    }

    Ok(())
}

// Instructive reply telling the bot owner what to substitute.
pub fn placeholder_message(err: PlaceholderError) -> &'static str {
    match err {
        PlaceholderError::NightbotChannel => {
            "$(channel) is a replacement for the streamers username in nightbot, if you do not use nightbot you need to use a variable that replaces to the streamer username in that bot."
        }
        PlaceholderError::NightbotToUser => {
            "$(touser) is a replacement for the viewers username in nightbot, if you do not use nightbot you need to use a variable that replaces to the viewer username in that bot."
        }
        PlaceholderError::StreamerTemplate => {
            "You need to replace {StreamerUsername} with the streamers username."
        }
        PlaceholderError::ViewerTemplate => {
            "You need to replace {ViewerUsername} with the viewers username."
        }
    }
}
