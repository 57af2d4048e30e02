use crate::domain::{FollowRecord, FollowRelationshipService, Identity, TelemetryEvent, TelemetrySink};
use crate::use_cases::classifier::{FollowFailure, classify_follow_error};
use crate::use_cases::resolve_users::FOLLOWAGE_EVENT_SOURCE;

// Raw path values, kept for diagnostics exactly as the caller sent them.
pub struct RawLogins<'r> {
    pub streamer: &'r str,
    pub viewer: &'r str,
}

// Fetches the follow relationship between two resolved identities.
pub struct FollowLookup<'a, F: ?Sized, T: ?Sized> {
    pub follows: &'a F,
    pub telemetry: &'a T,
}

impl<'a, F, T> FollowLookup<'a, F, T>
where
    F: FollowRelationshipService + ?Sized,
    T: TelemetrySink + ?Sized,
{
    pub async fn fetch_follow(
        &self,
        raw: &RawLogins<'_>,
        streamer: &Identity,
        viewer: &Identity,
        moderator_id: Option<&str>,
    ) -> Result<FollowRecord, FollowFailure> {
        match self.follows.fetch(streamer, viewer, moderator_id).await {
            Ok(record) => Ok(record),
            Err(err) => {
                let failure = classify_follow_error(&err, moderator_id.is_some());
                tracing::warn!(
                    error = %err,
                    ?failure,
                    streamer_id = %streamer.id,
                    viewer_id = %viewer.id,
                    moderator_id = moderator_id.unwrap_or_default(),
                    "follow lookup failed"
                );

                self.telemetry.record(TelemetryEvent::errors([
                    FOLLOWAGE_EVENT_SOURCE.to_string(),
                    format!("Could not get follower data: {err}"),
                    raw.streamer.to_string(),
                    raw.viewer.to_string(),
                    moderator_id.unwrap_or_default().to_string(),
                ]));

                Err(failure)
            }
        }
    }
}
