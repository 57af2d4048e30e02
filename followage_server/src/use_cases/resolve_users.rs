use std::collections::HashMap;

use crate::domain::{Identity, TelemetryEvent, TelemetrySink, UserLookupError, UserLookupService, UserPair};
use crate::use_cases::classifier::{UserFailure, classify_user_error};

pub(crate) const FOLLOWAGE_EVENT_SOURCE: &str = "commands/twitch/followage";

// Resolves the streamer and viewer logins in one batched lookup.
pub struct UserResolver<'a, U: ?Sized, T: ?Sized> {
    pub users: &'a U,
    pub telemetry: &'a T,
}

impl<'a, U, T> UserResolver<'a, U, T>
where
    U: UserLookupService + ?Sized,
    T: TelemetrySink + ?Sized,
{
    // Raw lookup: lower-cases the logins and partitions the result.
    pub async fn lookup(&self, streamer: &str, viewer: &str) -> Result<UserPair, UserLookupError> {
        let logins = [streamer.to_lowercase(), viewer.to_lowercase()];
        let found = self.users.resolve(&logins).await?;

        Ok(UserPair {
            streamer: find_login(&found, &logins[0]),
            viewer: find_login(&found, &logins[1]),
        })
    }

    // Lookup plus failure policy. Both identities are present on success.
    pub async fn resolve(
        &self,
        streamer: &str,
        viewer: &str,
    ) -> Result<(Identity, Identity), UserFailure> {
        let pair = match self.lookup(streamer, viewer).await {
            Ok(pair) => pair,
            Err(err) => {
                let failure = classify_user_error(&err);
                if failure == UserFailure::Unavailable {
                    tracing::warn!(error = %err, streamer, viewer, "user lookup failed");
                    self.record_error(format!("Could not get twitch users: {err}"), streamer, viewer);
                } else {
                    tracing::debug!(streamer, viewer, "upstream rejected usernames");
                }
                return Err(failure);
            }
        };

        match pair {
            UserPair {
                streamer: Some(found_streamer),
                viewer: Some(found_viewer),
            } => Ok((found_streamer, found_viewer)),
            UserPair {
                streamer: None,
                viewer: None,
            } => {
                self.record_error(
                    format!(
                        "Streamer twitch account {streamer} was not found. And viewer account {viewer} was not found."
                    ),
                    streamer,
                    viewer,
                );
                Err(UserFailure::NotFoundBoth)
            }
            UserPair { streamer: None, .. } => {
                self.record_error(
                    format!("Streamer twitch account {streamer} was not found"),
                    streamer,
                    viewer,
                );
                Err(UserFailure::NotFoundStreamer)
            }
            UserPair { viewer: None, .. } => {
                self.record_error(format!("Viewer {viewer} not found"), streamer, viewer);
                Err(UserFailure::NotFoundViewer)
            }
        }
    }

    fn record_error(&self, diagnostic: String, streamer: &str, viewer: &str) {
        self.telemetry.record(TelemetryEvent::errors([
            FOLLOWAGE_EVENT_SOURCE.to_string(),
            diagnostic,
            streamer.to_string(),
            viewer.to_string(),
            String::new(),
        ]));
    }
}

fn find_login(found: &HashMap<String, Identity>, login: &str) -> Option<Identity> {
    found
        .iter()
        .find(|(key, identity)| {
            key.eq_ignore_ascii_case(login) || identity.login.eq_ignore_ascii_case(login)
        })
        .map(|(_, identity)| identity.clone())
}
