use std::fmt;
use std::time::{Duration, Instant};

use tracing::Instrument;

use crate::domain::duration::{self, FormatOption};
use crate::domain::{
    Clock, FollowRelationshipService, Identity, PlaceholderError, TelemetryCategory,
    TelemetryEvent, TelemetrySink, UserLookupService,
};
use crate::use_cases::classifier::{FollowFailure, UserFailure};
use crate::use_cases::follow_lookup::{FollowLookup, RawLogins};
use crate::use_cases::input::{placeholder_message, validate_placeholders};
use crate::use_cases::resolve_users::UserResolver;

// Input for a single followage command, borrowed from the HTTP request.
#[derive(Debug, Clone)]
pub struct FollowageRequest<'r> {
    pub streamer: &'r str,
    pub viewer: &'r str,
    pub format: FormatOption,
    pub moderator_id: Option<&'r str>,
}

/// Terminal outcome of a followage command. Every variant renders to the
/// plain-text reply sent back to the chat bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowageReply {
    Placeholder(PlaceholderError),
    Users {
        failure: UserFailure,
        streamer: String,
        viewer: String,
    },
    Follow(FollowFailure),
    NotFollowing {
        streamer: Identity,
        viewer: Identity,
    },
    Following {
        streamer: Identity,
        viewer: Identity,
        duration: String,
    },
}

impl fmt::Display for FollowageReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FollowageReply::Placeholder(err) => f.write_str(placeholder_message(*err)),
            FollowageReply::Users {
                failure,
                streamer,
                viewer,
            } => f.write_str(&failure.message(streamer, viewer)),
            FollowageReply::Follow(failure) => f.write_str(failure.message()),
            FollowageReply::NotFollowing { streamer, viewer } => {
                write!(f, "@{} is not following @{}.", viewer.login, streamer.login)
            }
            FollowageReply::Following {
                streamer,
                viewer,
                duration,
            } => write!(
                f,
                "@{} has been following @{} for {duration}.",
                viewer.login, streamer.login
            ),
        }
    }
}

/// Wall time spent in each upstream stage. A stage that never ran is `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageTimings {
    pub users: Option<Duration>,
    pub follow: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowageOutcome {
    pub reply: FollowageReply,
    pub timings: StageTimings,
}

// Followage command: validate -> resolve users -> fetch follow -> format.
// No step is retried; the first failure becomes the reply.
pub struct FollowageUseCase<'a, U: ?Sized, F: ?Sized, T: ?Sized, C: ?Sized> {
    pub users: &'a U,
    pub follows: &'a F,
    pub telemetry: &'a T,
    pub clock: &'a C,
}

impl<'a, U, F, T, C> FollowageUseCase<'a, U, F, T, C>
where
    U: UserLookupService + ?Sized,
    F: FollowRelationshipService + ?Sized,
    T: TelemetrySink + ?Sized,
    C: Clock + ?Sized,
{
    pub async fn execute(&self, request: FollowageRequest<'_>) -> FollowageOutcome {
        let mut timings = StageTimings::default();
        let reply = self.run(request, &mut timings).await;
        FollowageOutcome { reply, timings }
    }

    async fn run(
        &self,
        request: FollowageRequest<'_>,
        timings: &mut StageTimings,
    ) -> FollowageReply {
        let FollowageRequest {
            streamer,
            viewer,
            format,
            moderator_id,
        } = request;
        let moderator_id = moderator_id.filter(|id| !id.is_empty());

        if let Err(err) = validate_placeholders(streamer, viewer) {
            return FollowageReply::Placeholder(err);
        }

        let resolver = UserResolver {
            users: self.users,
            telemetry: self.telemetry,
        };
        let started = Instant::now();
        let resolved = resolver
            .resolve(streamer, viewer)
            .instrument(tracing::info_span!("users"))
            .await;
        timings.users = Some(started.elapsed());
        let (streamer_identity, viewer_identity) = match resolved {
            Ok(identities) => identities,
            Err(failure) => {
                return FollowageReply::Users {
                    failure,
                    streamer: streamer.to_string(),
                    viewer: viewer.to_string(),
                };
            }
        };

        let lookup = FollowLookup {
            follows: self.follows,
            telemetry: self.telemetry,
        };
        let raw = RawLogins { streamer, viewer };
        let started = Instant::now();
        let fetched = lookup
            .fetch_follow(&raw, &streamer_identity, &viewer_identity, moderator_id)
            .instrument(tracing::info_span!("follow"))
            .await;
        timings.follow = Some(started.elapsed());
        let record = match fetched {
            Ok(record) => record,
            Err(failure) => return FollowageReply::Follow(failure),
        };

        self.record_usage(&streamer_identity, &viewer_identity, moderator_id, &format);

        let Some(followed_at) = record.followed_at else {
            return FollowageReply::NotFollowing {
                streamer: streamer_identity,
                viewer: viewer_identity,
            };
        };

        let elapsed = duration::elapsed_between(self.clock.now(), followed_at);
        FollowageReply::Following {
            streamer: streamer_identity,
            viewer: viewer_identity,
            duration: duration::format(elapsed, &format),
        }
    }

    fn record_usage(
        &self,
        streamer: &Identity,
        viewer: &Identity,
        moderator_id: Option<&str>,
        format: &FormatOption,
    ) {
        self.telemetry.record(TelemetryEvent::new(
            TelemetryCategory::Commands,
            [
                "twitch",
                "followage",
                streamer.id.as_str(),
                streamer.login.as_str(),
                viewer.id.as_str(),
                viewer.login.as_str(),
                moderator_id.unwrap_or_default(),
            ],
        ));

        if !format.is_default() {
            self.telemetry.record(TelemetryEvent::new(
                TelemetryCategory::FeatureUsage,
                [
                    "twitch/followage/format".to_string(),
                    format.selector(),
                    streamer.id.clone(),
                    streamer.login.clone(),
                ],
            ));
        }
    }
}
