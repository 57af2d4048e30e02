use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::domain::entities::{FollowRecord, Identity};
use crate::domain::errors::{FollowLookupError, UserLookupError};
use crate::domain::telemetry::TelemetryEvent;

// Port for batched login -> account resolution.
// Keys of the returned map are lower-cased logins.
#[async_trait]
pub trait UserLookupService: Send + Sync {
    async fn resolve(&self, logins: &[String]) -> Result<HashMap<String, Identity>, UserLookupError>;
}

// Port for the viewer -> streamer follow relationship.
// When `moderator_id` is set, upstream checks it against the streamer's moderators.
#[async_trait]
pub trait FollowRelationshipService: Send + Sync {
    async fn fetch(
        &self,
        streamer: &Identity,
        viewer: &Identity,
        moderator_id: Option<&str>,
    ) -> Result<FollowRecord, FollowLookupError>;
}

// Port for analytics. Implementations must never block or fail the caller.
pub trait TelemetrySink: Send + Sync {
    fn record(&self, event: TelemetryEvent);
}

// Port for user access tokens minted elsewhere.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn user_token(&self, user_id: &str) -> Result<Option<String>, String>;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
