use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    Clock, FollowLookupError, FollowRecord, FollowRelationshipService, Identity, TelemetryEvent,
    TelemetrySink, UserLookupError, UserLookupService,
};

pub(crate) fn identity(id: &str, login: &str) -> Identity {
    Identity {
        id: id.to_string(),
        login: login.to_string(),
    }
}

// Fixed time source so elapsed-time assertions are deterministic.
pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// User lookup fake backed by a login -> identity table.
#[derive(Clone, Default)]
pub(crate) struct FakeUsers {
    users: HashMap<String, Identity>,
    failure: Option<UserLookupError>,
    calls: Arc<AtomicUsize>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl FakeUsers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_user(mut self, id: &str, login: &str) -> Self {
        self.users
            .insert(login.to_lowercase(), identity(id, login));
        self
    }

    pub(crate) fn failing(mut self, err: UserLookupError) -> Self {
        self.failure = Some(err);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requested(&self) -> Vec<String> {
        self.requested.lock().expect("requested mutex poisoned").clone()
    }
}

#[async_trait]
impl UserLookupService for FakeUsers {
    async fn resolve(
        &self,
        logins: &[String],
    ) -> Result<HashMap<String, Identity>, UserLookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested
            .lock()
            .expect("requested mutex poisoned")
            .extend(logins.iter().cloned());

        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        Ok(logins
            .iter()
            .filter_map(|login| {
                self.users
                    .get(login)
                    .map(|identity| (login.clone(), identity.clone()))
            })
            .collect())
    }
}

// Follow lookup fake returning a canned result and recording the moderator it saw.
#[derive(Clone)]
pub(crate) struct FakeFollows {
    result: Result<FollowRecord, FollowLookupError>,
    calls: Arc<AtomicUsize>,
    moderators: Arc<Mutex<Vec<Option<String>>>>,
}

impl FakeFollows {
    pub(crate) fn returning(result: Result<FollowRecord, FollowLookupError>) -> Self {
        Self {
            result,
            calls: Arc::new(AtomicUsize::new(0)),
            moderators: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn moderators(&self) -> Vec<Option<String>> {
        self.moderators
            .lock()
            .expect("moderators mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl FollowRelationshipService for FakeFollows {
    async fn fetch(
        &self,
        _streamer: &Identity,
        _viewer: &Identity,
        moderator_id: Option<&str>,
    ) -> Result<FollowRecord, FollowLookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.moderators
            .lock()
            .expect("moderators mutex poisoned")
            .push(moderator_id.map(str::to_string));
        self.result.clone()
    }
}

// Telemetry sink that keeps every event for inspection.
#[derive(Clone, Default)]
pub(crate) struct RecordingTelemetry {
    events: Arc<Mutex<Vec<TelemetryEvent>>>,
}

impl RecordingTelemetry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn events(&self) -> Vec<TelemetryEvent> {
        self.events.lock().expect("events mutex poisoned").clone()
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn record(&self, event: TelemetryEvent) {
        self.events
            .lock()
            .expect("events mutex poisoned")
            .push(event);
    }
}
