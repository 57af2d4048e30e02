use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::{Clock, FollowRelationshipService, TelemetrySink, UserLookupService};

#[derive(Clone)]
pub struct AppState {
    // We use Arc<dyn Trait> to hold any implementation (dependency injection).
    pub users: Arc<dyn UserLookupService>,
    pub follows: Arc<dyn FollowRelationshipService>,
    pub telemetry: Arc<dyn TelemetrySink>,
    pub clock: Arc<dyn Clock>,
}

// System clock adapter used by the followage use case.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
