// Domain layer: followage types, duration rules, and the ports the use cases depend on.

pub mod duration;
pub mod entities;
pub mod errors;
pub mod ports;
pub mod telemetry;

pub use duration::{DurationBreakdown, FormatOption, TimeUnit};
pub use entities::{FollowRecord, Identity, UserPair};
pub use errors::{FollowLookupError, PlaceholderError, UserLookupError};
pub use ports::{Clock, FollowRelationshipService, TelemetrySink, TokenStore, UserLookupService};
pub use telemetry::{TelemetryCategory, TelemetryEvent};
