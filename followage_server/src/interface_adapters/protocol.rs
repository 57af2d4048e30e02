use crate::use_cases::StageTimings;
use serde::Deserialize;
use std::time::Duration;

pub const SERVER_TIMING: &str = "server-timing";

// Query string accepted by the followage command route.
#[derive(Debug, Default, Deserialize)]
pub struct FollowageQuery {
    // Unit selector such as `ymdhis`; unknown values fall back to the default.
    pub format: Option<String>,
    // Optional moderator whose token scopes the follow lookup.
    #[serde(rename = "moderatorId")]
    pub moderator_id: Option<String>,
}

// Renders the `Server-Timing` value: one metric per stage that ran, then the total.
pub fn server_timing(timings: &StageTimings, total: Duration) -> String {
    let stages = [
        ("users", "Fetch Twitch Users", timings.users),
        ("follow", "Fetch Twitch Follower", timings.follow),
        ("total", "Total Response Time", Some(total)),
    ];

    stages
        .into_iter()
        .filter_map(|(name, desc, dur)| {
            dur.map(|dur| format!("{name};desc=\"{desc}\";dur={:.1}", dur.as_secs_f64() * 1000.0))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
