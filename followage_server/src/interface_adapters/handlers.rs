use crate::domain::FormatOption;
use crate::interface_adapters::protocol::{FollowageQuery, SERVER_TIMING, server_timing};
use crate::interface_adapters::state::AppState;
use crate::use_cases::{FollowageReply, FollowageRequest, FollowageUseCase};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use std::sync::Arc;
use std::time::Instant;

// Chat-bot followage command. Always answers with plain text, plus a
// Server-Timing header for the upstream stages.
#[tracing::instrument(
    name = "followage",
    skip_all,
    fields(streamer = %streamer, viewer = %viewer)
)]
pub async fn followage(
    State(state): State<Arc<AppState>>,
    Path((streamer, viewer)): Path<(String, String)>,
    Query(query): Query<FollowageQuery>,
) -> impl IntoResponse {
    let started = Instant::now();
    let use_case = FollowageUseCase {
        users: state.users.as_ref(),
        follows: state.follows.as_ref(),
        telemetry: state.telemetry.as_ref(),
        clock: state.clock.as_ref(),
    };

    let outcome = use_case
        .execute(FollowageRequest {
            streamer: &streamer,
            viewer: &viewer,
            format: FormatOption::from_query(query.format.as_deref()),
            moderator_id: query.moderator_id.as_deref(),
        })
        .await;

    let reply = outcome.reply;
    match &reply {
        FollowageReply::Following { .. } | FollowageReply::NotFollowing { .. } => {
            tracing::info!("followage answered.");
        }
        _ => tracing::debug!(?reply, "followage rejected."),
    }

    let timing = server_timing(&outcome.timings, started.elapsed());
    ([(SERVER_TIMING, timing)], reply.to_string())
}

pub async fn health() -> &'static str {
    "ok"
}
