// Use cases layer: the followage command and the steps it sequences.

pub mod classifier;
pub mod follow_lookup;
pub mod followage;
pub mod input;
pub mod resolve_users;

#[cfg(test)]
pub(crate) mod test_support;

pub use classifier::{FollowFailure, UserFailure};
pub use followage::{
    FollowageOutcome, FollowageReply, FollowageRequest, FollowageUseCase, StageTimings,
};
