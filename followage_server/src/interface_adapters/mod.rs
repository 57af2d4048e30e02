// Interface adapters: HTTP surface, Helix client, token file, telemetry queue.

pub mod clients;
pub mod handlers;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod token_store;
