// Outbound clients for external services.

pub mod helix;

pub use helix::{HelixClient, HelixConfig};
