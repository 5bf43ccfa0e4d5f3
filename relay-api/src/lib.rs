pub mod config;
pub mod error;
pub mod handlers;
pub mod helpers;
pub mod integrations;
pub mod jobs;

pub use error::RelayError;
pub use jobs::relay_pipeline::{RelayOutcome, RelayPipeline};
