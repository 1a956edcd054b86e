//! triage-client: talks to the task analysis service and renders its answers onto a board.

pub mod api;
pub mod controller;
pub mod error;

pub use api::{ApiClient, DEFAULT_API_BASE, DEFAULT_STRATEGY, HealthStatus, KNOWN_STRATEGIES};
pub use controller::{Action, Controller, run_action};
pub use error::ApiError;
