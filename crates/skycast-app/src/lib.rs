//! Skycast application layer.
//!
//! [`DataOrchestrator`] sequences location, weather and news into one
//! refresh cycle, owns every piece of derived state, and publishes
//! snapshots to the presentation layer through a watch channel.

pub mod orchestrator;
pub mod state;

pub use orchestrator::DataOrchestrator;
pub use state::{DashboardState, Notice};
