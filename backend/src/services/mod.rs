//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! the engine, repositories and external systems.

pub mod prediction;

pub use prediction::{PersistenceOutcome, PredictionService};
