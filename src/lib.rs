//! Dead reckoning through absolute-fix outages.
//!
//! Two estimators run over the same timeline of fixes and inertial samples:
//! a frozen baseline that stops at the last fix, and B-QRE, which keeps
//! moving on gyro-integrated heading and a balanced-quinary speed level.
//! [`pipeline::run_comparison`] runs both and scores them against ground
//! truth over the fix-lost interval.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod filters;
pub mod pipeline;
pub mod quantize;
pub mod report;
pub mod sim;
pub mod types;

pub use config::EstimatorConfig;
pub use error::{Result, TrackerError};
pub use evaluation::{Comparison, ErrorSummary, EstimatorEvaluation};
pub use filters::{BqreEstimator, EstimatorPhase, FrozenEstimator, TrajectoryEstimator};
pub use pipeline::{run_comparison, ComparisonReport};
pub use quantize::{quantize, quantize_with, QuinarySymbol, RoundingMode};
pub use sim::ScenarioConfig;
pub use types::{InertialSample, Position, TickInput, Timeline};
