//! Engine configuration
//!
//! Every tuned constant the estimator and the viewport state manager use
//! lives here as a named, validated value. The defaults reproduce the
//! behavior the seat-map views were designed around.

pub mod engine;

pub use engine::{
    ConfigError, DeviceBreakpoints, EngineConfig, FeasibilityThresholds, LayoutConstants,
    ViewportLimits,
};
