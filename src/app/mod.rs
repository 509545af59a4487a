//! Viewport orchestration layer
//!
//! This module turns feasibility results into a concrete viewport and
//! keeps it current as signals arrive.

pub mod controller;
pub mod state;

pub use controller::{ControllerError, ViewportController, ViewportSnapshot};
pub use state::{ViewMode, ViewportManager, ViewportState};
