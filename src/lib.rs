//! Adaptive seat-map viewport and layout-feasibility engine
//!
//! Given a venue seat-map description and the consuming device's viewport,
//! the engine estimates how much space the map needs, decides whether it
//! can be shown at a usable scale, picks a fallback presentation when it
//! cannot, and maintains a centered pan/zoom viewport as inputs change.
//!
//! - [`domain`]: pure geometry and feasibility estimation
//! - [`platform`]: injected viewport signals, frame scheduling, device tier
//! - [`config`]: named, validated tuning constants
//! - [`app`]: viewport state machine and its controller

pub mod app;
pub mod config;
pub mod domain;
pub mod platform;

pub use app::{ViewMode, ViewportController, ViewportSnapshot, ViewportState};
pub use config::EngineConfig;
pub use domain::feasibility::{FeasibilityResult, RecommendedView, compute_feasibility};
pub use domain::seat_map::{SeatMapDescription, SectionGeometry, Topology};
