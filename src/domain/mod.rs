//! Domain logic and core data structures
//!
//! This module contains the pure seat-map geometry and feasibility logic.
//! Nothing here observes the environment; every function is total over
//! its inputs.

pub mod core;
pub mod feasibility;
pub mod layout;
pub mod seat_map;
