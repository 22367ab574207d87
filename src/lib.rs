//! Companion follow library.
//!
//! Decision layer that keeps a non-player companion trailing a leader through
//! a tile-based world, plus the ECS glue that runs it every simulation tick.
//! This module exposes the controller, its components, resources, systems,
//! and events for use in integration tests and as a reusable library.

pub mod ai;
pub mod components;
pub mod events;
pub mod headless;
pub mod resources;
pub mod systems;
