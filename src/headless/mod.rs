//! Headless harness.
//!
//! Simple collaborators and a scripted scenario that run the follow
//! controller without a renderer or a real navigation layer. The demo binary
//! and the integration tests are built on top of it.
//!
//! Submodules overview:
//! - [`joystick`] – straight-line movement executor
//! - [`pathfinder`] – path finder that only tracks its location
//! - [`scenario`] – scripted leader, companion spawning and schedule

pub mod joystick;
pub mod pathfinder;
pub mod scenario;
