//! Simulation systems.
//!
//! Submodules overview
//! - [`follow`] – resolve leaders and tick every companion's AI
//! - [`location`] – detect companion location changes and trigger events
//! - [`time`] – update simulation time and count host ticks

pub mod follow;
pub mod location;
pub mod time;
