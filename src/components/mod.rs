//! ECS components for entities.
//!
//! This module groups the component types attached to leaders and
//! companions: where they stand, how big they are, which location they are
//! in, and the companion's AI.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned bounding box, used for center distances
//! - [`companionai`] – companion state machine owning the follow controller
//! - [`location`] – world region identifiers and the entity's current one
//! - [`mapposition`] – world-space position (pivot) and tile conversions
//! - [`movementspeed`] – speed published by agents that walk on their own
//! - [`primaryagent`] – marker for player-controlled agents

pub mod boxcollider;
pub mod companionai;
pub mod location;
pub mod mapposition;
pub mod movementspeed;
pub mod primaryagent;
