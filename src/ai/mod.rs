//! Companion decision layer.
//!
//! This module holds the logic that decides when and how fast a companion
//! moves toward its leader. It is free of ECS queries: the systems in
//! [`crate::systems`] resolve entities into a [`context::FollowContext`] and
//! hand it to the controller.
//!
//! Submodules overview:
//! - [`collaborators`] – traits for the path finder, the movement executor and the random source
//! - [`context`] – per-call view of the leader, the follower and the session
//! - [`followcontroller`] – the follow controller itself
//! - [`idletimer`] – countdown gating idle animations
//! - [`speedpolicy`] – distance-to-speed bands
//! - [`ticket`] – activation tickets identifying the current controller

pub mod collaborators;
pub mod context;
pub mod followcontroller;
pub mod idletimer;
pub mod speedpolicy;
pub mod ticket;
