//! ECS resources made available to systems.
//!
//! Overview
//! - `followconfig` – follow controller tuning loaded from an INI file
//! - `sessionrole` – whether this process may act and decide movement
//! - `simrng` – seedable random source for idle durations
//! - `worldtime` – simulation time, delta and host tick counter
pub mod followconfig;
pub mod sessionrole;
pub mod simrng;
pub mod worldtime;
