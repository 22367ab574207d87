//! Follow configuration resource.
//!
//! Manages the tuning of the follow controller, loaded from an INI
//! configuration file. Provides defaults for safe startup and methods to
//! load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [follow]
//! tile_size = 64
//! move_threshold = 2.65
//! decelerate_threshold = 1.35
//! deceleration = 0.025
//! far_multiplier = 4
//! replan_interval = 15
//! max_retries = 3
//!
//! [speed]
//! far_base = 5.28
//! far_bonus = 2.65
//! near_default = 4.0
//!
//! [idle]
//! activate_min = 500
//! activate_max = 800
//! settle_min = 480
//! settle_max = 840
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_TILE_SIZE: f32 = 64.0;
const DEFAULT_MOVE_THRESHOLD: f32 = 2.65;
const DEFAULT_DECELERATE_THRESHOLD: f32 = 1.35;
const DEFAULT_DECELERATION: f32 = 0.025;
const DEFAULT_FAR_MULTIPLIER: f32 = 4.0;
const DEFAULT_FAR_BASE_SPEED: f32 = 5.28;
const DEFAULT_FAR_BONUS_SPEED: f32 = 2.65;
const DEFAULT_NEAR_SPEED: f32 = 4.0;
const DEFAULT_REPLAN_INTERVAL: u64 = 15;
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_IDLE_ON_ACTIVATE: (u32, u32) = (500, 800);
const DEFAULT_IDLE_AFTER_MOVE: (u32, u32) = (480, 840);
const DEFAULT_CONFIG_PATH: &str = "./follow.ini";

/// Numeric tuning of the follow controller.
///
/// Distances are expressed in tiles and scaled by `tile_size` at use. Idle
/// ranges are half-open `[min, max)` frame counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FollowTuning {
    /// Size of one tile in world units.
    pub tile_size: f32,
    /// Beyond this many tiles the follower keeps up with the leader.
    pub move_threshold: f32,
    /// Within this many tiles the follower stops.
    pub decelerate_threshold: f32,
    /// Speed lost per tick while decelerating.
    pub deceleration: f32,
    /// Multiple of `move_threshold` past which the follower sprints.
    pub far_multiplier: f32,
    /// Minimum sprint speed.
    pub far_base_speed: f32,
    /// Added to the leader's speed while sprinting after a fast leader.
    pub far_bonus_speed: f32,
    /// Cruise speed when the leader does not publish one.
    pub near_default_speed: f32,
    /// Ticks between two path re-acquisition checks.
    pub replan_interval: u64,
    /// Stuck notifications tolerated before snapping to the leader.
    pub max_retries: u32,
    /// Idle countdown drawn when the controller activates.
    pub idle_on_activate: (u32, u32),
    /// Idle countdown drawn when a movement segment ends.
    pub idle_after_move: (u32, u32),
}

impl Default for FollowTuning {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            move_threshold: DEFAULT_MOVE_THRESHOLD,
            decelerate_threshold: DEFAULT_DECELERATE_THRESHOLD,
            deceleration: DEFAULT_DECELERATION,
            far_multiplier: DEFAULT_FAR_MULTIPLIER,
            far_base_speed: DEFAULT_FAR_BASE_SPEED,
            far_bonus_speed: DEFAULT_FAR_BONUS_SPEED,
            near_default_speed: DEFAULT_NEAR_SPEED,
            replan_interval: DEFAULT_REPLAN_INTERVAL,
            max_retries: DEFAULT_MAX_RETRIES,
            idle_on_activate: DEFAULT_IDLE_ON_ACTIVATE,
            idle_after_move: DEFAULT_IDLE_AFTER_MOVE,
        }
    }
}

/// Follow configuration resource.
///
/// Stores the controller tuning and the path of the INI file it was read
/// from. Controllers copy the tuning when they are constructed.
#[derive(Resource, Debug, Clone)]
pub struct FollowConfig {
    /// Tuning handed to new follow controllers.
    pub tuning: FollowTuning,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// INI counts are read as u64; anything past u32 clamps to u32::MAX.
fn saturate(v: u64) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}

impl FollowConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            tuning: FollowTuning::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        let tuning = &mut self.tuning;

        // [follow] section
        if let Some(v) = config.getfloat("follow", "tile_size").ok().flatten() {
            tuning.tile_size = v as f32;
        }
        if let Some(v) = config.getfloat("follow", "move_threshold").ok().flatten() {
            tuning.move_threshold = v as f32;
        }
        if let Some(v) = config
            .getfloat("follow", "decelerate_threshold")
            .ok()
            .flatten()
        {
            tuning.decelerate_threshold = v as f32;
        }
        if let Some(v) = config.getfloat("follow", "deceleration").ok().flatten() {
            tuning.deceleration = v as f32;
        }
        if let Some(v) = config.getfloat("follow", "far_multiplier").ok().flatten() {
            tuning.far_multiplier = v as f32;
        }
        if let Some(v) = config.getuint("follow", "replan_interval").ok().flatten() {
            tuning.replan_interval = v.max(1);
        }
        if let Some(v) = config.getuint("follow", "max_retries").ok().flatten() {
            tuning.max_retries = saturate(v);
        }

        // [speed] section
        if let Some(v) = config.getfloat("speed", "far_base").ok().flatten() {
            tuning.far_base_speed = v as f32;
        }
        if let Some(v) = config.getfloat("speed", "far_bonus").ok().flatten() {
            tuning.far_bonus_speed = v as f32;
        }
        if let Some(v) = config.getfloat("speed", "near_default").ok().flatten() {
            tuning.near_default_speed = v as f32;
        }

        // [idle] section
        if let Some(v) = config.getuint("idle", "activate_min").ok().flatten() {
            tuning.idle_on_activate.0 = saturate(v);
        }
        if let Some(v) = config.getuint("idle", "activate_max").ok().flatten() {
            tuning.idle_on_activate.1 = saturate(v);
        }
        if let Some(v) = config.getuint("idle", "settle_min").ok().flatten() {
            tuning.idle_after_move.0 = saturate(v);
        }
        if let Some(v) = config.getuint("idle", "settle_max").ok().flatten() {
            tuning.idle_after_move.1 = saturate(v);
        }

        info!(
            "Loaded follow config: tile={} move={} decelerate={} replan every {} ticks, {} retries",
            tuning.tile_size,
            tuning.move_threshold,
            tuning.decelerate_threshold,
            tuning.replan_interval,
            tuning.max_retries
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();
        let t = &self.tuning;

        // [follow] section
        config.set("follow", "tile_size", Some(t.tile_size.to_string()));
        config.set("follow", "move_threshold", Some(t.move_threshold.to_string()));
        config.set(
            "follow",
            "decelerate_threshold",
            Some(t.decelerate_threshold.to_string()),
        );
        config.set("follow", "deceleration", Some(t.deceleration.to_string()));
        config.set("follow", "far_multiplier", Some(t.far_multiplier.to_string()));
        config.set("follow", "replan_interval", Some(t.replan_interval.to_string()));
        config.set("follow", "max_retries", Some(t.max_retries.to_string()));

        // [speed] section
        config.set("speed", "far_base", Some(t.far_base_speed.to_string()));
        config.set("speed", "far_bonus", Some(t.far_bonus_speed.to_string()));
        config.set("speed", "near_default", Some(t.near_default_speed.to_string()));

        // [idle] section
        config.set("idle", "activate_min", Some(t.idle_on_activate.0.to_string()));
        config.set("idle", "activate_max", Some(t.idle_on_activate.1.to_string()));
        config.set("idle", "settle_min", Some(t.idle_after_move.0.to_string()));
        config.set("idle", "settle_max", Some(t.idle_after_move.1.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved follow config to {:?}", self.config_path);

        Ok(())
    }
}
