//! Distance-to-speed policy.
//!
//! The follower's speed is a piecewise function of the distance between its
//! bounding-box center and the leader's, split into four [`SpeedBand`]s:
//!
//! | Band | Distance (tiles) | Speed |
//! |---|---|---|
//! | `Far` | > move × far multiplier | leader speed + bonus if the leader is fast, else the base sprint speed |
//! | `NearFar` | > move | the leader's speed, or the default cruise speed |
//! | `Decelerating` | > decelerate | current speed minus the deceleration step |
//! | `Arrived` | otherwise | 0 |
//!
//! The decelerating band is stateful: applied every tick it decays the
//! executor's speed linearly. The result is not clamped, so it can drop below
//! zero; executors treat any speed <= 0 as stopped.

use crate::resources::followconfig::FollowTuning;

/// Distance band the follower is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedBand {
    Far,
    NearFar,
    Decelerating,
    Arrived,
}

impl SpeedBand {
    /// Classify a world-space distance.
    pub fn classify(distance: f32, tuning: &FollowTuning) -> Self {
        let move_distance = tuning.move_threshold * tuning.tile_size;
        if distance > move_distance * tuning.far_multiplier {
            SpeedBand::Far
        } else if distance > move_distance {
            SpeedBand::NearFar
        } else if distance > tuning.decelerate_threshold * tuning.tile_size {
            SpeedBand::Decelerating
        } else {
            SpeedBand::Arrived
        }
    }
}

/// Speed the follower should move at.
///
/// * `leader_speed` - speed published by the leader, if any
/// * `current_speed` - the executor's speed before this call
pub fn speed_for_distance(
    distance: f32,
    leader_speed: Option<f32>,
    current_speed: f32,
    tuning: &FollowTuning,
) -> f32 {
    match SpeedBand::classify(distance, tuning) {
        SpeedBand::Far => match leader_speed {
            Some(speed) if speed > tuning.far_base_speed => speed + tuning.far_bonus_speed,
            _ => tuning.far_base_speed,
        },
        SpeedBand::NearFar => leader_speed.unwrap_or(tuning.near_default_speed),
        SpeedBand::Decelerating => current_speed - tuning.deceleration,
        SpeedBand::Arrived => 0.0,
    }
}
