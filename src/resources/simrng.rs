//! Seedable random source for simulation decisions.
//!
//! Controllers never reach for a global generator: every draw goes through
//! [`RandomRange`] so tests and replays can pin the sequence with a seed.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;

use crate::ai::collaborators::RandomRange;

/// Simulation random generator resource.
#[derive(Resource, Debug, Clone)]
pub struct SimRng {
    rng: Rng,
    seed: Option<u64>,
}

impl Default for SimRng {
    fn default() -> Self {
        Self {
            rng: Rng::new(),
            seed: None,
        }
    }
}

impl SimRng {
    /// Deterministic generator.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
            seed: Some(seed),
        }
    }

    /// Seed the generator was built from, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl RandomRange for SimRng {
    fn range(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        self.rng.u32(low..high)
    }
}
