//! Location-scoped path finder stand-in.
//!
//! Routes in the headless harness are straight lines, so the path finder only
//! has to remember which location it is bound to. It counts rebinds; the
//! bound location shows up in scenario trace lines.

use crate::ai::collaborators::PathFinder;
use crate::components::location::LocationId;

#[derive(Debug, Clone, Default)]
pub struct RegionPathFinder {
    location: Option<LocationId>,
    relocations: u32,
}

impl RegionPathFinder {
    pub fn new(location: Option<LocationId>) -> Self {
        Self {
            location,
            relocations: 0,
        }
    }

    pub fn relocations(&self) -> u32 {
        self.relocations
    }
}

impl PathFinder for RegionPathFinder {
    fn current_location(&self) -> Option<LocationId> {
        self.location
    }

    fn set_current_location(&mut self, location: LocationId) {
        self.location = Some(location);
        self.relocations += 1;
    }
}
