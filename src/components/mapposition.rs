//! World-space position component.
//!
//! [`MapPosition`] stores the pivot (top-left corner) of an entity in world
//! units. Tile coordinates are derived from it by dividing by the tile size,
//! so an entity standing anywhere inside a tile reports that tile.

use bevy_ecs::prelude::Component;
use glam::{IVec2, Vec2};

/// World-space pivot of an entity.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }

    /// Position whose pivot sits on the top-left corner of `tile`.
    pub fn from_tile(tile: IVec2, tile_size: f32) -> Self {
        Self {
            pos: tile.as_vec2() * tile_size,
        }
    }

    /// Tile containing the pivot.
    pub fn tile(&self, tile_size: f32) -> IVec2 {
        (self.pos / tile_size).floor().as_ivec2()
    }

    /// Move the pivot onto the top-left corner of `tile`.
    pub fn set_tile(&mut self, tile: IVec2, tile_size: f32) {
        self.pos = tile.as_vec2() * tile_size;
    }
}
