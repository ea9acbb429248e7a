//! Pixel <-> cell conversion relative to a pannable origin

use bevy::math::{IVec2, Vec2};

/// Default tile edge length in pixels
pub const TILE_SIZE: f32 = 64.0;

/// Convert a pixel position to the cell containing it.
///
/// Uses floor division, so negative offsets land one cell further down:
/// a pixel one unit left of the origin is in cell `-1`, not cell `0`.
pub fn pixel_to_cell(pixel: Vec2, origin: Vec2, tile_size: f32) -> IVec2 {
    ((pixel - origin) / tile_size).floor().as_ivec2()
}

/// Pixel position of a cell's top-left corner
pub fn cell_to_pixel(cell: IVec2, origin: Vec2, tile_size: f32) -> Vec2 {
    origin + cell.as_vec2() * tile_size
}

/// The editing session's camera origin and pan gesture state.
///
/// Whenever the origin moves, callers must re-display free objects with
/// [`FreeObjectTracker::follow_origin`](crate::FreeObjectTracker::follow_origin).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraOrigin {
    position: Vec2,
    /// `pointer - origin` captured when the pan gesture began
    pan_offset: Option<Vec2>,
}

impl CameraOrigin {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            pan_offset: None,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Move the origin by a delta
    pub fn pan_by(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Start a pan gesture at the pointer
    pub fn begin_pan(&mut self, pointer: Vec2) {
        self.pan_offset = Some(pointer - self.position);
    }

    /// Delta that keeps the origin under the pointer during a pan gesture,
    /// `None` when no gesture is active
    pub fn pan_delta(&self, pointer: Vec2) -> Option<Vec2> {
        self.pan_offset
            .map(|offset| pointer - offset - self.position)
    }

    pub fn end_pan(&mut self) {
        self.pan_offset = None;
    }

    pub fn is_panning(&self) -> bool {
        self.pan_offset.is_some()
    }

    /// Origin delta for a mouse wheel step: horizontal by default, vertical when requested
    pub fn scroll_delta(wheel: f32, vertical: bool, step: f32) -> Vec2 {
        let delta = -wheel * step;
        if vertical {
            Vec2::new(0.0, delta)
        } else {
            Vec2::new(delta, 0.0)
        }
    }

    pub fn pixel_to_cell(&self, pixel: Vec2, tile_size: f32) -> IVec2 {
        pixel_to_cell(pixel, self.position, tile_size)
    }

    /// Screen offset of the first visible grid line on each axis, in `[0, tile_size)`
    pub fn grid_line_offset(&self, tile_size: f32) -> Vec2 {
        self.position.rem_euclid(Vec2::splat(tile_size))
    }
}
