//! Drag-to-throw gesture handling
//!
//! Pointer positions arrive already in rink coordinates. A drag must start
//! on (or near) the waiting stone; releasing it flicks the stone in the
//! opposite direction of the pull, like a slingshot. Nothing is committed
//! until a long enough drag is released.

use glam::Vec2;

/// Drag gesture parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimParams {
    /// Launch speed per unit of drag
    pub throw_force: f32,
    /// Drags at or below this length are cancelled
    pub min_drag_distance: f32,
    /// Grab radius, in stone radii
    pub grab_radius_factor: f32,
}

impl Default for AimParams {
    fn default() -> Self {
        Self {
            throw_force: 0.15,
            min_drag_distance: 10.0,
            grab_radius_factor: 2.0,
        }
    }
}

/// An in-progress drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub start: Vec2,
    pub current: Vec2,
}

impl Drag {
    /// Begin a drag if `pointer` is close enough to the stone
    pub fn begin(
        pointer: Vec2,
        stone_pos: Vec2,
        stone_radius: f32,
        params: &AimParams,
    ) -> Option<Self> {
        if pointer.distance(stone_pos) < stone_radius * params.grab_radius_factor {
            Some(Self {
                start: pointer,
                current: pointer,
            })
        } else {
            None
        }
    }

    /// Track pointer movement
    pub fn update(&mut self, pointer: Vec2) {
        self.current = pointer;
    }

    /// Pull vector (drag start minus pointer)
    #[inline]
    pub fn pull(&self) -> Vec2 {
        self.start - self.current
    }

    /// Release at `pointer`; returns the launch velocity, or `None` if the
    /// drag was too short and should be discarded
    pub fn release(mut self, pointer: Vec2, params: &AimParams) -> Option<Vec2> {
        self.update(pointer);
        let pull = self.pull();
        if pull.length() > params.min_drag_distance {
            Some(pull * params.throw_force)
        } else {
            None
        }
    }

    /// Endpoints of the aim guide drawn from the stone
    pub fn aim_line(&self, stone_pos: Vec2) -> (Vec2, Vec2) {
        (stone_pos, stone_pos + (stone_pos - self.start))
    }
}
