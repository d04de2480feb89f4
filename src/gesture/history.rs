//! Per-target "last observed" gesture state.

use crate::types::GestureKind;

/// Last value seen for each stateful gesture kind.
///
/// A field is only meaningful between a `BEGIN` record of its kind and the
/// matching `END`. After `END` it may hold a stale value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureHistory {
    pub last_pan_point: (i32, i32),
    pub last_rotation_radians: f64,
    pub last_zoom_extent: i64,
}

impl GestureHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the field tracked for `kind`. Stateless kinds are ignored.
    pub fn reset(&mut self, kind: GestureKind) {
        match kind {
            GestureKind::Pan => self.last_pan_point = (0, 0),
            GestureKind::Rotate => self.last_rotation_radians = 0.0,
            GestureKind::Zoom => self.last_zoom_extent = 0,
            _ => {}
        }
    }
}
