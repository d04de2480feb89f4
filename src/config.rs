//! Decoder configuration.

use crate::codec::ROTATION_MAX_SCALE;

/// Tunables for [`GestureDecoder`](crate::GestureDecoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Value of the rotation argument that maps to `+2π`.
    pub rotation_max_scale: i32,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            rotation_max_scale: ROTATION_MAX_SCALE,
        }
    }
}

impl DecoderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rotation scale. Values below 1 are clamped to 1.
    pub fn with_rotation_max_scale(mut self, scale: i32) -> Self {
        self.rotation_max_scale = scale.max(1);
        self
    }
}
