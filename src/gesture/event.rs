//! High-level gesture events handed to observers.

use crate::codec::radians_to_degrees;
use crate::types::{GestureKind, GestureRecord};

/// Kind-specific payload of a [`GestureEvent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureDetails {
    Pan {
        /// Signed displacement reported by the platform when inertia kicks in.
        inertia_vector: (i16, i16),
        /// Movement since the previous pan notification of this gesture.
        pan_offset: (i32, i32),
        inertia: bool,
    },
    Zoom {
        /// Distance between the two contact points.
        extent: i64,
        /// Extent relative to the previous zoom notification.
        ratio: f64,
    },
    Rotate {
        /// Angle since the gesture began.
        cumulative_radians: f64,
        /// Angle since the previous rotate notification.
        delta_radians: f64,
    },
    TwoFingerTap {
        /// Distance between the two fingers.
        distance: i64,
    },
    PressAndTap {
        /// Offset between the pressed finger and the tapping finger.
        distance: (i16, i16),
    },
}

impl GestureDetails {
    pub fn kind(&self) -> GestureKind {
        match self {
            Self::Pan { .. } => GestureKind::Pan,
            Self::Zoom { .. } => GestureKind::Zoom,
            Self::Rotate { .. } => GestureKind::Rotate,
            Self::TwoFingerTap { .. } => GestureKind::TwoFingerTap,
            Self::PressAndTap { .. } => GestureKind::PressAndTap,
        }
    }
}

/// A decoded gesture notification.
///
/// `handled` starts out `true`. An observer that did not fully process the
/// gesture sets it to `false` so the platform applies its default handling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEvent {
    /// Screen (not client) coordinates.
    pub location: (i32, i32),
    pub begin: bool,
    pub end: bool,
    pub handled: bool,
    pub details: GestureDetails,
}

impl GestureEvent {
    /// Create an event carrying the common fields of `record`.
    pub fn new(record: &GestureRecord, details: GestureDetails) -> Self {
        Self {
            location: record.location,
            begin: record.is_begin(),
            end: record.is_end(),
            handled: true,
            details,
        }
    }

    pub fn kind(&self) -> GestureKind {
        self.details.kind()
    }

    /// Ask the platform to default-handle the underlying message.
    pub fn mark_unhandled(&mut self) {
        self.handled = false;
    }

    /// Pan offset, if this is a pan event.
    pub fn pan_offset(&self) -> Option<(i32, i32)> {
        match self.details {
            GestureDetails::Pan { pan_offset, .. } => Some(pan_offset),
            _ => None,
        }
    }

    /// Zoom ratio, if this is a zoom event.
    pub fn zoom_ratio(&self) -> Option<f64> {
        match self.details {
            GestureDetails::Zoom { ratio, .. } => Some(ratio),
            _ => None,
        }
    }

    /// Rotation delta in radians, if this is a rotate event.
    pub fn rotation_delta(&self) -> Option<f64> {
        match self.details {
            GestureDetails::Rotate { delta_radians, .. } => Some(delta_radians),
            _ => None,
        }
    }

    /// Cumulative rotation in degrees, if this is a rotate event.
    pub fn cumulative_degrees(&self) -> Option<f64> {
        match self.details {
            GestureDetails::Rotate {
                cumulative_radians, ..
            } => Some(radians_to_degrees(cumulative_radians)),
            _ => None,
        }
    }

    /// Rotation delta in degrees, if this is a rotate event.
    pub fn delta_degrees(&self) -> Option<f64> {
        self.rotation_delta().map(radians_to_degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GestureFlags;
    use std::f64::consts::PI;

    fn rotate_event(cumulative: f64, delta: f64) -> GestureEvent {
        let record = GestureRecord::new(GestureKind::Rotate, GestureFlags::END, (3, 4), 0);
        GestureEvent::new(
            &record,
            GestureDetails::Rotate {
                cumulative_radians: cumulative,
                delta_radians: delta,
            },
        )
    }

    #[test]
    fn test_common_fields_from_record() {
        let event = rotate_event(0.0, 0.0);
        assert_eq!(event.location, (3, 4));
        assert!(!event.begin);
        assert!(event.end);
        assert!(event.handled);
        assert_eq!(event.kind(), GestureKind::Rotate);
    }

    #[test]
    fn test_mark_unhandled() {
        let mut event = rotate_event(0.0, 0.0);
        event.mark_unhandled();
        assert!(!event.handled);
    }

    #[test]
    fn test_degrees_helpers() {
        let event = rotate_event(PI, -PI / 4.0);
        assert!((event.cumulative_degrees().unwrap() - 180.0).abs() < 1e-9);
        assert!((event.delta_degrees().unwrap() + 45.0).abs() < 1e-9);
        assert_eq!(event.pan_offset(), None);
        assert_eq!(event.zoom_ratio(), None);
    }
}
