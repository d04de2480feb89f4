//! Decoder - Turns one gesture record into one gesture event
//!
//! Decoding is a pure function of `(record, history)`. The caller owns the
//! history and stores the returned copy for the next record.
//!
//! Per kind:
//!
//! - **Pan** - offset from the last pan point, inertia vector from the high
//!   dword of the argument
//! - **Zoom** - ratio of the current extent to the last extent
//! - **Rotate** - delta between cumulative angles
//! - **TwoFingerTap** / **PressAndTap** - argument surfaced as-is
//!
//! A `BEGIN` record seeds the kind's history with its own value so the first
//! increment of every gesture is neutral.

use crate::codec::{hi_dword, lo_dword, rotation_angle_from_arg, split_words};
use crate::config::DecoderConfig;
use crate::error::{GestureError, Result};
use crate::types::{GestureKind, GestureRecord};

use super::event::{GestureDetails, GestureEvent};
use super::history::GestureHistory;

/// Decode with the default configuration.
pub fn decode(
    record: &GestureRecord,
    history: GestureHistory,
) -> Result<(GestureEvent, GestureHistory)> {
    GestureDecoder::default().decode(record, history)
}

/// Stateless decoder holding only its configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureDecoder {
    config: DecoderConfig,
}

impl GestureDecoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode `record` against `history`.
    ///
    /// Returns the event and the history to use for the next record. On error
    /// the caller keeps its previous history.
    pub fn decode(
        &self,
        record: &GestureRecord,
        mut history: GestureHistory,
    ) -> Result<(GestureEvent, GestureHistory)> {
        if record.extra_argument_size != 0 {
            return Err(GestureError::UnsupportedExtraArguments {
                kind: record.kind,
                size: record.extra_argument_size,
            });
        }

        let details = match record.kind {
            GestureKind::Pan => decode_pan(record, &mut history),
            GestureKind::Zoom => decode_zoom(record, &mut history),
            GestureKind::Rotate => self.decode_rotate(record, &mut history),
            GestureKind::TwoFingerTap => GestureDetails::TwoFingerTap {
                distance: record.argument as i64,
            },
            GestureKind::PressAndTap => GestureDetails::PressAndTap {
                distance: split_words(lo_dword(record.argument as i64)),
            },
            GestureKind::Begin | GestureKind::End => {
                return Err(GestureError::MarkerKind(record.kind));
            }
        };

        Ok((GestureEvent::new(record, details), history))
    }

    fn decode_rotate(
        &self,
        record: &GestureRecord,
        history: &mut GestureHistory,
    ) -> GestureDetails {
        let cumulative = rotation_angle_from_arg(
            lo_dword(record.argument as i64),
            self.config.rotation_max_scale,
        );
        if record.is_begin() {
            history.last_rotation_radians = cumulative;
        }
        let delta = cumulative - history.last_rotation_radians;

        log::trace!(
            "rotate total={cumulative:.4} delta={delta:.4} last={:.4}",
            history.last_rotation_radians
        );

        if record.is_end() {
            history.reset(GestureKind::Rotate);
        } else {
            history.last_rotation_radians = cumulative;
        }

        GestureDetails::Rotate {
            cumulative_radians: cumulative,
            delta_radians: delta,
        }
    }
}

// =============================================================================
// STATEFUL KINDS
// =============================================================================

fn decode_pan(record: &GestureRecord, history: &mut GestureHistory) -> GestureDetails {
    let inertia_vector = split_words(hi_dword(record.argument as i64));
    if record.is_begin() {
        history.last_pan_point = record.location;
    }
    let (x, y) = record.location;
    let (last_x, last_y) = history.last_pan_point;
    let pan_offset = (x.wrapping_sub(last_x), y.wrapping_sub(last_y));
    history.last_pan_point = record.location;

    log::trace!("pan at {:?} offset={pan_offset:?}", record.location);

    GestureDetails::Pan {
        inertia_vector,
        pan_offset,
        inertia: record.is_inertia(),
    }
}

fn decode_zoom(record: &GestureRecord, history: &mut GestureHistory) -> GestureDetails {
    let extent = record.argument as i64;
    if record.is_begin() {
        history.reset(GestureKind::Zoom);
    }
    if extent <= 0 {
        log::warn!("{}", GestureError::DegenerateZoomExtent { extent });
        return GestureDetails::Zoom { extent, ratio: 1.0 };
    }

    if record.is_begin() {
        history.last_zoom_extent = extent;
    }
    let last = history.last_zoom_extent;
    // No prior reading in this gesture.
    let ratio = if last > 0 {
        extent as f64 / last as f64
    } else {
        1.0
    };
    history.last_zoom_extent = extent;

    log::trace!("zoom extent={extent} ratio={ratio:.4}");

    GestureDetails::Zoom { extent, ratio }
}

// =============================================================================
// TESTS
// =============================================================================
