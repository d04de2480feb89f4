//! Error taxonomy for gesture decoding and session lifecycle.
//!
//! Only the decode errors ever leave a function as `Err`. The remaining
//! variants describe conditions the session recovers from locally; they are
//! formatted into log records so every anomaly reads the same way.

use thiserror::Error;

use crate::types::GestureKind;

/// Errors and recovered anomalies of the gesture pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GestureError {
    /// The raw id is outside the known set.
    #[error("unrecognized gesture kind id {0}")]
    UnrecognizedGestureKind(i32),

    /// Begin/End markers delimit a gesture sequence and carry no event data.
    #[error("gesture marker {0:?} carries no event data")]
    MarkerKind(GestureKind),

    /// The record points at an out-of-band payload this decoder does not model.
    #[error("gesture {kind:?} carries {size} bytes of extra arguments")]
    UnsupportedExtraArguments { kind: GestureKind, size: u32 },

    /// Zoom extent of zero or less; the ratio is frozen at 1.0.
    #[error("degenerate zoom extent {extent}, ratio frozen at 1.0")]
    DegenerateZoomExtent { extent: i64 },

    /// Attach requested before the target has a native handle.
    #[error("target has no native handle yet, attachment deferred")]
    AttachBeforeReady,

    /// Detach requested on a session that never attached.
    #[error("detach requested on a session that was never attached")]
    DetachWithoutAttach,
}

impl GestureError {
    /// Whether this error means the record could not be interpreted at all.
    pub fn is_unrecognized(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedGestureKind(_)
                | Self::MarkerKind(_)
                | Self::UnsupportedExtraArguments { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GestureError>;
