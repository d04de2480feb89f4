//! # spark-gestures
//!
//! Native touch gesture notifications as a stream of incremental gesture events.
//!
//! The platform reports a gesture (pan, zoom, rotate, two-finger tap,
//! press-and-tap) as a sequence of begin/update/end notifications, each with a
//! location and a packed 64-bit argument. This crate unpacks those arguments,
//! tracks the last observed value per gesture kind and reports the change
//! since the previous notification: pan offset, zoom ratio, rotation delta.
//!
//! ## Architecture
//!
//! ```text
//! window hook → RawGestureInfo → GestureSession → decode(record, history)
//!             ← verdict        ←                ← GestureEvent → observers
//! ```
//!
//! Window procedure hooking itself lives outside this crate, behind the
//! [`GestureTarget`] and [`GestureInfoHandle`] traits.
//!
//! ## Modules
//!
//! - [`codec`] - Bit field helpers for packed arguments
//! - [`types`] - Gesture kinds, flags and records
//! - [`gesture`] - History, events and the decoder
//! - [`session`] - Per-target listener, observers, lifecycle
//! - [`config`] - Decoder configuration
//! - [`error`] - Error taxonomy

pub mod codec;
pub mod config;
pub mod error;
pub mod gesture;
pub mod session;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use codec::{
    hi_dword, hi_word, lo_dword, lo_word, radians_to_degrees, rotation_angle_from_arg,
    split_words, ROTATION_MAX_SCALE,
};

pub use config::DecoderConfig;

pub use error::GestureError;

pub use gesture::{decode, GestureDecoder, GestureDetails, GestureEvent, GestureHistory};

pub use session::{
    GestureHandler, GestureInfoHandle, GestureSession, GestureTarget, NativeHandle, SessionState,
};
