//! Gesture Module - Decode-and-diff core
//!
//! - **History** - Last observed pan point, rotation and zoom extent
//! - **Event** - Decoded gesture events and their per-kind payloads
//! - **Decoder** - `(record, history) -> (event, history)`

mod decoder;
mod event;
mod history;

pub use decoder::{decode, GestureDecoder};
pub use event::{GestureDetails, GestureEvent};
pub use history::GestureHistory;
