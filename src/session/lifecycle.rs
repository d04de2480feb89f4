//! Attachment lifecycle between a session and its target window.
//!
//! ```text
//! Detached ──attach──▶ Attached ──notify_detach──▶ Released
//!     │                   ▲
//!     └─attach (no handle)┘ via Pending + notify_attach_ready
//! ```
//!
//! `Released` is terminal. A new target needs a new session.

/// Opaque native window handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle(pub usize);

/// The window whose gesture messages a session intercepts.
///
/// Implemented by the platform glue that owns the window procedure.
pub trait GestureTarget {
    /// The native handle, or `None` if the window does not exist yet.
    fn native_handle(&self) -> Option<NativeHandle>;

    /// Start routing the window's gesture messages to the session.
    fn install_hook(&mut self, handle: NativeHandle);

    /// Stop routing messages. Called before `handle` becomes invalid.
    fn release_hook(&mut self, handle: NativeHandle);
}

/// Where a session is in its attachment lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Detached,
    /// Attach was requested before the target had a handle.
    Pending,
    Attached(NativeHandle),
    /// Detached after a successful attach. Terminal.
    Released,
}

impl SessionState {
    pub fn is_attached(&self) -> bool {
        matches!(self, Self::Attached(_))
    }

    pub fn handle(&self) -> Option<NativeHandle> {
        match self {
            Self::Attached(handle) => Some(*handle),
            _ => None,
        }
    }
}
