//! Session Module - Per-target gesture listener
//!
//! A [`GestureSession`] owns the gesture history of one target window, feeds
//! every raw notification through the decoder and dispatches the result to
//! registered observers. The boolean it returns is the consumed verdict: the
//! platform glue closes the native gesture handle when it is `true` and
//! default-processes the message when it is `false`.
//!
//! # API
//!
//! - `attach(target)` - Start intercepting, deferred until the target has a handle
//! - `notify_attach_ready(target)` - Complete a deferred attach
//! - `notify_detach(target)` - Release the hook before the handle dies
//! - `on(kind, fn)` - Subscribe to one gesture kind
//! - `on_kinds(kinds, fn)` - Subscribe to several kinds
//! - `deliver(...)` - Feed one raw notification, get the verdict
//! - `deliver_handle(handle)` - Read, interpret and close a native handle once
//! - `last_event` - Last dispatched event (reactive)
//!
//! # Threading
//!
//! A session processes one record at a time and performs no locking. Callers
//! must deliver every notification for a session from a single thread,
//! normally the thread that owns the target's message loop.
//!
//! # Example
//!
//! ```ignore
//! use spark_gestures::{GestureKind, GestureSession};
//!
//! let mut session = GestureSession::new();
//! session.attach(&mut window);
//!
//! let cleanup = session.on(GestureKind::Pan, |event| {
//!     if let Some((dx, dy)) = event.pan_offset() {
//!         scroll_by(dx, dy);
//!     }
//! });
//!
//! // From the window procedure:
//! let consumed = session.deliver(id, flags, (x, y), arguments, extra);
//! ```

mod lifecycle;
mod registry;

pub use lifecycle::{GestureTarget, NativeHandle, SessionState};
pub use registry::GestureHandler;

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::config::DecoderConfig;
use crate::error::GestureError;
use crate::gesture::{GestureDecoder, GestureEvent, GestureHistory};
use crate::types::{GestureKind, GestureRecord, RawGestureInfo};

use registry::HandlerRegistry;

// =============================================================================
// NATIVE HANDLE
// =============================================================================

/// A native gesture-info handle, as carried by a gesture window message.
///
/// Taken by value so a handle is interpreted at most once.
pub trait GestureInfoHandle {
    /// Read the gesture information. `None` if the platform call failed.
    fn gesture_info(&self) -> Option<RawGestureInfo>;

    /// Release the native resource.
    fn close(self);
}

// =============================================================================
// SESSION
// =============================================================================

/// Gesture listener for a single target.
pub struct GestureSession {
    decoder: GestureDecoder,
    history: GestureHistory,
    state: SessionState,
    registry: Rc<RefCell<HandlerRegistry>>,
    last_event: Signal<Option<GestureEvent>>,
}

impl Default for GestureSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureSession {
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            decoder: GestureDecoder::new(config),
            history: GestureHistory::new(),
            state: SessionState::Detached,
            registry: Rc::new(RefCell::new(HandlerRegistry::new())),
            last_event: signal(None),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &DecoderConfig {
        self.decoder.config()
    }

    pub fn is_attached(&self) -> bool {
        self.state.is_attached()
    }

    /// Current gesture history.
    pub fn history(&self) -> GestureHistory {
        self.history
    }

    /// Last event dispatched by this session.
    pub fn last_event(&self) -> Option<GestureEvent> {
        self.last_event.get()
    }

    /// Reactive handle to the last dispatched event.
    pub fn last_event_signal(&self) -> Signal<Option<GestureEvent>> {
        self.last_event.clone()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Attach to `target`.
    ///
    /// If the target has no native handle yet the session waits in
    /// [`SessionState::Pending`] until [`notify_attach_ready`](Self::notify_attach_ready).
    pub fn attach<T: GestureTarget + ?Sized>(&mut self, target: &mut T) {
        match self.state {
            SessionState::Detached => match target.native_handle() {
                Some(handle) => self.install(target, handle),
                None => {
                    log::debug!("{}", GestureError::AttachBeforeReady);
                    self.state = SessionState::Pending;
                }
            },
            SessionState::Pending | SessionState::Attached(_) => {
                log::debug!("attach ignored, session is {:?}", self.state);
            }
            SessionState::Released => {
                log::warn!("attach on a released session ignored, create a new session");
            }
        }
    }

    /// The target created its native handle. Completes a pending attach.
    pub fn notify_attach_ready<T: GestureTarget + ?Sized>(&mut self, target: &mut T) {
        if self.state != SessionState::Pending {
            log::debug!("attach-ready ignored, session is {:?}", self.state);
            return;
        }
        match target.native_handle() {
            Some(handle) => self.install(target, handle),
            None => log::warn!("attach-ready signalled but target still has no handle"),
        }
    }

    /// The target's native handle is being destroyed. Releases the hook.
    ///
    /// `target` must be the window this session attached to. A target that
    /// reports a different live handle is left alone.
    pub fn notify_detach<T: GestureTarget + ?Sized>(&mut self, target: &mut T) {
        match self.state {
            SessionState::Attached(handle) => {
                if let Some(other) = target.native_handle().filter(|h| *h != handle) {
                    log::warn!("detach from {other:?} ignored, session is attached to {handle:?}");
                    return;
                }
                target.release_hook(handle);
                self.state = SessionState::Released;
                self.history = GestureHistory::new();
                self.last_event.set(None);
                log::debug!("gesture hook released for {handle:?}");
            }
            SessionState::Detached | SessionState::Pending => {
                log::debug!("{}", GestureError::DetachWithoutAttach);
            }
            SessionState::Released => {}
        }
    }

    fn install<T: GestureTarget + ?Sized>(&mut self, target: &mut T, handle: NativeHandle) {
        target.install_hook(handle);
        self.state = SessionState::Attached(handle);
        log::debug!("gesture hook installed for {handle:?}");
    }

    // -------------------------------------------------------------------------
    // Observers
    // -------------------------------------------------------------------------

    /// Subscribe to one gesture kind. Returns cleanup function.
    ///
    /// Observers run synchronously during delivery, in registration order.
    pub fn on<F>(&self, kind: GestureKind, handler: F) -> impl FnOnce() + use<F>
    where
        F: Fn(&mut GestureEvent) + 'static,
    {
        registry::subscribe(&self.registry, kind, Rc::new(handler))
    }

    /// Subscribe one handler to several kinds. Returns cleanup function.
    pub fn on_kinds<F>(&self, kinds: &[GestureKind], handler: F) -> impl FnOnce() + use<F>
    where
        F: Fn(&mut GestureEvent) + 'static,
    {
        registry::subscribe_many(&self.registry, kinds, Rc::new(handler))
    }

    /// Number of observers registered for `kind`.
    pub fn handler_count(&self, kind: GestureKind) -> usize {
        self.registry.borrow().count(kind)
    }

    /// Remove all observers.
    pub fn clear_handlers(&self) {
        self.registry.borrow_mut().clear();
    }

    // -------------------------------------------------------------------------
    // Delivery
    // -------------------------------------------------------------------------

    /// Deliver one raw notification. Returns the consumed verdict.
    pub fn deliver(
        &mut self,
        raw_kind_id: i32,
        raw_flags: i32,
        location: (i32, i32),
        argument: u64,
        extra_size: u32,
    ) -> bool {
        self.deliver_info(RawGestureInfo::new(
            raw_kind_id,
            raw_flags,
            location,
            argument,
            extra_size,
        ))
    }

    /// Deliver gesture information read from a native handle.
    pub fn deliver_info(&mut self, info: RawGestureInfo) -> bool {
        match GestureRecord::try_from(info) {
            Ok(record) => self.deliver_record(&record),
            Err(err) => {
                log_rejected(&err);
                false
            }
        }
    }

    /// Read `handle`, interpret it once and close it if consumed.
    ///
    /// An unconsumed handle is dropped unclosed; the platform's default
    /// processing owns it from then on.
    pub fn deliver_handle<H: GestureInfoHandle>(&mut self, handle: H) -> bool {
        let Some(info) = handle.gesture_info() else {
            log::debug!("gesture info unavailable, leaving message to the platform");
            return false;
        };
        let consumed = self.deliver_info(info);
        if consumed {
            handle.close();
        }
        consumed
    }

    /// Decode `record`, update history and dispatch to observers.
    pub fn deliver_record(&mut self, record: &GestureRecord) -> bool {
        let Some(handle) = self.state.handle() else {
            log::warn!(
                "{:?} delivered while session is {:?}, ignoring",
                record.kind,
                self.state
            );
            return false;
        };

        let (mut event, history) = match self.decoder.decode(record, self.history) {
            Ok(decoded) => decoded,
            Err(err) => {
                log_rejected(&err);
                return false;
            }
        };
        self.history = history;
        log::trace!("{:?} decoded for {handle:?}", event.kind());

        let handlers = self.registry.borrow().snapshot(event.kind());
        for handler in &handlers {
            handler(&mut event);
        }

        self.last_event.set(Some(event));
        event.handled
    }
}

/// Markers and unknown ids are routine traffic. Extra-argument payloads and
/// anything else are unexpected.
fn log_rejected(err: &GestureError) {
    match err {
        GestureError::UnsupportedExtraArguments { .. } => {
            log::warn!("{err}, leaving message to the platform");
        }
        err if err.is_unrecognized() => {
            log::debug!("{err}, leaving message to the platform");
        }
        err => log::warn!("{err}, leaving message to the platform"),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GestureFlags;
    use std::cell::Cell;

    const PAN: i32 = GestureKind::Pan as i32;
    const ZOOM: i32 = GestureKind::Zoom as i32;
    const BEGIN: i32 = GestureFlags::BEGIN.bits() as i32;
    const END: i32 = GestureFlags::END.bits() as i32;

    #[derive(Default)]
    struct FakeWindow {
        handle: Option<NativeHandle>,
        installed: Vec<NativeHandle>,
        released: Vec<NativeHandle>,
    }

    impl FakeWindow {
        fn created(raw: usize) -> Self {
            Self {
                handle: Some(NativeHandle(raw)),
                ..Self::default()
            }
        }
    }

    impl GestureTarget for FakeWindow {
        fn native_handle(&self) -> Option<NativeHandle> {
            self.handle
        }

        fn install_hook(&mut self, handle: NativeHandle) {
            self.installed.push(handle);
        }

        fn release_hook(&mut self, handle: NativeHandle) {
            self.released.push(handle);
        }
    }

    struct FakeHandle {
        info: Option<RawGestureInfo>,
        closed: Rc<Cell<u32>>,
    }

    impl GestureInfoHandle for FakeHandle {
        fn gesture_info(&self) -> Option<RawGestureInfo> {
            self.info
        }

        fn close(self) {
            self.closed.set(self.closed.get() + 1);
        }
    }

    fn attached() -> (GestureSession, FakeWindow) {
        let mut window = FakeWindow::created(0x10);
        let mut session = GestureSession::new();
        session.attach(&mut window);
        (session, window)
    }

    #[test]
    fn test_attach_with_live_handle() {
        let (session, window) = attached();
        assert_eq!(session.state(), SessionState::Attached(NativeHandle(0x10)));
        assert_eq!(window.installed, vec![NativeHandle(0x10)]);
    }

    #[test]
    fn test_attach_deferred_until_ready() {
        let mut window = FakeWindow::default();
        let mut session = GestureSession::new();

        session.attach(&mut window);
        assert_eq!(session.state(), SessionState::Pending);
        assert!(window.installed.is_empty());
        assert!(!session.deliver(PAN, BEGIN, (0, 0), 0, 0));

        window.handle = Some(NativeHandle(7));
        session.notify_attach_ready(&mut window);
        assert_eq!(session.state(), SessionState::Attached(NativeHandle(7)));
        assert_eq!(window.installed, vec![NativeHandle(7)]);
    }

    #[test]
    fn test_attach_ready_without_pending_is_ignored() {
        let (mut session, mut window) = attached();
        session.notify_attach_ready(&mut window);
        assert_eq!(window.installed.len(), 1);
    }

    #[test]
    fn test_detach_releases_hook_and_is_terminal() {
        let (mut session, mut window) = attached();
        session.deliver(PAN, BEGIN, (5, 5), 0, 0);

        session.notify_detach(&mut window);
        assert_eq!(session.state(), SessionState::Released);
        assert_eq!(window.released, vec![NativeHandle(0x10)]);
        assert_eq!(session.history(), GestureHistory::new());
        assert!(session.last_event().is_none());

        session.attach(&mut window);
        assert_eq!(session.state(), SessionState::Released);
        assert!(!session.deliver(PAN, BEGIN, (0, 0), 0, 0));

        session.notify_detach(&mut window);
        assert_eq!(window.released.len(), 1);
    }

    #[test]
    fn test_detach_from_other_window_keeps_hook() {
        let (mut session, mut window) = attached();
        let mut other = FakeWindow::created(0x20);

        session.notify_detach(&mut other);
        assert_eq!(session.state(), SessionState::Attached(NativeHandle(0x10)));
        assert!(other.released.is_empty());

        // A window whose handle is already gone is still released.
        window.handle = None;
        session.notify_detach(&mut window);
        assert_eq!(session.state(), SessionState::Released);
        assert_eq!(window.released, vec![NativeHandle(0x10)]);
    }

    #[test]
    fn test_config_passed_to_decoder() {
        let config = DecoderConfig::new().with_rotation_max_scale(100);
        let session = GestureSession::with_config(config);
        assert_eq!(session.config().rotation_max_scale, 100);
        assert_eq!(GestureSession::new().config().rotation_max_scale, 65535);
    }

    #[test]
    fn test_detach_without_attach_is_noop() {
        let mut window = FakeWindow::default();
        let mut session = GestureSession::new();
        session.notify_detach(&mut window);
        assert_eq!(session.state(), SessionState::Detached);
        assert!(window.released.is_empty());
    }

    #[test]
    fn test_verdict_defaults_to_handled() {
        let (mut session, _window) = attached();
        assert!(session.deliver(PAN, BEGIN, (1, 1), 0, 0));
        assert_eq!(session.history().last_pan_point, (1, 1));
    }

    #[test]
    fn test_observer_can_decline() {
        let (mut session, _window) = attached();
        let _cleanup = session.on(GestureKind::Zoom, |event| event.mark_unhandled());
        assert!(!session.deliver(ZOOM, BEGIN, (0, 0), 100, 0));
        assert!(session.deliver(PAN, BEGIN, (0, 0), 0, 0));
    }

    #[test]
    fn test_observers_run_in_order() {
        let (mut session, _window) = attached();
        let order = Rc::new(RefCell::new(Vec::new()));

        let o1 = order.clone();
        let _c1 = session.on(GestureKind::Pan, move |_| o1.borrow_mut().push("first"));
        let o2 = order.clone();
        let _c2 = session.on(GestureKind::Pan, move |event| {
            o2.borrow_mut().push("second");
            event.mark_unhandled();
        });
        let o3 = order.clone();
        let _c3 = session.on(GestureKind::Pan, move |_| o3.borrow_mut().push("third"));

        assert!(!session.deliver(PAN, BEGIN, (0, 0), 0, 0));
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_cleanup_unsubscribes() {
        let (mut session, _window) = attached();
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        let cleanup = session.on_kinds(&[GestureKind::Pan, GestureKind::Zoom], move |_| {
            count_clone.set(count_clone.get() + 1);
        });
        session.deliver(PAN, BEGIN, (0, 0), 0, 0);
        session.deliver(ZOOM, BEGIN, (0, 0), 10, 0);
        assert_eq!(count.get(), 2);

        cleanup();
        session.deliver(PAN, END, (0, 0), 0, 0);
        assert_eq!(count.get(), 2);
        assert_eq!(session.handler_count(GestureKind::Pan), 0);
    }

    #[test]
    fn test_unrecognized_kind_not_consumed() {
        let (mut session, _window) = attached();
        let called = Rc::new(Cell::new(false));
        let called_clone = called.clone();
        let _cleanup = session.on_kinds(&GestureKind::DATA_KINDS, move |_| called_clone.set(true));

        session.deliver(PAN, BEGIN, (3, 3), 0, 0);
        let before = session.history();

        assert!(!session.deliver(99, BEGIN, (50, 50), 0, 0));
        assert!(!session.deliver(GestureKind::Begin as i32, 0, (50, 50), 0, 0));
        assert!(!session.deliver(PAN, 0, (50, 50), 0, 24));
        assert_eq!(session.history(), before);

        called.set(false);
        assert!(!session.deliver(99, 0, (0, 0), 0, 0));
        assert!(!called.get());
    }

    #[test]
    fn test_last_event_tracks_dispatch() {
        let (mut session, _window) = attached();
        assert!(session.last_event().is_none());
        session.deliver(ZOOM, BEGIN, (4, 4), 120, 0);
        let last = session.last_event().unwrap();
        assert_eq!(last.kind(), GestureKind::Zoom);
        assert_eq!(last.location, (4, 4));
        assert_eq!(session.last_event_signal().get(), Some(last));
    }

    #[test]
    fn test_handle_closed_only_when_consumed() {
        let (mut session, _window) = attached();
        let closed = Rc::new(Cell::new(0));

        let consumed = session.deliver_handle(FakeHandle {
            info: Some(RawGestureInfo::new(PAN, BEGIN, (0, 0), 0, 0)),
            closed: closed.clone(),
        });
        assert!(consumed);
        assert_eq!(closed.get(), 1);

        let _cleanup = session.on(GestureKind::Pan, |event| event.mark_unhandled());
        let consumed = session.deliver_handle(FakeHandle {
            info: Some(RawGestureInfo::new(PAN, 0, (1, 0), 0, 0)),
            closed: closed.clone(),
        });
        assert!(!consumed);
        assert_eq!(closed.get(), 1);

        let consumed = session.deliver_handle(FakeHandle {
            info: None,
            closed: closed.clone(),
        });
        assert!(!consumed);
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn test_sessions_are_independent() {
        let (mut a, _wa) = attached();
        let (mut b, _wb) = attached();

        a.deliver(PAN, BEGIN, (100, 100), 0, 0);
        b.deliver(PAN, BEGIN, (0, 0), 0, 0);
        a.deliver(PAN, 0, (110, 100), 0, 0);

        assert_eq!(a.last_event().unwrap().pan_offset(), Some((10, 0)));
        assert_eq!(b.history().last_pan_point, (0, 0));
    }
}
