//! Observer registry, one ordered handler list per gesture kind.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::gesture::GestureEvent;
use crate::types::GestureKind;

/// Observer for gesture events. Clear `handled` to request default handling.
pub type GestureHandler = Rc<dyn Fn(&mut GestureEvent)>;

pub(crate) struct HandlerRegistry {
    handlers: HashMap<GestureKind, Vec<(usize, GestureHandler)>>,
    next_id: usize,
}

impl HandlerRegistry {
    pub(crate) fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn insert(&mut self, kind: GestureKind, handler: GestureHandler) -> usize {
        let id = self.next_id();
        self.handlers.entry(kind).or_default().push((id, handler));
        id
    }

    fn remove(&mut self, kind: GestureKind, id: usize) {
        if let Some(handlers) = self.handlers.get_mut(&kind) {
            handlers.retain(|(handler_id, _)| *handler_id != id);
            if handlers.is_empty() {
                self.handlers.remove(&kind);
            }
        }
    }

    pub(crate) fn count(&self, kind: GestureKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    pub(crate) fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Handlers for `kind` in registration order.
    ///
    /// Returned as owned clones so handlers may register or unregister
    /// observers while the event is being dispatched.
    pub(crate) fn snapshot(&self, kind: GestureKind) -> Vec<GestureHandler> {
        self.handlers
            .get(&kind)
            .map(|handlers| handlers.iter().map(|(_, h)| Rc::clone(h)).collect())
            .unwrap_or_default()
    }
}

/// Register `handler` for `kind`. Returns the cleanup function.
pub(crate) fn subscribe(
    registry: &Rc<RefCell<HandlerRegistry>>,
    kind: GestureKind,
    handler: GestureHandler,
) -> impl FnOnce() + use<> {
    let id = registry.borrow_mut().insert(kind, handler);
    let weak: Weak<RefCell<HandlerRegistry>> = Rc::downgrade(registry);

    move || {
        if let Some(registry) = weak.upgrade() {
            registry.borrow_mut().remove(kind, id);
        }
    }
}

/// Register one handler for several kinds. Returns the cleanup function.
pub(crate) fn subscribe_many(
    registry: &Rc<RefCell<HandlerRegistry>>,
    kinds: &[GestureKind],
    handler: GestureHandler,
) -> impl FnOnce() + use<> {
    let ids: Vec<(GestureKind, usize)> = {
        let mut reg = registry.borrow_mut();
        kinds
            .iter()
            .map(|&kind| (kind, reg.insert(kind, Rc::clone(&handler))))
            .collect()
    };
    let weak = Rc::downgrade(registry);

    move || {
        if let Some(registry) = weak.upgrade() {
            let mut reg = registry.borrow_mut();
            for (kind, id) in &ids {
                reg.remove(*kind, *id);
            }
        }
    }
}
