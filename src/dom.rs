//! Window-scoped event listeners and shared layout handles.
//!
//! Widgets register global listeners here for the lifetime of their mount, the
//! host dispatches window-level events into it once per frame.

use std::cell::Cell;
use std::rc::Rc;
use raylib::prelude::*;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DocumentEvent {
    Click,  // Pointer released anywhere in the window
    Resize, // Window size changed
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct ListenerId(u64);

struct Listener {
    id: ListenerId,
    event: DocumentEvent,
    callback: Box<dyn FnMut()>,
}

#[derive(Default)]
pub struct Document {
    listeners: Vec<Listener>,
    next_id: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, event: DocumentEvent, callback: impl FnMut() + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener { id, event, callback: Box::new(callback) });
        id
    }

    /// Returns `false` when the listener was already gone.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Invokes every listener registered for `event`, in registration order.
    pub fn dispatch(&mut self, event: DocumentEvent) -> usize {
        let mut invoked = 0;
        for listener in self.listeners.iter_mut().filter(|l| l.event == event) {
            (listener.callback)();
            invoked += 1;
        }
        invoked
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Shared handle to a laid-out container rectangle.
///
/// The host writes the rectangle after layout; an empty handle means the
/// container has not been laid out (or was torn down).
#[derive(Clone, Default)]
pub struct ContainerRef(Rc<Cell<Option<Rectangle>>>);

impl ContainerRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, rect: Option<Rectangle>) {
        self.0.set(rect);
    }

    pub fn get(&self) -> Option<Rectangle> {
        self.0.get()
    }

    pub fn is_attached(&self) -> bool {
        self.0.get().is_some()
    }
}

/// Optional platform features, probed once by the host.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    pub intersection_observer: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self { intersection_observer: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_only_reaches_matching_listeners() {
        let clicks = Rc::new(Cell::new(0));
        let resizes = Rc::new(Cell::new(0));
        let mut document = Document::new();

        let c = clicks.clone();
        document.add_listener(DocumentEvent::Click, move || c.set(c.get() + 1));
        let r = resizes.clone();
        document.add_listener(DocumentEvent::Resize, move || r.set(r.get() + 1));

        assert_eq!(document.dispatch(DocumentEvent::Click), 1);
        assert_eq!(document.dispatch(DocumentEvent::Click), 1);
        assert_eq!(clicks.get(), 2);
        assert_eq!(resizes.get(), 0);
    }

    #[test]
    fn removed_listener_is_never_called() {
        let clicks = Rc::new(Cell::new(0));
        let mut document = Document::new();
        let c = clicks.clone();
        let id = document.add_listener(DocumentEvent::Click, move || c.set(c.get() + 1));

        assert!(document.remove_listener(id));
        assert!(!document.remove_listener(id));
        assert_eq!(document.dispatch(DocumentEvent::Click), 0);
        assert_eq!(clicks.get(), 0);
        assert_eq!(document.listener_count(), 0);
    }

    #[test]
    fn container_ref_is_shared() {
        let container = ContainerRef::new();
        let alias = container.clone();
        assert!(!alias.is_attached());
        container.set(Some(Rectangle::new(10.0, 20.0, 300.0, 200.0)));
        assert_eq!(alias.get().map(|r| r.width), Some(300.0));
    }
}
