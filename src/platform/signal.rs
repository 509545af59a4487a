//! Viewport signal source abstraction
//!
//! The engine never touches a real window. Screen size, resize and
//! fullscreen notifications come through [`ViewportSignalSource`], which a
//! host implements on top of its display surface. [`HeadlessSignalSource`]
//! is an in-memory implementation for tests and headless hosts.
//!
//! Listener registration follows RAII: [`ListenerGuard`] removes its
//! listener when dropped, so repeated mount/unmount cycles cannot leak
//! callbacks.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Screen dimensions in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Identifier of a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Callback for resize notifications
pub type ResizeCallback = Rc<dyn Fn(ScreenSize)>;

/// Callback for fullscreen changes
pub type FullscreenCallback = Rc<dyn Fn(bool)>;

/// Source of viewport size and change notifications
///
/// Implementations dispatch callbacks on the single UI thread. A callback
/// may register or remove listeners while being dispatched.
pub trait ViewportSignalSource {
    /// Current viewport size
    fn size(&self) -> ScreenSize;

    /// Whether the host surface is currently fullscreen
    fn is_fullscreen(&self) -> bool;

    /// Registers a resize listener
    fn on_resize(&self, callback: ResizeCallback) -> ListenerId;

    /// Registers a fullscreen-change listener
    fn on_fullscreen_change(&self, callback: FullscreenCallback) -> ListenerId;

    /// Removes a listener registered with either method; unknown ids are ignored
    fn remove_listener(&self, id: ListenerId);
}

/// Removes a listener from its source when dropped
pub struct ListenerGuard {
    source: Rc<dyn ViewportSignalSource>,
    id: ListenerId,
}

impl ListenerGuard {
    /// Registers `callback` for resize notifications on `source`
    pub fn resize(source: &Rc<dyn ViewportSignalSource>, callback: ResizeCallback) -> Self {
        let id = source.on_resize(callback);
        tracing::trace!(?id, "registered resize listener");
        Self {
            source: Rc::clone(source),
            id,
        }
    }

    /// Registers `callback` for fullscreen changes on `source`
    pub fn fullscreen(source: &Rc<dyn ViewportSignalSource>, callback: FullscreenCallback) -> Self {
        let id = source.on_fullscreen_change(callback);
        tracing::trace!(?id, "registered fullscreen listener");
        Self {
            source: Rc::clone(source),
            id,
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        tracing::trace!(id = ?self.id, "removing listener");
        self.source.remove_listener(self.id);
    }
}

/// In-memory signal source driven by explicit calls
#[derive(Default)]
pub struct HeadlessSignalSource {
    size: Cell<ScreenSize>,
    fullscreen: Cell<bool>,
    next_id: Cell<u64>,
    resize_listeners: RefCell<Vec<(ListenerId, ResizeCallback)>>,
    fullscreen_listeners: RefCell<Vec<(ListenerId, FullscreenCallback)>>,
}

impl HeadlessSignalSource {
    /// Creates a source reporting the given initial size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Cell::new(ScreenSize::new(width, height)),
            ..Self::default()
        }
    }

    /// Changes the size and notifies every resize listener
    pub fn resize(&self, width: u32, height: u32) {
        let size = ScreenSize::new(width, height);
        self.size.set(size);

        // Snapshot so callbacks can (de)register listeners while dispatching
        let listeners: Vec<ResizeCallback> = self
            .resize_listeners
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in listeners {
            callback(size);
        }
    }

    /// Changes the fullscreen flag and notifies listeners if it changed
    pub fn set_fullscreen(&self, fullscreen: bool) {
        if self.fullscreen.replace(fullscreen) == fullscreen {
            return;
        }

        let listeners: Vec<FullscreenCallback> = self
            .fullscreen_listeners
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in listeners {
            callback(fullscreen);
        }
    }

    /// Number of currently registered listeners of both kinds
    pub fn listener_count(&self) -> usize {
        self.resize_listeners.borrow().len() + self.fullscreen_listeners.borrow().len()
    }

    fn allocate_id(&self) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        ListenerId(id)
    }
}

impl ViewportSignalSource for HeadlessSignalSource {
    fn size(&self) -> ScreenSize {
        self.size.get()
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen.get()
    }

    fn on_resize(&self, callback: ResizeCallback) -> ListenerId {
        let id = self.allocate_id();
        self.resize_listeners.borrow_mut().push((id, callback));
        id
    }

    fn on_fullscreen_change(&self, callback: FullscreenCallback) -> ListenerId {
        let id = self.allocate_id();
        self.fullscreen_listeners.borrow_mut().push((id, callback));
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.resize_listeners.borrow_mut().retain(|(lid, _)| *lid != id);
        self.fullscreen_listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_updates_size_and_notifies() {
        let source = HeadlessSignalSource::new(1920, 1080);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        source.on_resize(Rc::new(move |size: ScreenSize| sink.borrow_mut().push(size)));

        source.resize(800, 600);
        source.resize(375, 667);

        assert_eq!(source.size(), ScreenSize::new(375, 667));
        assert_eq!(
            *seen.borrow(),
            vec![ScreenSize::new(800, 600), ScreenSize::new(375, 667)]
        );
    }

    #[test]
    fn fullscreen_notifies_only_on_change() {
        let source = HeadlessSignalSource::new(1024, 768);
        let count = Rc::new(Cell::new(0));
        let sink = Rc::clone(&count);
        source.on_fullscreen_change(Rc::new(move |_: bool| sink.set(sink.get() + 1)));

        source.set_fullscreen(true);
        source.set_fullscreen(true);
        source.set_fullscreen(false);

        assert_eq!(count.get(), 2);
        assert!(!source.is_fullscreen());
    }

    #[test]
    fn guard_removes_listener_on_drop() {
        let concrete = Rc::new(HeadlessSignalSource::new(1024, 768));
        let source: Rc<dyn ViewportSignalSource> = concrete.clone();

        for _ in 0..5 {
            let _resize = ListenerGuard::resize(&source, Rc::new(|_: ScreenSize| {}));
            let _fullscreen = ListenerGuard::fullscreen(&source, Rc::new(|_: bool| {}));
            assert_eq!(concrete.listener_count(), 2);
        }

        assert_eq!(concrete.listener_count(), 0);
    }

    #[test]
    fn listener_may_remove_itself_while_dispatching() {
        let concrete = Rc::new(HeadlessSignalSource::new(1024, 768));
        let id_slot: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));

        let weak_source = Rc::downgrade(&concrete);
        let slot = Rc::clone(&id_slot);
        let id = concrete.on_resize(Rc::new(move |_: ScreenSize| {
            if let (Some(source), Some(id)) = (weak_source.upgrade(), slot.get()) {
                source.remove_listener(id);
            }
        }));
        id_slot.set(Some(id));

        concrete.resize(10, 10);
        assert_eq!(concrete.listener_count(), 0);
    }
}
