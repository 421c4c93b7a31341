//! Document-wide pointer scope.
//!
//! Panels attach listeners here for the length of a drag so the gesture
//! keeps tracking after the pointer leaves the thin resize handle.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Receives pointer events dispatched at document scope.
pub trait PointerListener {
    fn on_pointer_move(&self, x: f64);
    fn on_pointer_up(&self, x: f64);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// `w-resize`
    WestResize,
    /// `e-resize`
    EastResize,
}

impl Cursor {
    pub fn css_name(&self) -> &'static str {
        match self {
            Cursor::WestResize => "w-resize",
            Cursor::EastResize => "e-resize",
        }
    }
}

/// Body-level style overrides applied while a drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStyle {
    /// `None` means the default cursor.
    pub cursor: Option<Cursor>,
    pub user_select: bool,
}

impl Default for DocumentStyle {
    fn default() -> Self {
        Self {
            cursor: None,
            user_select: true,
        }
    }
}

#[derive(Default)]
struct DocumentInner {
    next_id: u64,
    listeners: BTreeMap<ListenerId, Rc<dyn PointerListener>>,
    style: DocumentStyle,
}

/// Shared handle to the document scope. Clones refer to the same document.
#[derive(Clone, Default)]
pub struct Document {
    inner: Rc<RefCell<DocumentInner>>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Document")
            .field("listeners", &inner.listeners.len())
            .field("style", &inner.style)
            .finish()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&self, listener: Rc<dyn PointerListener>) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.insert(id, listener);
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.inner.borrow_mut().listeners.remove(&id).is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn style(&self) -> DocumentStyle {
        self.inner.borrow().style
    }

    pub fn set_style(&self, style: DocumentStyle) {
        self.inner.borrow_mut().style = style;
    }

    pub fn dispatch_pointer_move(&self, x: f64) {
        for listener in self.snapshot_listeners() {
            listener.on_pointer_move(x);
        }
    }

    pub fn dispatch_pointer_up(&self, x: f64) {
        for listener in self.snapshot_listeners() {
            listener.on_pointer_up(x);
        }
    }

    // Listeners may detach themselves while being called.
    fn snapshot_listeners(&self) -> Vec<Rc<dyn PointerListener>> {
        self.inner.borrow().listeners.values().cloned().collect()
    }

    /// Attach `listener` and apply the drag style until the guard is dropped.
    pub fn capture_pointer(&self, listener: Rc<dyn PointerListener>, cursor: Cursor) -> PointerCapture {
        let id = self.add_listener(listener);
        let previous = self.style();
        self.set_style(DocumentStyle {
            cursor: Some(cursor),
            user_select: false,
        });
        PointerCapture {
            document: self.clone(),
            id,
            previous,
        }
    }
}

/// Scoped document-level pointer capture.
///
/// Dropping it detaches the listener and restores the style it replaced.
/// This is the only way a capture ends.
pub struct PointerCapture {
    document: Document,
    id: ListenerId,
    previous: DocumentStyle,
}

impl std::fmt::Debug for PointerCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerCapture").field("id", &self.id).finish()
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        self.document.remove_listener(self.id);
        self.document.set_style(self.previous);
    }
}
