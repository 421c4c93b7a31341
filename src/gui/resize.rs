use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::core::store::WidthBounds;
use crate::gui::document::{Cursor, Document, PointerCapture, PointerListener};

/// Which side of the window the panel sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDirection {
    /// Handle on the right edge: dragging right widens the panel.
    Left,
    /// Handle on the left edge: dragging right narrows the panel.
    Right,
}

impl ResizeDirection {
    fn cursor(&self) -> Cursor {
        match self {
            ResizeDirection::Left => Cursor::WestResize,
            ResizeDirection::Right => Cursor::EastResize,
        }
    }

    fn width_for(&self, start_width: f64, delta: f64) -> f64 {
        match self {
            ResizeDirection::Left => start_width + delta,
            ResizeDirection::Right => start_width - delta,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOptions {
    pub direction: ResizeDirection,
    pub initial_width: f64,
    pub bounds: WidthBounds,
}

impl ResizeOptions {
    pub const DEFAULT_BOUNDS: WidthBounds = WidthBounds::new(200.0, 500.0);

    pub fn new(direction: ResizeDirection, initial_width: f64) -> Self {
        Self {
            direction,
            initial_width,
            bounds: Self::DEFAULT_BOUNDS,
        }
    }

    pub fn with_bounds(mut self, bounds: WidthBounds) -> Self {
        self.bounds = bounds;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizePhase {
    Idle,
    Resizing { start_x: f64, start_width: f64 },
}

#[derive(Debug)]
struct PanelState {
    options: ResizeOptions,
    width: f64,
    phase: ResizePhase,
}

struct Engine {
    state: RefCell<PanelState>,
    capture: RefCell<Option<PointerCapture>>,
    on_resize: Box<dyn Fn(f64)>,
}

impl Engine {
    fn pointer_move(&self, x: f64) {
        let width = {
            let mut state = self.state.borrow_mut();
            let ResizePhase::Resizing {
                start_x,
                start_width,
            } = state.phase
            else {
                return;
            };
            let options = state.options;
            let width = options
                .bounds
                .clamp(options.direction.width_for(start_width, x - start_x));
            state.width = width;
            width
        };
        (self.on_resize)(width);
    }

    fn end_gesture(&self) {
        self.state.borrow_mut().phase = ResizePhase::Idle;
        let capture = self.capture.borrow_mut().take();
        if capture.is_some() {
            tracing::trace!("resize gesture ended");
        }
        drop(capture);
    }
}

/// Forwards document pointer events to the engine that attached it.
struct GestureListener {
    engine: Weak<Engine>,
}

impl PointerListener for GestureListener {
    fn on_pointer_move(&self, x: f64) {
        if let Some(engine) = self.engine.upgrade() {
            engine.pointer_move(x);
        }
    }

    fn on_pointer_up(&self, _x: f64) {
        if let Some(engine) = self.engine.upgrade() {
            engine.end_gesture();
        }
    }
}

/// Drag controller for one resizable panel.
///
/// A pointer-down on the handle captures pointer events at document scope;
/// each move reports the clamped width through `on_resize` and pointer-up
/// releases the capture. Dropping the engine releases it too.
pub struct ResizeEngine {
    engine: Rc<Engine>,
    document: Document,
}

impl std::fmt::Debug for ResizeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeEngine")
            .field("state", &*self.engine.state.borrow())
            .finish()
    }
}

impl ResizeEngine {
    pub fn new<F>(document: &Document, options: ResizeOptions, on_resize: F) -> Self
    where
        F: Fn(f64) + 'static,
    {
        let engine = Engine {
            state: RefCell::new(PanelState {
                options,
                width: options.initial_width,
                phase: ResizePhase::Idle,
            }),
            capture: RefCell::new(None),
            on_resize: Box::new(on_resize),
        };
        Self {
            engine: Rc::new(engine),
            document: document.clone(),
        }
    }

    /// Pointer-down on the resize handle at horizontal position `x`.
    pub fn pointer_down(&self, x: f64) {
        // A gesture that never saw its pointer-up is abandoned here.
        self.engine.end_gesture();

        let direction = {
            let mut state = self.engine.state.borrow_mut();
            state.phase = ResizePhase::Resizing {
                start_x: x,
                start_width: state.width,
            };
            state.options.direction
        };
        let listener = Rc::new(GestureListener {
            engine: Rc::downgrade(&self.engine),
        });
        let capture = self.document.capture_pointer(listener, direction.cursor());
        *self.engine.capture.borrow_mut() = Some(capture);
        tracing::trace!(x, ?direction, "resize gesture started");
    }

    /// Width supplied by the owner changed; show it without starting a gesture.
    pub fn set_initial_width(&self, width: f64) {
        let mut state = self.engine.state.borrow_mut();
        state.options.initial_width = width;
        // Always applied: a drag may have moved the display off the last supplied width.
        state.width = width;
    }

    pub fn width(&self) -> f64 {
        self.engine.state.borrow().width
    }

    pub fn phase(&self) -> ResizePhase {
        self.engine.state.borrow().phase
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.phase(), ResizePhase::Resizing { .. })
    }

    /// Tear the panel down, releasing any capture in progress.
    pub fn dispose(self) {
        drop(self);
    }
}

impl Drop for ResizeEngine {
    fn drop(&mut self) {
        self.engine.end_gesture();
    }
}
