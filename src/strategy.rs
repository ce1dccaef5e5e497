//! The pluggable drawing-strategy contract.
//!
//! A strategy rasterizes the segment between two endpoints by calling
//! [`PlotHandle::plot`] once per pixel, then signals completion exactly
//! once through its [`Completion`] token. Completion may happen inside
//! `draw` (synchronous strategies) or later, from a task the strategy
//! queued on a [`crate::runloop::RunLoop`] (chunked/animated strategies).
//!
//! Contract rules:
//! - `done` must be completed exactly once. The token is consumed by
//!   [`Completion::complete`], so a double completion does not compile.
//! - `plot` must not be called after completion. The core does not defend
//!   against violations; they are the strategy author's bug.
//! - A token that is dropped without being completed leaves the current
//!   cycle unfinished forever. There is no watchdog; the drop is logged.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::canvas::Canvas;
use crate::geometry::Line;

/// A named, stateless line-drawing algorithm.
///
/// Implementations must eventually complete `done` exactly once, after
/// zero or more `plot` calls.
pub trait DrawStrategy {
    /// Rasterize `line`, emitting pixels through `plot`, then complete.
    fn draw(&self, line: Line, plot: PlotHandle, done: Completion);
}

/// Plot callback handed to strategies.
///
/// During the benchmark phase the handle discards everything (the canvas
/// is cleared but nothing is drawn or counted); during the final draw it
/// forwards to the shared canvas and increments the cycle point counter.
#[derive(Clone, Default)]
pub struct PlotHandle {
    canvas: Option<Rc<RefCell<dyn Canvas>>>,
    counter: Option<Rc<Cell<u64>>>,
}

impl PlotHandle {
    /// A handle that ignores every plot call.
    #[must_use]
    pub fn discard() -> Self {
        Self::default()
    }

    /// A handle that draws on `canvas` without counting.
    #[must_use]
    pub fn to_canvas(canvas: Rc<RefCell<dyn Canvas>>) -> Self {
        Self {
            canvas: Some(canvas),
            counter: None,
        }
    }

    /// A handle that draws on `canvas` and counts each plot call.
    #[must_use]
    pub(crate) fn counted(canvas: Rc<RefCell<dyn Canvas>>, counter: Rc<Cell<u64>>) -> Self {
        Self {
            canvas: Some(canvas),
            counter: Some(counter),
        }
    }

    /// Emit one pixel.
    pub fn plot(&self, x: i32, y: i32) {
        if let Some(canvas) = &self.canvas {
            canvas.borrow_mut().plot(x, y);
        }
        if let Some(counter) = &self.counter {
            counter.set(counter.get() + 1);
        }
    }
}

/// One-shot completion token.
///
/// `complete` consumes the token, making "completed twice" unrepresentable.
pub struct Completion {
    notify: Option<Box<dyn FnOnce()>>,
}

impl Completion {
    /// Create a token that invokes `notify` when completed.
    pub fn new<F: FnOnce() + 'static>(notify: F) -> Self {
        Self {
            notify: Some(Box::new(notify)),
        }
    }

    /// Signal completion. Consumes the token.
    pub fn complete(mut self) {
        if let Some(notify) = self.notify.take() {
            notify();
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if self.notify.is_some() {
            log::error!("completion token dropped without complete(); the current cycle will never finish");
        }
    }
}

/// Strategy that plots nothing and completes immediately.
///
/// Registered under the name `"Null"`; also the fallback for unknown
/// strategy names.
#[derive(Debug, Clone, Copy, Default)]
pub struct Null;

impl DrawStrategy for Null {
    fn draw(&self, _line: Line, _plot: PlotHandle, done: Completion) {
        done.complete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PixelCanvas;
    use crate::color::Rgba;

    #[test]
    fn test_null_completes_without_plotting() {
        let completed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&completed);

        Null.draw(
            Line::from_coords(0, 0, 10, 10),
            PlotHandle::discard(),
            Completion::new(move || flag.set(true)),
        );

        assert!(completed.get());
    }

    #[test]
    fn test_discard_handle_ignores_plots() {
        let handle = PlotHandle::discard();
        handle.plot(1, 1);
        handle.plot(2, 2);
        // Nothing to observe; the call must simply not panic.
    }

    #[test]
    fn test_counted_handle_draws_and_counts() {
        let canvas: Rc<RefCell<dyn Canvas>> =
            Rc::new(RefCell::new(PixelCanvas::new(10, 10).unwrap()));
        let counter = Rc::new(Cell::new(0));
        let handle = PlotHandle::counted(Rc::clone(&canvas), Rc::clone(&counter));

        handle.plot(3, 3);
        handle.plot(4, 4);

        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn test_to_canvas_handle_draws_without_counting() {
        let pixel = Rc::new(RefCell::new(PixelCanvas::new(10, 10).unwrap()));
        let canvas: Rc<RefCell<dyn Canvas>> = pixel.clone();
        let handle = PlotHandle::to_canvas(canvas);

        handle.plot(7, 8);

        assert_eq!(
            pixel.borrow().framebuffer().get_pixel(7, 8),
            Some(Rgba::BLACK)
        );
    }

    #[test]
    fn test_completion_fires_once() {
        let count = Rc::new(Cell::new(0));
        let counted = Rc::clone(&count);
        let done = Completion::new(move || counted.set(counted.get() + 1));

        done.complete();
        assert_eq!(count.get(), 1);
        // A second complete() does not compile: the token was moved.
    }
}
