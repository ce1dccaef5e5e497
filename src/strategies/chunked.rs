//! Batched replay of another strategy across run-loop turns.

use std::cell::RefCell;
use std::rc::Rc;

use crate::canvas::{Canvas, RecordingCanvas};
use crate::geometry::Line;
use crate::runloop::RunLoop;
use crate::strategy::{Completion, DrawStrategy, PlotHandle};

/// Wraps a strategy and emits its output in fixed-size batches, one batch
/// per run-loop turn, completing only after the last batch.
///
/// This is the deferred-completion mode of the strategy contract: `draw`
/// returns before any pixel reaches the plot handle, and the completion
/// token travels through the queued batches until the final one fires it.
pub struct Chunked {
    inner: Rc<dyn DrawStrategy>,
    runloop: RunLoop,
    chunk_size: usize,
}

impl Chunked {
    /// Wrap `inner`, scheduling batches on `runloop`.
    #[must_use]
    pub fn new(inner: Rc<dyn DrawStrategy>, runloop: RunLoop) -> Self {
        Self {
            inner,
            runloop,
            chunk_size: 64,
        }
    }

    /// Set the number of points emitted per run-loop turn (minimum 1).
    #[must_use]
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }
}

impl DrawStrategy for Chunked {
    fn draw(&self, line: Line, plot: PlotHandle, done: Completion) {
        let recorder = Rc::new(RefCell::new(RecordingCanvas::new()));
        let capture: Rc<RefCell<dyn Canvas>> = recorder.clone();

        let runloop = self.runloop.clone();
        let chunk_size = self.chunk_size;

        // Replay starts only once the inner strategy reports completion,
        // so wrapping a deferred strategy keeps the ordering guarantee.
        let inner_done = Completion::new(move || {
            let points = Rc::new(recorder.borrow_mut().take_points());
            replay_batch(&runloop, points, 0, chunk_size, plot, done);
        });

        self.inner.draw(line, PlotHandle::to_canvas(capture), inner_done);
    }
}

fn replay_batch(
    runloop: &RunLoop,
    points: Rc<Vec<(i32, i32)>>,
    start: usize,
    chunk_size: usize,
    plot: PlotHandle,
    done: Completion,
) {
    let next_loop = runloop.clone();
    runloop.defer(move || {
        let end = (start + chunk_size).min(points.len());
        for &(x, y) in &points[start..end] {
            plot.plot(x, y);
        }

        if end < points.len() {
            replay_batch(&next_loop, points, end, chunk_size, plot, done);
        } else {
            done.complete();
        }
    });
}
