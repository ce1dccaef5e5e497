//! Bresenham line rasterization.

use crate::geometry::Line;
use crate::strategy::{Completion, DrawStrategy, PlotHandle};

/// Integer error-accumulation rasterizer (non-antialiased).
///
/// Plots every pixel of the segment including both endpoints; clipping is
/// left to the canvas.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bresenham;

impl DrawStrategy for Bresenham {
    fn draw(&self, line: Line, plot: PlotHandle, done: Completion) {
        let Line { start, end } = line;

        let dx = (end.x - start.x).abs();
        let dy = -(end.y - start.y).abs();
        let sx = if start.x < end.x { 1 } else { -1 };
        let sy = if start.y < end.y { 1 } else { -1 };
        let mut err = dx + dy;

        let mut x = start.x;
        let mut y = start.y;

        loop {
            plot.plot(x, y);

            if x == end.x && y == end.y {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                if x == end.x {
                    break;
                }
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                if y == end.y {
                    break;
                }
                err += dx;
                y += sy;
            }
        }

        done.complete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, RecordingCanvas};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn collect_points(line: Line) -> Vec<(i32, i32)> {
        let recorder = Rc::new(RefCell::new(RecordingCanvas::new()));
        let canvas: Rc<RefCell<dyn Canvas>> = recorder.clone();
        let completed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&completed);

        Bresenham.draw(
            line,
            PlotHandle::to_canvas(canvas),
            Completion::new(move || flag.set(true)),
        );

        assert!(completed.get(), "strategy must complete");
        let points = recorder.borrow().points().to_vec();
        points
    }

    #[test]
    fn test_horizontal_line() {
        let points = collect_points(Line::from_coords(0, 5, 4, 5));
        assert_eq!(
            points,
            vec![(0, 5), (1, 5), (2, 5), (3, 5), (4, 5)]
        );
    }

    #[test]
    fn test_vertical_line() {
        let points = collect_points(Line::from_coords(3, 0, 3, 3));
        assert_eq!(points, vec![(3, 0), (3, 1), (3, 2), (3, 3)]);
    }

    #[test]
    fn test_diagonal_line() {
        let points = collect_points(Line::from_coords(0, 0, 3, 3));
        assert_eq!(points, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_single_point() {
        let points = collect_points(Line::from_coords(7, 7, 7, 7));
        assert_eq!(points, vec![(7, 7)]);
    }

    #[test]
    fn test_reversed_direction_covers_same_endpoints() {
        let forward = collect_points(Line::from_coords(0, 0, 10, 4));
        let backward = collect_points(Line::from_coords(10, 4, 0, 0));
        assert_eq!(forward.len(), backward.len());
        assert_eq!(forward.first(), Some(&(0, 0)));
        assert_eq!(backward.first(), Some(&(10, 4)));
    }
}
