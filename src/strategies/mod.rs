//! Built-in line-drawing strategies.
//!
//! `Bresenham` and `DDA` complete synchronously; [`Chunked`] wraps another
//! strategy and spreads its output across run-loop turns, completing only
//! after the last batch.

mod bresenham;
mod chunked;
mod dda;

pub use bresenham::Bresenham;
pub use chunked::Chunked;
pub use dda::Dda;
