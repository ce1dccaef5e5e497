//! # Trazar
//!
//! Benchmark-instrumented line rasterization with pluggable drawing
//! strategies.
//!
//! Trazar renders the segment between two points through a named,
//! registerable [`DrawStrategy`](strategy::DrawStrategy), times a
//! configurable warm-up of repeated draws, and reports the point count
//! and wall-clock duration of one final instrumented draw. The
//! [`Orchestrator`](orchestrator::Orchestrator) sequences all of this on
//! a single-threaded [`RunLoop`](runloop::RunLoop) without blocking the
//! host, and a busy-gate keeps rapid parameter changes from overlapping
//! cycles.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! use trazar::prelude::*;
//!
//! let registry = Rc::new(RefCell::new(StrategyRegistry::with_builtins()));
//! let canvas: Rc<RefCell<dyn Canvas>> =
//!     Rc::new(RefCell::new(PixelCanvas::new(800, 450).unwrap()));
//! let runloop = RunLoop::new();
//!
//! let orchestrator = Orchestrator::new(registry, canvas, runloop)
//!     .config(BenchConfig::new().bench_times(10).settle_delay(Duration::ZERO));
//!
//! let request = DrawRequest::new(Line::from_coords(5, 5, 50, 50), "Bresenham");
//! orchestrator.run_cycle(request);
//!
//! let result = orchestrator.result();
//! assert_eq!(result.points_drawn, Some(46));
//! ```
//!
//! ## Extending
//!
//! Register additional strategies by name; anything implementing
//! [`DrawStrategy`](strategy::DrawStrategy) qualifies, including
//! strategies that complete asynchronously across run-loop turns (see
//! [`strategies::Chunked`]). Unknown names fall back to the built-in
//! `Null` strategy, so state restored from user-editable encodings never
//! crashes the host.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types for pixel rendering.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, lines).
pub mod geometry;

// ============================================================================
// Orchestration Modules
// ============================================================================

/// Drawing surface abstraction and default implementations.
pub mod canvas;

/// Single-threaded cooperative run loop.
pub mod runloop;

/// The pluggable drawing-strategy contract.
pub mod strategy;

/// Name-keyed registry of drawing strategies.
pub mod registry;

/// Built-in line-drawing strategies.
pub mod strategies;

/// Bench/draw orchestration engine.
pub mod orchestrator;

// ============================================================================
// Interface Modules
// ============================================================================

/// Compact textual state encoding for persistence and sharing.
pub mod encoding;

/// Output encoders (PNG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trazar operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use trazar::prelude::*;
/// ```
pub mod prelude {
    pub use crate::canvas::{Canvas, PixelCanvas, RecordingCanvas};
    pub use crate::color::Rgba;
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Line, Point};
    pub use crate::orchestrator::{
        BenchConfig, BenchResult, DrawRequest, Orchestrator, Phase,
    };
    pub use crate::registry::{StrategyRegistry, NULL_STRATEGY};
    pub use crate::runloop::RunLoop;
    pub use crate::strategies::{Bresenham, Chunked, Dda};
    pub use crate::strategy::{Completion, DrawStrategy, Null, PlotHandle};
}
