//! Bench/draw orchestration engine.
//!
//! Owns the current draw request and sequences one cycle per accepted
//! update: an optional warm-up benchmark phase (N timed, uncounted
//! repetitions) followed by a single instrumented final draw whose point
//! count and wall-clock time are reported in [`BenchResult`].
//!
//! The orchestrator never blocks the caller: `request_update` queues the
//! cycle on the run loop and returns. At most one cycle is in flight at a
//! time; the `busy` flag is a try-lock, not a queue — updates arriving
//! mid-cycle are dropped and the host re-triggers once its state settles.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::canvas::Canvas;
use crate::geometry::{Line, Point};
use crate::registry::{StrategyRegistry, NULL_STRATEGY};
use crate::runloop::RunLoop;
use crate::strategy::{Completion, PlotHandle};

/// Radius of the circle outline marking each endpoint in the final draw.
const MARKER_RADIUS: i32 = 3;

/// Two endpoints plus the name of the strategy that should connect them.
///
/// Immutable for the duration of one cycle; replaced wholesale on each
/// host-driven change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DrawRequest {
    /// Segment to rasterize.
    pub line: Line,
    /// Registry key of the strategy to use.
    pub strategy: String,
}

impl DrawRequest {
    /// Create a request for the given segment and strategy name.
    pub fn new(line: Line, strategy: impl Into<String>) -> Self {
        Self {
            line,
            strategy: strategy.into(),
        }
    }

    /// Random endpoints inside `[0, width] x [0, height]`, Null strategy.
    ///
    /// The fallback for invalid state encodings.
    pub fn random<R: Rng>(width: u32, height: u32, rng: &mut R) -> Self {
        let mut coord = |max: u32| rng.gen_range(0..=max as i32);
        let line = Line::new(
            Point::new(coord(width), coord(height)),
            Point::new(coord(width), coord(height)),
        );
        Self::new(line, NULL_STRATEGY)
    }
}

/// Cycle configuration.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    bench_times: u32,
    perform_bench: bool,
    settle_delay: Duration,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            bench_times: 100,
            perform_bench: true,
            settle_delay: Duration::from_millis(100),
        }
    }
}

impl BenchConfig {
    /// Create the default configuration (100 repetitions, benchmarking
    /// enabled, 100ms settle delay).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of warm-up repetitions.
    #[must_use]
    pub fn bench_times(mut self, times: u32) -> Self {
        self.bench_times = times;
        self
    }

    /// Enable or disable the benchmark phase entirely.
    ///
    /// When disabled the phase contributes zero elapsed time and
    /// [`BenchResult::render_x_time`] stays unknown.
    #[must_use]
    pub fn perform_bench(mut self, enabled: bool) -> Self {
        self.perform_bench = enabled;
        self
    }

    /// Set the delay inserted before the benchmark phase so the host can
    /// flush pending UI updates. Zero disables the delay.
    #[must_use]
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}

/// Timing and point-count report for the most recent cycle.
///
/// `None` means "unknown": either no cycle has produced the value yet, or
/// the current cycle has reset it and not yet reached that measurement.
/// With benchmarking disabled `render_x_time` stays `None`; with
/// `bench_times == 0` it is `Some` of the (near-zero) elapsed time around
/// an empty phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BenchResult {
    /// Plot calls made by the final instrumented draw only.
    pub points_drawn: Option<u64>,
    /// Duration of the final instrumented draw.
    pub render_time: Option<Duration>,
    /// Duration of the full warm-up benchmark phase.
    pub render_x_time: Option<Duration>,
}

/// Orchestration cycle state. Terminal state is always `Idle`; failures
/// degrade to `Idle` with partial results rather than a dedicated error
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No cycle in flight.
    Idle,
    /// Warm-up repetitions running (or queued behind the settle delay).
    Benchmarking,
    /// Final instrumented draw running.
    Drawing,
}

/// The bench/draw orchestrator.
///
/// Cheap to clone; clones share the same cycle state. Not thread-safe:
/// the orchestrator, its registry, canvas, and run loop all belong to one
/// thread.
#[derive(Clone)]
pub struct Orchestrator {
    inner: Rc<Inner>,
}

struct Inner {
    registry: Rc<RefCell<StrategyRegistry>>,
    canvas: Rc<RefCell<dyn Canvas>>,
    runloop: RunLoop,
    config: BenchConfig,
    busy: Cell<bool>,
    phase: Cell<Phase>,
    counter: Rc<Cell<u64>>,
    result: RefCell<BenchResult>,
    request: RefCell<Option<DrawRequest>>,
}

impl Orchestrator {
    /// Create an orchestrator over the given collaborators with the
    /// default [`BenchConfig`].
    pub fn new(
        registry: Rc<RefCell<StrategyRegistry>>,
        canvas: Rc<RefCell<dyn Canvas>>,
        runloop: RunLoop,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                registry,
                canvas,
                runloop,
                config: BenchConfig::default(),
                busy: Cell::new(false),
                phase: Cell::new(Phase::Idle),
                counter: Rc::new(Cell::new(0)),
                result: RefCell::new(BenchResult::default()),
                request: RefCell::new(None),
            }),
        }
    }

    /// Replace the configuration. Only meaningful before the first cycle.
    #[must_use]
    pub fn config(self, config: BenchConfig) -> Self {
        let inner = &self.inner;
        Self {
            inner: Rc::new(Inner {
                registry: Rc::clone(&inner.registry),
                canvas: Rc::clone(&inner.canvas),
                runloop: inner.runloop.clone(),
                config,
                busy: Cell::new(false),
                phase: Cell::new(Phase::Idle),
                counter: Rc::new(Cell::new(0)),
                result: RefCell::new(BenchResult::default()),
                request: RefCell::new(None),
            }),
        }
    }

    /// Entry point for host-driven request changes.
    ///
    /// Returns `false` (and does nothing) when a cycle is already in
    /// flight: the update is dropped, not queued. On accept, stale
    /// results are cleared, the cycle is queued behind the settle delay,
    /// and the call returns immediately.
    pub fn request_update(&self, request: DrawRequest) -> bool {
        if self.inner.busy.get() {
            log::debug!("cycle in flight, dropping update for {:?}", request.strategy);
            return false;
        }

        self.inner.busy.set(true);
        self.inner.phase.set(Phase::Benchmarking);
        *self.inner.result.borrow_mut() = BenchResult::default();
        *self.inner.request.borrow_mut() = Some(request);

        let inner = Rc::clone(&self.inner);
        self.inner
            .runloop
            .defer_after(self.inner.config.settle_delay, move || {
                Inner::start_bench(inner);
            });
        true
    }

    /// Request an update and drive the run loop until the cycle (and
    /// anything else queued) finishes. Returns whether the request was
    /// accepted.
    pub fn run_cycle(&self, request: DrawRequest) -> bool {
        let accepted = self.request_update(request);
        self.inner.runloop.run_until_idle();
        accepted
    }

    /// The most recent cycle's report (fields are `None` mid-cycle).
    #[must_use]
    pub fn result(&self) -> BenchResult {
        *self.inner.result.borrow()
    }

    /// Current cycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.inner.phase.get()
    }

    /// Whether a cycle is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.inner.busy.get()
    }

    /// The request driving the current or most recent cycle.
    #[must_use]
    pub fn request(&self) -> Option<DrawRequest> {
        self.inner.request.borrow().clone()
    }
}

impl Inner {
    fn current_request(this: &Rc<Self>) -> Option<DrawRequest> {
        let request = this.request.borrow().clone();
        if request.is_none() {
            // Internal invariant breach; degrade to Idle instead of hanging.
            log::error!("cycle started without a request");
            this.phase.set(Phase::Idle);
            this.busy.set(false);
        }
        request
    }

    fn start_bench(this: Rc<Self>) {
        if !this.config.perform_bench {
            Self::start_final_draw(&this);
            return;
        }

        let started = Instant::now();
        let remaining = this.config.bench_times;
        Self::bench_step(this, remaining, started);
    }

    /// One benchmark repetition, then queue the next. Repetition `i + 1`
    /// is only queued from repetition `i`'s completion, which keeps the
    /// phase strictly sequential even for deferred strategies.
    fn bench_step(this: Rc<Self>, remaining: u32, started: Instant) {
        if remaining == 0 {
            this.result.borrow_mut().render_x_time = Some(started.elapsed());
            Self::start_final_draw(&this);
            return;
        }

        let Some(request) = Self::current_request(&this) else {
            return;
        };

        this.canvas.borrow_mut().clear();
        let strategy = this.registry.borrow().lookup(&request.strategy);

        let next = Rc::clone(&this);
        let done = Completion::new(move || {
            let runloop = next.runloop.clone();
            runloop.defer(move || Self::bench_step(next, remaining - 1, started));
        });

        // Plot calls are discarded during the warm-up: not drawn, not counted.
        strategy.draw(request.line, PlotHandle::discard(), done);
    }

    fn start_final_draw(this: &Rc<Self>) {
        let Some(request) = Self::current_request(this) else {
            return;
        };

        this.phase.set(Phase::Drawing);

        // Fixed visual markers for both endpoints, independent of the
        // strategy: a unit mark plus a circle outline at each end.
        {
            let mut canvas = this.canvas.borrow_mut();
            canvas.clear();
            canvas.plot(request.line.start.x, request.line.start.y);
            canvas.plot(request.line.end.x, request.line.end.y);
            canvas.stroke_circle_outline(
                request.line.start.x,
                request.line.start.y,
                MARKER_RADIUS,
            );
            canvas.stroke_circle_outline(request.line.end.x, request.line.end.y, MARKER_RADIUS);
        }

        this.counter.set(0);
        let started = Instant::now();

        let strategy = this.registry.borrow().lookup(&request.strategy);
        let next = Rc::clone(this);
        let done = Completion::new(move || {
            {
                let mut result = next.result.borrow_mut();
                result.render_time = Some(started.elapsed());
                result.points_drawn = Some(next.counter.get());
            }
            next.phase.set(Phase::Idle);
            next.busy.set(false);
            log::debug!(
                "cycle complete: {} points",
                next.counter.get()
            );
        });

        strategy.draw(
            request.line,
            PlotHandle::counted(Rc::clone(&this.canvas), Rc::clone(&this.counter)),
            done,
        );
    }
}
