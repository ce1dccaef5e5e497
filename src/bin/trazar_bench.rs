//! trazar-bench - command-line host for the bench/draw orchestrator.
//!
//! Decodes a state encoding (or generates random endpoints), runs one
//! benchmark + draw cycle against a pixel canvas, and prints the report.

use std::cell::RefCell;
use std::process;
use std::rc::Rc;
use std::time::Duration;

use trazar::canvas::{Canvas, PixelCanvas};
use trazar::encoding;
use trazar::orchestrator::{BenchConfig, BenchResult, DrawRequest, Orchestrator};
use trazar::output::PngEncoder;
use trazar::registry::StrategyRegistry;
use trazar::runloop::RunLoop;
use trazar::strategies::{Bresenham, Chunked};

const USAGE: &str = "\
Usage: trazar-bench [OPTIONS] [STATE]

  STATE                state encoding `x1-y1-x2-y2-strategyName`;
                       invalid or missing encodings fall back to random
                       endpoints and the Null strategy

Options:
  --width <PX>         canvas width (default 800)
  --height <PX>        canvas height (default 450)
  --bench-times <N>    warm-up repetitions (default 100)
  --no-bench           skip the warm-up benchmark phase
  --strategy <NAME>    override the strategy name from STATE
  --out <PATH>         write a PNG snapshot of the final draw
  -h, --help           show this help
";

struct Options {
    width: u32,
    height: u32,
    bench_times: u32,
    perform_bench: bool,
    strategy: Option<String>,
    out: Option<String>,
    state: Option<String>,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        width: 800,
        height: 450,
        bench_times: 100,
        perform_bench: true,
        strategy: None,
        out: None,
        state: None,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--width" => options.width = parse_value(&arg, args.next())?,
            "--height" => options.height = parse_value(&arg, args.next())?,
            "--bench-times" => options.bench_times = parse_value(&arg, args.next())?,
            "--no-bench" => options.perform_bench = false,
            "--strategy" => {
                options.strategy =
                    Some(args.next().ok_or_else(|| format!("{arg} requires a value"))?);
            }
            "--out" => {
                options.out = Some(args.next().ok_or_else(|| format!("{arg} requires a value"))?);
            }
            "-h" | "--help" => {
                print!("{USAGE}");
                process::exit(0);
            }
            other if !other.starts_with('-') => options.state = Some(other.to_string()),
            other => return Err(format!("unknown option: {other}")),
        }
    }

    Ok(options)
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    value
        .ok_or_else(|| format!("{flag} requires a value"))?
        .parse()
        .map_err(|_| format!("{flag} requires an integer value"))
}

fn format_duration(duration: Option<Duration>) -> String {
    match duration {
        Some(d) => format!("{:.2} ms", d.as_secs_f64() * 1000.0),
        None => "-".to_string(),
    }
}

fn format_count(count: Option<u64>) -> String {
    match count {
        Some(n) => n.to_string(),
        None => "-".to_string(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let options = match parse_args() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("trazar-bench: {message}");
            eprint!("{USAGE}");
            process::exit(2);
        }
    };

    let mut rng = rand::thread_rng();
    let mut request = match &options.state {
        Some(state) => encoding::decode(state).unwrap_or_else(|err| {
            log::warn!("{err}; generating random endpoints");
            DrawRequest::random(options.width, options.height, &mut rng)
        }),
        None => DrawRequest::random(options.width, options.height, &mut rng),
    };
    if let Some(strategy) = options.strategy {
        request.strategy = strategy;
    }

    let runloop = RunLoop::new();
    let mut registry = StrategyRegistry::with_builtins();
    registry.register(
        "Chunked",
        Rc::new(Chunked::new(Rc::new(Bresenham), runloop.clone())),
    );
    let registry = Rc::new(RefCell::new(registry));

    let pixel = Rc::new(RefCell::new(PixelCanvas::new(
        options.width,
        options.height,
    )?));
    let canvas: Rc<RefCell<dyn Canvas>> = pixel.clone();

    // No UI to flush here, so the settle delay is dropped.
    let orchestrator = Orchestrator::new(registry, canvas, runloop).config(
        BenchConfig::new()
            .bench_times(options.bench_times)
            .perform_bench(options.perform_bench)
            .settle_delay(Duration::ZERO),
    );

    orchestrator.run_cycle(request.clone());
    let BenchResult {
        points_drawn,
        render_time,
        render_x_time,
    } = orchestrator.result();

    println!("strategy:     {}", request.strategy);
    println!(
        "endpoints:    ({}, {}) -> ({}, {})",
        request.line.start.x, request.line.start.y, request.line.end.x, request.line.end.y
    );
    println!("points drawn: {}", format_count(points_drawn));
    println!("render time:  {}", format_duration(render_time));
    if options.perform_bench {
        println!(
            "bench time:   {} ({} runs)",
            format_duration(render_x_time),
            options.bench_times
        );
    }
    println!("state:        {}", encoding::encode(&request));

    if let Some(path) = options.out {
        PngEncoder::write_to_file(pixel.borrow().framebuffer(), &path)?;
        println!("snapshot:     {path}");
    }

    Ok(())
}
