//! Synthetic solver workload driving the timers.
//!
//! Usage:
//!   solver-timers                      # 8 phases x 5 calls, random seed
//!   solver-timers --phases 3 --predict # track prediction error
//!   solver-timers --seed 42 -vv        # reproducible run, debug logging

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use solver_timers::{tui, TimerSession};
use std::hint::black_box;
use std::time::{Duration, Instant};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "solver-timers", version, about = "Time a synthetic solver workload")]
struct Args {
    /// Number of phases, each timed in its own slot
    #[arg(long, default_value_t = 8)]
    phases: usize,

    /// Calls per phase
    #[arg(long, default_value_t = 5)]
    calls: usize,

    /// Upper bound on the nominal work per call, in milliseconds
    #[arg(long, default_value_t = 20)]
    max_ms: u64,

    /// Seed for the workload generator (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop slots with the phase's nominal duration as prediction
    #[arg(long)]
    predict: bool,

    /// Label for the overall timer
    #[arg(long, default_value = "Synthetic solve")]
    name: String,

    /// Increase verbosity, -vv for debug
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // RUST_LOG=
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Busy-wait for `ms` milliseconds so both wall and CPU time advance.
fn spin_for(ms: u64) -> u64 {
    let deadline = Instant::now() + Duration::from_millis(ms);
    let mut acc = 0u64;
    while Instant::now() < deadline {
        acc = black_box(acc.wrapping_add(1));
    }
    acc
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    tracing::info!(seed, phases = args.phases, calls = args.calls, "starting workload");

    let mut session = TimerSession::system();
    session.init_all();
    session
        .timer
        .set_name(&args.name)
        .context("invalid timer name")?;

    session.timer.start()?;
    for phase in 0..args.phases {
        let nominal = rng.random_range(1..=args.max_ms.max(1));
        for _ in 0..args.calls {
            let work = rng.random_range(nominal / 2..=nominal + nominal / 2);
            session
                .slots
                .start(phase)
                .with_context(|| format!("cannot time phase {phase}"))?;
            black_box(spin_for(work));
            if args.predict {
                session.slots.stop_with_prediction(phase, nominal as i64)?;
            } else {
                session.slots.stop(phase)?;
            }
        }
        tracing::debug!(phase, nominal, "phase done");
    }
    session.timer.stop()?;

    tui::print_header();
    tui::print_section("Overall timer");
    session.timer.print_report();
    tui::print_section("Phase slots");
    session.slots.print_report();

    Ok(())
}
