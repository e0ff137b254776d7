//! Skyfall entry point
//!
//! Headless demo driver: steps the simulation at a fixed rate with the idle
//! autopilot playing. A panic inside one tick is contained, logged, and the
//! loop resumes after a short backoff instead of killing the run.
//!
//! Usage: `skyfall [seed] [ticks]`. Set `SKYFALL_SNAPSHOT=1` to dump the
//! final render snapshot as JSON on exit.

use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use skyfall::consts::*;
use skyfall::sim::{GameState, RenderSnapshot, TickInput, tick};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        // Wall clock only picks the run seed; the sim itself is deterministic
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    let total_ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3600);

    log::info!("Skyfall starting with seed {seed}");
    let mut state = GameState::new(seed);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut last = Instant::now();
    let mut accumulator = 0.0f32;
    let mut ran: u64 = 0;

    while ran < total_ticks {
        std::thread::sleep(Duration::from_millis(2));
        let now = Instant::now();
        accumulator += (now - last).as_secs_f32().min(0.1);
        last = now;

        // Pacing guard: step only when a full sim interval has elapsed, and
        // never more than MAX_SUBSTEPS at once after a stall
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS && ran < total_ticks {
            accumulator -= SIM_DT;
            substeps += 1;

            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| tick(&mut state, &input)))
            {
                let msg = payload
                    .downcast_ref::<&str>()
                    .copied()
                    .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
                    .unwrap_or("<non-string panic>");
                log::error!("Tick panicked ({msg}); resuming after backoff");
                std::thread::sleep(Duration::from_secs(1));
                last = Instant::now();
                accumulator = 0.0;
                break;
            }
            ran += 1;

            if ran % (TICK_RATE as u64 * 5) == 0 {
                log::info!(
                    "tick {}: score {} x{:.2} streak {} projectiles {}",
                    state.time_ticks,
                    state.score,
                    state.combo.multiplier,
                    state.streak,
                    state.projectiles.len()
                );
            }
        }
    }

    log::info!(
        "Run complete after {} ticks: final score {}",
        state.time_ticks,
        state.score
    );

    if std::env::var_os("SKYFALL_SNAPSHOT").is_some() {
        match serde_json::to_string_pretty(&RenderSnapshot::capture(&state)) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Snapshot serialization failed: {e}"),
        }
    }
}
