//! Minimal CLI: run a simulation and stream tick reports as JSON lines.
//!
//! Usage: `companion-sim [ticks] [pets] [seed]`
//!
//! Exits 0 on clean shutdown, nonzero on an unhandled fatal violation.

use companion_dynamics::agent::PetBuilder;
use companion_dynamics::sim::SimulationBuilder;
use companion_dynamics::types::SessionId;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let ticks: u64 = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(100);
    let pets: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(3);
    let seed: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(42);

    let mut model = SimulationBuilder::new(seed).build();
    for i in 0..pets {
        let session = match SessionId::new(format!("cli_session_{i}")) {
            Ok(session) => session,
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        };
        if let Err(err) = model.spawn_pet(PetBuilder::new().session(session)) {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    }

    for _ in 0..ticks {
        let report = model.step();
        match serde_json::to_string(&report) {
            Ok(line) => println!("{line}"),
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        }
        if !report.quarantined.is_empty() {
            eprintln!(
                "fatal: {} agent(s) violated invariants on tick {}",
                report.quarantined.len(),
                report.environment.tick
            );
            return ExitCode::FAILURE;
        }
    }

    // Final snapshots prove the export path end to end.
    for id in model.pet_ids() {
        if let Some(snapshot) = model.snapshot_pet(&id) {
            if let Ok(line) = serde_json::to_string(&snapshot) {
                eprintln!("snapshot {id}: {} bytes", line.len());
            }
        }
    }

    ExitCode::SUCCESS
}
