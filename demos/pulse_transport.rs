//! Pulse transport demo
//!
//! Releases a Gaussian pulse of pollutant 20 m down a 100 m channel and
//! follows it under each process alone and under all three together,
//! comparing every run with its analytical reference.
//!
//! ```bash
//! cargo run --example pulse_transport
//! cargo run --example pulse_transport --features parallel
//! ```
//!
//! Set `LOG_LEVEL` to `Debug` to see the stability policy at work.

use adr_rs::prelude::*;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

const LOG_LEVEL: LevelFilter = LevelFilter::Info;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(
        LOG_LEVEL,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let grid = Grid::new(100.0, 200)?;
    let pulse = GaussianPulse::new(1.0, 20.0, 5.0)?;
    let initial = pulse.to_field(&grid)?;

    let cases = [
        ("advection", PhysicalParameters::advection(1.0), TimeStepSelection::default()),
        ("diffusion", PhysicalParameters::diffusion(0.5), TimeStepSelection::default()),
        ("reaction", PhysicalParameters::reaction(0.05), TimeStepSelection::Fixed(0.25)),
        (
            "advection-diffusion-reaction",
            PhysicalParameters::new(1.0, 0.5, 0.05)?,
            TimeStepSelection::default(),
        ),
    ];

    for (label, params, selection) in cases {
        let plan = TimeStepPlan::for_duration(&grid, &params, selection, 40.0, 40)?;
        let trajectory = run(&grid, &params, &initial, &plan)?;

        println!("\n=== {} ===", label);
        println!(
            "Pe = {:.1}, Da = {:.2}, dt = {:.4} s, {} steps, {}",
            params.peclet_number(grid.length()),
            params.damkohler_number(grid.length()),
            plan.dt,
            plan.steps,
            StabilityReport::assess(&grid, &params, plan.dt)
        );
        println!("{:>8} {:>10} {:>10} {:>10}", "t [s]", "center", "peak", "mass");

        for snapshot in &trajectory {
            println!(
                "{:>8.2} {:>10.3} {:>10.4} {:>10.4}",
                snapshot.time,
                snapshot.field.center_of_mass(&grid).unwrap_or(f64::NAN),
                snapshot.field.max(),
                snapshot.field.total_mass(grid.dx())
            );
        }

        let final_snapshot = trajectory.final_snapshot();
        let reference = AnalyticalSolution::for_parameters(pulse, &params);
        let norms = ErrorNorms::compare(
            &final_snapshot.field,
            &reference.sample(&grid, final_snapshot.time)?,
        )?;
        println!("vs {}: {}", reference, norms);
    }

    Ok(())
}
