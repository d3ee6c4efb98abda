//! Demo driver (`dustdrift-bench`): runs one of the three integrator schemes
//! against an analytically-defined stand-in gas model and reports a
//! wall-time/diagnostics summary, grounded on the teacher's `bin/main.rs`.

use clap::{Parser, ValueEnum};
use colored::*;
use dustdrift::errors::*;
use dustdrift::feedback::feedback_predictor;
use dustdrift::grain::{status, Grain};
use dustdrift::grid::{Grid, PhysicsConfig, Species};
use dustdrift::integrators::{explicit, fully_implicit, semi_implicit};
use dustdrift::output::OutputEntry;
use dustdrift::settings::{self, Scheme, Settings};
use dustdrift::testutil::UniformGas;
use dustdrift::vector::Vec3;
use log::{error, info};
use rand::{Rng, SeedableRng};
use std::time::Instant;

#[derive(Parser)]
#[command(version, about = "Lagrangian dust-grain integrator benchmark/demo")]
struct Cli {
    /// Path to a TOML parameter file.
    parameter_file: String,

    /// Number of grains to seed (uniformly distributed over the domain).
    #[arg(long, default_value_t = 256)]
    num_grains: usize,

    /// Seed for grain placement.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Overrides the scheme chosen in the parameter file.
    #[arg(long, value_enum)]
    scheme: Option<SchemeArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemeArg {
    Explicit,
    SemiImplicit,
    FullyImplicit,
}

fn main() {
    env_logger::init();

    if let Err(ref e) = run() {
        error!("{}: {}", "error".red(), e);
        for e in e.iter().skip(1) {
            error!("caused by: {}", e);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let settings = settings::read_parameter_file(&cli.parameter_file)
        .chain_err(|| "Error reading parameter file.")?;

    let scheme = match cli.scheme {
        Some(SchemeArg::Explicit) => Scheme::Explicit,
        Some(SchemeArg::SemiImplicit) => Scheme::SemiImplicit,
        Some(SchemeArg::FullyImplicit) => Scheme::FullyImplicit,
        None => settings.scheme,
    };

    let (mut grid, cfg, mut gas, mut grains) = build_run(&settings, cli.num_grains, cli.seed);

    info!(
        "Running {} grains, {} timesteps, scheme {:?}",
        grains.len(),
        settings.number_of_timesteps,
        scheme
    );

    let start = Instant::now();

    for timestep in 1..=settings.number_of_timesteps {
        // Stands in for the host gas solver's predictor/corrector split: no
        // real gas update happens between these two calls in this demo, so
        // the predictor-phase deposit below is informational only (the
        // integrator's own corrector phase clears and repopulates the
        // buffer before returning).
        if cfg.feedback {
            feedback_predictor(&grid, &mut gas, &grains);
        }

        match scheme {
            Scheme::Explicit => explicit::integrate(&mut grid, &mut gas, &cfg, &mut grains),
            Scheme::SemiImplicit => semi_implicit::integrate(&mut grid, &mut gas, &cfg, &mut grains),
            Scheme::FullyImplicit => fully_implicit::integrate(&mut grid, &mut gas, &cfg, &mut grains),
        }
        grid.time += grid.dt;

        if timestep % settings.output_every == 0 {
            let entry = summarize(timestep, &grid, &grains);
            info!(
                "Timestep {}: mean speed {:.4e}, {} live, {} left domain",
                entry.timestep,
                entry.mean_speed.unwrap_or(0.0),
                entry.num_live.unwrap_or(0),
                entry.num_left_domain.unwrap_or(0)
            );
        }
    }

    let elapsed = start.elapsed();
    let final_entry = summarize(settings.number_of_timesteps, &grid, &grains);
    println!(
        "{} {} grains, {} steps in {:.3}s ({} left domain, mean speed {:.4e})",
        "done".green().bold(),
        grains.len(),
        settings.number_of_timesteps,
        elapsed.as_secs_f64(),
        final_entry.num_left_domain.unwrap_or(0),
        final_entry.mean_speed.unwrap_or(0.0)
    );

    Ok(())
}

fn build_run(settings: &Settings, num_grains: usize, seed: u64) -> (Grid, PhysicsConfig, UniformGas, Vec<Grain>) {
    let species = settings
        .species
        .iter()
        .map(|s| Species { mass: s.mass, num: s.num })
        .collect();

    let grid = Grid {
        n: settings.grid.n,
        dx: [
            (settings.grid.upper[0] - settings.grid.lower[0]) / settings.grid.n[0] as f64,
            (settings.grid.upper[1] - settings.grid.lower[1]) / settings.grid.n[1] as f64,
            (settings.grid.upper[2] - settings.grid.lower[2]) / settings.grid.n[2] as f64,
        ],
        time: 0.0,
        dt: settings.grid.dt,
        proc_id: 0,
        lower: settings.grid.lower,
        upper: settings.grid.upper,
        species,
    };

    let cfg = settings.physics.to_config();
    let gas = UniformGas::new(&grid, 1.0, Vec3::zero(), 1.0, 1.0);

    let mut rng = rand_pcg::Pcg64::seed_from_u64(seed);
    let grains = (0..num_grains)
        .map(|_| {
            let x = Vec3::new(
                rng.gen_range(grid.lower[0]..grid.upper[0]),
                rng.gen_range(grid.lower[1]..grid.upper[1]),
                rng.gen_range(grid.lower[2]..grid.upper[2]),
            );
            Grain::new(x, Vec3::zero(), 0)
        })
        .collect();

    (grid, cfg, gas, grains)
}

fn summarize(timestep: usize, grid: &Grid, grains: &[Grain]) -> OutputEntry {
    let live: Vec<&Grain> = grains.iter().filter(|g| g.pos != status::GHOST).collect();
    let mean_speed = if live.is_empty() {
        0.0
    } else {
        live.iter().map(|g| g.v.norm()).sum::<f64>() / live.len() as f64
    };
    let num_left_domain = grains.iter().filter(|g| g.pos == status::LEFT_DOMAIN).count();

    OutputEntry {
        timestep,
        time: grid.time,
        mean_speed: Some(mean_speed),
        num_live: Some(live.len()),
        num_left_domain: Some(num_left_domain),
    }
}
