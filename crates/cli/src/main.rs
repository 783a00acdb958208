#![deny(unsafe_code)]
//! CLI binary for the smoke-engine fluid simulation.
//!
//! Subcommands:
//! - `run` — inject impulses, step the simulation N ticks, optionally
//!   write a grayscale PNG of the density field
//! - `schema` — print the tunable parameter schema as JSON

mod error;
mod render;

use clap::{Parser, Subcommand};
use error::CliError;
use smoke_engine_core::Engine;
use smoke_engine_fluid::{FluidParams, Simulation};
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "smoke-engine", about = "Stable-fluids smoke simulation CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the simulation for N ticks and report a density summary.
    Run {
        /// Grid side length in cells (must be even).
        #[arg(short, long, default_value_t = 50)]
        dim: usize,

        /// Number of simulation ticks.
        #[arg(short, long, default_value_t = 100)]
        steps: usize,

        /// Simulation time step per tick.
        #[arg(long, default_value_t = 0.5)]
        dt: f64,

        /// Fluid viscosity.
        #[arg(long, default_value_t = 0.001)]
        visc: f64,

        /// Snapshot history depth.
        #[arg(long, default_value_t = 20)]
        depth: usize,

        /// Force/matter injection before the first tick, as "X,Y,DX,DY".
        /// Repeatable.
        #[arg(long, value_name = "X,Y,DX,DY")]
        impulse: Vec<Impulse>,

        /// Write the final density field as a grayscale PNG.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the tunable parameter schema as JSON.
    Schema,
}

/// One force/matter injection: a grid cell plus a momentum delta.
#[derive(Debug, Clone, PartialEq)]
struct Impulse {
    x: usize,
    y: usize,
    dx: f64,
    dy: f64,
}

impl FromStr for Impulse {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(format!("expected X,Y,DX,DY, got {s:?}"));
        }
        let x = parts[0].trim().parse().map_err(|e| format!("bad X: {e}"))?;
        let y = parts[1].trim().parse().map_err(|e| format!("bad Y: {e}"))?;
        let dx = parts[2].trim().parse().map_err(|e| format!("bad DX: {e}"))?;
        let dy = parts[3].trim().parse().map_err(|e| format!("bad DY: {e}"))?;
        Ok(Self { x, y, dx, dy })
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Schema => {
            let sim = Simulation::new(2, FluidParams::default())?;
            println!("{}", serde_json::to_string_pretty(&sim.param_schema())?);
        }
        Command::Run {
            dim,
            steps,
            dt,
            visc,
            depth,
            impulse,
            output,
        } => {
            let params = FluidParams {
                dt,
                visc,
                history_depth: depth,
            };
            let mut sim = Simulation::new(dim, params)?;

            for imp in &impulse {
                if imp.x >= dim || imp.y >= dim {
                    return Err(CliError::Input(format!(
                        "impulse cell ({}, {}) outside {dim}x{dim} grid",
                        imp.x, imp.y
                    )));
                }
                sim.insert_forces(imp.x, imp.y, imp.dx, imp.dy)?;
            }

            (0..steps).try_for_each(|_| sim.step())?;

            if let Some(path) = &output {
                render::write_png(sim.field(), path)?;
            }

            let density = sim.field().data();
            let total: f64 = density.iter().sum();
            let max = density.iter().cloned().fold(0.0_f64, f64::max);

            if cli.json {
                let info = serde_json::json!({
                    "dim": dim,
                    "steps": steps,
                    "dt": dt,
                    "visc": visc,
                    "impulses": impulse.len(),
                    "density_total": total,
                    "density_max": max,
                    "output": output.as_ref().map(|p| p.display().to_string()),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "ran {dim}x{dim} grid for {steps} ticks (dt {dt}, visc {visc}): \
                     total density {total:.3}, max {max:.3}"
                );
                if let Some(path) = &output {
                    eprintln!("wrote {}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
