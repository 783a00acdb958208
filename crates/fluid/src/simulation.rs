//! The stable-fluids simulation: force staging, velocity solve, matter
//! advection, and the per-tick bookkeeping around them.
//!
//! One tick runs `set_forces -> solve -> diffuse_matter -> history append`,
//! in that fixed order, to completion. The velocity solve follows Stam's
//! stable-fluids scheme: an explicit force impulse, a backward
//! semi-Lagrangian advection (unconditionally stable for any `dt`), and a
//! joint viscous-damping-plus-incompressibility-projection step applied in
//! the frequency domain, where both operators are diagonal per wavenumber.
//! The spectral step replaces an iterative pressure-Poisson solve with one
//! transform pair.

use crate::grid::Grid;
use crate::history::HistoryBuffer;
use crate::seeds::{SurfaceStrip, TrajectorySeeder};
use crate::spectral::SpectralTransform;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use smoke_engine_core::error::SimError;
use smoke_engine_core::field::Field;
use smoke_engine_core::params::{param_f64, param_usize};
use smoke_engine_core::{Engine, Vec2};

/// Default simulation time step per tick.
const DEFAULT_DT: f64 = 0.5;
/// Default fluid viscosity.
const DEFAULT_VISCOSITY: f64 = 0.001;
/// Default snapshot history depth.
const DEFAULT_HISTORY_DEPTH: usize = 20;
/// Per-tick density decay so smoke slowly dissipates.
const DENSITY_DECAY: f64 = 0.995;
/// Per-tick force decay so a drag gesture produces a short pulse.
const FORCE_DECAY: f64 = 0.85;
/// Density written at a cell when matter is injected.
const MATTER_SEED: f64 = 10.0;

/// Tunable parameters of the simulation.
///
/// Use [`Default`] for the classic interactive settings
/// (`dt = 0.5`, `visc = 0.001`, 20 history slices).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FluidParams {
    /// Simulation time step per tick.
    pub dt: f64,
    /// Fluid viscosity.
    pub visc: f64,
    /// Number of grid snapshots retained in the history buffer.
    pub history_depth: usize,
}

impl Default for FluidParams {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            visc: DEFAULT_VISCOSITY,
            history_depth: DEFAULT_HISTORY_DEPTH,
        }
    }
}

impl FluidParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            dt: param_f64(params, "dt", DEFAULT_DT),
            visc: param_f64(params, "visc", DEFAULT_VISCOSITY),
            history_depth: param_usize(params, "history_depth", DEFAULT_HISTORY_DEPTH),
        }
    }
}

/// The complete simulation state: grid, spectral plans, history, seeds.
///
/// Exclusively owns its [`Grid`]; the renderer reads the exposed views
/// between ticks and mutates only through `insert_forces`, the seeding
/// calls, and the parameter setters. Single-threaded by construction —
/// every mutation entry point takes `&mut self`, so a concurrent port must
/// serialize access behind one mutex or a single-writer queue.
pub struct Simulation {
    grid: Grid,
    transform: SpectralTransform,
    history: HistoryBuffer,
    seeder: TrajectorySeeder,
    dt: f64,
    visc: f64,
    frozen: bool,
}

impl Simulation {
    /// Creates a zero-initialized simulation on a grid of side `dim`.
    ///
    /// Returns `SimError::InvalidDimensions` if `dim` is zero or odd.
    /// Allocation happens once here; the solve itself never allocates.
    pub fn new(dim: usize, params: FluidParams) -> Result<Self, SimError> {
        let grid = Grid::new(dim)?;
        let transform = SpectralTransform::new(dim)?;
        let history = HistoryBuffer::new(params.history_depth, &grid);
        Ok(Self {
            grid,
            transform,
            history,
            seeder: TrajectorySeeder::new(),
            dt: params.dt,
            visc: params.visc,
            frozen: false,
        })
    }

    /// Creates a simulation from a JSON params object.
    pub fn from_json(dim: usize, json_params: &Value) -> Result<Self, SimError> {
        Self::new(dim, FluidParams::from_json(json_params))
    }

    /// Stages this tick's forces: decay density into the scratch buffer,
    /// decay the user forces, and copy them into the impulse buffers the
    /// solve reads first.
    pub(crate) fn set_forces(&mut self) {
        let g = &mut self.grid;
        g.rho0.copy_scaled_from(&g.rho, DENSITY_DECAY);
        g.fx.scale_assign(FORCE_DECAY);
        g.fy.scale_assign(FORCE_DECAY);
        g.vx0.spatial_mut().copy_from_slice(g.fx.data());
        g.vy0.spatial_mut().copy_from_slice(g.fy.data());
    }

    /// Advances the velocity field by one time step.
    pub(crate) fn solve(&mut self) {
        let dt = self.dt;
        let visc = self.visc;
        let grid = &mut self.grid;
        let transform = &mut self.transform;
        let n = grid.dim;
        let nn = n * n;
        let stride = n + 2;

        // Force impulse: after this, the previous-step buffers hold the
        // pre-advection field to sample from.
        {
            let vx = grid.vx.spatial_mut();
            let vy = grid.vy.spatial_mut();
            let vx0 = grid.vx0.spatial_mut();
            let vy0 = grid.vy0.spatial_mut();
            for i in 0..nn {
                vx[i] += dt * vx0[i];
                vx0[i] = vx[i];
                vy[i] += dt * vy0[i];
                vy0[i] = vy[i];
            }
        }

        // Backward semi-Lagrangian advection of both components along the
        // pre-advection field.
        advect(
            n,
            dt,
            grid.vx0.spatial(),
            grid.vy0.spatial(),
            grid.vx0.spatial(),
            grid.vx.spatial_mut(),
        );
        advect(
            n,
            dt,
            grid.vx0.spatial(),
            grid.vy0.spatial(),
            grid.vy0.spatial(),
            grid.vy.spatial_mut(),
        );

        // Stage the advected field at the spectral stride and transform.
        grid.vx0.pack_from_spatial(&grid.vx);
        grid.vy0.pack_from_spatial(&grid.vy);
        transform.forward(&mut grid.vx0);
        transform.forward(&mut grid.vy0);

        // Joint spectral diffusion + projection, diagonal per wavenumber
        // (kx, ky) with r = kx^2 + ky^2: damp by exp(-r dt visc) and
        // project (U, V) onto the subspace orthogonal to the wavenumber,
        // which zeroes the Fourier divergence. The zero wavenumber (mean
        // flow) is left unconstrained. `i` steps by 2 over interleaved
        // (re, im) pairs; `j` folds at n/2 per the half-complex convention.
        {
            let vx0 = grid.vx0.data_mut();
            let vy0 = grid.vy0.data_mut();
            for i in (0..=n).step_by(2) {
                let kx = 0.5 * i as f64;
                for j in 0..n {
                    let ky = if j <= n / 2 {
                        j as f64
                    } else {
                        j as f64 - n as f64
                    };
                    let r = kx * kx + ky * ky;
                    if r == 0.0 {
                        continue;
                    }
                    let damp = (-r * dt * visc).exp();
                    let base = i + stride * j;
                    let u = [vx0[base], vx0[base + 1]];
                    let v = [vy0[base], vy0[base + 1]];
                    vx0[base] = damp * ((1.0 - kx * kx / r) * u[0] - kx * ky / r * v[0]);
                    vx0[base + 1] = damp * ((1.0 - kx * kx / r) * u[1] - kx * ky / r * v[1]);
                    vy0[base] = damp * (-ky * kx / r * u[0] + (1.0 - ky * ky / r) * v[0]);
                    vy0[base + 1] = damp * (-ky * kx / r * u[1] + (1.0 - ky * ky / r) * v[1]);
                }
            }
        }

        transform.inverse(&mut grid.vx0);
        transform.inverse(&mut grid.vy0);

        // Unpack to the spatial stride; the transform pair is unnormalized.
        {
            let norm = 1.0 / nn as f64;
            let vx = grid.vx.spatial_mut();
            let src = grid.vx0.data();
            for j in 0..n {
                for i in 0..n {
                    vx[i + n * j] = norm * src[i + stride * j];
                }
            }
            let vy = grid.vy.spatial_mut();
            let src = grid.vy0.data();
            for j in 0..n {
                for i in 0..n {
                    vy[i + n * j] = norm * src[i + stride * j];
                }
            }
        }
    }

    /// Advects the scalar density along the already-solved velocity field.
    ///
    /// Pure advection: density is carried, not diffused. Overwrites `rho`
    /// entirely from the `rho0` staged by [`set_forces`](Self::set_forces).
    pub(crate) fn diffuse_matter(&mut self) {
        let g = &mut self.grid;
        let n = g.dim;
        advect(
            n,
            self.dt,
            g.vx.spatial(),
            g.vy.spatial(),
            g.rho0.data(),
            g.rho.data_mut(),
        );
    }

    /// Adds `(dx, dy)` to the force field at cell `(x, y)` and seeds matter
    /// there. The sole production path for new momentum and smoke.
    ///
    /// Returns `SimError::CellOutOfBounds` if `(x, y)` lies outside
    /// `[0, dim)`; callers are expected to pre-clamp.
    pub fn insert_forces(&mut self, x: usize, y: usize, dx: f64, dy: f64) -> Result<(), SimError> {
        let dim = self.grid.dim;
        if x >= dim || y >= dim {
            return Err(SimError::CellOutOfBounds { x, y, dim });
        }
        let idx = y * dim + x;
        self.grid.fx.data_mut()[idx] += dx;
        self.grid.fy.data_mut()[idx] += dy;
        self.grid.rho.data_mut()[idx] = MATTER_SEED;
        Ok(())
    }

    /// Adds a streamline seed point (dropped silently at the cap).
    pub fn add_seedpoint(&mut self, point: Vec2) {
        self.seeder.add_seedpoint(point);
    }

    /// Adds a stream-surface rib along `p1 -> p2` (dropped silently at the cap).
    pub fn add_streamsurface(&mut self, p1: Vec2, p2: Vec2) {
        self.seeder.add_streamsurface(p1, p2);
    }

    /// Adjusts the time step by `delta`.
    pub fn set_timestep_delta(&mut self, delta: f64) {
        self.dt += delta;
    }

    /// Scales the viscosity by `multiplier`.
    pub fn set_viscosity_multiplier(&mut self, multiplier: f64) {
        self.visc *= multiplier;
    }

    /// Flips the freeze gate. A frozen simulation ignores `step()`.
    pub fn toggle_frozen(&mut self) {
        self.frozen = !self.frozen;
    }

    /// Changes the history depth, resizing the buffer immediately.
    pub fn set_history_depth(&mut self, depth: usize) {
        self.history.set_depth(depth, &self.grid);
    }

    /// Re-initializes the grid: zeroes all fields, clears seed points and
    /// stream surfaces, and refills the history with zero-grid snapshots.
    /// Parameters keep their current values.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.seeder.clear();
        self.history.rebuild(&self.grid);
    }

    /// Grid side length in cells.
    pub fn dim(&self) -> usize {
        self.grid.dim
    }

    /// Current time step.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Current viscosity.
    pub fn viscosity(&self) -> f64 {
        self.visc
    }

    /// Whether the freeze gate is set.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Current x-velocity, `dim * dim` samples at row stride `dim`.
    pub fn velocity_x(&self) -> &[f64] {
        self.grid.velocity_x()
    }

    /// Current y-velocity, `dim * dim` samples at row stride `dim`.
    pub fn velocity_y(&self) -> &[f64] {
        self.grid.velocity_y()
    }

    /// User-controlled x-force field.
    pub fn force_x(&self) -> &Field {
        self.grid.force_x()
    }

    /// User-controlled y-force field.
    pub fn force_y(&self) -> &Field {
        self.grid.force_y()
    }

    /// Smoke density at the current moment.
    pub fn density(&self) -> &Field {
        self.grid.density()
    }

    /// The snapshot history, oldest first.
    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// The current streamline seed points.
    pub fn seed_points(&self) -> &[Vec2] {
        self.seeder.seed_points()
    }

    /// The current stream-surface strips, most recent first.
    pub fn surfaces(&self) -> impl ExactSizeIterator<Item = &SurfaceStrip> {
        self.seeder.surfaces()
    }

    /// Mutable strip access for the renderer's per-tick advancement.
    pub fn surfaces_mut(&mut self) -> impl ExactSizeIterator<Item = &mut SurfaceStrip> {
        self.seeder.surfaces_mut()
    }
}

impl Engine for Simulation {
    /// Runs one complete tick, or nothing when frozen. Always `Ok`: the
    /// solve operates on preallocated fixed-size arrays and cannot fail.
    fn step(&mut self) -> Result<(), SimError> {
        if self.frozen {
            return Ok(());
        }
        self.set_forces();
        self.solve();
        self.diffuse_matter();
        self.history.append(&self.grid);
        Ok(())
    }

    fn field(&self) -> &Field {
        self.grid.density()
    }

    fn params(&self) -> Value {
        json!({
            "dt": self.dt,
            "visc": self.visc,
            "frozen": self.frozen,
            "history_depth": self.history.depth(),
            "dim": self.grid.dim,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "dt": {
                "type": "number",
                "default": DEFAULT_DT,
                "min": 0.0,
                "max": 100.0,
                "description": "Simulation time step per tick"
            },
            "visc": {
                "type": "number",
                "default": DEFAULT_VISCOSITY,
                "min": 0.001,
                "max": 100.0,
                "description": "Fluid viscosity"
            },
            "frozen": {
                "type": "boolean",
                "default": false,
                "description": "Freeze gate checked before each tick"
            },
            "history_depth": {
                "type": "integer",
                "default": DEFAULT_HISTORY_DEPTH,
                "min": 0,
                "max": 100,
                "description": "Number of grid snapshots retained"
            }
        })
    }
}

/// Backward semi-Lagrangian trace over the periodic grid.
///
/// For every cell, steps back along the carrier field `(ux, uy)` by `dt`
/// from the cell's continuous-space center, wraps modulo `n`, and
/// bilinearly interpolates the four neighboring samples of `src` into
/// `dst`. All slices use row stride `n`; `src` may alias `ux` or `uy`
/// (velocity self-advection does exactly that).
fn advect(n: usize, dt: f64, ux: &[f64], uy: &[f64], src: &[f64], dst: &mut [f64]) {
    let nf = n as f64;
    let ni = n as isize;
    for i in 0..n {
        for j in 0..n {
            let idx = i + n * j;
            let x = (i as f64 + 0.5) / nf;
            let y = (j as f64 + 0.5) / nf;
            let x0 = nf * (x - dt * ux[idx]) - 0.5;
            let y0 = nf * (y - dt * uy[idx]) - 0.5;
            let s = x0 - x0.floor();
            let t = y0 - y0.floor();
            let i0 = (x0.floor() as isize).rem_euclid(ni) as usize;
            let j0 = (y0.floor() as isize).rem_euclid(ni) as usize;
            let i1 = (i0 + 1) % n;
            let j1 = (j0 + 1) % n;
            dst[idx] = (1.0 - s) * ((1.0 - t) * src[i0 + n * j0] + t * src[i0 + n * j1])
                + s * ((1.0 - t) * src[i1 + n * j0] + t * src[i1 + n * j1]);
        }
    }
}
