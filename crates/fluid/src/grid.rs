//! The simulation grid and its immutable snapshots.
//!
//! A [`Grid`] owns the five scalar fields of the simulation over a square
//! periodic domain of side `dim`. The velocity fields (current and
//! previous) use the padded layout so the previous-step buffers can be
//! transformed in place; forces and densities are plain `dim * dim` fields.
//! The grid is exclusively owned by the [`Simulation`](crate::Simulation);
//! everything external sees read-only spatial views.

use smoke_engine_core::error::SimError;
use smoke_engine_core::field::{Field, PaddedField};

/// The five scalar fields of the simulation plus their scratch twins.
#[derive(Debug, Clone)]
pub struct Grid {
    pub(crate) dim: usize,
    /// Velocity at the current moment.
    pub(crate) vx: PaddedField,
    pub(crate) vy: PaddedField,
    /// Velocity at the previous moment; doubles as the force-impulse stage
    /// and as the in-place spectral buffer during the solve.
    pub(crate) vx0: PaddedField,
    pub(crate) vy0: PaddedField,
    /// User-controlled forces, decayed each tick.
    pub(crate) fx: Field,
    pub(crate) fy: Field,
    /// Smoke density, current and previous.
    pub(crate) rho: Field,
    pub(crate) rho0: Field,
}

impl Grid {
    /// Creates a zero-initialized grid of side `dim`.
    ///
    /// Returns `SimError::InvalidDimensions` if `dim` is zero or odd (the
    /// packed spectral layout requires an even side).
    pub fn new(dim: usize) -> Result<Self, SimError> {
        Ok(Self {
            dim,
            vx: PaddedField::new(dim)?,
            vy: PaddedField::new(dim)?,
            vx0: PaddedField::new(dim)?,
            vy0: PaddedField::new(dim)?,
            fx: Field::new(dim)?,
            fy: Field::new(dim)?,
            rho: Field::new(dim)?,
            rho0: Field::new(dim)?,
        })
    }

    /// Side length in cells.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Current x-velocity, `dim * dim` samples at row stride `dim`.
    pub fn velocity_x(&self) -> &[f64] {
        self.vx.spatial()
    }

    /// Current y-velocity, `dim * dim` samples at row stride `dim`.
    pub fn velocity_y(&self) -> &[f64] {
        self.vy.spatial()
    }

    /// User-controlled x-force field.
    pub fn force_x(&self) -> &Field {
        &self.fx
    }

    /// User-controlled y-force field.
    pub fn force_y(&self) -> &Field {
        &self.fy
    }

    /// Smoke density at the current moment.
    pub fn density(&self) -> &Field {
        &self.rho
    }

    /// Zeroes every field.
    pub fn clear(&mut self) {
        self.vx.clear();
        self.vy.clear();
        self.vx0.clear();
        self.vy0.clear();
        self.fx.clear();
        self.fy.clear();
        self.rho.clear();
        self.rho0.clear();
    }

    /// Deep-copies the current state into an immutable [`Snapshot`].
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            dim: self.dim,
            vx: self.vx.spatial().to_vec(),
            vy: self.vy.spatial().to_vec(),
            rho: self.rho.data().to_vec(),
            fx: self.fx.data().to_vec(),
            fy: self.fy.data().to_vec(),
        }
    }
}

/// An immutable deep copy of `(vx, vy, rho, fx, fy)` at one instant.
///
/// Stored in the [`HistoryBuffer`](crate::HistoryBuffer) to give the
/// renderer a stack of past "slices" faking a third (time) axis. Never
/// aliases the live grid.
#[derive(Debug, Clone)]
pub struct Snapshot {
    dim: usize,
    vx: Vec<f64>,
    vy: Vec<f64>,
    rho: Vec<f64>,
    fx: Vec<f64>,
    fy: Vec<f64>,
}

impl Snapshot {
    /// Side length in cells.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// x-velocity at the snapshot instant, row stride `dim`.
    pub fn velocity_x(&self) -> &[f64] {
        &self.vx
    }

    /// y-velocity at the snapshot instant, row stride `dim`.
    pub fn velocity_y(&self) -> &[f64] {
        &self.vy
    }

    /// Smoke density at the snapshot instant.
    pub fn density(&self) -> &[f64] {
        &self.rho
    }

    /// x-force at the snapshot instant.
    pub fn force_x(&self) -> &[f64] {
        &self.fx
    }

    /// y-force at the snapshot instant.
    pub fn force_y(&self) -> &[f64] {
        &self.fy
    }
}
