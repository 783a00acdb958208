//! Stable-fluids smoke simulation on a square periodic grid.
//!
//! Implements Stam's unconditionally stable solver: explicit force
//! impulses, backward semi-Lagrangian advection, and a joint spectral
//! viscous-damping and incompressibility-projection step over a
//! half-complex 2D transform. Around the solver sit the pieces an
//! interactive front end needs: per-cell force and matter injection with
//! per-tick decay, a rolling snapshot history for time-axis stacking, and
//! capped seed-point and stream-surface collections for trajectory
//! visualization.
//!
//! [`Simulation`] is the entry point; it implements the
//! [`Engine`](smoke_engine_core::Engine) trait from the core crate.

#![deny(unsafe_code)]

mod grid;
mod history;
mod seeds;
mod simulation;
mod spectral;

pub use grid::{Grid, Snapshot};
pub use history::HistoryBuffer;
pub use seeds::{SurfaceStrip, TrajectorySeeder, SEED_POINT_CAP, STREAM_SURFACE_CAP, STRIP_POINTS};
pub use simulation::{FluidParams, Simulation};
pub use spectral::SpectralTransform;
