#![deny(unsafe_code)]
//! Core types and traits for the smoke-engine fluid simulation system.
//!
//! Provides the `Engine` trait, the `Field` and `PaddedField` grid buffers,
//! the `SimError` error type, and JSON parameter helpers. The numerical
//! solver itself lives in the `smoke-engine-fluid` crate; rendering and
//! input handling are downstream consumers and not part of this workspace.

pub mod engine;
pub mod error;
pub mod field;
pub mod params;

pub use engine::Engine;
pub use error::SimError;
pub use field::{Field, PaddedField};

/// 2D vector used by seed points, stream-surface strips, and trace math.
///
/// `DVec2` covers the vector operations the simulation needs (add, scale,
/// length, lerp) and `normalize_or_zero` gives the defined no-op behavior
/// for zero-length vectors.
pub use glam::DVec2 as Vec2;
