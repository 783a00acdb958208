//! The core `Engine` trait implemented by the fluid simulation.
//!
//! The trait is object-safe so a driver can hold `Box<dyn Engine>` and swap
//! simulation backends at runtime without knowing the concrete type.

use crate::error::SimError;
use crate::field::Field;
use serde_json::Value;

/// Core trait for step-based grid simulations.
///
/// Each engine advances its state one tick at a time and exposes a primary
/// scalar [`Field`] (for the fluid simulation, the smoke density) that a
/// downstream renderer reads between ticks.
///
/// This trait is **object-safe**: `Box<dyn Engine>` and `&dyn Engine` work
/// for runtime polymorphism.
pub trait Engine {
    /// Advance the simulation by one tick.
    ///
    /// Implementations run to completion before returning; there is no
    /// partial-progress state visible afterwards.
    fn step(&mut self) -> Result<(), SimError>;

    /// The primary scalar field output of the engine.
    fn field(&self) -> &Field;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;
}
