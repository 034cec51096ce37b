//! Simulation driver.
//!
//! This module sequences the physics kernel into runs. Two entry points
//! mirror each other:
//!
//! - The free functions [`simulate_behavior`] and [`energy_efficiency`]
//!   are permissive. They never fail and propagate NaN/∞ from degenerate
//!   input.
//! - [`Simulator`] wraps a capacitor with a [`SimulatorConfig`] and checks
//!   its inputs, returning [`CapsimError`](crate::CapsimError) on bad
//!   parameters.
//!
//! ## Charge/discharge cycle
//!
//! ```text
//!  V0 ┤        ╭──╮
//!     │      ╭─╯  │
//!     │    ╭─╯    ╰╮
//!     │  ╭─╯       ╰─╮
//!   0 ┼──╯           ╰────
//!     0     t_end/2     t_end
//!       charge │ discharge (clock restarts)
//! ```
//!
//! The effective capacitance is computed once per run from the ambient
//! temperature and held for every sample.

mod energy;
mod phase;
mod simulator;
mod sweep;

pub use energy::{energy_breakdown, energy_breakdown_with, energy_efficiency, EnergyBreakdown, LossFractions};
pub use phase::{midpoint, phase_at, simulate_behavior, validate_time_samples, Phase};
pub use simulator::{Simulator, SimulatorConfig, Waveform};
pub use sweep::{
    capacitance_vs_temperature, compare_capacitors, efficiency_landscape, linspace, voltage_surface, SweepGrid,
    TemperaturePoint,
};

/// Temperature at which nominal capacitance is specified (°C).
pub const REFERENCE_TEMPERATURE_C: f64 = 25.0;
