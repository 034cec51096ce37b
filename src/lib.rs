//! # Capsim Core
//!
//! Time-domain electrical and thermal model of a capacitor in a series RC
//! circuit.
//!
//! This library provides:
//! - Closed-form charge/discharge, energy, ESR loss, temperature drift and
//!   leakage equations
//! - A simulation driver that splits a time base into a charging half and a
//!   discharging half
//! - An energy balance combining stored energy with ESR, leakage and
//!   empirical losses into an efficiency figure
//! - Temperature and operating-point sweeps
//!
//! ## Architecture
//!
//! - [`physics`] - Pure closed-form equations, no validation
//! - [`capacitor`] - Immutable capacitor specification records
//! - [`simulation`] - Charge/discharge sequencing, energy balance and sweeps
//! - [`report`] - CSV and table output (CLI only)
//!
//! ## Usage
//!
//! ```
//! use capsim_core::{simulation::linspace, Capacitor, Simulator};
//!
//! let cap = Capacitor::from_datasheet("Electrolytic", 100.0, 0.1, 0.01, 0.05)?;
//! let sim = Simulator::new(cap);
//!
//! let times = linspace(0.0, 0.1, 200);
//! let waveform = sim.run(100.0, 10.0, 40.0, &times)?;
//! assert_eq!(waveform.len(), 200);
//!
//! let efficiency = sim.energy_efficiency(100.0, 10.0, 40.0)?;
//! assert!(efficiency > 0.0 && efficiency < 100.0);
//! # Ok::<(), capsim_core::CapsimError>(())
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! capsim simulate --capacitance 100 --esr 0.1 -r 100 -v 10 --duration 0.1 > curve.csv
//! ```

pub mod capacitor;
pub mod error;
pub mod physics;
pub mod simulation;

#[cfg(feature = "cli")]
pub mod report;

// Re-export main types for convenience
pub use capacitor::Capacitor;
pub use error::{CapsimError, Result};
pub use simulation::{energy_efficiency, simulate_behavior, Simulator, SimulatorConfig};
