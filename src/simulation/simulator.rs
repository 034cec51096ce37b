//! Checked simulator interface.

use tracing::{debug, trace};

use crate::capacitor::{validate_capacitor, Capacitor};
use crate::error::{CapsimError, Result};
use crate::physics::{temperature_adjusted_capacitance, time_constant};

use super::energy::{energy_breakdown_with, EnergyBreakdown, LossFractions};
use super::phase::{charge_discharge_curve, midpoint, phase_at, validate_time_samples, Phase};
use super::REFERENCE_TEMPERATURE_C;

/// Configuration for the simulator.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Temperature at which the nominal capacitance is specified (°C).
    pub reference_temperature: f64,
    /// Empirical loss fractions used by the energy balance.
    pub loss_fractions: LossFractions,
    /// Reject degenerate inputs instead of propagating NaN/∞.
    pub validate_inputs: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            reference_temperature: REFERENCE_TEMPERATURE_C,
            loss_fractions: LossFractions::DEFAULT,
            validate_inputs: true,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reference temperature (°C).
    pub fn with_reference_temperature(mut self, reference_temperature: f64) -> Self {
        self.reference_temperature = reference_temperature;
        self
    }

    /// Set the empirical loss fractions.
    pub fn with_loss_fractions(mut self, loss_fractions: LossFractions) -> Self {
        self.loss_fractions = loss_fractions;
        self
    }

    /// Enable or disable input validation.
    ///
    /// With validation off the simulator behaves like the free functions in
    /// [`simulation`](crate::simulation): garbage in, garbage out.
    pub fn with_validation(mut self, validate_inputs: bool) -> Self {
        self.validate_inputs = validate_inputs;
        self
    }
}

/// Result of a time-domain run.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Sample times (s)
    pub times: Vec<f64>,
    /// Capacitor voltage at each sample (V)
    pub voltages: Vec<f64>,
    /// Switch-over time from charging to discharging (s)
    pub midpoint: f64,
    /// Temperature-adjusted capacitance used for the whole run (F)
    pub effective_capacitance: f64,
    /// R·C_eff (s)
    pub time_constant: f64,
}

impl Waveform {
    pub fn len(&self) -> usize {
        self.voltages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voltages.is_empty()
    }

    /// Phase of each sample, in order.
    pub fn phases(&self) -> impl Iterator<Item = Phase> + '_ {
        self.times.iter().map(move |&t| phase_at(t, self.midpoint))
    }

    /// Iterate over `(t, v, phase)` triples.
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64, Phase)> + '_ {
        self.times
            .iter()
            .zip(&self.voltages)
            .zip(self.phases())
            .map(|((&t, &v), p)| (t, v, p))
    }

    /// Highest voltage reached during the run.
    pub fn peak_voltage(&self) -> f64 {
        self.voltages.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Simulator bound to one capacitor.
///
/// Holds no per-run state; every method is independent and may be called
/// from several threads at once.
#[derive(Debug, Clone)]
pub struct Simulator {
    capacitor: Capacitor,
    config: SimulatorConfig,
}

impl Simulator {
    /// Create a new simulator for the given capacitor with default configuration.
    pub fn new(capacitor: Capacitor) -> Self {
        Self::with_config(capacitor, SimulatorConfig::default())
    }

    /// Create a new simulator for the given capacitor with custom configuration.
    pub fn with_config(capacitor: Capacitor, config: SimulatorConfig) -> Self {
        Self { capacitor, config }
    }

    /// Get a reference to the capacitor.
    pub fn capacitor(&self) -> &Capacitor {
        &self.capacitor
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Capacitance at `temperature` relative to the configured reference.
    pub fn effective_capacitance(&self, temperature: f64) -> f64 {
        temperature_adjusted_capacitance(
            self.capacitor.capacitance(),
            self.capacitor.temp_coeff(),
            temperature,
            self.config.reference_temperature,
        )
    }

    /// Run a charge/discharge cycle over `time_samples`.
    pub fn run(
        &self,
        resistance: f64,
        v0: f64,
        temperature: f64,
        time_samples: &[f64],
    ) -> Result<Waveform> {
        let c_eff = self.checked_capacitance(resistance, v0, temperature)?;
        if self.config.validate_inputs {
            validate_time_samples(time_samples)?;
        }

        let tau = time_constant(resistance, c_eff);
        let mid = midpoint(time_samples).unwrap_or(0.0);
        debug!(
            capacitor = %self.capacitor.name(),
            resistance,
            v0,
            temperature,
            c_eff,
            tau,
            samples = time_samples.len(),
            "running charge/discharge cycle"
        );

        Ok(Waveform {
            times: time_samples.to_vec(),
            voltages: charge_discharge_curve(resistance, v0, c_eff, time_samples),
            midpoint: mid,
            effective_capacitance: c_eff,
            time_constant: tau,
        })
    }

    /// Voltage at each time sample; see [`Simulator::run`].
    pub fn simulate_behavior(
        &self,
        resistance: f64,
        v0: f64,
        temperature: f64,
        time_samples: &[f64],
    ) -> Result<Vec<f64>> {
        Ok(self.run(resistance, v0, temperature, time_samples)?.voltages)
    }

    /// Energy balance for one charge cycle.
    pub fn energy_breakdown(&self, resistance: f64, v0: f64, temperature: f64) -> Result<EnergyBreakdown> {
        self.checked_capacitance(resistance, v0, temperature)?;

        let breakdown = energy_breakdown_with(
            &self.capacitor,
            resistance,
            v0,
            temperature,
            self.config.reference_temperature,
            &self.config.loss_fractions,
        );
        trace!(
            capacitor = %self.capacitor.name(),
            stored = breakdown.stored,
            total_loss = breakdown.total_loss(),
            "energy breakdown"
        );
        Ok(breakdown)
    }

    /// Charge-cycle efficiency in percent.
    pub fn energy_efficiency(&self, resistance: f64, v0: f64, temperature: f64) -> Result<f64> {
        Ok(self.energy_breakdown(resistance, v0, temperature)?.efficiency())
    }

    /// Validate run parameters and return the effective capacitance.
    fn checked_capacitance(&self, resistance: f64, v0: f64, temperature: f64) -> Result<f64> {
        let c_eff = self.effective_capacitance(temperature);
        if !self.config.validate_inputs {
            return Ok(c_eff);
        }

        validate_capacitor(&self.capacitor)?;

        if !resistance.is_finite() || resistance <= 0.0 {
            return Err(CapsimError::invalid_parameter(
                "resistance",
                format!("must be positive, got {resistance} Ω"),
            ));
        }
        if !v0.is_finite() {
            return Err(CapsimError::invalid_parameter("v0", "must be finite"));
        }
        if !temperature.is_finite() {
            return Err(CapsimError::invalid_parameter("temperature", "must be finite"));
        }
        if !c_eff.is_finite() || c_eff <= 0.0 {
            return Err(CapsimError::invalid_parameter(
                "temperature",
                format!(
                    "effective capacitance at {temperature}°C is {c_eff:e} F; temperature coefficient drives it non-positive"
                ),
            ));
        }

        Ok(c_eff)
    }
}
