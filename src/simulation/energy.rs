//! Energy bookkeeping for a single charge cycle.
//!
//! The model is an aggregate, not a time integration. Resistive and leakage
//! losses use the mean charging current `V0/(2R)` and the mean charging
//! voltage `V0/2` over one time constant. Three further losses are fixed
//! fractions of the stored energy; these are calibration constants, not
//! measured quantities.

use crate::capacitor::Capacitor;
use crate::physics::{esr_power_loss, stored_energy, temperature_adjusted_capacitance, time_constant};

use super::REFERENCE_TEMPERATURE_C;

/// Empirical losses expressed as fractions of the stored energy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LossFractions {
    /// Dielectric absorption and polarization loss
    pub dielectric: f64,
    /// Plate and terminal resistance loss
    pub plate: f64,
    /// Self-discharge over the charging period
    pub self_discharge: f64,
}

impl LossFractions {
    /// 3% dielectric, 5% plate/terminal, 2% self-discharge.
    pub const DEFAULT: LossFractions = LossFractions {
        dielectric: 0.03,
        plate: 0.05,
        self_discharge: 0.02,
    };

    /// No empirical losses; only ESR and leakage remain.
    pub const NONE: LossFractions = LossFractions {
        dielectric: 0.0,
        plate: 0.0,
        self_discharge: 0.0,
    };

    /// Sum of all fractions.
    pub fn total(&self) -> f64 {
        self.dielectric + self.plate + self.self_discharge
    }
}

impl Default for LossFractions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Every term of the energy balance, in joules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyBreakdown {
    pub stored: f64,
    pub esr_loss: f64,
    pub leakage_loss: f64,
    pub dielectric_loss: f64,
    pub plate_loss: f64,
    pub self_discharge_loss: f64,
}

impl EnergyBreakdown {
    /// Sum of all loss terms.
    pub fn total_loss(&self) -> f64 {
        self.esr_loss
            + self.leakage_loss
            + self.dielectric_loss
            + self.plate_loss
            + self.self_discharge_loss
    }

    /// Sum of the fixed-fraction losses (dielectric, plate, self-discharge).
    pub fn empirical_loss(&self) -> f64 {
        self.dielectric_loss + self.plate_loss + self.self_discharge_loss
    }

    /// Stored energy as a percentage of stored plus lost energy.
    ///
    /// Returns 0 when the denominator is not positive.
    pub fn efficiency(&self) -> f64 {
        let total = self.stored + self.total_loss();
        if total > 0.0 {
            100.0 * self.stored / total
        } else {
            0.0
        }
    }

    /// Labelled terms, stored energy first.
    pub fn terms(&self) -> [(&'static str, f64); 6] {
        [
            ("stored", self.stored),
            ("esr", self.esr_loss),
            ("leakage", self.leakage_loss),
            ("dielectric", self.dielectric_loss),
            ("plate", self.plate_loss),
            ("self_discharge", self.self_discharge_loss),
        ]
    }
}

/// Compute the energy balance at the given calibration.
pub fn energy_breakdown_with(
    capacitor: &Capacitor,
    resistance: f64,
    v0: f64,
    temperature: f64,
    reference_temperature: f64,
    fractions: &LossFractions,
) -> EnergyBreakdown {
    let c_eff = temperature_adjusted_capacitance(
        capacitor.capacitance(),
        capacitor.temp_coeff(),
        temperature,
        reference_temperature,
    );

    let stored = stored_energy(c_eff, v0);
    let tau = time_constant(resistance, c_eff);

    let avg_current = v0 / (2.0 * resistance);
    let esr_loss = esr_power_loss(capacitor.esr(), avg_current) * tau;

    let avg_voltage = v0 / 2.0;
    let leakage_current = capacitor.leakage() * avg_voltage;
    let leakage_loss = leakage_current * v0 * tau;

    EnergyBreakdown {
        stored,
        esr_loss,
        leakage_loss,
        dielectric_loss: stored * fractions.dielectric,
        plate_loss: stored * fractions.plate,
        self_discharge_loss: stored * fractions.self_discharge,
    }
}

/// Energy balance at the 25°C reference and default loss fractions.
pub fn energy_breakdown(
    capacitor: &Capacitor,
    resistance: f64,
    v0: f64,
    temperature: f64,
) -> EnergyBreakdown {
    energy_breakdown_with(
        capacitor,
        resistance,
        v0,
        temperature,
        REFERENCE_TEMPERATURE_C,
        &LossFractions::DEFAULT,
    )
}

/// Charge-cycle efficiency in percent.
///
/// Never fails: degenerate inputs yield whatever the arithmetic yields, and
/// a non-positive energy total yields 0.
pub fn energy_efficiency(capacitor: &Capacitor, resistance: f64, v0: f64, temperature: f64) -> f64 {
    energy_breakdown(capacitor, resistance, v0, temperature).efficiency()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn ideal(capacitance: f64) -> Capacitor {
        Capacitor::new("ideal", capacitance, 0.0, 0.0, 0.0).unwrap()
    }

    #[test]
    fn test_empirical_losses_only() {
        // With no ESR or leakage only the 10% empirical losses remain
        let eff = energy_efficiency(&ideal(100e-6), 100.0, 10.0, 25.0);
        assert_relative_eq!(eff, 100.0 / 1.1, max_relative = 1e-12);
    }

    #[test]
    fn test_breakdown_terms() {
        // C = 100µF, R = 100Ω, V0 = 10V, ESR = 1Ω, leakage = 1µA/V
        let cap = Capacitor::new("test", 100e-6, 1.0, 1e-6, 0.0).unwrap();
        let b = energy_breakdown(&cap, 100.0, 10.0, 25.0);

        let tau = 100.0 * 100e-6;
        assert_relative_eq!(b.stored, 5e-3, max_relative = 1e-12);
        // I_avg = 10 / 200 = 50mA, P = 2.5mW
        assert_relative_eq!(b.esr_loss, 2.5e-3 * tau, max_relative = 1e-12);
        // I_leak = 1e-6 · 5 = 5µA, E = 5µA · 10V · τ
        assert_relative_eq!(b.leakage_loss, 5e-5 * tau, max_relative = 1e-12);
        assert_relative_eq!(b.dielectric_loss, 1.5e-4, max_relative = 1e-12);
        assert_relative_eq!(b.plate_loss, 2.5e-4, max_relative = 1e-12);
        assert_relative_eq!(b.self_discharge_loss, 1e-4, max_relative = 1e-12);
        assert_relative_eq!(b.empirical_loss(), 5e-4, max_relative = 1e-12);

        let expected = 100.0 * b.stored / (b.stored + b.total_loss());
        assert_relative_eq!(b.efficiency(), expected);
    }

    #[test]
    fn test_no_losses_is_one_hundred_percent() {
        let cap = ideal(1e-6);
        let b = energy_breakdown_with(&cap, 10.0, 5.0, 25.0, 25.0, &LossFractions::NONE);
        assert_eq!(b.total_loss(), 0.0);
        assert_eq!(b.efficiency(), 100.0);
    }

    #[test]
    fn test_zero_voltage_falls_back_to_zero() {
        assert_eq!(energy_efficiency(&ideal(1e-6), 100.0, 0.0, 25.0), 0.0);
    }

    #[test]
    fn test_temperature_changes_stored_energy() {
        let cap = Capacitor::new("warm", 1e-6, 0.0, 0.0, 0.01).unwrap();
        let cold = energy_breakdown(&cap, 100.0, 10.0, 25.0);
        let hot = energy_breakdown(&cap, 100.0, 10.0, 35.0);
        assert_relative_eq!(hot.stored, cold.stored * 1.1, max_relative = 1e-12);
    }

    #[test]
    fn test_default_fractions() {
        assert_eq!(LossFractions::default(), LossFractions::DEFAULT);
        assert_relative_eq!(LossFractions::DEFAULT.total(), 0.10, max_relative = 1e-12);
    }

    proptest! {
        #[test]
        fn efficiency_is_bounded(
            c in 1e-9f64..1e-2,
            esr in 0.0f64..10.0,
            leakage in 0.0f64..1e-3,
            r in 1.0f64..1e4,
            v0 in 0.1f64..100.0,
            t in -40.0f64..125.0,
        ) {
            let cap = Capacitor::new("prop", c, esr, leakage, 0.0).unwrap();
            let eff = energy_efficiency(&cap, r, v0, t);
            prop_assert!(eff > 0.0 && eff < 100.0);
        }

        #[test]
        fn efficiency_is_deterministic(
            c in 1e-9f64..1e-2,
            esr in 0.0f64..10.0,
            r in 1.0f64..1e4,
            v0 in 0.1f64..100.0,
        ) {
            let cap = Capacitor::new("prop", c, esr, 1e-6, 0.001).unwrap();
            let a = energy_efficiency(&cap, r, v0, 60.0);
            let b = energy_efficiency(&cap, r, v0, 60.0);
            prop_assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}
