//! Charge/discharge sequencing over a time base.
//!
//! A run is split at the midpoint of its final sample. Samples at or before
//! the midpoint follow the charging curve from `t = 0`. Samples after it
//! follow the discharging curve with its clock restarted at the midpoint,
//! i.e. evaluated at `t − midpoint`.

use std::fmt;

use tracing::warn;

use crate::capacitor::Capacitor;
use crate::error::{CapsimError, Result};
use crate::physics::{charge_voltage, discharge_voltage, temperature_adjusted_capacitance};

use super::REFERENCE_TEMPERATURE_C;

/// Which half of the cycle a sample belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Charging,
    Discharging,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Charging => write!(f, "charge"),
            Phase::Discharging => write!(f, "discharge"),
        }
    }
}

/// Classify a sample time. Ties go to [`Phase::Charging`].
#[inline]
pub fn phase_at(t: f64, midpoint: f64) -> Phase {
    if t <= midpoint {
        Phase::Charging
    } else {
        Phase::Discharging
    }
}

/// Switch-over time for a sample sequence: half of the last sample.
///
/// Returns `None` for an empty sequence.
pub fn midpoint(time_samples: &[f64]) -> Option<f64> {
    time_samples.last().map(|&t_end| t_end / 2.0)
}

/// Check that a time base is non-empty, finite and non-decreasing.
pub fn validate_time_samples(time_samples: &[f64]) -> Result<()> {
    if time_samples.is_empty() {
        return Err(CapsimError::EmptyTimeSamples);
    }

    for (index, &t) in time_samples.iter().enumerate() {
        if !t.is_finite() {
            return Err(CapsimError::invalid_parameter(
                "time_samples",
                format!("t[{index}] is not finite"),
            ));
        }
        if index > 0 {
            let previous = time_samples[index - 1];
            if t < previous {
                return Err(CapsimError::UnorderedTimeSamples {
                    index,
                    previous,
                    current: t,
                });
            }
        }
    }

    Ok(())
}

/// Evaluate the charge/discharge curve for a fixed effective capacitance.
pub(crate) fn charge_discharge_curve(
    resistance: f64,
    v0: f64,
    effective_capacitance: f64,
    time_samples: &[f64],
) -> Vec<f64> {
    let Some(mid) = midpoint(time_samples) else {
        return Vec::new();
    };

    time_samples
        .iter()
        .map(|&t| match phase_at(t, mid) {
            Phase::Charging => charge_voltage(v0, resistance, effective_capacitance, t),
            Phase::Discharging => discharge_voltage(v0, resistance, effective_capacitance, t - mid),
        })
        .collect()
}

/// Voltage across the capacitor at each time sample.
///
/// The effective capacitance is computed once from `temperature` against
/// the 25°C reference and held for the whole run. The output has the same
/// length and order as `time_samples`; an empty input gives an empty
/// output. Nothing is validated.
pub fn simulate_behavior(
    capacitor: &Capacitor,
    resistance: f64,
    v0: f64,
    temperature: f64,
    time_samples: &[f64],
) -> Vec<f64> {
    let c_eff = temperature_adjusted_capacitance(
        capacitor.capacitance(),
        capacitor.temp_coeff(),
        temperature,
        REFERENCE_TEMPERATURE_C,
    );
    if c_eff <= 0.0 {
        warn!(
            capacitor = %capacitor.name(),
            temperature,
            c_eff,
            "temperature compensation gave non-positive capacitance"
        );
    }

    charge_discharge_curve(resistance, v0, c_eff, time_samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn film() -> Capacitor {
        Capacitor::new("Film", 10e-6, 0.05, 1e-9, 0.0).unwrap()
    }

    #[test]
    fn test_phase_boundary_is_charging() {
        assert_eq!(phase_at(0.5, 0.5), Phase::Charging);
        assert_eq!(phase_at(0.500001, 0.5), Phase::Discharging);
        assert_eq!(Phase::Charging.to_string(), "charge");
    }

    #[test]
    fn test_discharge_clock_restarts_at_midpoint() {
        let cap = film();
        let (r, v0) = (1000.0, 5.0);
        let tau = r * cap.capacitance();
        let samples = [0.0, 0.5, 0.75, 1.0];

        let v = simulate_behavior(&cap, r, v0, 25.0, &samples);
        assert_eq!(v.len(), samples.len());

        assert_eq!(v[0], 0.0);
        assert_relative_eq!(v[1], v0 * (1.0 - (-0.5 / tau).exp()), max_relative = 1e-12);
        assert_relative_eq!(v[2], v0 * (-0.25 / tau).exp(), max_relative = 1e-12);
        assert_relative_eq!(v[3], v0 * (-0.5 / tau).exp(), max_relative = 1e-12);
    }

    #[test]
    fn test_three_sample_run() {
        // midpoint = 0.5, so only t = 1.0 is past it
        let cap = Capacitor::new("Slow", 1e-3, 0.0, 0.0, 0.0).unwrap();
        let samples = [0.0, 0.5, 1.0];
        let v = simulate_behavior(&cap, 1000.0, 10.0, 25.0, &samples);

        let tau = 1.0;
        assert_eq!(v[0], 0.0);
        assert_relative_eq!(v[1], 10.0 * (1.0 - (-0.5f64 / tau).exp()), max_relative = 1e-12);
        assert_relative_eq!(v[2], 10.0 * (-0.5f64 / tau).exp(), max_relative = 1e-12);
    }

    #[test]
    fn test_single_sample_charges() {
        let cap = film();
        let v = simulate_behavior(&cap, 100.0, 10.0, 25.0, &[0.0]);
        assert_eq!(v, vec![0.0]);

        // 1ms > midpoint 0.5ms, so the lone sample discharges for 0.5ms
        let v = simulate_behavior(&cap, 100.0, 10.0, 25.0, &[0.001]);
        assert_relative_eq!(v[0], 10.0 * (-0.5f64).exp(), max_relative = 1e-12);
    }

    #[test]
    fn test_empty_samples() {
        assert!(simulate_behavior(&film(), 100.0, 10.0, 25.0, &[]).is_empty());
        assert_eq!(midpoint(&[]), None);
    }

    #[test]
    fn test_temperature_applied_once() {
        let cap = Capacitor::new("Drift", 10e-6, 0.0, 0.0, 0.002).unwrap();
        let samples = [0.0, 0.0005, 0.001, 0.002];
        let hot = simulate_behavior(&cap, 100.0, 10.0, 75.0, &samples);

        let c_eff = 10e-6 * 1.1;
        let expected = charge_discharge_curve(100.0, 10.0, c_eff, &samples);
        for (a, b) in hot.iter().zip(&expected) {
            assert_relative_eq!(*a, *b, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_non_positive_capacitance_still_runs() {
        // -1 %/°C at 150°C: C_eff = C0 · (1 − 1.25) < 0
        let cap = Capacitor::new("Drifty", 1e-6, 0.0, 0.0, -0.01).unwrap();
        let samples = [0.0, 0.25, 0.5, 0.75, 1.0];
        let v = simulate_behavior(&cap, 100.0, 10.0, 150.0, &samples);

        assert_eq!(v.len(), samples.len());
        assert_eq!(v[0], 0.0);
        // Negative τ makes the charging curve run away from V0
        assert!(v[1] < 0.0);
    }

    #[test]
    fn test_validate_time_samples() {
        assert!(validate_time_samples(&[0.0, 0.0, 1.0]).is_ok());
        assert!(matches!(
            validate_time_samples(&[]),
            Err(CapsimError::EmptyTimeSamples)
        ));
        assert!(matches!(
            validate_time_samples(&[0.0, 1.0, 0.5]),
            Err(CapsimError::UnorderedTimeSamples { index: 2, .. })
        ));
        assert!(validate_time_samples(&[0.0, f64::NAN]).is_err());
    }

    proptest! {
        #[test]
        fn output_matches_input_shape(n in 1usize..200, t_end in 1e-4f64..10.0) {
            let samples: Vec<f64> = (0..n).map(|i| t_end * i as f64 / n as f64).collect();
            let v = simulate_behavior(&film(), 100.0, 10.0, 25.0, &samples);
            prop_assert_eq!(v.len(), samples.len());
            prop_assert!(v.iter().all(|x| (0.0..=10.0).contains(x)));
        }

        #[test]
        fn runs_are_bit_identical(t in -40.0f64..125.0, v0 in 0.1f64..50.0) {
            let samples = [0.0, 0.1, 0.2, 0.3, 0.4];
            let a = simulate_behavior(&film(), 220.0, v0, t, &samples);
            let b = simulate_behavior(&film(), 220.0, v0, t, &samples);
            let a: Vec<u64> = a.iter().map(|x| x.to_bits()).collect();
            let b: Vec<u64> = b.iter().map(|x| x.to_bits()).collect();
            prop_assert_eq!(a, b);
        }
    }
}
