//! Capacitor validation.

use crate::error::{CapsimError, Result};

use super::Capacitor;

/// Validate a capacitor record for simulation.
///
/// Checks:
/// - Capacitance is finite and strictly positive
/// - ESR and leakage are finite and non-negative
/// - Temperature coefficient is finite
pub fn validate_capacitor(cap: &Capacitor) -> Result<()> {
    let name = cap.name().as_str();

    if !cap.capacitance().is_finite() || cap.capacitance() <= 0.0 {
        return Err(CapsimError::invalid_capacitor(
            name,
            format!("capacitance must be positive, got {:e} F", cap.capacitance()),
        ));
    }

    if !cap.esr().is_finite() || cap.esr() < 0.0 {
        return Err(CapsimError::invalid_capacitor(
            name,
            format!("ESR must be non-negative, got {} Ω", cap.esr()),
        ));
    }

    if !cap.leakage().is_finite() || cap.leakage() < 0.0 {
        return Err(CapsimError::invalid_capacitor(
            name,
            format!("leakage must be non-negative, got {:e} A/V", cap.leakage()),
        ));
    }

    if !cap.temp_coeff().is_finite() {
        return Err(CapsimError::invalid_capacitor(
            name,
            "temperature coefficient must be finite",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_capacitance() {
        assert!(Capacitor::new("C1", 0.0, 0.1, 0.0, 0.0).is_err());
        assert!(Capacitor::new("C1", -1e-6, 0.1, 0.0, 0.0).is_err());
        assert!(Capacitor::new("C1", f64::NAN, 0.1, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_rejects_negative_losses() {
        let err = Capacitor::new("C1", 1e-6, -0.1, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, CapsimError::InvalidCapacitor { .. }));
        assert!(Capacitor::new("C1", 1e-6, 0.1, -1e-9, 0.0).is_err());
    }

    #[test]
    fn test_accepts_negative_temp_coeff() {
        // NP0/C0G and class-2 ceramics drift downwards
        assert!(Capacitor::new("C1", 1e-6, 0.0, 0.0, -0.0015).is_ok());
        assert!(Capacitor::new("C1", 1e-6, 0.0, 0.0, f64::INFINITY).is_err());
    }
}
