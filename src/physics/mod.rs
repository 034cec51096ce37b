//! Closed-form RC physics kernel.
//!
//! Every function here is pure and total over `f64`. No validation is
//! performed: a zero time constant divides by zero and negative
//! capacitances produce meaningless results. Callers that need checked
//! behavior go through [`Simulator`](crate::Simulator).
//!
//! ## Equations
//!
//! ```text
//! τ        = R·C
//! Vc(t)    = V0·(1 − e^(−t/τ))      charging
//! Vc(t)    = V0·e^(−t/τ)            discharging
//! E        = ½·C·V²
//! P_esr    = I²·ESR
//! C(T)     = C0·(1 + α·(T − T0))
//! V_leak   = V0·e^(−k·t)
//! ```

/// RC time constant `τ = R·C` in seconds.
#[inline]
pub fn time_constant(resistance: f64, capacitance: f64) -> f64 {
    resistance * capacitance
}

/// Capacitor voltage while charging from 0 V towards `v0` through `resistance`.
///
/// Monotonically increasing in `t` and asymptotic to `v0`.
#[inline]
pub fn charge_voltage(v0: f64, resistance: f64, capacitance: f64, t: f64) -> f64 {
    let tau = time_constant(resistance, capacitance);
    v0 * (1.0 - (-t / tau).exp())
}

/// Capacitor voltage while discharging from `v0` through `resistance`.
///
/// Monotonically decreasing in `t` and asymptotic to 0 V.
#[inline]
pub fn discharge_voltage(v0: f64, resistance: f64, capacitance: f64, t: f64) -> f64 {
    let tau = time_constant(resistance, capacitance);
    v0 * (-t / tau).exp()
}

/// Energy stored in a capacitor at voltage `voltage`, in joules.
#[inline]
pub fn stored_energy(capacitance: f64, voltage: f64) -> f64 {
    0.5 * capacitance * voltage * voltage
}

/// Power dissipated in the equivalent series resistance at `current`, in watts.
#[inline]
pub fn esr_power_loss(esr: f64, current: f64) -> f64 {
    current * current * esr
}

/// Capacitance after applying a linear temperature coefficient.
///
/// `temp_coeff` is a fraction per degree, so `0.001` is 0.1 %/°C. The
/// result is not clamped and goes negative for extreme inputs.
#[inline]
pub fn temperature_adjusted_capacitance(
    nominal: f64,
    temp_coeff: f64,
    temperature: f64,
    reference_temperature: f64,
) -> f64 {
    nominal * (1.0 + temp_coeff * (temperature - reference_temperature))
}

/// First-order self-discharge through the dielectric.
///
/// This is an approximation with `leakage` used directly as the decay
/// rate. It is independent of the RC phase logic in
/// [`simulation`](crate::simulation).
#[inline]
pub fn leakage_decay(v0: f64, leakage: f64, t: f64) -> f64 {
    v0 * (-leakage * t).exp()
}
