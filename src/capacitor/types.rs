//! Capacitor value type and its bounded label.

use std::fmt;

use crate::error::{CapsimError, Result};

use super::validate_capacitor;

/// Longest label a [`CapacitorName`] holds, in bytes.
pub const MAX_NAME_LEN: usize = 29;

/// A capacitor label of at most [`MAX_NAME_LEN`] bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CapacitorName(String);

impl CapacitorName {
    /// Create a label, rejecting anything longer than [`MAX_NAME_LEN`].
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.len() > MAX_NAME_LEN {
            return Err(CapsimError::NameTooLong {
                name,
                max: MAX_NAME_LEN,
            });
        }
        Ok(Self(name))
    }

    /// Create a label, cutting it to [`MAX_NAME_LEN`] bytes on a char boundary.
    pub fn truncated(name: &str) -> Self {
        if name.len() <= MAX_NAME_LEN {
            return Self(name.to_string());
        }
        let mut end = MAX_NAME_LEN;
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        Self(name[..end].to_string())
    }

    /// Get the label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CapacitorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CapacitorName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An immutable capacitor specification.
///
/// All quantities are SI:
/// - `capacitance` in farads
/// - `esr` in ohms
/// - `leakage` in amperes per volt
/// - `temp_coeff` as a fraction per °C (`0.001` = 0.1 %/°C)
#[derive(Debug, Clone, PartialEq)]
pub struct Capacitor {
    name: CapacitorName,
    capacitance: f64,
    esr: f64,
    leakage: f64,
    temp_coeff: f64,
}

impl Capacitor {
    /// Create a validated capacitor.
    ///
    /// Fails if the name is too long, the capacitance is not strictly
    /// positive, or ESR/leakage are negative.
    pub fn new(
        name: impl Into<String>,
        capacitance: f64,
        esr: f64,
        leakage: f64,
        temp_coeff: f64,
    ) -> Result<Self> {
        let cap = Self {
            name: CapacitorName::new(name)?,
            capacitance,
            esr,
            leakage,
            temp_coeff,
        };
        validate_capacitor(&cap)?;
        Ok(cap)
    }

    /// Create a capacitor without any checks.
    ///
    /// The name is truncated to [`MAX_NAME_LEN`] bytes. Degenerate values are
    /// kept as given and flow through the permissive driver functions.
    pub fn new_unchecked(
        name: &str,
        capacitance: f64,
        esr: f64,
        leakage: f64,
        temp_coeff: f64,
    ) -> Self {
        Self {
            name: CapacitorName::truncated(name),
            capacitance,
            esr,
            leakage,
            temp_coeff,
        }
    }

    /// Create a validated capacitor from datasheet units.
    ///
    /// # Arguments
    /// * `capacitance_uf` - Capacitance in µF
    /// * `esr` - ESR in Ω
    /// * `leakage_ua_per_v` - Leakage in µA/V
    /// * `temp_coeff_pct` - Temperature coefficient in %/°C
    pub fn from_datasheet(
        name: impl Into<String>,
        capacitance_uf: f64,
        esr: f64,
        leakage_ua_per_v: f64,
        temp_coeff_pct: f64,
    ) -> Result<Self> {
        Self::new(
            name,
            capacitance_uf * 1e-6,
            esr,
            leakage_ua_per_v * 1e-6,
            temp_coeff_pct / 100.0,
        )
    }

    pub fn name(&self) -> &CapacitorName {
        &self.name
    }

    /// Nominal capacitance at the reference temperature, in farads.
    pub fn capacitance(&self) -> f64 {
        self.capacitance
    }

    /// Equivalent series resistance, in ohms.
    pub fn esr(&self) -> f64 {
        self.esr
    }

    /// Leakage conductance, in amperes per volt.
    pub fn leakage(&self) -> f64 {
        self.leakage
    }

    /// Fractional capacitance change per °C.
    pub fn temp_coeff(&self) -> f64 {
        self.temp_coeff
    }

    /// Multi-line diagnostic dump of the capacitor fields.
    pub fn info(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Capacitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Capacitor: {}", self.name)?;
        writeln!(f, "Capacitance: {:.2e} F", self.capacitance)?;
        writeln!(f, "ESR: {:.3} Ω", self.esr)?;
        writeln!(f, "Leakage: {:.2e} A/V", self.leakage)?;
        write!(f, "Temperature Coefficient: {:.3} /°C", self.temp_coeff)
    }
}
