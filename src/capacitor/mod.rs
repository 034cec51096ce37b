//! Capacitor specification records.
//!
//! A [`Capacitor`] is an immutable value: it is cloned into each simulation
//! call and never shared or mutated. Records usually come from a datasheet
//! table, so [`Capacitor::from_datasheet`] accepts µF, µA/V and %/°C.

mod types;
mod validate;

pub use types::{Capacitor, CapacitorName, MAX_NAME_LEN};
pub use validate::validate_capacitor;
