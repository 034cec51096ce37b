//! Parameter sweeps built on the checked simulator.

use crate::capacitor::{Capacitor, CapacitorName};
use crate::error::{CapsimError, Result};

use super::simulator::{Simulator, SimulatorConfig};

/// Generates `n` linearly spaced samples in [start, stop].
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as f64 - 1.0);
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Capacitance at one temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperaturePoint {
    /// Temperature (°C)
    pub temperature: f64,
    /// Effective capacitance (F)
    pub capacitance: f64,
    /// Change from nominal (%)
    pub change_pct: f64,
}

/// A 2-D grid of results.
///
/// `values[i][j]` belongs to `rows[i]` and `cols[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepGrid {
    pub rows: Vec<f64>,
    pub cols: Vec<f64>,
    pub values: Vec<Vec<f64>>,
}

impl SweepGrid {
    /// Value at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied()
    }

    /// Largest value and its `(row, col)` coordinates.
    pub fn max(&self) -> Option<(f64, f64, f64)> {
        let mut best: Option<(f64, f64, f64)> = None;
        for (i, row) in self.values.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                if best.map_or(true, |(_, _, b)| v > b) {
                    best = Some((self.rows[i], self.cols[j], v));
                }
            }
        }
        best
    }
}

fn require_axis(name: &str, axis: &[f64]) -> Result<()> {
    if axis.is_empty() {
        return Err(CapsimError::invalid_sweep(format!("{name} axis is empty")));
    }
    Ok(())
}

/// Capacitance over a range of temperatures.
pub fn capacitance_vs_temperature(
    simulator: &Simulator,
    temperatures: &[f64],
) -> Result<Vec<TemperaturePoint>> {
    require_axis("temperature", temperatures)?;

    let nominal = simulator.capacitor().capacitance();
    Ok(temperatures
        .iter()
        .map(|&temperature| {
            let capacitance = simulator.effective_capacitance(temperature);
            TemperaturePoint {
                temperature,
                capacitance,
                change_pct: (capacitance / nominal - 1.0) * 100.0,
            }
        })
        .collect())
}

/// Voltage waveforms for a range of source resistances.
///
/// Rows are resistances, columns are the shared `time_samples`.
pub fn voltage_surface(
    simulator: &Simulator,
    resistances: &[f64],
    v0: f64,
    temperature: f64,
    time_samples: &[f64],
) -> Result<SweepGrid> {
    require_axis("resistance", resistances)?;

    let values = resistances
        .iter()
        .map(|&r| simulator.simulate_behavior(r, v0, temperature, time_samples))
        .collect::<Result<Vec<_>>>()?;

    Ok(SweepGrid {
        rows: resistances.to_vec(),
        cols: time_samples.to_vec(),
        values,
    })
}

/// Efficiency over a resistance × voltage grid.
///
/// Rows are resistances, columns are source voltages.
pub fn efficiency_landscape(
    simulator: &Simulator,
    resistances: &[f64],
    voltages: &[f64],
    temperature: f64,
) -> Result<SweepGrid> {
    require_axis("resistance", resistances)?;
    require_axis("voltage", voltages)?;

    let values = resistances
        .iter()
        .map(|&r| {
            voltages
                .iter()
                .map(|&v0| simulator.energy_efficiency(r, v0, temperature))
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SweepGrid {
        rows: resistances.to_vec(),
        cols: voltages.to_vec(),
        values,
    })
}

/// Efficiency landscapes for several capacitors under the same conditions.
pub fn compare_capacitors(
    capacitors: &[Capacitor],
    config: &SimulatorConfig,
    resistances: &[f64],
    voltages: &[f64],
    temperature: f64,
) -> Result<Vec<(CapacitorName, SweepGrid)>> {
    if capacitors.is_empty() {
        return Err(CapsimError::invalid_sweep("no capacitors to compare"));
    }

    capacitors
        .iter()
        .map(|cap| {
            let sim = Simulator::with_config(cap.clone(), config.clone());
            let grid = efficiency_landscape(&sim, resistances, voltages, temperature)?;
            Ok((cap.name().clone(), grid))
        })
        .collect()
}
