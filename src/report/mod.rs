//! Text output for the CLI frontend.
//!
//! Waveforms and grids are written as CSV so they can be piped into a
//! plotting tool. The energy breakdown is written as an aligned table.

use std::io::{self, Write};

use crate::error::Result;
use crate::simulation::{EnergyBreakdown, SweepGrid, TemperaturePoint, Waveform};

/// Write a waveform as `t,v,phase` rows.
pub fn write_waveform<W: Write>(out: &mut W, waveform: &Waveform) -> Result<()> {
    writeln!(out, "time_s,voltage_v,phase")?;
    for (t, v, phase) in waveform.samples() {
        writeln!(out, "{t:.6e},{v:.6},{phase}")?;
    }
    Ok(())
}

/// Write an energy breakdown as a table with percentage shares.
pub fn write_breakdown<W: Write>(out: &mut W, breakdown: &EnergyBreakdown) -> Result<()> {
    let total: f64 = breakdown.stored + breakdown.total_loss();
    writeln!(out, "{:<16} {:>14} {:>8}", "term", "energy_uJ", "share_%")?;
    for (label, energy) in breakdown.terms() {
        let share = if total > 0.0 { 100.0 * energy / total } else { 0.0 };
        writeln!(out, "{:<16} {:>14.3} {:>8.2}", label, energy * 1e6, share)?;
    }
    writeln!(out, "{:<16} {:>14.3}", "total_loss", breakdown.total_loss() * 1e6)?;
    writeln!(out, "efficiency: {:.1}%", breakdown.efficiency())?;
    Ok(())
}

/// Write a temperature sweep as `temperature,capacitance,change` rows.
pub fn write_temperature_sweep<W: Write>(out: &mut W, points: &[TemperaturePoint]) -> Result<()> {
    writeln!(out, "temperature_c,capacitance_uf,change_pct")?;
    for p in points {
        writeln!(
            out,
            "{:.2},{:.4},{:+.2}",
            p.temperature,
            p.capacitance * 1e6,
            p.change_pct
        )?;
    }
    Ok(())
}

/// Write a grid in long form: one `row,col,value` line per cell.
pub fn write_grid<W: Write>(out: &mut W, grid: &SweepGrid, headers: [&str; 3]) -> Result<()> {
    writeln!(out, "{},{},{}", headers[0], headers[1], headers[2])?;
    for (row, values) in grid.rows.iter().zip(&grid.values) {
        for (col, value) in grid.cols.iter().zip(values) {
            writeln!(out, "{row},{col},{value:.4}")?;
        }
    }
    Ok(())
}

/// Locked, buffered stdout for report writers.
pub fn stdout() -> io::BufWriter<io::StdoutLock<'static>> {
    io::BufWriter::new(io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Phase;

    #[test]
    fn test_waveform_csv() {
        let wf = Waveform {
            times: vec![0.0, 1.0],
            voltages: vec![0.0, 3.5],
            midpoint: 0.5,
            effective_capacitance: 1e-6,
            time_constant: 1e-3,
        };
        let mut buf = Vec::new();
        write_waveform(&mut buf, &wf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "time_s,voltage_v,phase");
        assert_eq!(lines[1], format!("0.000000e0,0.000000,{}", Phase::Charging));
        assert!(lines[2].ends_with(",3.500000,discharge"));
    }

    #[test]
    fn test_breakdown_table() {
        let b = EnergyBreakdown {
            stored: 9e-6,
            esr_loss: 1e-6,
            leakage_loss: 0.0,
            dielectric_loss: 0.0,
            plate_loss: 0.0,
            self_discharge_loss: 0.0,
        };
        let mut buf = Vec::new();
        write_breakdown(&mut buf, &b).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("efficiency: 90.0%"));
        assert!(text.lines().any(|l| l.starts_with("esr") && l.trim_end().ends_with("10.00")));
    }

    #[test]
    fn test_temperature_sweep_csv() {
        let points = [
            TemperaturePoint {
                temperature: -40.0,
                capacitance: 10.1e-6,
                change_pct: 0.975,
            },
            TemperaturePoint {
                temperature: 125.0,
                capacitance: 9.85e-6,
                change_pct: -1.5,
            },
        ];
        let mut buf = Vec::new();
        write_temperature_sweep(&mut buf, &points).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "temperature_c,capacitance_uf,change_pct");
        assert_eq!(lines[1], "-40.00,10.1000,+0.97");
        assert_eq!(lines[2], "125.00,9.8500,-1.50");
    }

    #[test]
    fn test_grid_long_form() {
        let grid = SweepGrid {
            rows: vec![1.0, 2.0],
            cols: vec![10.0],
            values: vec![vec![0.5], vec![0.25]],
        };
        let mut buf = Vec::new();
        write_grid(&mut buf, &grid, ["r", "v", "eff"]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "r,v,eff\n1,10,0.5000\n2,10,0.2500\n");
    }
}
