//! Capsim - Capacitor Behavior Simulator
//!
//! Closed-form RC charge/discharge, energy and temperature analysis for a
//! single capacitor. Capacitor parameters are given in datasheet units.
//!
//! # Usage
//!
//! ```bash
//! capsim simulate --capacitance 100 --esr 0.1 --leakage 0.01 --temp-coeff 0.05 \
//!     -r 100 -v 10 -t 25 --duration 2 > curve.csv
//! RUST_LOG=debug capsim efficiency --capacitance 10 --esr 0.01
//! ```

use std::io::Write;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use capsim_core::{
    error::Result,
    report,
    simulation::{capacitance_vs_temperature, efficiency_landscape, linspace},
    Capacitor, Simulator,
};

/// Capacitor behavior simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Capacitor specification in datasheet units.
#[derive(Args, Debug)]
struct CapacitorArgs {
    /// Capacitor label
    #[arg(long, default_value = "Custom")]
    name: String,

    /// Capacitance in µF
    #[arg(long)]
    capacitance: f64,

    /// Equivalent series resistance in Ω
    #[arg(long, default_value_t = 0.0)]
    esr: f64,

    /// Leakage in µA/V
    #[arg(long, default_value_t = 0.0)]
    leakage: f64,

    /// Temperature coefficient in %/°C
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    temp_coeff: f64,
}

impl CapacitorArgs {
    fn build(&self) -> Result<Capacitor> {
        Capacitor::from_datasheet(
            self.name.clone(),
            self.capacitance,
            self.esr,
            self.leakage,
            self.temp_coeff,
        )
    }
}

/// Operating point of the RC circuit.
#[derive(Args, Debug)]
struct CircuitArgs {
    /// Series resistance in Ω
    #[arg(short = 'r', long, default_value_t = 100.0)]
    resistance: f64,

    /// Source voltage in V
    #[arg(short = 'v', long, default_value_t = 10.0)]
    voltage: f64,

    /// Ambient temperature in °C
    #[arg(short = 't', long, default_value_t = 25.0, allow_hyphen_values = true)]
    temperature: f64,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the capacitor fields
    Info {
        #[command(flatten)]
        capacitor: CapacitorArgs,
    },
    /// Simulate a charge/discharge cycle and write it as CSV
    Simulate {
        #[command(flatten)]
        capacitor: CapacitorArgs,
        #[command(flatten)]
        circuit: CircuitArgs,
        /// Total cycle time in seconds
        #[arg(long, default_value_t = 2.0)]
        duration: f64,
        /// Number of time samples
        #[arg(long, default_value_t = 200)]
        points: usize,
    },
    /// Print the energy balance of one charge cycle
    Efficiency {
        #[command(flatten)]
        capacitor: CapacitorArgs,
        #[command(flatten)]
        circuit: CircuitArgs,
    },
    /// Sweep capacitance over temperature
    Temperature {
        #[command(flatten)]
        capacitor: CapacitorArgs,
        /// Lowest temperature in °C
        #[arg(long, default_value_t = -40.0, allow_hyphen_values = true)]
        from: f64,
        /// Highest temperature in °C
        #[arg(long, default_value_t = 125.0, allow_hyphen_values = true)]
        to: f64,
        /// Number of temperature points
        #[arg(long, default_value_t = 20)]
        points: usize,
    },
    /// Efficiency over a resistance × voltage grid, as CSV
    Landscape {
        #[command(flatten)]
        capacitor: CapacitorArgs,
        /// Ambient temperature in °C
        #[arg(short = 't', long, default_value_t = 25.0, allow_hyphen_values = true)]
        temperature: f64,
        /// Resistance range in Ω
        #[arg(long, num_args = 2, default_values_t = [50.0, 500.0])]
        resistance: Vec<f64>,
        /// Voltage range in V
        #[arg(long, num_args = 2, default_values_t = [5.0, 25.0])]
        voltage: Vec<f64>,
        /// Grid points per axis
        #[arg(long, default_value_t = 20)]
        points: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut out = report::stdout();

    match cli.command {
        Command::Info { capacitor } => {
            let cap = capacitor.build()?;
            writeln!(out, "{}", cap.info())?;
        }

        Command::Simulate {
            capacitor,
            circuit,
            duration,
            points,
        } => {
            let sim = Simulator::new(capacitor.build()?);
            let times = linspace(0.0, duration, points);
            let waveform = sim.run(circuit.resistance, circuit.voltage, circuit.temperature, &times)?;
            info!(
                tau = waveform.time_constant,
                c_eff = waveform.effective_capacitance,
                switch_at = waveform.midpoint,
                "simulation complete"
            );
            report::write_waveform(&mut out, &waveform)?;
        }

        Command::Efficiency { capacitor, circuit } => {
            let sim = Simulator::new(capacitor.build()?);
            let breakdown = sim.energy_breakdown(circuit.resistance, circuit.voltage, circuit.temperature)?;
            writeln!(out, "{}\n", sim.capacitor())?;
            report::write_breakdown(&mut out, &breakdown)?;
        }

        Command::Temperature {
            capacitor,
            from,
            to,
            points,
        } => {
            let sim = Simulator::new(capacitor.build()?);
            let sweep = capacitance_vs_temperature(&sim, &linspace(from, to, points))?;
            report::write_temperature_sweep(&mut out, &sweep)?;
        }

        Command::Landscape {
            capacitor,
            temperature,
            resistance,
            voltage,
            points,
        } => {
            let sim = Simulator::new(capacitor.build()?);
            let resistances = linspace(resistance[0], resistance[1], points);
            let voltages = linspace(voltage[0], voltage[1], points);
            let grid = efficiency_landscape(&sim, &resistances, &voltages, temperature)?;
            if let Some((r, v, best)) = grid.max() {
                info!(resistance = r, voltage = v, efficiency = best, "best operating point");
            }
            report::write_grid(&mut out, &grid, ["resistance_ohm", "voltage_v", "efficiency_pct"])?;
        }
    }

    out.flush()?;
    Ok(())
}
