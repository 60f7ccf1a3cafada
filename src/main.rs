use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use nalgebra::Vector3;

use rocket_flight::io::{csv, json, FlightSummary, VehicleConfig};
use rocket_flight::physics::constants::{EARTH_RADIUS, G0};
use rocket_flight::prelude::*;
use rocket_flight::sim::EventKind;

#[derive(Parser)]
#[command(author, version, about = "Point-mass rocket flight simulator")]
struct Cli {
    /// Vehicle description (JSON); defaults to the built-in reference vehicle
    #[arg(long)]
    config: Option<PathBuf>,

    /// Integration time step, s
    #[arg(long, default_value_t = 0.01)]
    dt: f64,

    /// Maximum simulated time, s
    #[arg(long, default_value_t = 300.0)]
    duration: f64,

    /// Throttle setting in [0, 1]
    #[arg(long, default_value_t = 1.0)]
    throttle: f64,

    /// Initial altitude above the surface, m
    #[arg(long, default_value_t = 100.0)]
    altitude: f64,

    /// Gimbal deflection about x, degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    gimbal_x: f64,

    /// Gimbal deflection about y, degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    gimbal_y: f64,

    /// Telemetry cadence, s
    #[arg(long, default_value_t = 1.0)]
    sample_interval: f64,

    /// Write sampled telemetry to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the flight summary to this JSON file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Draw propellant on every force evaluation instead of once per tick
    #[arg(long, default_value_t = false)]
    per_evaluation_fuel: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    // -----------------------------------------------------------------------
    // Vehicle
    // -----------------------------------------------------------------------
    let config = match &cli.config {
        Some(path) => VehicleConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => VehicleConfig::default(),
    };
    let (rocket, propulsion) = config.build().context("building vehicle")?;

    let initial = State::new(
        Vector3::new(EARTH_RADIUS + cli.altitude, 0.0, 0.0),
        Vector3::zeros(),
        rocket.mass(),
    );
    let accounting = if cli.per_evaluation_fuel {
        FuelAccounting::PerEvaluation
    } else {
        FuelAccounting::PerTick
    };
    let mut sim = Simulation::new(initial, rocket, propulsion, cli.dt)
        .context("initialising simulation")?
        .with_fuel_accounting(accounting);

    sim.start_engines();
    sim.set_throttle(cli.throttle);
    sim.set_gimbal_angles(cli.gimbal_x.to_radians(), cli.gimbal_y.to_radians());

    // -----------------------------------------------------------------------
    // Run
    // -----------------------------------------------------------------------
    let run_config = RunConfig {
        max_time: cli.duration,
        sample_interval: cli.sample_interval,
    };
    let record = run(&mut sim, &run_config);
    let summary = FlightSummary::from_record(&record, sim.state());

    if let Some(path) = &cli.csv {
        csv::write_telemetry_file(path, &record.samples)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &cli.summary {
        json::write_summary_file(path, &summary)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    print_report(&config, &record, &summary, cli.dt);
    Ok(())
}

fn print_report(config: &VehicleConfig, record: &FlightRecord, summary: &FlightSummary, dt: f64) {
    let r = &config.rocket;
    let p = &config.propulsion;
    let thrust: f64 = p.engines.iter().map(|e| e.max_thrust).sum();
    let twr = thrust / (r.wet_mass * G0);

    println!();
    println!("====================================================================");
    println!("  ROCKET FLIGHT SIMULATION");
    println!("====================================================================");
    println!();
    println!("  Vehicle");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Dry mass:      {:>8.1} kg    Wet mass:     {:>8.1} kg",
        r.dry_mass, r.wet_mass
    );
    println!(
        "  Propellant:    {:>8.1} kg    Engines:      {:>8}",
        p.fuel_mass,
        p.engines.len()
    );
    println!("  Max thrust:    {:>8.0} N     TWR:          {:>8.2}", thrust, twr);
    println!();

    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for e in &record.events {
        let label = match &e.kind {
            EventKind::Ignition => "IGNITION".to_string(),
            EventKind::Burnout => "BURNOUT".to_string(),
            EventKind::Apogee => "APOGEE".to_string(),
            EventKind::Crash => "IMPACT".to_string(),
            EventKind::Altitude { altitude, .. } => format!("{:.0} km", altitude / 1000.0),
        };
        println!("  {:<9} t={:>7.2}s   alt={:>9.0}m", label, e.time, e.altitude);
    }
    println!();

    println!("  Performance Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Max altitude:  {:>9.0} m   ({:.2} km)",
        summary.apogee_m,
        summary.apogee_m / 1000.0
    );
    println!(
        "  Max speed:     {:>9.1} m/s (Mach {:.2})",
        summary.max_speed, summary.max_mach
    );
    println!("  Max q:         {:>9.0} Pa", summary.max_dynamic_pressure);
    match summary.burnout_time {
        Some(t) => println!("  Burnout:       {:>9.2} s", t),
        None => println!("  Burnout:       {:>9}", "-"),
    }
    println!("  Flight time:   {:>9.1} s", summary.flight_time);
    match record.outcome {
        Outcome::Completed => println!("  Outcome:       time limit reached"),
        Outcome::Crashed { impact_speed, .. } => {
            println!("  Outcome:       impact at {:.1} m/s", impact_speed)
        }
    }
    let orbit = &summary.final_orbit;
    println!(
        "  Final orbit:   e={:.4}  periapsis={:.0} km  apoapsis={:.0} km",
        orbit.ecc,
        orbit.periapsis_altitude / 1000.0,
        orbit.apoapsis_altitude / 1000.0
    );
    println!();

    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>9}  {:>9}  {:>7}  {:>8}  {:>6}",
        "t (s)", "alt (m)", "vel (m/s)", "Mach", "mass(kg)", "fuel"
    );
    println!("  {}", "─".repeat(60));

    let stride = (record.samples.len() / 30).max(1);
    let last = record.samples.len().saturating_sub(1);
    for (i, t) in record.samples.iter().enumerate() {
        if i % stride != 0 && i != last {
            continue;
        }
        println!(
            "  {:>7.2}  {:>9.1}  {:>9.1}  {:>7.3}  {:>8.1}  {:>5.1}%",
            t.time,
            t.altitude,
            t.speed,
            t.mach,
            t.mass,
            t.fuel_ratio * 100.0
        );
    }

    println!();
    println!("  {} samples, dt={} s", record.samples.len(), dt);
    println!("====================================================================");
    println!();
}
