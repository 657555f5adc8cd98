//! GridWatch CLI — demo driver for the smart-city simulation engine.
//!
//! Runs detection sweeps, single-incident simulations, and scripted
//! attack scenarios against the sample device fleet.

use anyhow::{Context, bail};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use gridwatch_core::classifier::ThreatClassifier;
use gridwatch_core::config::SimulationConfig;
use gridwatch_core::device::{Device, DeviceCategory, sample_fleet};
use gridwatch_core::response::ResponsePlanner;
use gridwatch_core::scenario::ScenarioLibrary;
use gridwatch_core::threat::{Severity, ThreatCategory};

/// GridWatch: smart-city security operations, simulated
#[derive(Parser, Debug)]
#[command(name = "gridwatch", version, about, long_about = None)]
struct Cli {
    /// Seed for deterministic simulation runs
    #[arg(long)]
    seed: Option<u64>,

    /// Configuration file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit JSON instead of human-readable output
    #[arg(long)]
    json: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run a detection sweep across the sample fleet
    Detect {
        /// Only analyze the device with this ID
        #[arg(long)]
        device_id: Option<String>,
    },
    /// Classify one threat and simulate the response
    Simulate {
        /// Threat category (e.g. ransomware, data_manipulation)
        #[arg(long, default_value = "unauthorized_access")]
        category: String,
        /// Severity: low, medium, high, critical
        #[arg(long, default_value = "high")]
        severity: String,
        /// Device category to target (e.g. camera, smart_meter)
        #[arg(long, default_value = "camera")]
        device: String,
        /// Progress percentage to advance the response to
        #[arg(long, default_value_t = 100)]
        progress: u8,
    },
    /// Scripted attack scenarios
    Scenario {
        #[command(subcommand)]
        action: ScenarioAction,
    },
}

#[derive(clap::Subcommand, Debug)]
enum ScenarioAction {
    /// List the built-in scenarios
    List,
    /// Run a scenario by ID
    Run {
        /// Scenario ID (see `scenario list`)
        id: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let mut rng = match cli.seed {
        Some(seed) => {
            tracing::info!(seed, "running with fixed seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    match cli.command {
        Commands::Detect { device_id } => detect(&config, device_id.as_deref(), cli.json, &mut rng),
        Commands::Simulate {
            category,
            severity,
            device,
            progress,
        } => simulate(&config, &category, &severity, &device, progress, cli.json, &mut rng),
        Commands::Scenario { action } => scenario(action, cli.json, &mut rng),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SimulationConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
        }
        None => Ok(SimulationConfig::default()),
    }
}

fn detect(
    config: &SimulationConfig,
    device_id: Option<&str>,
    json: bool,
    rng: &mut impl Rng,
) -> anyhow::Result<()> {
    let classifier = ThreatClassifier::new(config.classifier.clone());
    let fleet = sample_fleet();
    let devices: Vec<&Device> = match device_id {
        Some(id) => {
            let device = fleet
                .iter()
                .find(|d| d.id == id)
                .with_context(|| format!("no device with ID '{id}' in the sample fleet"))?;
            vec![device]
        }
        None => fleet.iter().collect(),
    };

    let mut alerts = Vec::new();
    for device in devices {
        if let Some(alert) = classifier.simulate_detection(device, rng) {
            alerts.push(alert);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&alerts)?);
        return Ok(());
    }

    if alerts.is_empty() {
        println!("No anomalies detected across {} devices.", fleet.len());
    } else {
        for alert in &alerts {
            println!(
                "[{}] risk {:>2}  {}",
                alert.severity, alert.risk_score, alert.description
            );
        }
    }
    Ok(())
}

fn simulate(
    config: &SimulationConfig,
    category: &str,
    severity: &str,
    device: &str,
    progress: u8,
    json: bool,
    rng: &mut impl Rng,
) -> anyhow::Result<()> {
    let category: ThreatCategory = category.parse()?;
    let severity: Severity = severity.parse()?;
    let device_category: DeviceCategory = device.parse()?;

    let fleet = sample_fleet();
    let Some(target) = fleet.iter().find(|d| d.category == device_category) else {
        bail!("no {device_category} device in the sample fleet");
    };

    let classifier = ThreatClassifier::new(config.classifier.clone());
    let planner = ResponsePlanner::new(config.response.clone());

    let alert = classifier.generate_threat_alert(target, category, severity, None, rng);
    let simulation = planner.simulate_incident_response(&alert, progress, rng);

    if json {
        println!("{}", serde_json::to_string_pretty(&simulation)?);
        return Ok(());
    }

    println!("Alert: {}", alert.description);
    println!("  risk score:        {}", alert.risk_score);
    println!("  affected systems:  {}", alert.affected_systems.join(", "));
    println!("  potential impact:  {}", alert.potential_impact);
    println!();
    println!(
        "Response plan {} ({} estimated minutes):",
        simulation.plan.id, simulation.plan.estimated_completion_minutes
    );
    for (phase, window) in simulation.plan.timeline.iter() {
        println!(
            "  {:<16} {:>4} min  [{}]",
            phase.to_string(),
            window.estimated_minutes,
            window.status
        );
    }
    match &simulation.report {
        Some(report) => {
            println!();
            println!(
                "Completed: {}/{} steps, variance {} min",
                report.steps_completed, report.steps_total, report.variance_minutes
            );
            println!("Recommendations:");
            for recommendation in &report.recommendations {
                println!("  - {recommendation}");
            }
        }
        None => {
            println!();
            println!(
                "In progress at {}%, current phase: {}",
                simulation.completion_percentage, simulation.plan.current_phase
            );
        }
    }
    Ok(())
}

fn scenario(action: ScenarioAction, json: bool, rng: &mut impl Rng) -> anyhow::Result<()> {
    let library = ScenarioLibrary::with_defaults();

    match action {
        ScenarioAction::List => {
            if json {
                println!("{}", serde_json::to_string_pretty(library.all())?);
                return Ok(());
            }
            for scenario in library.all() {
                println!("{:<24} {}", scenario.id, scenario.name);
                println!("{:<24} {}", "", scenario.description);
            }
            Ok(())
        }
        ScenarioAction::Run { id } => {
            let run = library.run(&id, &sample_fleet(), rng)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&run)?);
                return Ok(());
            }
            for event in &run.events {
                println!("{event}");
            }
            Ok(())
        }
    }
}
