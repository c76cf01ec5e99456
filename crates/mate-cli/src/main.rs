//! mate CLI - drive the companion agent core from the terminal.
//!
//! Single binary that provides:
//! - `mate run` - replay a scenario and print perception, events and reports
//! - `mate parse` - normalize an inbound planner message
//! - `mate validate` - check an action against a scenario object
//! - `mate init` - write a default .mate/config.yaml

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use mate_affordance::{AffordanceAction, AffordanceValidator, Verdict};
use mate_behavior::parse_message;
use mate_core::EntityQuery;
use mate_sim::{MateConfig, Scenario, Simulation, TickReport};

#[derive(Parser)]
#[command(name = "mate")]
#[command(about = "Companion agent control core", version)]
struct Cli {
    /// Project root directory
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario
    Run {
        /// Scenario YAML file
        scenario: PathBuf,

        /// Simulated seconds to run
        #[arg(long, default_value_t = 10.0)]
        seconds: f32,

        /// Override the configured tick length
        #[arg(long)]
        dt: Option<f32>,

        /// Print one JSON object per eventful tick
        #[arg(long)]
        json: bool,
    },

    /// Parse an inbound message ("-" reads stdin)
    Parse {
        message: String,
    },

    /// Check whether the scenario agent can act on an object
    Validate {
        scenario: PathBuf,
        object: String,
        action: String,
    },

    /// Initialize a new project
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    // Find project root
    let project_root = match cli.project {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match cli.command {
        Commands::Run {
            scenario,
            seconds,
            dt,
            json,
        } => run_scenario(&project_root, &scenario, seconds, dt, json),
        Commands::Parse { message } => parse(&project_root, &message),
        Commands::Validate {
            scenario,
            object,
            action,
        } => validate(&scenario, &object, &action),
        Commands::Init { force } => init_project(&project_root, force),
    }
}

fn run_scenario(
    project_root: &Path,
    scenario_path: &Path,
    seconds: f32,
    dt: Option<f32>,
    json: bool,
) -> Result<()> {
    let mut config = MateConfig::load_from_project(project_root)?;
    if let Some(dt) = dt {
        config.tick_seconds = dt;
        config.validate()?;
    }
    let scenario = Scenario::load(scenario_path)?;
    tracing::info!(
        scenario = %scenario.name,
        seconds,
        dt = config.tick_seconds,
        "Starting run"
    );

    let mut sim = Simulation::new(&scenario, &config)
        .with_context(|| format!("Failed to build world for {}", scenario_path.display()))?;

    let mut write_error = None;
    let summary = sim.run_with(seconds, |tick| {
        if write_error.is_some() {
            return;
        }
        let printed = if json {
            print_json_tick(tick)
        } else {
            print_text_tick(tick)
        };
        if let Err(err) = printed {
            write_error = Some(err);
        }
    });
    if let Some(err) = write_error {
        return Err(err);
    }

    if json {
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    println!();
    println!("Run summary");
    println!("===========");
    println!("Ticks: {} ({:.1}s)", summary.ticks, summary.elapsed);
    println!("Perception emissions: {}", summary.emissions);
    println!("Finished commands: {}", summary.reports.len());
    for report in &summary.reports {
        println!(
            "  - {} [{}]: {}",
            report.behavior,
            report.command_id,
            report.reason_code()
        );
    }
    match summary.active_behavior {
        Some(behavior) => println!("Still running: {behavior}"),
        None => println!("Still running: nothing"),
    }
    if let Some(position) = summary.final_position {
        println!(
            "Final position: ({:.2}, {:.2}, {:.2})",
            position.x, position.y, position.z
        );
    }
    Ok(())
}

fn print_text_tick(tick: &TickReport) -> Result<()> {
    if let Some(perception) = &tick.perception {
        println!("[{:>6.2}s] perception", tick.time);
        for line in perception.perception.lines() {
            println!("          {line}");
        }
    }
    for event in &tick.events {
        println!("[{:>6.2}s] {}", tick.time, serde_json::to_string(event)?);
    }
    for report in &tick.reports {
        println!(
            "[{:>6.2}s] finished {} ({})",
            tick.time,
            report.behavior,
            report.reason_code()
        );
    }
    Ok(())
}

fn print_json_tick(tick: &TickReport) -> Result<()> {
    let eventful = tick.perception.is_some() || !tick.events.is_empty() || !tick.reports.is_empty();
    if eventful {
        println!("{}", serde_json::to_string(tick)?);
    }
    Ok(())
}

fn parse(project_root: &Path, message: &str) -> Result<()> {
    let raw = if message == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read message from stdin")?;
        buffer
    } else {
        message.to_string()
    };

    let config = MateConfig::load_from_project(project_root)?;
    let parsed = parse_message(&raw, &config.executor).context("Failed to parse message")?;
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}

#[derive(Serialize)]
struct ValidateOutput<'a> {
    object: &'a str,
    action: String,
    #[serde(flatten)]
    verdict: Verdict,
}

fn validate(scenario_path: &Path, object: &str, action: &str) -> Result<()> {
    let scenario = Scenario::load(scenario_path)?;
    let world = scenario
        .build_world(&MateConfig::default().nav)
        .with_context(|| format!("Failed to build world for {}", scenario_path.display()))?;
    let entity = world
        .find_by_name(object)
        .with_context(|| format!("No object named `{object}` in {}", scenario_path.display()))?;

    let action = AffordanceAction::from_verb(action);
    let verdict =
        AffordanceValidator::new().can_perform(&entity, &action, scenario.agent.capability);

    let output = ValidateOutput {
        object: &entity.name,
        action: action.to_string(),
        verdict,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_project(project_root: &Path, force: bool) -> Result<()> {
    let path = MateConfig::write_default(project_root, force)?;
    tracing::info!(path = %path.display(), "Initialized project");
    println!("Wrote {}", path.display());
    Ok(())
}
