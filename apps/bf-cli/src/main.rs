use bf_project::Project;
use bf_sim::{AnyBessState, Readout, RunOptions};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;

use error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "bf-cli")]
#[command(about = "BessFlow CLI - battery energy storage simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a project file and build its initial battery state
    Validate {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
    },
    /// Run a constant-current profile and print a CSV log
    Run {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
        /// Time step in seconds
        #[arg(long)]
        dt: f64,
        /// Number of steps
        #[arg(long)]
        steps: usize,
        /// Imposed current in A, in the project's sign convention
        #[arg(long, allow_hyphen_values = true)]
        current: f64,
        /// Ambient temperature in °C (defaults to the project's reference)
        #[arg(long, allow_hyphen_values = true)]
        t_amb: Option<f64>,
        /// Record every N-th step
        #[arg(long, default_value_t = 1)]
        record_every: usize,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the currents and powers that reach the SOC bounds in one step
    Feasible {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
        /// Time step in seconds
        #[arg(long)]
        dt: f64,
        /// SOC to evaluate at (defaults to the initial SOC)
        #[arg(long)]
        soc: Option<f64>,
    },
}

fn main() -> CliResult<()> {
    // logs go to stderr so `run` can stream CSV on stdout
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Run {
            project_path,
            dt,
            steps,
            current,
            t_amb,
            record_every,
            output,
        } => cmd_run(
            &project_path,
            &RunArgs {
                dt,
                steps,
                current,
                t_amb,
                record_every,
            },
            output.as_deref(),
        ),
        Commands::Feasible {
            project_path,
            dt,
            soc,
        } => cmd_feasible(&project_path, dt, soc),
    }
}

struct RunArgs {
    dt: f64,
    steps: usize,
    current: f64,
    t_amb: Option<f64>,
    record_every: usize,
}

fn load_battery(project_path: &Path) -> CliResult<(Project, AnyBessState)> {
    // load validates
    let project = bf_project::load(project_path)?;
    let state = AnyBessState::from_project(&project)?;
    info!(project = %project.name, "loaded project");
    Ok((project, state))
}

fn cmd_validate(project_path: &Path) -> CliResult<()> {
    println!("Validating project: {}", project_path.display());
    let (project, state) = load_battery(project_path)?;
    let r = state.readout();
    println!("✓ Project is valid");
    println!("  Name: {}", project.name);
    println!("  Models: {}", project.models.len());
    println!("  SOC: {:.3}, temperature: {:.2} °C, voltage: {:.4} V", r.soc, r.temp, r.v);
    Ok(())
}

fn cmd_run(project_path: &Path, args: &RunArgs, output: Option<&Path>) -> CliResult<()> {
    if !args.current.is_finite() {
        return Err(CliError::InvalidInput(format!(
            "current must be finite, got {}",
            args.current
        )));
    }
    let (project, state) = load_battery(project_path)?;
    let opts = RunOptions {
        dt: args.dt,
        t_amb: args.t_amb.unwrap_or(project.battery.init.temp_ambient),
        record_every: args.record_every,
    };
    let currents = vec![args.current; args.steps];
    let rows = state.run(&currents, &opts)?;

    let mut csv = String::from(Readout::CSV_HEADER);
    csv.push('\n');
    for row in &rows {
        csv.push_str(&row.csv_row());
        csv.push('\n');
    }

    if let Some(path) = output {
        std::fs::write(path, csv).map_err(|source| CliError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
        println!("✓ Wrote {} records to {}", rows.len(), path.display());
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn cmd_feasible(project_path: &Path, dt: f64, soc: Option<f64>) -> CliResult<()> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(CliError::InvalidInput(format!("dt must be positive, got {dt}")));
    }
    let (project, state) = load_battery(project_path)?;
    let soc = soc.unwrap_or(project.battery.init.soc);
    let (i_max, i_min) = state.get_feasible_current(soc, dt);
    let (p_max, p_min) = state.get_feasible_power(soc, dt);
    println!("Feasible range at soc = {soc:.3}, dt = {dt} s:");
    println!("  current: [{i_min:.4}, {i_max:.4}] A");
    println!("  power:   [{p_min:.4}, {p_max:.4}] W");
    Ok(())
}
