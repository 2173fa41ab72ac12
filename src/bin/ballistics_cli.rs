use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ballistics_zero::units::{feet_to_yards, moa_to_radians, radians_to_degrees, radians_to_moa};
use ballistics_zero::{
    build_report, find_equivalent_zero_with, find_zero_angle_with, simulate, BallisticsError,
    DragModel, IntegrationMethod, LoadReport, Projectile, ReportRow, SessionConfig, SessionReport,
    ZeroSearch,
};

#[derive(Parser)]
#[command(name = "ballistics-cli")]
#[command(version)]
#[command(about = "Compare rifle loads fired through a shared zero", long_about = None)]
struct Cli {
    /// Log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trajectory table and equivalent zero for every load in the session
    Report {
        #[command(flatten)]
        session: SessionArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Solve the zero angle for the primary load
    Zero {
        #[command(flatten)]
        session: SessionArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Single load trajectory through the session's zero
    Trajectory {
        /// Ballistic coefficient
        #[arg(short = 'b', long)]
        bc: f64,

        /// Drag model (G1 or G7)
        #[arg(short = 'm', long, default_value = "G7")]
        model: String,

        /// Muzzle velocity (fps)
        #[arg(long)]
        velocity: f64,

        /// Bullet weight (grains)
        #[arg(long, default_value = "175")]
        weight: f64,

        /// Label for the load
        #[arg(long, default_value = "custom")]
        name: String,

        /// Launch angle above the bore in true MOA (1/60 degree); defaults to the primary load's zero
        #[arg(short = 'a', long)]
        angle_moa: Option<f64>,

        #[command(flatten)]
        session: SessionArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Display engine information
    Info,
}

/// Session file plus per-value overrides
#[derive(Args, Debug)]
struct SessionArgs {
    /// JSON session file (defaults to the built-in session)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Temperature (°F)
    #[arg(long)]
    temperature: Option<f64>,

    /// Station pressure (inHg)
    #[arg(long)]
    pressure: Option<f64>,

    /// Full-value crosswind (mph)
    #[arg(long)]
    wind: Option<f64>,

    /// Scope height over bore (inches)
    #[arg(long)]
    scope_height: Option<f64>,

    /// Zero distance (yards)
    #[arg(long)]
    zero: Option<f64>,

    /// Maximum range (yards)
    #[arg(long)]
    max_range: Option<f64>,

    /// Table row spacing (yards)
    #[arg(long)]
    interval: Option<f64>,

    /// Integration time step (seconds)
    #[arg(long)]
    time_step: Option<f64>,

    /// Integration method
    #[arg(long)]
    method: Option<MethodArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MethodArg {
    Euler,
    Rk4,
}

impl From<MethodArg> for IntegrationMethod {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Euler => IntegrationMethod::Euler,
            MethodArg::Rk4 => IntegrationMethod::RungeKutta4,
        }
    }
}

#[derive(Debug, Serialize)]
struct ZeroOutput {
    primary: String,
    zero_distance_yd: f64,
    zero_angle_rad: f64,
    zero_angle_deg: f64,
    zero_angle_moa: f64,
}

#[derive(Debug, Serialize)]
struct TrajectoryOutput {
    launch_angle_rad: f64,
    launch_angle_moa: f64,
    #[serde(flatten)]
    load: LoadReport,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands) -> Result<(), BallisticsError> {
    match command {
        Commands::Report { session, output } => {
            let config = load_session(&session)?;
            let report = build_report(&config)?;
            display_report(&config, &report, output)?;
        }

        Commands::Zero { session, output } => {
            let config = load_session(&session)?;
            let angle = zero_angle(&config);
            let result = ZeroOutput {
                primary: config.primary.name.clone(),
                zero_distance_yd: config.rifle.zero_distance_yd,
                zero_angle_rad: angle,
                zero_angle_deg: radians_to_degrees(angle),
                zero_angle_moa: radians_to_moa(angle),
            };
            display_zero(&result, output)?;
        }

        Commands::Trajectory {
            bc,
            model,
            velocity,
            weight,
            name,
            angle_moa,
            session,
            output,
        } => {
            let config = load_session(&session)?;
            let drag_model: DragModel = model.parse()?;
            let projectile = Projectile::new(name, weight, bc, drag_model, velocity)?;

            let angle = match angle_moa {
                Some(moa) => moa_to_radians(moa),
                None => zero_angle(&config),
            };
            info!(load = %projectile.name, angle_moa = radians_to_moa(angle), "running trajectory");

            let sight = config.sight();
            let environment = config.environment();
            let settings = config.report_settings();

            let samples = simulate(
                &projectile,
                angle,
                &sight,
                &environment,
                environment.crosswind_fps,
                &settings,
            );
            let equivalent_zero_yd =
                find_equivalent_zero_with(&projectile, angle, &sight, &environment, &settings)
                    .map(feet_to_yards);

            let result = TrajectoryOutput {
                launch_angle_rad: angle,
                launch_angle_moa: radians_to_moa(angle),
                load: LoadReport {
                    projectile,
                    is_primary: false,
                    rows: samples.iter().map(ReportRow::from).collect(),
                    equivalent_zero_yd,
                },
            };
            display_trajectory(&result, output)?;
        }

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            println!("║      BALLISTICS ZERO v{:<18}║", env!("CARGO_PKG_VERSION"));
            println!("╠════════════════════════════════════════╣");
            println!("║ Point-mass trajectory solver for       ║");
            println!("║ comparing loads through one zero.      ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Features:                              ║");
            println!("║ • 3DOF Euler or RK4 integration        ║");
            println!("║ • G1 / G7 drag tables                  ║");
            println!("║ • Bisection zero-angle solver          ║");
            println!("║ • Equivalent zero for other loads      ║");
            println!("║ • Table, JSON and CSV output           ║");
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn load_session(args: &SessionArgs) -> Result<SessionConfig, BallisticsError> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::from_file(path)?,
        None => SessionConfig::default(),
    };

    if let Some(v) = args.temperature {
        config.environment.temperature_f = v;
    }
    if let Some(v) = args.pressure {
        config.environment.pressure_inhg = v;
    }
    if let Some(v) = args.wind {
        config.environment.wind_mph = v;
    }
    if let Some(v) = args.scope_height {
        config.rifle.scope_height_in = v;
    }
    if let Some(v) = args.zero {
        config.rifle.zero_distance_yd = v;
    }
    if let Some(v) = args.max_range {
        config.max_range_yd = v;
    }
    if let Some(v) = args.interval {
        config.report_interval_yd = v;
    }
    if let Some(v) = args.time_step {
        config.time_step_s = v;
    }
    if let Some(m) = args.method {
        config.method = m.into();
    }

    config.validate()?;
    Ok(config)
}

fn zero_angle(config: &SessionConfig) -> f64 {
    let search = ZeroSearch {
        time_step_s: config.time_step_s,
        method: config.method,
        ..ZeroSearch::default()
    };
    find_zero_angle_with(
        &config.primary.to_projectile(),
        &config.sight(),
        &config.environment(),
        &search,
    )
}

fn display_report(
    config: &SessionConfig,
    report: &SessionReport,
    format: OutputFormat,
) -> Result<(), BallisticsError> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }

        OutputFormat::Csv => {
            println!("load,range_yd,drop_in,drop_moa,windage_in,velocity_fps,time_s");
            for load in &report.loads {
                for row in &load.rows {
                    println!("{},{}", csv_field(&load.projectile.name), csv_row(row));
                }
            }
        }

        OutputFormat::Table => {
            println!("╔════════════════════════════════════════════════════════════╗");
            println!("║ {:<58} ║", format!(
                "ZERO: {} yd with {}",
                config.rifle.zero_distance_yd, config.primary.name
            ));
            println!("║ {:<58} ║", format!(
                "Angle: {:.6} rad / {:.4}° / {:.2} MOA",
                report.zero_angle_rad, report.zero_angle_deg, report.zero_angle_moa
            ));
            println!("║ {:<58} ║", format!(
                "{}°F, {} inHg, {} mph wind, {}\" scope height",
                config.environment.temperature_f,
                config.environment.pressure_inhg,
                config.environment.wind_mph,
                config.rifle.scope_height_in
            ));
            println!("╚════════════════════════════════════════════════════════════╝");

            for load in &report.loads {
                println!();
                print_load_header(&load.projectile, load.is_primary);
                print_rows(&load.rows);
                if !load.is_primary {
                    print_equivalent_zero(load.equivalent_zero_yd);
                }
            }
        }
    }
    Ok(())
}

fn display_zero(result: &ZeroOutput, format: OutputFormat) -> Result<(), BallisticsError> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }

        OutputFormat::Csv => {
            println!("primary,zero_distance_yd,zero_angle_rad,zero_angle_deg,zero_angle_moa");
            println!(
                "{},{},{:.9},{:.6},{:.4}",
                csv_field(&result.primary),
                result.zero_distance_yd,
                result.zero_angle_rad,
                result.zero_angle_deg,
                result.zero_angle_moa
            );
        }

        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║            ZERO ANGLE                  ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Zero:              {:>8.1} yd         ║", result.zero_distance_yd);
            println!("║ Angle:             {:>10.7} rad      ║", result.zero_angle_rad);
            println!("║ Angle:             {:>8.4} deg        ║", result.zero_angle_deg);
            println!("║ Angle:             {:>8.3} MOA        ║", result.zero_angle_moa);
            println!("╚════════════════════════════════════════╝");
            println!("Load: {}", result.primary);
        }
    }
    Ok(())
}

fn display_trajectory(result: &TrajectoryOutput, format: OutputFormat) -> Result<(), BallisticsError> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }

        OutputFormat::Csv => {
            println!("range_yd,drop_in,drop_moa,windage_in,velocity_fps,time_s");
            for row in &result.load.rows {
                println!("{}", csv_row(row));
            }
        }

        OutputFormat::Table => {
            print_load_header(&result.load.projectile, false);
            println!("Launch angle: {:.3} MOA", result.launch_angle_moa);
            print_rows(&result.load.rows);
            print_equivalent_zero(result.load.equivalent_zero_yd);
        }
    }
    Ok(())
}

fn print_load_header(projectile: &Projectile, is_primary: bool) {
    let mut title = format!(
        "{}: {}gr, BC={} ({}), MV={} fps",
        projectile.name,
        projectile.mass_grains,
        projectile.ballistic_coefficient,
        projectile.drag_model,
        projectile.muzzle_velocity_fps
    );
    if is_primary {
        title.push_str(" [primary]");
    }
    println!("{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

fn print_rows(rows: &[ReportRow]) {
    println!("┌────────┬──────────┬──────────┬──────────┬────────┬────────┐");
    println!("│ {:^6} │ {:^8} │ {:^8} │ {:^8} │ {:^6} │ {:^6} │", "Range", "Drop", "Drop", "Wind", "Vel", "TOF");
    println!("│ {:^6} │ {:^8} │ {:^8} │ {:^8} │ {:^6} │ {:^6} │", "(yd)", "(in)", "(MOA)", "(in)", "(fps)", "(s)");
    println!("├────────┼──────────┼──────────┼──────────┼────────┼────────┤");
    for row in rows {
        println!(
            "│ {:>6.0} │ {:>8.2} │ {:>8.2} │ {:>8.2} │ {:>6.0} │ {:>6.3} │",
            row.range_yd, row.drop_in, row.drop_moa, row.windage_in, row.velocity_fps, row.time_s
        );
    }
    println!("└────────┴──────────┴──────────┴──────────┴────────┴────────┘");
}

fn print_equivalent_zero(equivalent_zero_yd: Option<f64>) {
    match equivalent_zero_yd {
        Some(yd) => println!("\n>>> Equivalent zero: {yd:.1} yards"),
        None => println!("\n>>> No equivalent zero found (bullet never crosses line of sight)"),
    }
}

fn csv_row(row: &ReportRow) -> String {
    format!(
        "{:.2},{:.3},{:.3},{:.3},{:.1},{:.4}",
        row.range_yd, row.drop_in, row.drop_moa, row.windage_in, row.velocity_fps, row.time_s
    )
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
