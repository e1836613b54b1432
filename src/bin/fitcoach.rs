//! fitcoach CLI - Command-line interface for the fitcoach engine
//!
//! Commands:
//! - assess: Turn a snapshot JSON document into a coaching report
//! - bmr: Estimate BMR and optionally TDEE
//! - macros: Analyze a day's macro-nutrients
//! - progress: Summarize goal progress
//! - config: Print the default configuration or validate a file
//! - doctor: Diagnose engine health and configuration

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use fitcoach::metabolic::{estimate_bmr_with, estimate_tdee_with};
use fitcoach::nutrition::analyze_macros_with;
use fitcoach::pipeline::CoachingEngine;
use fitcoach::progress::summarize;
use fitcoach::types::{ActivityLevel, GoalProgress, Sex};
use fitcoach::{EngineConfig, EngineError, ENGINE_NAME, ENGINE_VERSION};

/// fitcoach - On-device fitness analytics and coaching engine
#[derive(Parser)]
#[command(name = "fitcoach")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Turn body, workout and nutrition data into coaching feedback", long_about = None)]
struct Cli {
    /// Log pipeline stages at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a snapshot and print the coaching report
    Assess {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Engine configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "json")]
        format: OutputFormat,
    },

    /// Estimate basal and total daily energy expenditure
    Bmr {
        /// Body weight in kg
        #[arg(long)]
        weight: f64,

        /// Height in cm
        #[arg(long)]
        height: f64,

        /// Age in years
        #[arg(long)]
        age: u32,

        /// Biological sex (male or female)
        #[arg(long)]
        sex: String,

        /// Activity level for a TDEE estimate (sedentary, light, moderate, very_active, extreme)
        #[arg(long)]
        activity: Option<String>,

        /// Engine configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Analyze macro-nutrient intake
    Macros {
        /// Protein in grams
        #[arg(long)]
        protein: f64,

        /// Carbohydrates in grams
        #[arg(long)]
        carbs: f64,

        /// Fat in grams
        #[arg(long)]
        fat: f64,

        /// Engine configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Summarize progress over a JSON array of goals
    Progress {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the default configuration, or validate a configuration file
    Config {
        /// Configuration file to validate
        #[arg(long)]
        validate: Option<PathBuf>,
    },

    /// Diagnose engine health and configuration
    Doctor {
        /// Check a configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("fitcoach=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), FitcoachCliError> {
    match cli.command {
        Commands::Assess {
            input,
            output,
            config,
            format,
        } => cmd_assess(&input, &output, config.as_deref(), format),

        Commands::Bmr {
            weight,
            height,
            age,
            sex,
            activity,
            config,
        } => cmd_bmr(weight, height, age, &sex, activity.as_deref(), config.as_deref()),

        Commands::Macros {
            protein,
            carbs,
            fat,
            config,
        } => cmd_macros(protein, carbs, fat, config.as_deref()),

        Commands::Progress { input } => cmd_progress(&input),

        Commands::Config { validate } => cmd_config(validate.as_deref()),

        Commands::Doctor { config, json } => cmd_doctor(config.as_deref(), json),
    }
}

fn cmd_assess(
    input: &Path,
    output: &Path,
    config: Option<&Path>,
    format: OutputFormat,
) -> Result<(), FitcoachCliError> {
    let engine = CoachingEngine::with_config(load_config(config)?);
    let input_data = read_input(input)?;
    if input_data.trim().is_empty() {
        return Err(FitcoachCliError::EmptyInput);
    }

    let snapshot = serde_json::from_str(&input_data)?;
    let report = engine.assess(&snapshot)?;
    info!(report_id = %report.report_id, "assessment complete");

    let output_data = format_output(&report, &format)?;
    if output.to_string_lossy() == "-" {
        println!("{}", output_data);
    } else {
        fs::write(output, output_data + "\n")?;
    }

    Ok(())
}

#[derive(Serialize)]
struct BmrOutput {
    bmr_kcal: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    activity_level: Option<ActivityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tdee_kcal: Option<f64>,
}

fn cmd_bmr(
    weight: f64,
    height: f64,
    age: u32,
    sex: &str,
    activity: Option<&str>,
    config: Option<&Path>,
) -> Result<(), FitcoachCliError> {
    let config = load_config(config)?;
    let sex: Sex = sex.parse()?;
    let level = activity.map(str::parse::<ActivityLevel>).transpose()?;

    let bmr_kcal = estimate_bmr_with(weight, height, age, sex, &config.metabolic);
    let tdee_kcal = level.map(|level| estimate_tdee_with(bmr_kcal, level, &config.metabolic));
    debug!(bmr_kcal, ?tdee_kcal, "metabolic estimate");

    let out = BmrOutput {
        bmr_kcal,
        activity_level: level,
        tdee_kcal,
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_macros(
    protein: f64,
    carbs: f64,
    fat: f64,
    config: Option<&Path>,
) -> Result<(), FitcoachCliError> {
    let config = load_config(config)?;
    let analysis = analyze_macros_with(protein, carbs, fat, &config.nutrition);
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

fn cmd_progress(input: &Path) -> Result<(), FitcoachCliError> {
    let input_data = read_input(input)?;
    let goals: Vec<GoalProgress> = serde_json::from_str(&input_data)?;
    let summary = summarize(&goals);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn cmd_config(validate: Option<&Path>) -> Result<(), FitcoachCliError> {
    match validate {
        Some(path) => {
            let config = EngineConfig::from_file(path)?;
            info!(path = %path.display(), "configuration valid");
            println!("{}", config.to_json()?);
        }
        None => println!("{}", EngineConfig::default().to_json()?),
    }
    Ok(())
}

fn cmd_doctor(config: Option<&Path>, json: bool) -> Result<(), FitcoachCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "engine_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("{} version {}", ENGINE_NAME, ENGINE_VERSION),
    });

    let defaults = EngineConfig::default();
    checks.push(match defaults.validate() {
        Ok(()) => DoctorCheck {
            name: "default_config".to_string(),
            status: CheckStatus::Ok,
            message: "Built-in thresholds are consistent".to_string(),
        },
        Err(e) => DoctorCheck {
            name: "default_config".to_string(),
            status: CheckStatus::Error,
            message: e.to_string(),
        },
    });

    if let Some(config_path) = config {
        let check = if config_path.exists() {
            match EngineConfig::from_file(config_path) {
                Ok(loaded) => {
                    let changed = loaded != defaults;
                    DoctorCheck {
                        name: "config".to_string(),
                        status: CheckStatus::Ok,
                        message: if changed {
                            "Configuration valid (overrides defaults)".to_string()
                        } else {
                            "Configuration valid (same as defaults)".to_string()
                        },
                    }
                }
                Err(e) => DoctorCheck {
                    name: "config".to_string(),
                    status: CheckStatus::Error,
                    message: e.to_string(),
                },
            }
        } else {
            DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Warning,
                message: "Configuration file does not exist".to_string(),
            }
        };
        checks.push(check);
    }

    // Check stdin is available (for `assess --input -`)
    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (ready for --input -)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: ENGINE_NAME.to_string(),
        version: ENGINE_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("fitcoach Doctor Report");
        println!("======================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");
        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report.checks.iter().any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(FitcoachCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

// Helper functions

fn load_config(path: Option<&Path>) -> Result<EngineConfig, FitcoachCliError> {
    match path {
        Some(path) => Ok(EngineConfig::from_file(path)?),
        None => Ok(EngineConfig::default()),
    }
}

fn read_input(input: &Path) -> Result<String, FitcoachCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn format_output<T: Serialize>(value: &T, format: &OutputFormat) -> Result<String, FitcoachCliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(value)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
    }
}

// Error types

#[derive(Debug)]
enum FitcoachCliError {
    Io(io::Error),
    Engine(EngineError),
    Json(serde_json::Error),
    EmptyInput,
    DoctorFailed,
}

impl From<io::Error> for FitcoachCliError {
    fn from(e: io::Error) -> Self {
        FitcoachCliError::Io(e)
    }
}

impl From<EngineError> for FitcoachCliError {
    fn from(e: EngineError) -> Self {
        FitcoachCliError::Engine(e)
    }
}

impl From<serde_json::Error> for FitcoachCliError {
    fn from(e: serde_json::Error) -> Self {
        FitcoachCliError::Json(e)
    }
}

#[derive(Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<FitcoachCliError> for CliError {
    fn from(e: FitcoachCliError) -> Self {
        match e {
            FitcoachCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            FitcoachCliError::Engine(e) => {
                let (code, hint) = match &e {
                    EngineError::JsonError(_) => ("JSON_ERROR", "Check JSON syntax and field names"),
                    EngineError::Io(_) => ("IO_ERROR", "Check file paths and permissions"),
                    EngineError::InvalidConfig(_) => {
                        ("CONFIG_ERROR", "Run 'fitcoach config' to see a valid configuration")
                    }
                    EngineError::UnknownSex(_) => ("INVALID_ARGUMENT", "Use 'male' or 'female'"),
                    EngineError::UnknownActivityLevel(_) => (
                        "INVALID_ARGUMENT",
                        "Use sedentary, light, moderate, very_active or extreme",
                    ),
                    EngineError::UnknownGoalCategory(_) => {
                        ("INVALID_ARGUMENT", "Check the goal category names")
                    }
                    EngineError::InvalidInput(_) => {
                        ("INVALID_INPUT", "Body stats must be positive and finite")
                    }
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            FitcoachCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            FitcoachCliError::EmptyInput => CliError {
                code: "EMPTY_INPUT".to_string(),
                message: "No snapshot found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            FitcoachCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
