//! Vscore CLI - Command-line interface for Vitalscore
//!
//! Commands:
//! - score-heart: Score a heart-risk submission against the frozen model
//! - score-diabetes: Score a diabetes-risk submission against the frozen model
//! - run: Score streaming submissions from stdin (NDJSON)
//! - validate: Validate vitals submissions without scoring
//! - summary: Render a user's latest health summary from a records file
//! - doctor: Diagnose model artifacts and configuration
//! - schema: Print input schema information

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use vitalscore::error::RiskError;
use vitalscore::pipeline::{DIABETES_ARTIFACT_FILE, HEART_ARTIFACT_FILE};
use vitalscore::schema::{
    DiabetesRiskInput, HeartRiskInput, VitalsInput, DIABETES_SCHEMA_VERSION, HEART_SCHEMA_VERSION,
    VITALS_SCHEMA_VERSION,
};
use vitalscore::store::{MemoryRecordStore, RecordStore, DEFAULT_HISTORY_LIMIT};
use vitalscore::summary::{history_series, HealthSummary};
use vitalscore::types::RiskAssessment;
use vitalscore::{
    validate_vitals, ModelArtifact, RiskEngine, ARTIFACT_VERSION, PRODUCER_NAME,
    VITALSCORE_VERSION,
};

/// Vscore - Risk scoring for personal health vitals
#[derive(Parser)]
#[command(name = "vscore")]
#[command(author = "Vitalscore Maintainers")]
#[command(version = VITALSCORE_VERSION)]
#[command(about = "Score health vitals against frozen risk models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a heart-risk submission against the frozen model
    ScoreHeart {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Directory containing frozen model artifacts
        #[arg(long, default_value = "models")]
        models: PathBuf,

        /// User the submission is recorded under
        #[arg(long, default_value = "local")]
        user: String,

        /// Score with the throwaway synthetic model instead of the frozen one
        #[arg(long)]
        synthetic: bool,

        /// Load record history from file before scoring
        #[arg(long)]
        load_records: Option<PathBuf>,

        /// Save record history to file after scoring
        #[arg(long)]
        save_records: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,
    },

    /// Score a diabetes-risk submission against the frozen model
    ScoreDiabetes {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Directory containing frozen model artifacts
        #[arg(long, default_value = "models")]
        models: PathBuf,

        /// User the submission is recorded under
        #[arg(long, default_value = "local")]
        user: String,

        /// Load record history from file before scoring
        #[arg(long)]
        load_records: Option<PathBuf>,

        /// Save record history to file after scoring
        #[arg(long)]
        save_records: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,
    },

    /// Score streaming submissions from stdin (one JSON per line)
    Run {
        /// Pipeline to score submissions against
        #[arg(value_enum)]
        pipeline: Pipeline,

        /// Directory containing frozen model artifacts
        #[arg(long, default_value = "models")]
        models: PathBuf,

        /// User the submissions are recorded under
        #[arg(long, default_value = "local")]
        user: String,

        /// Load record history from file before scoring
        #[arg(long)]
        load_records: Option<PathBuf>,

        /// Save record history to file on exit
        #[arg(long)]
        save_records: Option<PathBuf>,

        /// Flush output after each assessment
        #[arg(long, default_value = "true")]
        flush: bool,
    },

    /// Validate vitals submissions without scoring
    Validate {
        /// Input file path, one JSON submission per line (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a user's latest health summary from a records file
    Summary {
        /// Records file produced by --save-records
        #[arg(short, long)]
        records: PathBuf,

        /// User to summarize
        #[arg(long, default_value = "local")]
        user: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose model artifacts and configuration
    Doctor {
        /// Directory containing frozen model artifacts
        #[arg(long, default_value = "models")]
        models: PathBuf,

        /// Check a records file
        #[arg(long)]
        records: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print input schema information
    Schema {
        /// Schema to print
        #[arg(value_enum)]
        schema_type: SchemaType,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable assessment
    Text,
    /// Assessment as JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

#[derive(Clone, ValueEnum)]
enum Pipeline {
    /// Heart-risk pipeline (frozen logistic regression)
    Heart,
    /// Diabetes-risk pipeline (frozen random forest)
    Diabetes,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Dashboard vitals submission (health.vitals.v1)
    Vitals,
    /// Heart-risk scoring input (health.heart_risk.v1)
    Heart,
    /// Diabetes-risk scoring input (health.diabetes_risk.v1)
    Diabetes,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), VscoreCliError> {
    match cli.command {
        Commands::ScoreHeart {
            input,
            models,
            user,
            synthetic,
            load_records,
            save_records,
            output_format,
        } => cmd_score_heart(
            &input,
            &models,
            &user,
            synthetic,
            load_records.as_deref(),
            save_records.as_deref(),
            output_format,
        ),

        Commands::ScoreDiabetes {
            input,
            models,
            user,
            load_records,
            save_records,
            output_format,
        } => cmd_score_diabetes(
            &input,
            &models,
            &user,
            load_records.as_deref(),
            save_records.as_deref(),
            output_format,
        ),

        Commands::Run {
            pipeline,
            models,
            user,
            load_records,
            save_records,
            flush,
        } => cmd_run(
            pipeline,
            &models,
            &user,
            load_records.as_deref(),
            save_records.as_deref(),
            flush,
        ),

        Commands::Validate { input, json } => cmd_validate(&input, json),

        Commands::Summary {
            records,
            user,
            json,
        } => cmd_summary(&records, &user, json),

        Commands::Doctor {
            models,
            records,
            json,
        } => cmd_doctor(&models, records.as_deref(), json),

        Commands::Schema { schema_type } => cmd_schema(schema_type),
    }
}

fn cmd_score_heart(
    input: &PathBuf,
    models: &std::path::Path,
    user: &str,
    synthetic: bool,
    load_records: Option<&std::path::Path>,
    save_records: Option<&std::path::Path>,
    output_format: OutputFormat,
) -> Result<(), VscoreCliError> {
    let input_data = read_input(input)?;
    let submission = HeartRiskInput::from_json(&input_data)?;

    let mut engine = RiskEngine::from_artifact_dir(models)?;

    if let Some(records_path) = load_records {
        let records_json = fs::read_to_string(records_path)?;
        engine.load_records(&records_json)?;
    }

    let assessment = if synthetic {
        engine.score_heart_synthetic(user, &submission)?
    } else {
        engine.score_heart(user, &submission)?
    };

    if let Some(records_path) = save_records {
        let records_json = engine.save_records()?;
        fs::write(records_path, records_json)?;
    }

    print_assessment(&assessment, &output_format)?;
    Ok(())
}

fn cmd_score_diabetes(
    input: &PathBuf,
    models: &std::path::Path,
    user: &str,
    load_records: Option<&std::path::Path>,
    save_records: Option<&std::path::Path>,
    output_format: OutputFormat,
) -> Result<(), VscoreCliError> {
    let input_data = read_input(input)?;
    let submission = DiabetesRiskInput::from_json(&input_data)?;

    let mut engine = RiskEngine::from_artifact_dir(models)?;

    if let Some(records_path) = load_records {
        let records_json = fs::read_to_string(records_path)?;
        engine.load_records(&records_json)?;
    }

    let assessment = engine.score_diabetes(user, &submission)?;

    if let Some(records_path) = save_records {
        let records_json = engine.save_records()?;
        fs::write(records_path, records_json)?;
    }

    print_assessment(&assessment, &output_format)?;
    Ok(())
}

fn cmd_run(
    pipeline: Pipeline,
    models: &std::path::Path,
    user: &str,
    load_records: Option<&std::path::Path>,
    save_records: Option<&std::path::Path>,
    flush: bool,
) -> Result<(), VscoreCliError> {
    let mut engine = RiskEngine::from_artifact_dir(models)?;

    if let Some(records_path) = load_records {
        let records_json = fs::read_to_string(records_path)?;
        engine.load_records(&records_json)?;
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let assessment = match pipeline {
            Pipeline::Heart => {
                let submission = HeartRiskInput::from_json(trimmed)?;
                engine.score_heart(user, &submission)?
            }
            Pipeline::Diabetes => {
                let submission = DiabetesRiskInput::from_json(trimmed)?;
                engine.score_diabetes(user, &submission)?
            }
        };

        writeln!(stdout, "{}", serde_json::to_string(&assessment)?)?;
        if flush {
            stdout.flush()?;
        }
    }

    if let Some(records_path) = save_records {
        let records_json = engine.save_records()?;
        fs::write(records_path, records_json)?;
    }

    Ok(())
}

fn cmd_validate(input: &PathBuf, json: bool) -> Result<(), VscoreCliError> {
    let input_data = read_input(input)?;

    let lines: Vec<&str> = input_data
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(VscoreCliError::NoSubmissions);
    }

    let mut errors: Vec<ValidationErrorDetail> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let outcome = VitalsInput::from_json(line).and_then(|submission| {
            validate_vitals(&submission)?;
            Ok(())
        });

        if let Err(e) = outcome {
            errors.push(ValidationErrorDetail {
                index,
                error: e.to_string(),
            });
        }
    }

    let report = ValidationReport {
        total_submissions: lines.len(),
        valid_submissions: lines.len() - errors.len(),
        invalid_submissions: errors.len(),
        errors,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total submissions:   {}", report.total_submissions);
        println!("Valid submissions:   {}", report.valid_submissions);
        println!("Invalid submissions: {}", report.invalid_submissions);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!("  - Submission {}: {}", err.index, err.error);
            }
        }
    }

    if report.invalid_submissions > 0 {
        Err(VscoreCliError::ValidationFailed(report.invalid_submissions))
    } else {
        Ok(())
    }
}

fn cmd_summary(records: &PathBuf, user: &str, json: bool) -> Result<(), VscoreCliError> {
    let records_json = fs::read_to_string(records)?;
    let store = MemoryRecordStore::from_json(&records_json)?;

    let summary = store
        .get_latest(user)
        .map(HealthSummary::from_record)
        .unwrap_or_else(HealthSummary::empty);
    let series = history_series(&store.get_history(user, DEFAULT_HISTORY_LIMIT));

    if json {
        let payload = serde_json::json!({
            "user": user,
            "summary": summary,
            "history": series,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{}", summary.render());

        if !series.is_empty() {
            println!("\nRecent history:");
            for point in &series {
                println!(
                    "  {}  bp {}  hr {}  risk {}",
                    point.label,
                    match (point.systolic, point.diastolic) {
                        (Some(sys), Some(dia)) => format!("{}/{}", sys, dia),
                        _ => "-".to_string(),
                    },
                    point
                        .heart_rate
                        .map(|hr| format!("{}", hr))
                        .unwrap_or_else(|| "-".to_string()),
                    point
                        .risk_score
                        .map(|score| format!("{:.1}%", score))
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
        }
    }

    Ok(())
}

fn cmd_doctor(
    models: &std::path::Path,
    records: Option<&std::path::Path>,
    json: bool,
) -> Result<(), VscoreCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    // Check Vitalscore version
    checks.push(DoctorCheck {
        name: "vitalscore_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Vitalscore version {}", VITALSCORE_VERSION),
    });

    // Check artifact format version
    checks.push(DoctorCheck {
        name: "artifact_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Artifact format: {}", ARTIFACT_VERSION),
    });

    // Check each frozen model artifact
    for file in [HEART_ARTIFACT_FILE, DIABETES_ARTIFACT_FILE] {
        let path = models.join(file);
        let check = match ModelArtifact::load(&path) {
            Ok(artifact) => DoctorCheck {
                name: file.to_string(),
                status: CheckStatus::Ok,
                message: format!(
                    "Model {} ({}, {} columns, trained {})",
                    artifact.model,
                    artifact.classifier.kind(),
                    artifact.columns.len(),
                    artifact.trained_at.format("%Y-%m-%d")
                ),
            },
            Err(e) => DoctorCheck {
                name: file.to_string(),
                status: CheckStatus::Error,
                message: e.to_string(),
            },
        };
        checks.push(check);
    }

    // Check records file if provided
    if let Some(records_path) = records {
        if records_path.exists() {
            match fs::read_to_string(records_path) {
                Ok(content) => match MemoryRecordStore::from_json(&content) {
                    Ok(_) => {
                        checks.push(DoctorCheck {
                            name: "records".to_string(),
                            status: CheckStatus::Ok,
                            message: "Records file valid".to_string(),
                        });
                    }
                    Err(e) => {
                        checks.push(DoctorCheck {
                            name: "records".to_string(),
                            status: CheckStatus::Error,
                            message: format!("Invalid records JSON: {}", e),
                        });
                    }
                },
                Err(e) => {
                    checks.push(DoctorCheck {
                        name: "records".to_string(),
                        status: CheckStatus::Error,
                        message: format!("Cannot read records file: {}", e),
                    });
                }
            }
        } else {
            checks.push(DoctorCheck {
                name: "records".to_string(),
                status: CheckStatus::Warning,
                message: "Records file does not exist".to_string(),
            });
        }
    }

    // Check stdin mode (for piping submissions)
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
            message: "stdin is a pipe (streaming submissions ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: VITALSCORE_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Vscore Doctor Report");
        println!("====================");
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

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(VscoreCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_type: SchemaType) -> Result<(), VscoreCliError> {
    match schema_type {
        SchemaType::Vitals => {
            println!("Input Schema: {}", VITALS_SCHEMA_VERSION);
            println!();
            println!("Dashboard vitals submission. Every field is optional; a submission");
            println!("carries whatever the user filled in, and validation happens per field.");
            println!();
            println!("  blood_pressure  \"systolic/diastolic\" string, e.g. \"120/80\"");
            println!("                  systolic 70-200, diastolic 40-130");
            println!("  heart_rate      whole beats per minute, 30-220");
            println!("  temperature     body temperature in celsius, 35-42");
            println!("  weight          body weight in kg, 20-300");
            println!("  cholesterol     total cholesterol in mg/dL, 100-600");
        }
        SchemaType::Heart => {
            println!("Input Schema: {}", HEART_SCHEMA_VERSION);
            println!();
            println!("Heart-risk scoring input. The frozen-model path requires and validates");
            println!("age, blood_pressure, cholesterol and heart_rate; the synthetic path");
            println!("substitutes defaults for anything missing or malformed and never");
            println!("range-checks.");
            println!();
            println!("  age             years, 20-100 (required)");
            println!("  blood_pressure  \"systolic/diastolic\" string (required)");
            println!("                  systolic must also fall in the model range 80-200");
            println!("  cholesterol     total cholesterol in mg/dL, 100-600 (required)");
            println!("  heart_rate      beats per minute, 40-200 (required)");
            println!("  st_depression   exercise ST depression, 0-6; 0 when absent");
            println!("                  (accepts alias \"oldpeak\")");
            println!("  weight          body weight in kg; only the synthetic path reads it");
        }
        SchemaType::Diabetes => {
            println!("Input Schema: {}", DIABETES_SCHEMA_VERSION);
            println!();
            println!("Diabetes-risk scoring input. Age is range-checked; the remaining");
            println!("numerics must be present and finite. Categorical fields are one-hot");
            println!("encoded against the frozen model's column schema, and an unknown");
            println!("smoking category encodes as no category selected.");
            println!();
            println!("  gender               label, recorded but not a model feature");
            println!("  age                  years, 20-100 (required)");
            println!("  hypertension         diagnosis flag, true/false or 0/1 (required)");
            println!("  heart_disease        diagnosis flag, true/false or 0/1 (required)");
            println!("  smoking_history      category, e.g. \"never\", \"former\", \"current\"");
            println!("  bmi                  body-mass index (required)");
            println!("  HbA1c_level          HbA1c percentage (required)");
            println!("  blood_glucose_level  blood glucose in mg/dL (required)");
        }
    }

    Ok(())
}

// Helper functions

fn read_input(input: &PathBuf) -> Result<String, VscoreCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn print_assessment(
    assessment: &RiskAssessment,
    format: &OutputFormat,
) -> Result<(), VscoreCliError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(assessment)?),
        OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(assessment)?),
        OutputFormat::Text => {
            println!("Assessment {}", assessment.id);
            println!("Model:  {}", assessment.model);
            println!(
                "Score:  {:.1}% ({})",
                assessment.percentage,
                assessment.level.as_str()
            );
            println!("Advice: {}", assessment.advice);
            if assessment.fallback {
                println!("Note:   fallback score, prediction did not complete");
            }
        }
    }
    Ok(())
}

// Error types

#[derive(Debug)]
enum VscoreCliError {
    Io(io::Error),
    Risk(RiskError),
    Json(serde_json::Error),
    NoSubmissions,
    ValidationFailed(usize),
    DoctorFailed,
}

impl From<io::Error> for VscoreCliError {
    fn from(e: io::Error) -> Self {
        VscoreCliError::Io(e)
    }
}

impl From<RiskError> for VscoreCliError {
    fn from(e: RiskError) -> Self {
        VscoreCliError::Risk(e)
    }
}

impl From<serde_json::Error> for VscoreCliError {
    fn from(e: serde_json::Error) -> Self {
        VscoreCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<VscoreCliError> for CliError {
    fn from(e: VscoreCliError) -> Self {
        match e {
            VscoreCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            VscoreCliError::Risk(e) => CliError {
                code: risk_error_code(&e).to_string(),
                message: e.to_string(),
                hint: Some(risk_error_hint(&e).to_string()),
            },
            VscoreCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            VscoreCliError::NoSubmissions => CliError {
                code: "NO_SUBMISSIONS".to_string(),
                message: "No submissions found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            VscoreCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} submissions failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
            VscoreCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

fn risk_error_code(e: &RiskError) -> &'static str {
    match e {
        RiskError::Validation { .. } | RiskError::MissingField(_) => "VALIDATION_ERROR",
        RiskError::Encoding(_) => "ENCODING_ERROR",
        RiskError::ModelUnavailable(_) => "MODEL_UNAVAILABLE",
        RiskError::Prediction(_) => "PREDICTION_ERROR",
        RiskError::JsonError(_) => "JSON_ERROR",
        RiskError::IoError(_) => "IO_ERROR",
    }
}

fn risk_error_hint(e: &RiskError) -> &'static str {
    match e {
        RiskError::Validation { .. } | RiskError::MissingField(_) => {
            "Run 'vscore schema' for field names and value ranges"
        }
        RiskError::Encoding(_) => "Check the submission against the model schema",
        RiskError::ModelUnavailable(_) => "Check the --models directory and artifact files",
        RiskError::Prediction(_) => "Check the model artifact for defects",
        RiskError::JsonError(_) => "Check JSON syntax",
        RiskError::IoError(_) => "Check file paths and permissions",
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_submissions: usize,
    valid_submissions: usize,
    invalid_submissions: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    error: String,
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
