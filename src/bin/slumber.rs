//! Slumber CLI - Command-line interface for Synheart Slumber
//!
//! Commands:
//! - predict: Predict sleep quality for each input record
//! - explain: Print full reports with the 10-factor breakdown
//! - validate: Check input records against their documented ranges
//! - schema: Print input or output schema information

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use synheart_slumber::adapter::{FormAdapter, InputAdapter, RecordAdapter};
use synheart_slumber::encoder::ReportEncoder;
use synheart_slumber::types::{PredictionInput, PredictionResult};
use synheart_slumber::validation::check_input;
use synheart_slumber::{predict, ComputeError, SLUMBER_VERSION};

/// Slumber - On-device sleep quality assessment
#[derive(Parser)]
#[command(name = "slumber")]
#[command(author = "Synheart AI Inc")]
#[command(version = SLUMBER_VERSION)]
#[command(about = "Predict sleep quality from lifestyle and physiology inputs", long_about = None)]
struct Cli {
    /// Log level filter (overridden by SLUMBER_LOG or RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict sleep quality for each input record
    Predict {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "auto")]
        output_format: OutputFormat,

        /// Records are front-end form submissions
        #[arg(long)]
        form: bool,
    },

    /// Print full reports including all factor scores
    Explain {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Records are front-end form submissions
        #[arg(long)]
        form: bool,

        /// Producer instance ID to embed (random if omitted)
        #[arg(long)]
        instance_id: Option<String>,
    },

    /// Check input records against their documented ranges
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Records are front-end form submissions
        #[arg(long)]
        form: bool,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print (input or output)
        #[arg(value_enum)]
        schema_type: SchemaType,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// A single JSON object or an array of objects
    Json,
    /// Newline-delimited JSON (one record per line)
    Ndjson,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Text on a terminal, NDJSON otherwise
    Auto,
    /// Human readable summary
    Text,
    /// Newline-delimited JSON (one result per line)
    Ndjson,
    /// JSON array of results
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Prediction input record
    Input,
    /// Prediction result record
    Output,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

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

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_env("SLUMBER_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), SlumberCliError> {
    match cli.command {
        Commands::Predict {
            input,
            input_format,
            output_format,
            form,
        } => cmd_predict(&input, input_format, output_format, form),

        Commands::Explain {
            input,
            input_format,
            form,
            instance_id,
        } => cmd_explain(&input, input_format, form, instance_id),

        Commands::Validate {
            input,
            input_format,
            form,
            json,
        } => cmd_validate(&input, input_format, form, json),

        Commands::Schema { schema_type } => cmd_schema(schema_type),
    }
}

fn cmd_predict(
    input: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    form: bool,
) -> Result<(), SlumberCliError> {
    let inputs = load_inputs(input, &input_format, form)?;
    info!(records = inputs.len(), "predicting sleep quality");

    let results: Vec<PredictionResult> = inputs.iter().map(predict).collect();

    let output_format = match output_format {
        OutputFormat::Auto if atty::is(atty::Stream::Stdout) => OutputFormat::Text,
        OutputFormat::Auto => OutputFormat::Ndjson,
        other => other,
    };

    print!("{}", format_results(&results, &output_format)?);
    Ok(())
}

fn cmd_explain(
    input: &Path,
    input_format: InputFormat,
    form: bool,
    instance_id: Option<String>,
) -> Result<(), SlumberCliError> {
    let inputs = load_inputs(input, &input_format, form)?;

    let encoder = match instance_id {
        Some(id) => ReportEncoder::with_instance_id(id),
        None => ReportEncoder::new(),
    };

    let reports: Vec<_> = inputs.iter().map(|i| encoder.encode(i)).collect();
    info!(records = reports.len(), "encoded reports");

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

fn cmd_validate(
    input: &Path,
    input_format: InputFormat,
    form: bool,
    json: bool,
) -> Result<(), SlumberCliError> {
    let inputs = load_inputs(input, &input_format, form)?;

    let flagged: Vec<RecordWarnings> = inputs
        .iter()
        .enumerate()
        .filter_map(|(index, input)| {
            let warnings = check_input(input);
            if warnings.is_empty() {
                None
            } else {
                Some(RecordWarnings {
                    index,
                    warnings: warnings.iter().map(|w| w.to_string()).collect(),
                })
            }
        })
        .collect();

    let report = ValidationReport {
        total_records: inputs.len(),
        clean_records: inputs.len() - flagged.len(),
        flagged_records: flagged.len(),
        records: flagged,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total records:   {}", report.total_records);
        println!("Clean records:   {}", report.clean_records);
        println!("Flagged records: {}", report.flagged_records);

        if !report.records.is_empty() {
            println!("\nWarnings:");
            for record in &report.records {
                for warning in &record.warnings {
                    println!("  - Record {}: {}", record.index, warning);
                }
            }
        }
    }

    if report.flagged_records > 0 {
        Err(SlumberCliError::ValidationFailed(report.flagged_records))
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_type: SchemaType) -> Result<(), SlumberCliError> {
    match schema_type {
        SchemaType::Input => println!("{}", get_input_json_schema()),
        SchemaType::Output => println!("{}", get_output_json_schema()),
    }
    Ok(())
}

// Helper functions

fn read_source(input: &Path) -> Result<String, SlumberCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn load_inputs(
    input: &Path,
    format: &InputFormat,
    form: bool,
) -> Result<Vec<PredictionInput>, SlumberCliError> {
    let data = read_source(input)?;
    debug!(bytes = data.len(), form, "read input");

    let inputs = if form {
        parse_records(&FormAdapter, &data, format)?
    } else {
        parse_records(&InputAdapter, &data, format)?
    };

    if inputs.is_empty() {
        return Err(SlumberCliError::NoRecords);
    }
    Ok(inputs)
}

fn parse_records<A: RecordAdapter>(
    adapter: &A,
    data: &str,
    format: &InputFormat,
) -> Result<Vec<PredictionInput>, ComputeError> {
    match format {
        InputFormat::Ndjson => adapter.parse_ndjson(data),
        InputFormat::Json if data.trim_start().starts_with('[') => adapter.parse_array(data),
        InputFormat::Json => Ok(vec![adapter.parse(data)?]),
    }
}

fn format_results(
    results: &[PredictionResult],
    format: &OutputFormat,
) -> Result<String, SlumberCliError> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for result in results {
                lines.push(serde_json::to_string(result)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(results)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(results)?),
        OutputFormat::Text | OutputFormat::Auto => Ok(format_text(results)),
    }
}

fn format_text(results: &[PredictionResult]) -> String {
    let mut out = String::new();
    for (index, result) in results.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "Record {}: {} ({}% confidence)\n",
            index,
            result.quality.as_str(),
            result.confidence_percent()
        ));
        out.push_str(&format!("  {}\n", result.summary()));
        out.push_str("  Top factors:\n");
        for (rank, factor) in result.factors.iter().enumerate() {
            out.push_str(&format!(
                "    {}. {:<18} {:.2}\n",
                rank + 1,
                factor.factor.name(),
                factor.impact
            ));
        }
    }
    out
}

fn get_input_json_schema() -> String {
    let real = serde_json::json!({ "type": "number" });
    let integer = serde_json::json!({ "type": "integer" });

    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "https://synheart.ai/schemas/slumber.input.v1.json",
        "title": "slumber.input.v1",
        "description": "Synheart Slumber prediction input",
        "type": "object",
        "required": [
            "age", "gender", "sleepDurationHours", "physicalActivityMinutes", "stressLevel",
            "bmiCategory", "heartRateBpm", "dailySteps", "systolicBP", "diastolicBP"
        ],
        "properties": {
            "age": integer,
            "gender": {
                "type": "string",
                "description": "Male, Female or Other; other values score as Female"
            },
            "sleepDurationHours": real,
            "physicalActivityMinutes": real,
            "stressLevel": integer,
            "bmiCategory": {
                "type": "string",
                "description": "Underweight, Normal, Overweight or Obese; other values score as Normal"
            },
            "heartRateBpm": real,
            "dailySteps": integer,
            "systolicBP": real,
            "diastolicBP": real
        }
    })
    .to_string()
}

fn get_output_json_schema() -> String {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "https://synheart.ai/schemas/slumber.result.v1.json",
        "title": "slumber.result.v1",
        "description": "Synheart Slumber prediction result",
        "type": "object",
        "required": ["quality", "confidence", "factors"],
        "properties": {
            "quality": { "type": "string", "enum": ["Good", "Poor"] },
            "confidence": { "type": "number", "minimum": 0, "maximum": 1 },
            "factors": {
                "type": "array",
                "minItems": 5,
                "maxItems": 5,
                "items": {
                    "type": "object",
                    "required": ["name", "impact"],
                    "properties": {
                        "name": { "type": "string" },
                        "impact": { "type": "number", "minimum": 0 }
                    }
                }
            }
        }
    })
    .to_string()
}

// Error types

#[derive(Debug)]
enum SlumberCliError {
    Io(io::Error),
    Compute(ComputeError),
    Json(serde_json::Error),
    NoRecords,
    ValidationFailed(usize),
}

impl From<io::Error> for SlumberCliError {
    fn from(e: io::Error) -> Self {
        SlumberCliError::Io(e)
    }
}

impl From<ComputeError> for SlumberCliError {
    fn from(e: ComputeError) -> Self {
        SlumberCliError::Compute(e)
    }
}

impl From<serde_json::Error> for SlumberCliError {
    fn from(e: serde_json::Error) -> Self {
        SlumberCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<SlumberCliError> for CliError {
    fn from(e: SlumberCliError) -> Self {
        match e {
            SlumberCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            SlumberCliError::Compute(ComputeError::JsonError(e)) | SlumberCliError::Json(e) => {
                CliError {
                    code: "JSON_ERROR".to_string(),
                    message: e.to_string(),
                    hint: Some("Run 'slumber schema input' for the expected fields".to_string()),
                }
            }
            SlumberCliError::Compute(e) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check the input format (--input-format, --form)".to_string()),
            },
            SlumberCliError::NoRecords => CliError {
                code: "NO_RECORDS".to_string(),
                message: "No records found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            SlumberCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} records have out-of-domain values", count),
                hint: Some("Predictions still run; review the warnings above".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_records: usize,
    clean_records: usize,
    flagged_records: usize,
    records: Vec<RecordWarnings>,
}

#[derive(serde::Serialize)]
struct RecordWarnings {
    index: usize,
    warnings: Vec<String>,
}
