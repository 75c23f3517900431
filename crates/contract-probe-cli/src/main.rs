// crates/contract-probe-cli/src/main.rs
// ============================================================================
// Module: Contract Probe CLI Entry Point
// Description: Command dispatcher for suite runs and config validation.
// Purpose: Run the canonical users-contract matrix from the command line.
// Dependencies: clap, contract-probe-core, contract-probe-report, contract-probe-transport
// ============================================================================

//! ## Overview
//! The Contract Probe CLI runs the canonical scenario matrix against a
//! configured base URL and renders a per-case report plus summary. The exit
//! code reflects the suite outcome: success only when every case passed.
//! Configuration comes from an optional TOML file with command-line
//! overrides applied on top.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use contract_probe_cli::config::ConfigError;
use contract_probe_cli::config::ProbeConfig;
use contract_probe_core::CaseOutcome;
use contract_probe_core::RunReport;
use contract_probe_core::ScenarioKind;
use contract_probe_core::run_scenarios;
use contract_probe_report::FileSink;
use contract_probe_report::MemorySink;
use contract_probe_transport::HttpTransport;
use contract_probe_transport::HttpTransportConfig;
use thiserror::Error;

// ============================================================================
// SECTION: Command Model
// ============================================================================

/// Contract Probe: declarative contract checks for the users resource.
#[derive(Parser, Debug)]
#[command(name = "contract-probe", version, about)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs scenario cases against the configured target.
    Run(RunCommand),
    /// Configuration inspection commands.
    Config {
        /// Configuration subcommand.
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Validates a configuration file without running anything.
    Validate(ConfigValidateCommand),
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
struct RunCommand {
    /// Optional config file path (defaults to contract-probe.toml when
    /// present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Base URL override for the users resource.
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
    /// Request timeout override in milliseconds.
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,
    /// Allow cleartext HTTP targets.
    #[arg(long)]
    allow_http: bool,
    /// Scenarios to run (defaults to all five).
    #[arg(long, value_enum, value_delimiter = ',', value_name = "SCENARIO")]
    scenario: Vec<ScenarioArg>,
    /// Directory receiving raw response attachments.
    #[arg(long, value_name = "DIR")]
    report_dir: Option<PathBuf>,
    /// Output format for the run report.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Config file path to validate.
    #[arg(long, value_name = "PATH")]
    config: PathBuf,
}

/// Scenario selector accepted on the command line.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum ScenarioArg {
    /// Page listing scenario.
    List,
    /// Read-by-identifier scenario.
    Read,
    /// Create scenario.
    Create,
    /// Update scenario.
    Update,
    /// Delete scenario.
    Delete,
}

impl From<ScenarioArg> for ScenarioKind {
    fn from(value: ScenarioArg) -> Self {
        match value {
            ScenarioArg::List => Self::List,
            ScenarioArg::Read => Self::Read,
            ScenarioArg::Create => Self::Create,
            ScenarioArg::Update => Self::Update,
            ScenarioArg::Delete => Self::Delete,
        }
    }
}

/// Output formats for the run report.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum ReportFormat {
    /// Per-case lines plus a summary.
    Text,
    /// The full report as pretty JSON.
    Json,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a rendered message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a rendered message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::new(err.to_string())
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(command) => command_run(&command),
        Commands::Config {
            command,
        } => match command {
            ConfigCommands::Validate(command) => command_config_validate(&command),
        },
    }
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Executes the `run` command.
fn command_run(command: &RunCommand) -> CliResult<ExitCode> {
    let config = resolve_config(command)?;
    let transport = HttpTransport::new(HttpTransportConfig {
        allow_http: config.target.allow_http,
        timeout_ms: config.target.timeout_ms,
        ..HttpTransportConfig::default()
    })
    .map_err(|err| CliError::new(err.to_string()))?;

    let kinds = selected_scenarios(&command.scenario);
    let report = match &config.report.directory {
        Some(directory) => {
            let sink = FileSink::new(directory).map_err(|err| CliError::new(err.to_string()))?;
            run_scenarios(&transport, &sink, &config.target.base_url, &kinds)
        }
        None => {
            let sink = MemorySink::new();
            run_scenarios(&transport, &sink, &config.target.base_url, &kinds)
        }
    };

    render_report(&report, command.format)?;
    if report.all_passed() { Ok(ExitCode::SUCCESS) } else { Ok(ExitCode::FAILURE) }
}

/// Resolves the effective configuration from file and overrides.
fn resolve_config(command: &RunCommand) -> CliResult<ProbeConfig> {
    let mut config = ProbeConfig::load(command.config.as_deref())?;
    if let Some(base_url) = &command.base_url {
        config.target.base_url.clone_from(base_url);
    }
    if let Some(timeout_ms) = command.timeout_ms {
        config.target.timeout_ms = timeout_ms;
    }
    if command.allow_http {
        config.target.allow_http = true;
    }
    if let Some(report_dir) = &command.report_dir {
        config.report.directory = Some(report_dir.clone());
    }
    config.validate()?;
    Ok(config)
}

/// Maps the scenario selection onto core kinds, defaulting to all five.
fn selected_scenarios(selection: &[ScenarioArg]) -> Vec<ScenarioKind> {
    if selection.is_empty() {
        ScenarioKind::ALL.to_vec()
    } else {
        selection.iter().copied().map(ScenarioKind::from).collect()
    }
}

/// Renders the run report in the requested format.
fn render_report(report: &RunReport, format: ReportFormat) -> CliResult<()> {
    match format {
        ReportFormat::Text => {
            for line in text_report_lines(report) {
                write_stdout_line(&line)
                    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            }
            Ok(())
        }
        ReportFormat::Json => {
            let rendered = serde_json::to_string_pretty(report)
                .map_err(|err| CliError::new(format!("report serialization failed: {err}")))?;
            write_stdout_line(&rendered)
                .map_err(|err| CliError::new(output_error("stdout", &err)))
        }
    }
}

/// Builds the text rendering of a run report.
fn text_report_lines(report: &RunReport) -> Vec<String> {
    let mut lines = Vec::with_capacity(report.cases.len() + 1);
    for case in &report.cases {
        let line = match &case.outcome {
            CaseOutcome::Passed => {
                format!("PASS [{}] {}: {}", case.descriptor.severity, case.scenario, case.descriptor.title)
            }
            CaseOutcome::Failed {
                reason,
            } => {
                format!(
                    "FAIL [{}] {}: {}: {reason}",
                    case.descriptor.severity, case.scenario, case.descriptor.title
                )
            }
        };
        lines.push(line);
    }
    lines.push(format!(
        "{} cases, {} passed, {} failed",
        report.total, report.passed, report.failed
    ));
    lines
}

// ============================================================================
// SECTION: Config Command
// ============================================================================

/// Executes the `config validate` command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    ProbeConfig::load_file(&command.config)?;
    write_stdout_line("config ok").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output failure message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("cannot write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
