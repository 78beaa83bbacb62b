use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use acnpdu_core::{FrameReport, InputInfo, MessageSpec, decode_frame, encode_message};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("ACNPDU_BUILD_COMMIT"),
    " ",
    env!("ACNPDU_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "acnpdu")]
#[command(version = VERSION)]
#[command(
    about = "Encoder and decoder for nested ACN / E1.33 PDU frames.",
    long_about = None,
    after_help = "Examples:\n  acnpdu frame encode message.json -o frame.bin\n  acnpdu frame decode frame.bin -o report.json\n  acnpdu frame decode frame.hex --stdout --pretty"
)]
struct Cli {
    /// Log filter (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on single E1.33 frames (UDP payloads).
    Frame {
        #[command(subcommand)]
        command: FrameCommands,
    },
}

#[derive(Subcommand, Debug)]
enum FrameCommands {
    /// Encode a JSON message description into a frame.
    #[command(
        after_help = "Examples:\n  acnpdu frame encode message.json -o frame.bin\n  acnpdu frame encode message.json --stdout"
    )]
    Encode {
        /// Path to a JSON message file
        message: PathBuf,

        /// Output frame path
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        output: Option<PathBuf>,

        /// Write the frame to stdout as hex
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Write hex text instead of binary
        #[arg(long)]
        hex: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// Decode a frame and generate a versioned JSON report.
    #[command(
        after_help = "Examples:\n  acnpdu frame decode frame.bin -o report.json\n  acnpdu frame decode 'captures/*.hex' --stdout --pretty"
    )]
    Decode {
        /// Path to a frame file (binary, or hex with --hex / .hex extension)
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Read the input as hex text
        #[arg(long)]
        hex: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if unknown vectors are present
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = init_logging(&cli.log).and_then(|()| match cli.command {
        Commands::Frame { command } => match command {
            FrameCommands::Encode {
                message,
                output,
                stdout,
                hex,
                quiet,
            } => cmd_frame_encode(message, output, stdout, hex, quiet),
            FrameCommands::Decode {
                input,
                report,
                stdout,
                hex,
                pretty,
                compact,
                quiet,
                strict,
            } => cmd_frame_decode(input, report, stdout, hex, pretty, compact, quiet, strict),
        },
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

fn init_logging(filter: &str) -> Result<(), CliError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(filter).map_err(|err| {
            CliError::new(
                format!("invalid log filter '{}'", filter),
                Some(format!("filter error: {}", err)),
            )
        })?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
    Ok(())
}

fn cmd_frame_encode(
    message: PathBuf,
    output: Option<PathBuf>,
    stdout: bool,
    hex: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let resolved_message = resolve_input_path(&message)?;
    validate_input_file(&resolved_message, "use a JSON message file")?;

    let json = fs::read_to_string(&resolved_message).with_context(|| {
        format!("Failed to read message file: {}", resolved_message.display())
    })?;
    let spec: MessageSpec = serde_json::from_str(&json).map_err(|err| {
        CliError::new(
            format!("invalid message file {}: {}", resolved_message.display(), err),
            Some("expected fields: cid, source, sequence, endpoint, vector, body".to_string()),
        )
    })?;
    let frame = encode_message(&spec).map_err(|err| {
        CliError::new(
            format!("encoding failed: {}", err),
            Some("check the CID and hex fields of the message".to_string()),
        )
    })?;
    debug!(bytes = frame.len(), "encoded frame");

    let Some(output) = output.filter(|_| !stdout) else {
        println!("{}", ::hex::encode(&frame));
        return Ok(());
    };
    ensure_distinct_output(&resolved_message, &output)?;
    create_parent_dir(&output)?;
    if hex {
        fs::write(&output, format!("{}\n", ::hex::encode(&frame)))
    } else {
        fs::write(&output, &frame)
    }
    .with_context(|| format!("Failed to write frame: {}", output.display()))?;

    if !quiet {
        eprintln!("OK: frame written -> {}", output.display());
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_frame_decode(
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    hex: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input, "use a binary or .hex frame file")?;
    let report = if stdout {
        None
    } else {
        Some(report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };
    if let Some(report_path) = report.as_ref() {
        ensure_distinct_output(&resolved_input, report_path)?;
    }

    let raw = fs::read(&resolved_input)
        .with_context(|| format!("Failed to read input file: {}", resolved_input.display()))?;
    let input_bytes = raw.len() as u64;
    let frame = if hex || has_extension(&resolved_input, "hex") {
        parse_hex_frame(&raw, &resolved_input)?
    } else {
        raw
    };
    debug!(path = %resolved_input.display(), bytes = frame.len(), "read frame");

    let mut rep = decode_frame(&frame).map_err(|err| {
        CliError::new(
            format!("frame decoding failed: {}", err),
            Some("the input must be one complete UDP payload, preamble included".to_string()),
        )
    })?;
    rep.input = Some(InputInfo {
        path: resolved_input.display().to_string(),
        bytes: input_bytes,
    });
    let json = serialize_report(&rep, pretty, compact)?;

    match report {
        None => print!("{}", json),
        Some(report) => {
            create_parent_dir(&report)?;
            fs::write(&report, json)
                .with_context(|| format!("Failed to write report: {}", report.display()))?;
            if !quiet {
                eprintln!("OK: report written -> {}", report.display());
            }
        }
    }

    if strict && rep.unknown_vectors > 0 {
        return Err(CliError::new(
            format!("unknown vectors detected ({})", rep.unknown_vectors),
            Some("inspect layers with \"vector_name\": null in the report".to_string()),
        ));
    }
    Ok(())
}

fn parse_hex_frame(raw: &[u8], path: &Path) -> Result<Vec<u8>, CliError> {
    let text = String::from_utf8_lossy(raw);
    let compact: String = text.split_whitespace().collect();
    ::hex::decode(compact).map_err(|err| {
        CliError::new(
            format!("invalid hex frame {}: {}", path.display(), err),
            Some("hex input must contain an even number of hex digits".to_string()),
        )
    })
}

fn serialize_report(rep: &FrameReport, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn ensure_distinct_output(input: &Path, output: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let output_dir = output
        .parent()
        .map(|parent| {
            if parent.as_os_str().is_empty() {
                fs::canonicalize(".")
            } else {
                fs::canonicalize(parent)
            }
        })
        .transpose();
    // A missing output directory cannot contain the input.
    let Ok(Some(output_dir)) = output_dir else {
        return Ok(());
    };
    let file_name = output
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid output path: {}", output.display()))?;
    if output_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("output path must differ from input: {}", output.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    Ok(())
}

fn validate_input_file(input: &Path, hint: &str) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some(hint.to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some(hint.to_string()),
        ));
    }
    Ok(())
}

fn has_extension(path: &Path, expected: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(expected))
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let hint = "pass a single file, or run once per file".to_string();
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        let message = format!(
            "multiple files match pattern '{}' ({} matches); matches: {}{}",
            pattern,
            matches.len(),
            listed,
            more
        );
        return Err(CliError::new(message, Some(hint)));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
