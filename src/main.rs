use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use docxtract::config::Config;
use docxtract::export::{self, OutputFormat};
use docxtract::{DocumentModel, decode_base64_payload, extract_with_options};

#[derive(Parser)]
#[command(name = "docxtract")]
#[command(about = "Extract text, tables and metadata from Word documents")]
#[command(version)]
struct Cli {
    /// Path to the Word document (.docx) or base64 text file
    #[arg(required_unless_present = "init_config")]
    file: Option<PathBuf>,

    /// The input file contains base64-encoded data (optionally a data: URI)
    #[arg(long)]
    base64: bool,

    /// Write the extraction result to this file as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Format for results printed to stdout
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Emit compact rather than pretty-printed JSON
    #[arg(long)]
    compact: bool,

    /// Use this config file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the default config file and exit
    #[arg(long)]
    init_config: bool,

    /// Log extraction details to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries results
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.init_config {
        match Config::init_default()? {
            Some(path) => println!("Default config written to {}", path.display()),
            None => anyhow::bail!("no config directory available on this system"),
        }
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let Some(file) = cli.file else {
        anyhow::bail!("no input file given");
    };

    let bytes = read_input(&file, cli.base64).await?;
    let options = config.extract_options();

    log::debug!("extracting {} ({} bytes)", file.display(), bytes.len());
    let model = tokio::task::spawn_blocking(move || extract_with_options(&bytes, &options))
        .await
        .context("extraction task failed")??;

    let pretty = config.output.pretty && !cli.compact;

    if let Some(output) = cli.output {
        let json = export::to_json(&model, pretty)?;
        tokio::fs::write(&output, json)
            .await
            .with_context(|| format!("failed to write {}", output.display()))?;
        println!("Extraction result saved to {}", output.display());
        return Ok(());
    }

    print_result(&model, cli.format.unwrap_or(config.output.format), pretty)
}

async fn read_input(file: &Path, base64: bool) -> Result<Vec<u8>> {
    if base64 {
        let text = tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("failed to read {}", file.display()))?;
        Ok(decode_base64_payload(&text)?)
    } else {
        tokio::fs::read(file)
            .await
            .with_context(|| format!("failed to read {}", file.display()))
    }
}

fn print_result(model: &DocumentModel, format: OutputFormat, pretty: bool) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", export::to_json(model, pretty)?),
        OutputFormat::Text => print!("{}", export::to_text(model)),
    }
    Ok(())
}
