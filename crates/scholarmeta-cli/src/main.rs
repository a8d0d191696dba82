use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use scholarmeta_core::FileKind;
use scholarmeta_core::config_file;
use scholarmeta_ingest::remote::DEFAULT_SERVICE_URL;
use scholarmeta_ingest::{RemoteClient, RemoteConfig, Settings};
use tracing_subscriber::EnvFilter;

mod output;

use output::ColorMode;

/// Academic metadata extractor - recover bibliographic records from papers, theses and books
#[derive(Parser, Debug)]
#[command(name = "scholarmeta", version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract metadata from a PDF, TXT, HTML, or DOC/DOCX file
    Extract(ExtractArgs),

    /// Check whether the remote extraction service is healthy
    CheckService {
        /// Extraction endpoint URL; its host is probed at /health
        #[arg(long)]
        service_url: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Path to the document
    file_path: PathBuf,

    /// Treat the file as this kind instead of inferring it from the extension
    #[arg(long = "type", value_name = "KIND")]
    kind: Option<FileKind>,

    /// Remote extraction service URL, tried first for PDFs
    #[arg(long)]
    service_url: Option<String>,

    /// Never contact the remote extraction service
    #[arg(long, conflicts_with = "service_url")]
    no_remote: bool,

    /// Remote service timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Number of leading PDF pages to read locally
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Pretty-print the JSON record
    #[arg(long)]
    pretty: bool,

    /// Print a human-readable summary instead of JSON
    #[arg(long)]
    summary: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Path to output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Extract(args) => extract(args),
        Command::CheckService {
            service_url,
            no_color,
        } => check_service(service_url, ColorMode(!no_color)),
    }
}

/// Logs go to stderr so stdout carries only the record.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve configuration: CLI flags > env vars > config file > defaults
fn resolve_settings(args: &ExtractArgs) -> Settings {
    let config = config_file::load_config();
    let mut settings = Settings::from_config(&config).apply_env();

    if let Some(ref url) = args.service_url {
        settings.remote_url = Some(url.clone());
        settings.remote_enabled = true;
    }
    if args.no_remote {
        settings.remote_enabled = false;
    }
    if let Some(secs) = args.timeout {
        settings.remote_timeout = Duration::from_secs(secs);
    }
    if let Some(n) = args.max_pages {
        settings.max_pages = n;
    }
    settings
}

fn extract(args: ExtractArgs) -> anyhow::Result<()> {
    if !args.file_path.exists() {
        anyhow::bail!("File not found: {}", args.file_path.display());
    }

    let settings = resolve_settings(&args);
    tracing::debug!(
        remote = ?settings.remote_config().map(|r| r.url),
        max_pages = settings.max_pages,
        "resolved settings"
    );
    let orchestrator = settings.orchestrator();

    let meta = match args.kind {
        Some(kind) => orchestrator.extract_as(&args.file_path, kind)?,
        None => orchestrator.extract(&args.file_path)?,
    };

    let use_color = !args.no_color && args.output.is_none();
    let mut writer: Box<dyn Write> = if let Some(ref output_path) = args.output {
        Box::new(std::fs::File::create(output_path)?)
    } else {
        Box::new(std::io::stdout())
    };

    if args.summary {
        let file_name = args
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| args.file_path.display().to_string());
        output::print_summary(&mut writer, &file_name, &meta, ColorMode(use_color))?;
    } else {
        output::print_json(&mut writer, &meta, args.pretty)?;
    }
    writer.flush()?;
    Ok(())
}

fn check_service(service_url: Option<String>, color: ColorMode) -> anyhow::Result<()> {
    let config = config_file::load_config();
    let settings = Settings::from_config(&config).apply_env();
    let url = service_url
        .or(settings.remote_url)
        .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());

    let remote = RemoteConfig::new(url).with_timeout(settings.remote_timeout);
    let health_url = remote.health_url()?;
    let client = RemoteClient::new(remote)?;
    let outcome = client.health().map_err(|e| e.to_string());

    let mut stdout = std::io::stdout();
    output::print_health(&mut stdout, health_url.as_str(), outcome, color)?;
    Ok(())
}
