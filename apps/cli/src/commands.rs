//! CLI command definitions, routing, and tracing setup.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use indicatif::{ProgressBar, ProgressStyle};
use markdown_index_core::{IndexResult, ProgressReporter, build_index, generate_index, output_bytes};
use markdown_index_shared::{
    AppConfig, IndexConfig, OutputFormat, config_file_path, init_config, load_config,
    load_config_from,
};
use serde::Serialize;
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// markdown-index: one navigable index for a tree of Markdown notes.
#[derive(Parser)]
#[command(
    name = "markdown-index",
    version,
    about = "Build a single index document from the abstracts of every Markdown file in a directory.",
    long_about = None,
)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub index: IndexArgs,

    /// Explicit config file (defaults to ~/.markdown-index/markdown-index.toml).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Flags of the default (indexing) command.
#[derive(Args, Debug)]
pub(crate) struct IndexArgs {
    /// Directory to search recursively.
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub directory: PathBuf,

    /// Index file name, created inside DIR.
    #[arg(long, value_name = "FILE")]
    pub output: Option<String>,

    /// Ignore files whose parent directory has this name (repeatable).
    #[arg(long = "skip-directory", value_name = "NAME")]
    pub skip_directories: Vec<String>,

    /// Prefer this heading as each file's abstract when present (default
    /// `Abstract`; an empty value turns the preference off).
    #[arg(long, value_name = "TEXT")]
    pub heading: Option<String>,

    /// Output form.
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Do not stamp the generation marker.
    #[arg(long)]
    pub no_marker: bool,

    /// Print the index to stdout instead of writing it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Index output form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum FormatArg {
    Markdown,
    Html,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Html => OutputFormat::Html,
        }
    }
}

/// Serialization of `version --output`.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum InfoFormat {
    Json,
    Yaml,
}

/// Subcommands besides the default indexing run.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Print build information.
    Version {
        /// Print only the version number.
        #[arg(long)]
        short: bool,

        /// Print as structured data.
        #[arg(long, value_enum)]
        output: Option<InfoFormat>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so `--dry-run`
/// output on stdout stays clean.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "markdown_index=info",
        1 => "markdown_index=debug",
        _ => "markdown_index=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        None => cmd_index(&cli.index, cli.config.as_ref()),
        Some(Command::Version { short, output }) => cmd_version(short, output),
        Some(Command::Config { action }) => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(cli.config.as_ref()),
        },
    }
}

fn load_app_config(explicit: Option<&PathBuf>) -> Result<AppConfig> {
    let config = match explicit {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Merge flags over the loaded config: flags win, then config, then defaults.
pub(crate) fn resolve_index_config(args: &IndexArgs, app: &AppConfig) -> IndexConfig {
    let mut config = IndexConfig::new(&args.directory, app);

    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    if !args.skip_directories.is_empty() {
        config.ignored_directories = args.skip_directories.iter().cloned().collect();
    }
    if let Some(heading) = &args.heading {
        config.search_heading = Some(heading.clone()).filter(|h| !h.trim().is_empty());
    }
    if let Some(format) = args.format {
        config.format = format.into();
    }
    if args.no_marker {
        config.with_marker = false;
    }
    config
}

fn cmd_index(args: &IndexArgs, explicit_config: Option<&PathBuf>) -> Result<()> {
    let app = load_app_config(explicit_config)?;
    let config = resolve_index_config(args, &app);

    info!(
        directory = %config.root.display(),
        output = %config.output,
        format = %config.format,
        dry_run = args.dry_run,
        "indexing markdown files"
    );

    let reporter = CliProgress::new();

    if args.dry_run {
        let generated = generate_index(&config, &reporter)?;
        reporter.finish();

        let bytes = output_bytes(&generated.content, config.with_marker);
        std::io::stdout()
            .lock()
            .write_all(&bytes)
            .wrap_err("failed to write index to stdout")?;
        return Ok(());
    }

    let result = build_index(&config, &reporter)?;

    println!();
    println!("  Index written!");
    println!("  Path:      {}", result.output_path.display());
    println!("  Documents: {}", result.document_count);
    if result.untitled_count > 0 {
        println!("  Untitled:  {}", result.untitled_count);
    }
    println!("  Bytes:     {}", result.bytes);
    println!("  SHA-256:   {}", result.sha256);
    println!("  Time:      {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn document_indexed(&self, path: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Indexing [{current}/{total}] {path}"));
    }

    fn done(&self, _result: &IndexResult) {
        self.finish();
    }
}

// ---------------------------------------------------------------------------
// version / config
// ---------------------------------------------------------------------------

/// Build information printed by `version`.
#[derive(Debug, Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
    os: &'static str,
    arch: &'static str,
}

impl BuildInfo {
    fn current() -> Self {
        Self {
            name: "markdown-index",
            version: env!("CARGO_PKG_VERSION"),
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        }
    }
}

fn cmd_version(short: bool, output: Option<InfoFormat>) -> Result<()> {
    let info = BuildInfo::current();

    if short {
        println!("{}", info.version);
        return Ok(());
    }

    match output {
        Some(InfoFormat::Json) => println!("{}", serde_json::to_string_pretty(&info)?),
        Some(InfoFormat::Yaml) => print!("{}", serde_yaml::to_string(&info)?),
        None => println!("{} {} ({}/{})", info.name, info.version, info.os, info.arch),
    }
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(explicit: Option<&PathBuf>) -> Result<()> {
    let source = match explicit {
        Some(path) => path.clone(),
        None => config_file_path()?,
    };
    let config = load_app_config(explicit)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("# {}", source.display());
    println!("{toml_str}");
    Ok(())
}
