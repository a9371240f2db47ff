use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod config;
mod diag;
mod extract;
mod probe;
mod report;
mod source;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "errlog-probe")]
#[command(
    about = "Pull the JSON error record out of an API debug log and show what went wrong",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    cmd: Option<Commands>,
}

#[derive(Args)]
struct GlobalArgs {
    /// Log file to inspect.
    #[arg(long, global = true, default_value = config::DEFAULT_LOG_PATH)]
    log: PathBuf,

    /// Literal text that precedes the embedded JSON record.
    #[arg(long, global = true, default_value = config::DEFAULT_MARKER)]
    marker: String,

    #[arg(long, global = true, value_enum, default_value = "utf16le")]
    encoding: config::Encoding,

    /// Fail on undecodable bytes instead of dropping them.
    #[arg(long, global = true)]
    strict: bool,

    /// Count braces inside string literals too.
    #[arg(long, global = true)]
    naive_braces: bool,

    /// Debug logging on stderr (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Report type / reason / root cause from the embedded record (default).
    Fields {
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,

        /// Dotted path to try, in order. Replaces the built-in list.
        #[arg(long = "path")]
        paths: Vec<diag::FieldPath>,
    },
    /// List keys along the meta/body chain.
    Keys,
    /// Top-level keys plus a dump of `meta`.
    Dump,
    /// Regex search for type/reason after the marker, without parsing JSON.
    Scan,
    /// Print raw text starting at the marker.
    Raw {
        /// Replace control characters with spaces.
        #[arg(long)]
        safe: bool,

        #[arg(long, default_value_t = config::RAW_CHARS)]
        len: usize,
    },
}

impl GlobalArgs {
    fn settings(&self) -> config::Settings {
        config::Settings {
            log_path: self.log.clone(),
            marker: self.marker.clone(),
            encoding: self.encoding,
            decode_mode: if self.strict {
                config::DecodeMode::Strict
            } else {
                config::DecodeMode::Lenient
            },
            scan: if self.naive_braces {
                extract::ScanMode::Naive
            } else {
                extract::ScanMode::StringAware
            },
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<probe::Outcome> {
    let settings = cli.global.settings();

    // 1) Read + decode the log once.
    let log = source::read_log(&settings.log_path, settings.encoding, settings.decode_mode)?;
    let text = log.text.as_str();
    tracing::debug!(path = %log.path.display(), marker = %settings.marker, "probing log");

    // 2) Extract and report.
    let cmd = cli.cmd.unwrap_or(Commands::Fields {
        json: false,
        paths: Vec::new(),
    });
    let outcome = match cmd {
        Commands::Fields { json, paths } => {
            let paths = if paths.is_empty() {
                diag::default_paths()
            } else {
                paths
            };
            probe::probe_fields(text, &settings, &paths, json)?
        }
        Commands::Keys => probe::probe_keys(text, &settings),
        Commands::Dump => probe::probe_dump(text, &settings),
        Commands::Scan => probe::probe_scan(text, &settings)?,
        Commands::Raw { safe, len } => probe::probe_raw(text, &settings, len, safe),
    };

    Ok(outcome)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match run(cli) {
        Ok(outcome) => {
            print!("{}", outcome.output);
            outcome.status.into()
        }
        // Anything unexpected (I/O, decoding) is reported, not propagated.
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "probe failed");
            println!("Error: {err:#}");
            ExitCode::SUCCESS
        }
    }
}
