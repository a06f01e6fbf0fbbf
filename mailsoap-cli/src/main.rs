mod commands;
mod output;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::{
    handle_flag, handle_record, handle_ref, handle_vocab, FlagCommands, RecordCommands, RefArgs,
    VocabCommands,
};
use mailsoap_codec::{Codec, Config};
use output::{ExitCode, OutputFormat, Printer};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mailsoap")]
#[command(about = "Inspect mail and calendar SOAP records", long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value = "auto", global = true)]
    format: OutputFormat,
    /// Config file [default: <config dir>/mailsoap/config.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Accept records with absent required fields
    #[arg(long, global = true)]
    lenient: bool,
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Token families
    #[command(subcommand)]
    Vocab(VocabCommands),
    /// Tri-state flag tokens
    #[command(subcommand)]
    Flag(FlagCommands),
    /// Decode, render and validate records
    #[command(subcommand)]
    Record(RecordCommands),
    /// Build a data-source reference
    Ref(RefArgs),
}

fn init_tracing(verbose: u8, level: &str) {
    let filter = match verbose {
        0 => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();

    let (mut config, load_error) = match &cli.config {
        Some(path) => match Config::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => {
                let printer = Printer::new(cli.format, false);
                std::process::exit(printer.failure(&e).code());
            }
        },
        None => match Config::load() {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        },
    };
    if cli.lenient {
        config.validation.strict = false;
    }

    init_tracing(cli.verbose, &config.logging.level);
    if let Some(e) = load_error {
        warn!("Using default config: {:#}", e);
    }
    debug!(strict = config.validation.strict, "configuration loaded");

    let printer = Printer::new(cli.format, config.output.pretty);
    let codec = Codec::new(config);

    let code = match run(&printer, &codec, cli.command) {
        Ok(()) => ExitCode::Success,
        Err(e) => printer.failure(&e),
    };
    std::process::exit(code.code());
}

fn run(printer: &Printer, codec: &Codec, command: Commands) -> Result<()> {
    match command {
        Commands::Vocab(cmd) => handle_vocab(printer, cmd),
        Commands::Flag(cmd) => handle_flag(printer, cmd),
        Commands::Record(cmd) => handle_record(printer, codec, cmd),
        Commands::Ref(args) => handle_ref(printer, codec, args),
    }
}
