use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};
use memmap2::Mmap;

use rlox_tree::driver::{Lox, Outcome};

#[derive(ClapParser, Debug)]
#[command(version, about = "Lox language interpreter", long_about = None)]
pub struct Cli {
    /// Defaults to the REPL when omitted
    #[command(subcommand)]
    commands: Option<Commands>,

    /// Enable logging to rlox.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// One JSON object per token
        #[arg(long)]
        json: bool,
    },

    /// Parses input from a file as a single expression and prints its AST
    Parse { filename: PathBuf },

    /// Evaluates input from a file as a single expression and prints the result
    Evaluate { filename: PathBuf },

    /// Runs input from a file as a Lox program
    Run { filename: PathBuf },

    /// Interactive prompt; definitions persist between lines
    Repl,
}

/// Maps the file and copies it out as validated UTF‑8.
fn read_source(filename: &Path) -> Result<String> {
    info!("Reading file: {:?}", filename);

    let file = File::open(filename).with_context(|| format!("Failed to open file {:?}", filename))?;

    let len = file
        .metadata()
        .with_context(|| format!("Failed to stat file {:?}", filename))?
        .len();

    // Zero‑length mappings are rejected on some platforms.
    if len == 0 {
        return Ok(String::new());
    }

    // SAFETY: the map is read once, immediately copied, and dropped.
    let map = unsafe { Mmap::map(&file) }.with_context(|| format!("Failed to map file {:?}", filename))?;

    let text = std::str::from_utf8(&map).with_context(|| format!("File {:?} is not valid UTF-8", filename))?;

    info!("Read {} bytes from {:?}", map.len(), filename);

    Ok(text.to_owned())
}

fn init_logger() -> Result<()> {
    // Create or open the log file
    let log_file = File::create("rlox.log").context("Failed to create rlox.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip the crate prefix from the module path
            let module = record.module_path().unwrap_or("<unnamed>");
            let module = module.strip_prefix("rlox_tree::").unwrap_or(module);

            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized, writing to rlox.log");

    Ok(())
}

fn repl(lox: &mut Lox) -> Result<()> {
    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush prompt")?;

        input.clear();
        let read = stdin
            .lock()
            .read_line(&mut input)
            .context("Failed to read from stdin")?;

        // Ctrl‑D
        if read == 0 {
            println!();
            break;
        }

        let outcome = lox.run(&input);
        debug!("REPL line finished: {:?}", outcome);

        lox.reset();
    }

    Ok(())
}

fn main() -> Result<ExitCode> {
    let args: Cli = Cli::parse();

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    let mut lox = Lox::new();

    let outcome: Outcome = match args.commands.unwrap_or(Commands::Repl) {
        Commands::Tokenize { filename, json } => {
            info!("Running Tokenize subcommand");
            lox.tokenize(&read_source(&filename)?, json)
        }

        Commands::Parse { filename } => {
            info!("Running Parse subcommand");
            lox.parse(&read_source(&filename)?)
        }

        Commands::Evaluate { filename } => {
            info!("Running Evaluate subcommand");
            lox.evaluate(&read_source(&filename)?)
        }

        Commands::Run { filename } => {
            info!("Running Run subcommand");
            lox.run(&read_source(&filename)?)
        }

        Commands::Repl => {
            info!("Starting REPL");
            repl(&mut lox)?;
            Outcome::Success
        }
    };

    info!("Finished with {:?}", outcome);

    Ok(ExitCode::from(outcome.exit_code() as u8))
}
