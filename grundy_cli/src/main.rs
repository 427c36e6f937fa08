use crate::{commands::*, io::FileOrStdout, output::Format};
use anyhow::{Context, Result};
use clap::{self, ArgAction, Parser, Subcommand};
use grundy::short::limits::{DEFAULT_MAX_DEPTH, Limits};

mod commands;
mod io;
mod output;

#[cfg(not(windows))]
#[global_allocator]
static ALLOC: jemallocator::Jemalloc = jemallocator::Jemalloc;

#[derive(Subcommand, Debug)]
enum Command {
    Mex(mex::Args),
    NimSum(nim_sum::Args),
    Grundy(grundy_value::Args),
    Compare(compare::Args),
    Subtraction(subtraction::Args),
}

/// Settings shared by all subcommands
#[derive(Debug)]
pub struct Settings {
    pub limits: Limits,
    pub format: Format,
    pub output: FileOrStdout,
}

#[derive(Parser)]
#[command(version, about)]
struct Args {
    #[clap(subcommand)]
    command: Command,

    /// Longest play allowed before a position is rejected as not short
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u32,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Output path, `-` for standard output
    #[arg(long, global = true, default_value = "-")]
    output: FileOrStdout,

    /// Increase log verbosity, can be repeated
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logger(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .context("Could not initialize logger")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose)?;

    let settings = Settings {
        limits: Limits::new(args.max_depth),
        format: args.format,
        output: args.output,
    };
    log::debug!("Running {:?} with {:?}", args.command, settings);

    match args.command {
        Command::Mex(args) => mex::run(args, &settings),
        Command::NimSum(args) => nim_sum::run(args, &settings),
        Command::Grundy(args) => grundy_value::run(args, &settings),
        Command::Compare(args) => compare::run(args, &settings),
        Command::Subtraction(args) => subtraction::run(args, &settings),
    }
}
