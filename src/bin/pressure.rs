use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use valve_pressure::volcano::DEFAULT_START;
use valve_pressure::{part1, part2, SolverConfig, HELPER_SETUP_MINUTES, MINUTES};

#[derive(ValueEnum, Debug, PartialEq, Eq, Clone, Copy)]
enum Part {
    /// Open valves alone.
    Part1,
    /// Open valves together with a helper.
    Part2,
}

/// Find the most pressure that can be released from the valves described in the input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(value_enum)]
    part: Part,
    /// Puzzle input; stdin if not given.
    input: Option<PathBuf>,
    #[arg(long, default_value_t = MINUTES)]
    minutes: usize,
    #[arg(long, default_value = DEFAULT_START)]
    start: String,
    /// Minutes it takes to get the helper going (part 2).
    #[arg(long, default_value_t = HELPER_SETUP_MINUTES)]
    helper_setup: usize,
    /// Give up after exploring this many states.
    #[arg(long)]
    max_states: Option<usize>,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::builder()
        .format_module_path(false)
        .format_timestamp_millis()
        .filter_level(log_level)
        .parse_default_env()
        .init();

    let config = SolverConfig {
        start: args.start,
        minutes: args.minutes,
        helper_setup_minutes: args.helper_setup,
        max_states: args.max_states,
    };
    let best = match (&args.input, args.part) {
        (Some(path), Part::Part1) => part1(File::open(path)?, &config)?,
        (Some(path), Part::Part2) => part2(File::open(path)?, &config)?,
        (None, Part::Part1) => part1(std::io::stdin().lock(), &config)?,
        (None, Part::Part2) => part2(std::io::stdin().lock(), &config)?,
    };
    Ok(println!("{best}"))
}
