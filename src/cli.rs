use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use equation_finder::postfix::{self, PostfixError};
use equation_finder::{
    ConfigError, OperatorPool, ResultLog, ResultSink, SearchArgs, SearchConfig, SearchCoordinator,
    SearchEvent, TermPool, parse_rational,
};
use log::{info, warn};
use num_bigint::BigInt;
use rayon::prelude::*;

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Equation Finder - Search for arithmetic expressions that hit a target value
#[derive(Parser, Debug)]
#[command(name = "equation-finder")]
#[command(
    about = "Randomly build arithmetic expressions until they evaluate to a target value"
)]
#[command(version)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run search rounds with a pool of worker threads
    Search(SearchCommand),
    /// Evaluate postfix expressions such as "5 1 2 + 4 * + 3 -"
    Eval(EvalCommand),
}

#[derive(Args, Debug)]
pub struct SearchCommand {
    /// Target value: integer, decimal or fraction
    #[arg(default_value = "27", allow_hyphen_values = true)]
    pub target: String,

    /// Number of operations in every expression
    #[arg(short = 'n', long, default_value_t = 9)]
    pub operations: usize,

    /// Explicit term list, e.g. "9,8,7"
    #[arg(long, allow_hyphen_values = true, conflicts_with_all = ["max_term", "term"])]
    pub terms: Option<String>,

    /// Use every term from this value down to 1
    #[arg(long, default_value_t = 9)]
    pub max_term: i64,

    /// Use a single repeated term
    #[arg(long, allow_hyphen_values = true, conflicts_with = "max_term")]
    pub term: Option<i64>,

    /// Operator symbols to draw from, any of "+-*/^"
    #[arg(long, default_value = "+-*", allow_hyphen_values = true)]
    pub operators: String,

    /// Worker threads (default: available parallelism)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Time-to-live of each round in seconds
    #[arg(long, default_value_t = 6.0, allow_hyphen_values = true)]
    pub ttl: f64,

    /// Number of rounds to run back to back
    #[arg(short, long, default_value_t = 1)]
    pub rounds: usize,

    /// Seed for reproducible worker random streams
    #[arg(long)]
    pub seed: Option<u64>,

    /// Result log to load before searching and save afterwards
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct EvalCommand {
    /// Compile each expression before running it
    #[arg(long)]
    pub compiled: bool,

    /// Postfix expressions; quote each one
    #[arg(required = true)]
    pub expressions: Vec<String>,
}

/// Validated work for one invocation
pub enum Task {
    Search {
        args: SearchArgs,
        rounds: usize,
        log_file: Option<PathBuf>,
    },
    Eval {
        expressions: Vec<String>,
        compiled: bool,
    },
}

/// Configuration for the CLI application
pub struct CliConfig {
    pub task: Task,
    pub log_level: LogLevel,
}

fn term_pool(command: &SearchCommand) -> Result<TermPool> {
    if let Some(list) = &command.terms {
        return list.parse::<TermPool>().context("Invalid term list");
    }
    if let Some(term) = command.term {
        return Ok(TermPool::single(term));
    }
    Ok(TermPool::countdown(command.max_term))
}

/// Turn search flags into validated search arguments
pub fn search_args(command: &SearchCommand) -> Result<SearchArgs> {
    let target = parse_rational(&command.target)
        .map_err(ConfigError::from)
        .context("Invalid target value")?;
    let terms = term_pool(command)?;
    let operators = OperatorPool::parse(&command.operators)
        .map_err(ConfigError::from)
        .context("Invalid operators")?;
    let config = SearchConfig::new(target, command.operations, terms, operators)
        .context("Invalid search configuration")?;

    let threads = command.threads.unwrap_or_else(|| {
        thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
    });
    let ttl = Duration::try_from_secs_f64(command.ttl)
        .with_context(|| format!("Invalid time-to-live: {}", command.ttl))?;

    let args = SearchArgs::new(config, threads, ttl).context("Invalid search arguments")?;
    Ok(match command.seed {
        Some(seed) => args.with_seed(seed),
        None => args,
    })
}

/// Parse command line arguments and return configuration
pub fn parse_args() -> Result<CliConfig> {
    let args = CliArgs::parse();

    let task = match args.command {
        Command::Search(command) => {
            if command.rounds == 0 {
                return Err(ConfigError::NoRounds).context("Invalid search arguments");
            }
            Task::Search {
                args: search_args(&command)?,
                rounds: command.rounds,
                log_file: command.log_file,
            }
        }
        Command::Eval(command) => Task::Eval {
            expressions: command.expressions,
            compiled: command.compiled,
        },
    };

    Ok(CliConfig {
        task,
        log_level: args.log_level,
    })
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .init();
    Ok(())
}

/// Evaluate every expression in parallel, keeping input order
pub fn evaluate_batch(expressions: &[String], compiled: bool) -> Vec<Result<BigInt, PostfixError>> {
    expressions
        .par_iter()
        .map(|expression| {
            if compiled {
                postfix::compile(expression).and_then(|program| program.evaluate())
            } else {
                postfix::evaluate(expression)
            }
        })
        .collect()
}

fn run_eval(expressions: &[String], compiled: bool) -> Result<()> {
    let results = evaluate_batch(expressions, compiled);

    let mut failed = 0;
    for (expression, result) in expressions.iter().zip(&results) {
        match result {
            Ok(value) => println!("{} => {}", expression, value),
            Err(e) => {
                failed += 1;
                println!("{} => error: {}", expression, e);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} expressions failed", failed, expressions.len());
    }
    Ok(())
}

fn run_search(args: SearchArgs, rounds: usize, log_file: Option<PathBuf>) -> Result<()> {
    let log = ResultLog::new();
    if let Some(path) = &log_file
        && path.exists()
    {
        log.load(path).context("Could not restore the result log")?;
    }

    info!(
        "Searching for {} with {} operations over [{}] using '{}'",
        args.config().target(),
        args.config().operations(),
        args.config().terms(),
        args.config().operators()
    );

    let mut coordinator = SearchCoordinator::new(args).with_known_results(log.lines());
    let sink = |event: &SearchEvent| {
        println!("{}", event);
        log.report(event);
    };

    coordinator
        .run_rounds_with(rounds, &sink, |stats| {
            log.record_round(stats.expressions_generated);
            println!(
                "Expressions generated this round: {}",
                log.expressions_this_round()
            );
            println!("Expressions generated total: {}", log.expressions_total());
            if stats.failed_workers > 0 {
                warn!("{} workers failed in round {}", stats.failed_workers, stats.round);
            }
        })
        .context("Search round failed")?;

    if coordinator.solutions().is_empty() {
        warn!("No new solutions found");
    }

    if let Some(path) = &log_file {
        log.save(path).context("Could not save the result log")?;
    }
    Ok(())
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let config = parse_args()?;

    // Initialize logging
    init_logging(&config.log_level)?;

    match config.task {
        Task::Search {
            args,
            rounds,
            log_file,
        } => run_search(args, rounds, log_file),
        Task::Eval {
            expressions,
            compiled,
        } => run_eval(&expressions, compiled),
    }
}
