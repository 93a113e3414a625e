use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{info, warn};
use serde::Serialize;
use std::time::Duration;

use numble::{
    DifficultyProfile, Engine, OperatorSet, ProfileId, SessionStats, Solver, SolverConfig,
    SubmissionRules, parse_operands, profiles, utils,
};

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

/// Numble - generate and solve "reach the target" number puzzles
#[derive(Parser, Debug)]
#[command(name = "numble")]
#[command(about = "Generate and solve number puzzles: reach the target using the given operands")]
#[command(version)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find expressions over the operands that equal the target
    Solve(SolveArgs),
    /// Generate a new puzzle for a difficulty profile
    Generate(GenerateArgs),
    /// Check an expression against a puzzle
    Validate(ValidateArgs),
    /// List the difficulty profiles
    Profiles(ProfilesArgs),
}

#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Operands, as a digit string ("1234") or a list ("25,3,7")
    pub operands: String,

    /// Target value to match
    pub target: f64,

    /// Operators to use: "basic", "scientific", "all" or a list such as "+,-,*,/,^"
    #[arg(short, long, default_value = "basic")]
    pub operators: OperatorSet,

    /// Every operand must appear in a solution
    #[arg(long)]
    pub must_use_all: bool,

    /// Stop after this many solutions
    #[arg(long, default_value_t = 3)]
    pub max_solutions: usize,

    /// Time budget for the search in milliseconds
    #[arg(long, default_value_t = 2000)]
    pub budget_ms: u64,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Difficulty profile
    #[arg(short, long, default_value = "newton")]
    pub profile: ProfileId,

    /// Seed for reproducible puzzles
    #[arg(long)]
    pub seed: Option<u64>,

    /// Games played this session, for difficulty adjustment
    #[arg(long, default_value_t = 0)]
    pub games: u32,

    /// Games won this session, for difficulty adjustment
    #[arg(long, default_value_t = 0)]
    pub wins: u32,

    /// Also print the expression the target was built from
    #[arg(long)]
    pub show_witness: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// The expression to check, such as "(1 + 4) * 2"
    pub expression: String,

    /// Operands, as a digit string ("1234") or a list ("25,3,7")
    pub operands: String,

    /// Target value
    pub target: i64,

    /// Operators the expression may use
    #[arg(short, long, default_value = "basic")]
    pub operators: OperatorSet,

    /// Every operand must be used
    #[arg(long)]
    pub must_use_all: bool,
}

#[derive(Args, Debug)]
pub struct ProfilesArgs {
    /// Games played this session; profiles are shown adjusted for it
    #[arg(long, default_value_t = 0)]
    pub games: u32,

    /// Games won this session
    #[arg(long, default_value_t = 0)]
    pub wins: u32,
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .init();
    Ok(())
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let args = CliArgs::parse();

    // Initialize logging
    init_logging(&args.log_level)?;

    match args.command {
        Command::Solve(cmd) => run_solve(&cmd, args.json),
        Command::Generate(cmd) => run_generate(&cmd, args.json),
        Command::Validate(cmd) => run_validate(&cmd, args.json),
        Command::Profiles(cmd) => run_profiles(&cmd, args.json),
    }
}

fn read_operands(text: &str) -> Result<Vec<i64>> {
    parse_operands(text).with_context(|| format!("Invalid operands '{}'", text))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn run_solve(cmd: &SolveArgs, json: bool) -> Result<()> {
    let operands = read_operands(&cmd.operands)?;
    utils::validate_target(cmd.target).context("Invalid target")?;

    let config = SolverConfig::default()
        .with_operators(cmd.operators)
        .with_max_solutions(cmd.max_solutions)
        .with_time_budget(Duration::from_millis(cmd.budget_ms))
        .must_use_all(cmd.must_use_all);
    let solver = Solver::new(config).context("Invalid solver settings")?;

    info!(
        "Searching for expressions using {:?} that equal {}",
        operands, cmd.target
    );
    let solutions = solver.solve(&operands, cmd.target);

    if json {
        return print_json(&solutions);
    }
    if solutions.is_empty() {
        warn!("No matching expression found");
        println!("Unknown.");
    }
    for solution in solutions.iter() {
        println!("{}", solution.text);
    }
    if solutions.timed_out {
        println!("(search stopped after {} ms)", cmd.budget_ms);
    }
    Ok(())
}

fn session_profile(id: ProfileId, games: u32, wins: u32) -> Result<DifficultyProfile> {
    let profile = profiles::profile_by_id(id)
        .with_context(|| format!("Profile {} is not in the catalogue", id))?;
    Ok(profile.adjusted_for(&SessionStats::new(games, wins)))
}

fn run_generate(cmd: &GenerateArgs, json: bool) -> Result<()> {
    let mut engine = match cmd.seed {
        Some(seed) => Engine::seeded(seed),
        None => Engine::new(),
    };
    let profile = session_profile(cmd.profile, cmd.games, cmd.wins)?;
    let round = engine
        .request_new_puzzle_with(&profile)
        .context("Failed to generate a puzzle")?;

    if json {
        return print_json(&round);
    }
    let operands: Vec<String> = round.puzzle.operands.iter().map(i64::to_string).collect();
    println!("Profile:   {}", profile.name);
    println!("Operands:  {}", operands.join(" "));
    println!("Target:    {}", round.puzzle.target);
    println!("Operators: {}", round.puzzle.operators);
    if round.puzzle.must_use_all {
        println!("Every operand must be used");
    }
    println!("Time:      {} s", round.time_limit_secs);
    if cmd.show_witness {
        println!("Witness:   {}", round.puzzle.witness);
    }
    Ok(())
}

fn run_validate(cmd: &ValidateArgs, json: bool) -> Result<()> {
    let operands = read_operands(&cmd.operands)?;
    let rules = SubmissionRules {
        operators: cmd.operators,
        must_use_all: cmd.must_use_all,
        ..SubmissionRules::default()
    };

    let engine = Engine::new();
    let verdict = engine
        .validate_submission(&cmd.expression, &operands, cmd.target, &rules)
        .with_context(|| format!("'{}' is not an acceptable answer", cmd.expression))?;

    if json {
        return print_json(&verdict);
    }
    if verdict.valid {
        println!("Correct! {} = {}", cmd.expression, cmd.target);
    } else {
        println!("Not quite: {} = {}", cmd.expression, verdict.value);
    }
    Ok(())
}

fn run_profiles(cmd: &ProfilesArgs, json: bool) -> Result<()> {
    let stats = SessionStats::new(cmd.games, cmd.wins);
    let profiles: Vec<DifficultyProfile> = profiles::difficulty_profiles()
        .iter()
        .map(|p| p.adjusted_for(&stats))
        .collect();

    if json {
        return print_json(&profiles);
    }
    for p in &profiles {
        println!(
            "{:<10} {:<22} {}-{} operands, targets {}-{}, {} s, {} points{}  [{}]",
            p.id,
            p.name,
            p.min_operands,
            p.max_operands,
            p.target_range.min,
            p.target_range.max,
            p.time_limit_secs,
            p.base_score,
            if p.must_use_all { ", use all" } else { "" },
            p.operators
        );
    }
    Ok(())
}
