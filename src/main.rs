//! Wordle Advisor - CLI
//!
//! Suggests guesses, scores candidates, checks hard-mode legality and
//! benchmarks scoring strategies over word lists supplied as files.

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use wordle_advisor::{
    commands::{
        BenchmarkConfig, ScoreConfig, SolveConfig, WordPools, check_guess, parse_board,
        run_benchmark, score_candidates, solve_word, suggest,
    },
    constraints::{FreeTextFilters, PositionFilters},
    core::clamp_word_length,
    logging,
    output::{
        print_benchmark_result, print_check_result, print_score_result, print_solve_result,
        print_suggest_result,
    },
    solver::{RecommendOptions, RecommenderConfig, ScoreMode, SolveMode, SortMode, TokioYield, UsageTable},
    wordlists::{load_usage, load_words},
};

#[derive(Parser)]
#[command(
    name = "wordle_advisor",
    about = "Wordle advisor: constraint filtering, entropy scoring and next-guess recommendation",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Possible answers, one word per line
    #[arg(short = 'a', long, global = true, default_value = "answers.txt")]
    answers: PathBuf,

    /// Extra allowed guesses used as probes, one word per line
    #[arg(short = 'g', long, global = true)]
    guesses: Option<PathBuf>,

    /// Word usage counts, `word count` per line
    #[arg(short = 'f', long, global = true)]
    frequency: Option<PathBuf>,

    /// Word length (3-7)
    #[arg(short = 'l', long, global = true, default_value_t = 5)]
    length: usize,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', action = ArgAction::Count, global = true)]
    verbosity: u8,

    #[command(flatten)]
    tuning: Tuning,
}

/// Recommender tuning overrides
#[derive(Args)]
struct Tuning {
    /// Candidate count above which only the coverage heuristic runs
    #[arg(long, global = true)]
    exact_threshold: Option<usize>,

    /// Probes scored exactly per recommendation
    #[arg(long, global = true)]
    shortlist: Option<usize>,

    /// Partition work allowed for the exact search
    #[arg(long, global = true)]
    budget: Option<usize>,

    /// Ranked suggestions to keep
    #[arg(long, global = true)]
    max_results: Option<usize>,
}

impl Tuning {
    fn config(&self) -> RecommenderConfig {
        let mut config = RecommenderConfig::default();
        if let Some(v) = self.exact_threshold {
            config = config.with_exact_threshold(v);
        }
        if let Some(v) = self.shortlist {
            config = config.with_shortlist_size(v);
        }
        if let Some(v) = self.budget {
            config = config.with_budget(v);
        }
        if let Some(v) = self.max_results {
            config = config.with_max_results(v);
        }
        config
    }
}

/// Board rows and letter filters
#[derive(Args)]
struct BoardArgs {
    /// Confirmed row as WORD:PATTERN with G/Y/B tiles, e.g. crane:BYBBG
    #[arg(short = 'r', long = "row")]
    rows: Vec<String>,

    /// Letters the answer must not contain
    #[arg(long)]
    exclude: Option<String>,

    /// Letters the answer must contain
    #[arg(long)]
    include: Option<String>,

    /// Letters allowed at a position, as N=LETTERS (1-based); replaces --include
    #[arg(long = "at")]
    at: Vec<String>,

    /// Letters forbidden at a position, as N=LETTERS (1-based)
    #[arg(long = "not-at")]
    not_at: Vec<String>,
}

fn parse_position(spec: &str, width: usize) -> Result<(usize, &str)> {
    let (position, letters) = spec
        .split_once('=')
        .with_context(|| format!("expected N=LETTERS, got {spec}"))?;
    let position: usize = position
        .trim()
        .parse()
        .with_context(|| format!("bad position in {spec}"))?;
    if position == 0 || position > width {
        bail!("position {position} is outside 1..={width}");
    }
    Ok((position - 1, letters))
}

impl BoardArgs {
    fn filters(&self, width: usize) -> Result<FreeTextFilters> {
        let mut filters = FreeTextFilters::exclude(self.exclude.as_deref().unwrap_or_default());
        if let Some(include) = &self.include {
            filters = filters.with_include(include);
        }
        if !self.at.is_empty() || !self.not_at.is_empty() {
            let mut positions = PositionFilters::new(width);
            for spec in &self.at {
                let (pos, letters) = parse_position(spec, width)?;
                positions = positions.include_at(pos, letters);
            }
            for spec in &self.not_at {
                let (pos, letters) = parse_position(spec, width)?;
                positions = positions.exclude_at(pos, letters);
            }
            filters = filters.with_positions(positions);
        }
        Ok(filters)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend the next guess for a board
    Suggest {
        #[command(flatten)]
        board: BoardArgs,

        /// Only suggest words that could be the answer
        #[arg(long)]
        hard: bool,

        /// Never suggest probe words
        #[arg(long)]
        no_probes: bool,

        /// Hide probes with a repeated letter
        #[arg(long)]
        hide_doubles: bool,

        /// Skip probes containing known green letters
        #[arg(long)]
        exclude_green: bool,

        /// Skip probes containing known yellow letters
        #[arg(long)]
        exclude_yellow: bool,

        /// Suggestions to show
        #[arg(short = 'n', long, default_value_t = 12)]
        show: usize,
    },

    /// Score the remaining candidates with a strategy or blend
    Score {
        #[command(flatten)]
        board: BoardArgs,

        /// Strategy name, `a+b`, or `a=w,b=w`
        #[arg(short, long, default_value = "entropy")]
        mode: ScoreMode,

        /// Rows to show
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// highest, lowest, median or mode
        #[arg(short, long, default_value = "highest")]
        sort: SortMode,

        /// Hide words with a repeated letter
        #[arg(long)]
        hide_doubles: bool,
    },

    /// Check a guess against hard-mode rules
    Check {
        guess: String,

        #[arg(short = 'r', long = "row")]
        rows: Vec<String>,
    },

    /// Play a known target with the recommender
    Solve {
        target: String,

        #[arg(long)]
        hard: bool,

        /// Show candidate counts per turn
        #[arg(long)]
        verbose: bool,
    },

    /// Play many answers taking the top word of a score mode
    Benchmark {
        #[arg(short, long, default_value = "entropy")]
        mode: ScoreMode,

        /// Random answers to play; all when omitted
        #[arg(short = 'n', long)]
        count: Option<usize>,

        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn load_pools(cli: &Cli) -> Result<WordPools> {
    let length = clamp_word_length(cli.length);
    let answers = load_words(&cli.answers, Some(length))
        .with_context(|| format!("loading answers from {}", cli.answers.display()))?;
    if answers.is_empty() {
        bail!("no {length}-letter words in {}", cli.answers.display());
    }
    let guesses = match &cli.guesses {
        Some(path) => load_words(path, Some(length))
            .with_context(|| format!("loading guesses from {}", path.display()))?,
        None => Vec::new(),
    };
    let usage = match &cli.frequency {
        Some(path) => {
            load_usage(path).with_context(|| format!("loading usage from {}", path.display()))?
        }
        None => UsageTable::empty(),
    };
    Ok(WordPools::new(answers, guesses, usage))
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .context("starting runtime")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbosity);

    let pools = load_pools(&cli)?;
    let width = pools.width();
    let config = cli.tuning.config();

    match &cli.command {
        Commands::Suggest {
            board,
            hard,
            no_probes,
            hide_doubles,
            exclude_green,
            exclude_yellow,
            show,
        } => {
            let filters = board.filters(width)?;
            let board = parse_board(width, &board.rows)?;
            let options = RecommendOptions {
                solve_mode: if *hard { SolveMode::Hard } else { SolveMode::Normal },
                allow_probes: !no_probes,
                hide_double_letters: *hide_doubles,
                exclude_green_letters: *exclude_green,
                exclude_yellow_letters: *exclude_yellow,
                already_guessed: Vec::new(),
            };
            let result = runtime()?
                .block_on(suggest(&pools, &board, &filters, &options, config, &mut TokioYield))
                .context("suggestion was cancelled")?;
            print_suggest_result(&result, *show);
        }
        Commands::Score {
            board,
            mode,
            top,
            sort,
            hide_doubles,
        } => {
            let filters = board.filters(width)?;
            let board = parse_board(width, &board.rows)?;
            let score_config = ScoreConfig {
                mode: mode.clone(),
                sort: *sort,
                top: *top,
                hide_doubles: *hide_doubles,
            };
            let result = runtime()?
                .block_on(score_candidates(&pools, &board, &filters, &score_config, &mut TokioYield))
                .context("scoring was cancelled")?;
            print_score_result(&result);
        }
        Commands::Check { guess, rows } => {
            let board = parse_board(width, rows)?;
            print_check_result(guess, &check_guess(&board, guess));
        }
        Commands::Solve {
            target,
            hard,
            verbose,
        } => {
            let solve_config = SolveConfig::new(target.clone()).hard(*hard);
            let result = runtime()?.block_on(solve_word(&pools, &solve_config, config, &mut TokioYield))?;
            print_solve_result(&result, *verbose);
        }
        Commands::Benchmark { mode, count, seed } => {
            let mut bench = BenchmarkConfig::new(mode.clone());
            bench.count = *count;
            bench.seed = *seed;
            bench.progress = true;
            print_benchmark_result(&run_benchmark(&pools, &bench));
        }
    }

    Ok(())
}
