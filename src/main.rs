use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use decibinary::numeral::numerals_of;
use decibinary::{fixture, Numeral, Solver, TableConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "decibinary", about = "Locate decibinary numerals by rank")]
struct Cli {
    /// Largest value covered by the tables (default covers ranks up to 10^16).
    #[arg(long, global = true)]
    ceiling: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the numeral at each rank.
    Locate {
        /// 1-based ranks.
        #[arg(required = true, allow_negative_numbers = true)]
        ranks: Vec<i64>,
    },
    /// Answer a query file: a count line followed by that many ranks.
    Solve {
        /// Query file (reads stdin when omitted).
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// List every numeral of each value up to `max_value`, in rank order.
    ///
    /// Small values are enumerated directly; larger ones are located through
    /// the tables.
    List {
        /// Largest value to list.
        #[arg(long, default_value_t = 16)]
        max_value: u32,
    },
    /// Check a query file against a file of expected numerals.
    Check {
        /// Query file (count line followed by ranks).
        #[arg(long)]
        input: PathBuf,
        /// Expected numerals, one per line.
        #[arg(long)]
        expected: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.ceiling.map(TableConfig::new).unwrap_or_default();
    let solver = Solver::new(&config).context("failed to build decibinary tables")?;

    match cli.command {
        Commands::Locate { ranks } => run_locate(&solver, &ranks)?,
        Commands::Solve { input } => run_solve(&solver, input)?,
        Commands::List { max_value } => run_list(&solver, max_value)?,
        Commands::Check { input, expected } => run_check(&solver, input, expected)?,
    }

    Ok(())
}

fn run_locate(solver: &Solver, ranks: &[i64]) -> Result<()> {
    for &rank in ranks {
        let numeral = solver
            .tables()
            .locate(rank)
            .with_context(|| format!("failed to locate rank {rank}"))?;
        println!("{numeral}");
    }
    Ok(())
}

fn run_solve(solver: &Solver, input: Option<PathBuf>) -> Result<()> {
    let ranks: Vec<i64> = match &input {
        Some(path) => fixture::read_counted(open(path)?)
            .with_context(|| format!("failed to read queries from {}", path.display()))?,
        None => fixture::read_counted(io::stdin().lock()).context("failed to read queries")?,
    };

    let answers = solver.solve(&ranks).context("query failed")?;
    let mut out = BufWriter::new(io::stdout().lock());
    fixture::write_numerals(&mut out, &answers).context("failed to write answers")?;
    Ok(())
}

fn run_list(solver: &Solver, max_value: u32) -> Result<()> {
    let tables = solver.tables();
    let mut out = BufWriter::new(io::stdout().lock());

    for value in 0..=max_value {
        let ranks = tables
            .rank_range(value)
            .with_context(|| format!("value {value} exceeds ceiling {}", tables.ceiling()))?;
        let numerals = match numerals_of(value) {
            Some(group) => group,
            None => ranks
                .map(|rank| tables.locate(rank as i64))
                .collect::<Result<Vec<Numeral>, _>>()?,
        };
        let rendered: Vec<String> = numerals.iter().map(|n| n.to_string()).collect();
        writeln!(out, "{value}: [{}]", rendered.join(" "))?;
    }

    out.flush()?;
    Ok(())
}

fn run_check(solver: &Solver, input: PathBuf, expected: PathBuf) -> Result<()> {
    let ranks: Vec<i64> = fixture::read_counted(open(&input)?)
        .with_context(|| format!("failed to read queries from {}", input.display()))?;
    let numerals: Vec<Numeral> = fixture::read_values(open(&expected)?)
        .with_context(|| format!("failed to read expected numerals from {}", expected.display()))?;

    let report = solver.verify(&ranks, &numerals)?;
    for mismatch in &report.mismatches {
        println!(
            "query {}\trank={}\texpected={}\tactual={}",
            mismatch.index + 1,
            mismatch.rank,
            mismatch.expected,
            mismatch.actual
        );
    }

    if !report.passed() {
        bail!(
            "{} of {} queries disagree with {}",
            report.mismatches.len(),
            report.checked,
            expected.display()
        );
    }
    println!("{} queries match", report.checked);
    Ok(())
}

fn open(path: &PathBuf) -> Result<BufReader<File>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}
