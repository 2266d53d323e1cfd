use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::bail;

use word_design::decoder::Decoder;
use word_design::encoder::Encoder;
use word_design::solver::Solver;
use word_design::validate::validate_all;

/// Encode and solve CSPlib problem 033 (word design for DNA computing).
#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of words to encode (and possibly solve for).
    #[arg(value_name = "INT")]
    number_of_words: usize,

    /// SAT solver to use.
    #[arg(short, long, value_name = "PATH")]
    solver: Option<PathBuf>,

    /// Output file for the CNF.
    #[arg(short, long, value_name = "FILE", default_value = "word_problem.cnf")]
    output: PathBuf,

    /// Verbose output for solver and validation.
    #[arg(long)]
    verbose: bool,

    /// Validate solution after solving and decoding.
    #[arg(long)]
    validate: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let encoding = Encoder::new(args.number_of_words)?.encode();
    let file = File::create(&args.output)?;
    encoding.cnf().write_dimacs(BufWriter::new(file))?;
    log::info!("CNF written to {}", args.output.display());

    let Some(solver_path) = args.solver else {
        println!("No solver specified. Exiting.");
        return Ok(());
    };

    let stdout = Solver::new(solver_path).verbose(args.verbose).run(&args.output)?;
    if args.verbose {
        println!("{}", stdout);
    }

    let words = Decoder::new(&encoding).decode(&stdout)?;
    for word in &words {
        println!("{}", word);
    }

    if args.validate && !words.is_empty() {
        println!("\nVerifying constraints:");
        let report = validate_all(&words);
        println!("\n=== Summary ===");
        println!("{}", report);
        if !report.is_valid() {
            bail!("decoded words violate the constraints");
        }
    }

    log::info!("All done in {:.3} s", time_total.elapsed().as_secs_f64());
    Ok(())
}
