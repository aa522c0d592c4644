use anyhow::Result;
use clap::{ArgGroup, Parser};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use hmmer_reader::{
    emission_table, summarize, write_table, write_tsv, HmmReader, PathReader, Space, StateKind,
};

/// Inspect the profiles of a HMMER3 text file
#[derive(Parser, Debug)]
#[command(version, group(ArgGroup::new("action").multiple(false)))]
struct Cli {
    /// Profile file, optionally compressed
    file: PathBuf,

    /// Print the alphabet of each profile
    #[arg(long, group = "action")]
    alphabet: bool,

    /// Print the model length of each profile
    #[arg(long, group = "action")]
    length: bool,

    /// Print the match emissions of node N
    #[arg(long = "match", value_name = "N", group = "action")]
    match_node: Option<usize>,

    /// Print the insert emissions of node N
    #[arg(long = "insert", value_name = "N", group = "action")]
    insert_node: Option<usize>,

    /// Print NAME, ACC, LENG and ALPH of every profile as TSV
    #[arg(long, group = "action")]
    meta: bool,

    /// Print the number of profiles
    #[arg(long, group = "action")]
    count: bool,

    /// Order emission tables from most to least probable
    #[arg(long)]
    sort: bool,

    /// Report emissions as natural log-probabilities
    #[arg(long)]
    log: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}
impl Cli {
    fn node(&self) -> Option<(StateKind, usize)> {
        match (self.match_node, self.insert_node) {
            (Some(index), _) => Some((StateKind::Match, index)),
            (_, Some(index)) => Some((StateKind::Insert, index)),
            _ => None,
        }
    }

    fn space(&self) -> Space {
        if self.log {
            Space::Log
        } else {
            Space::Probability
        }
    }
}

fn init_logger(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn run<W: Write>(args: &Cli, mut reader: HmmReader<PathReader>, out: &mut W) -> Result<()> {
    if args.meta {
        let rows = summarize(&mut reader)?;
        write_tsv(&rows, out)?;
        return Ok(());
    }

    while let Some(profile) = reader.read_profile()? {
        if args.count {
            continue;
        }
        if args.alphabet {
            writeln!(out, "{}", profile.alphabet())?;
        } else if args.length {
            writeln!(out, "{}", profile.model_length())?;
        } else if let Some((state, index)) = args.node() {
            let rows = emission_table(&profile, state, index, args.space(), args.sort)?;
            write_table(&rows, out)?;
        } else {
            writeln!(out, "{profile}")?;
        }
        // blank line between profiles
        writeln!(out)?;
    }

    if args.count {
        writeln!(out, "{}", reader.n_processed())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logger(args.verbose);

    let reader = HmmReader::from_path(&args.file)?;
    let mut out = BufWriter::new(io::stdout().lock());
    run(&args, reader, &mut out)?;
    out.flush()?;
    Ok(())
}
