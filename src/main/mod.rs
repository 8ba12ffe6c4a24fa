use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use genplay::{
    commands::{genplay_bin, genplay_genes, genplay_repeats, genplay_windows, InputArgs},
    prelude::*,
};

const INFO: &str = "\
genplay: binned aggregation of genomic interval files
usage: genplay [--help] <subcommand>

Subcommands:

  bin: aggregate scored intervals into fixed-width bins.
  windows: resolve overlapping scored intervals into scored windows.
  genes: group gene lines into genes and write them as BED12.
  repeats: count repeats per family and chromosome.

";

#[derive(Parser)]
#[clap(name = "genplay")]
#[clap(about = INFO)]
struct Cli {
    /// increase log verbosity (-d for debug, -dd for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    /// number of threads (all cores if not set)
    #[arg(long)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Arguments shared by every subcommand reading an input file.
#[derive(Args)]
struct InputCli {
    /// a TSV genome file of chromosome names and their lengths
    #[arg(long, required = true)]
    genome: PathBuf,

    /// the input format (detected from the file extension if not set)
    #[arg(long, value_enum)]
    format: Option<FormatKind>,

    /// only extract these chromosomes (the input must be sorted by chromosome)
    #[arg(long, value_delimiter = ',')]
    chromosomes: Vec<String>,

    /// only extract features on this strand ('+' or '-')
    #[arg(long, value_parser = parse_strand, allow_hyphen_values = true)]
    strand: Option<Strand>,

    /// number of basepairs to shift features toward their 3' end
    #[arg(long, default_value_t = 0)]
    shift: Position,

    /// resize reads to this length, from their 5' end
    #[arg(long)]
    read_length: Option<Position>,
}

fn parse_strand(value: &str) -> Result<Strand, String> {
    match value.to_lowercase().as_str() {
        "+" | "forward" => Ok(Strand::Forward),
        "-" | "reverse" => Ok(Strand::Reverse),
        _ => Err(format!("invalid strand '{}', expected '+' or '-'", value)),
    }
}

impl InputCli {
    fn into_args(self, input: Option<PathBuf>) -> InputArgs {
        InputArgs {
            genome: self.genome,
            input,
            format: self.format,
            chromosomes: self.chromosomes,
            strand: StrandOptions {
                selected: self.strand,
                shift: self.shift,
                read_length: self.read_length,
            },
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    Bin {
        #[command(flatten)]
        input_args: InputCli,

        /// an input interval file (not needed with --load)
        #[arg(required_unless_present = "load")]
        input: Option<PathBuf>,

        /// the width of each bin, in basepairs
        #[arg(long, default_value_t = 1000, allow_negative_numbers = true)]
        bin_size: i64,

        /// how scores contributing to the same bin are combined
        #[arg(long, value_enum, default_value_t = ScoreCalculationMethod::Average)]
        method: ScoreCalculationMethod,

        /// the numeric storage precision of bin values
        #[arg(long, value_enum, default_value_t = DataPrecision::Float32)]
        precision: DataPrecision,

        /// an optional output file (standard output will be used if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// save the bin list to this file, to be loaded with --load
        #[arg(long)]
        save: Option<PathBuf>,

        /// load a bin list saved with --save instead of extracting a file
        #[arg(long)]
        load: Option<PathBuf>,
    },
    Windows {
        #[command(flatten)]
        input_args: InputCli,

        /// an input interval file
        input: PathBuf,

        /// how scores of overlapping windows are combined
        #[arg(long, value_enum, default_value_t = ScoreCalculationMethod::Sum)]
        method: ScoreCalculationMethod,

        /// an optional output file (standard output will be used if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    Genes {
        #[command(flatten)]
        input_args: InputCli,

        /// an input gene file (BED12, GTF, PSL or GdpGene)
        input: PathBuf,

        /// an optional output file (standard output will be used if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    Repeats {
        #[command(flatten)]
        input_args: InputCli,

        /// an input BED file, named by repeat family
        input: PathBuf,

        /// an optional output file (standard output will be used if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn setup_logging(debug: u8) {
    if std::env::var_os("RUST_LOG").is_none() {
        let level = match debug {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        std::env::set_var("RUST_LOG", level);
    }
    env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .init();
}

fn run() -> Result<(), GenPlayError> {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    let result = match cli.command {
        Some(Commands::Bin {
            input_args,
            input,
            bin_size,
            method,
            precision,
            output,
            save,
            load,
        }) => {
            let binning = BinningOptions::new(bin_size, precision, method);
            genplay_bin(
                &input_args.into_args(input),
                &binning,
                output.as_ref(),
                save.as_ref(),
                load.as_ref(),
            )
        }
        Some(Commands::Windows {
            input_args,
            input,
            method,
            output,
        }) => genplay_windows(&input_args.into_args(Some(input)), method, output.as_ref()),
        Some(Commands::Genes {
            input_args,
            input,
            output,
        }) => genplay_genes(&input_args.into_args(Some(input)), output.as_ref()),
        Some(Commands::Repeats {
            input_args,
            input,
            output,
        }) => genplay_repeats(&input_args.into_args(Some(input)), output.as_ref()),
        None => {
            println!("{}\n", INFO);
            std::process::exit(1);
        }
    };
    let report = result?;
    if report.rejected() > 0 {
        log::warn!(
            "{} lines were rejected ({} malformed, {} on unknown chromosomes)",
            report.rejected(),
            report.malformed,
            report.unknown_chromosome
        );
    }
    Ok(())
}

fn main() {
    match run() {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
