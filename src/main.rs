//! sv-breakends CLI entry point
//!
//! Converts VCF structural variants into breakend tables and centre-aligns
//! imprecise bracket breakends.

use clap::{Args, Parser, Subcommand, ValueEnum};
use sv_breakends::core::io::open_output;
use sv_breakends::core::{DEFAULT_PLACEHOLDER_NAME, DEFAULT_SUFFIX};
use sv_breakends::formats::{self, VcfFile};
use sv_breakends::{AlignMode, ExtractOptions, Extraction};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "sv-breakends")]
#[command(about = "Convert VCF structural variants into paired breakends")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by the extraction subcommands
#[derive(Args)]
struct ExtractArgs {
    /// Input VCF file (plain or gzip)
    input: PathBuf,
    /// Output table (optional, stdout if not specified)
    output: Option<PathBuf>,
    /// Report the nominal position instead of the confidence interval
    #[arg(long)]
    nominal_position: bool,
    /// Prefix for ids generated for records with a missing or duplicated ID
    #[arg(long, default_value = DEFAULT_PLACEHOLDER_NAME)]
    placeholder_name: String,
    /// Breakend id suffix, followed by the breakend number
    #[arg(long, default_value = DEFAULT_SUFFIX)]
    suffix: String,
    /// INFO fields to copy into the output table
    #[arg(long, value_delimiter = ',')]
    info_columns: Vec<String>,
    /// Skip records with unrecognized SV notation instead of failing
    #[arg(long)]
    ignore_unknown_symbolic: bool,
    /// Number of threads
    #[arg(short = 't', long, default_value = "1")]
    threads: usize,
}

impl ExtractArgs {
    fn options(&self, infer_missing: bool) -> ExtractOptions {
        ExtractOptions {
            nominal_position: self.nominal_position,
            placeholder_name: self.placeholder_name.clone(),
            suffix: self.suffix.clone(),
            info_columns: self.info_columns.clone(),
            unpartnered_breakends: false,
            infer_missing_breakends: infer_missing,
            ignore_unknown_symbolic_alleles: self.ignore_unknown_symbolic,
            threads: self.threads,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum AlignModeArg {
    /// Midpoint of CIPOS
    #[value(name = "centre", alias = "center")]
    Centre,
}

impl From<AlignModeArg> for AlignMode {
    fn from(arg: AlignModeArg) -> Self {
        match arg {
            AlignModeArg::Centre => AlignMode::Centre,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write breakpoints: mutually partnered breakend pairs
    Breakpoints {
        #[command(flatten)]
        args: ExtractArgs,
        /// Synthesize the mate of bracket breakends that have none
        #[arg(long)]
        infer_missing: bool,
    },
    /// Write breakends that have no partner
    Breakends {
        #[command(flatten)]
        args: ExtractArgs,
    },
    /// Move bracket breakends to the centre of their CIPOS interval
    Align {
        /// Input VCF file (plain or gzip)
        input: PathBuf,
        /// Output VCF (optional, stdout if not specified)
        output: Option<PathBuf>,
        /// Alignment mode
        #[arg(long, default_value = "centre")]
        mode: AlignModeArg,
        /// Number of threads used for parsing
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,
    },
}

fn load_vcf(path: &PathBuf, threads: usize) -> anyhow::Result<VcfFile> {
    let start = Instant::now();
    eprintln!("Loading VCF file: {:?}", path);

    let vcf = formats::read_vcf(path, threads)
        .map_err(|e| anyhow::anyhow!("Failed to read VCF file: {}", e))?;

    eprintln!(
        "Loaded {} records in {:.2}s",
        vcf.records.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(vcf)
}

fn write_table(
    extraction: &Extraction,
    output: Option<&PathBuf>,
    options: &ExtractOptions,
) -> anyhow::Result<()> {
    let mut writer = open_output(output.map(|p| p.as_path()))?;
    formats::write_breakend_table(&mut writer, &extraction.breakends, &options.info_columns)?;
    Ok(())
}

fn print_stats(extraction: &Extraction, start: Instant) {
    let stats = &extraction.stats;
    eprintln!("\n=== Extraction Statistics ===");
    eprintln!("Total records:   {}", stats.total);
    eprintln!("Structural:      {}", stats.structural);
    eprintln!("Ignored:         {}", stats.ignored);
    eprintln!("Unrecognized:    {}", stats.unrecognized);
    eprintln!("Breakends:       {}", stats.breakends);
    eprintln!("Warnings:        {}", extraction.warnings.len());
    eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Breakpoints {
            args,
            infer_missing,
        } => {
            let options = args.options(infer_missing);
            let vcf = load_vcf(&args.input, args.threads)?;
            let extraction = sv_breakends::extract_breakpoints(&vcf.records, &options)?;
            write_table(&extraction, args.output.as_ref(), &options)?;
            print_stats(&extraction, start);
        }

        Commands::Breakends { args } => {
            let options = args.options(false);
            let vcf = load_vcf(&args.input, args.threads)?;
            let extraction = sv_breakends::extract_breakends(&vcf.records, &options)?;
            write_table(&extraction, args.output.as_ref(), &options)?;
            print_stats(&extraction, start);
        }

        Commands::Align {
            input,
            output,
            mode,
            threads,
        } => {
            let vcf = load_vcf(&input, threads)?;
            let aligned = sv_breakends::align_breakpoints(&vcf.records, mode.into())?;
            let moved = aligned
                .iter()
                .zip(&vcf.records)
                .filter(|(a, r)| a.pos != r.pos)
                .count();

            let mut writer = open_output(output.as_deref())?;
            formats::write_vcf(&mut writer, &vcf.header_lines, &aligned)?;

            eprintln!("\n=== Alignment Statistics ===");
            eprintln!("Total records:   {}", aligned.len());
            eprintln!("Moved:           {}", moved);
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }
    }

    Ok(())
}
