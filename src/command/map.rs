//! Create a read alignment script.

use std::{
    cmp::max,
    path::{Path, PathBuf},
};
use colored::Colorize;
use const_format::str_repeat;
use crate::{
    Error,
    err::validate_param,
    ext::{self, rand::init_rng},
    config::Config,
    plan::{NameTable, Plan, AlignParams, InputFormat},
};

struct Args {
    fastq: Option<String>,
    seed_len: Option<u32>,
    genome: Option<String>,
    unique_id: Option<String>,
    output: Option<String>,

    config: Option<PathBuf>,
    scratch: Option<String>,
    bowtie: Option<String>,
    samtools: Option<String>,
    threads: u16,
    seed: Option<u64>,
    check_tools: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            fastq: None,
            seed_len: None,
            genome: None,
            unique_id: None,
            output: None,

            config: None,
            scratch: None,
            bowtie: None,
            samtools: None,
            threads: 4,
            seed: None,
            check_tools: false,
        }
    }
}

impl Args {
    /// Names of the required arguments that were not provided.
    fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.fastq.is_none() {
            missing.push("-f/--fastq");
        }
        if self.seed_len.is_none() {
            missing.push("-l/--length");
        }
        if self.genome.is_none() {
            missing.push("-g/--genome");
        }
        if self.unique_id.is_none() {
            missing.push("-u/--unique");
        }
        if self.output.is_none() {
            missing.push("-o/--output");
        }
        missing
    }

    /// Validate arguments, modifying some, if needed.
    fn validate(mut self) -> Result<Self, Error> {
        let missing = self.missing();
        if !missing.is_empty() {
            print_help();
            println!();
        }
        validate_param!(missing.is_empty(), "Missing required arguments: {}", missing.join(", "));
        self.threads = max(self.threads, 1);
        Ok(self)
    }
}

fn print_help() {
    const KEY: usize = 16;
    const VAL: usize = 4;
    const EMPTY: &'static str = str_repeat!(" ", KEY + VAL + 5);

    let defaults = Args::default();
    let def_config = Config::default();
    println!("{}", "Create a script, that aligns reads and produces a sorted and indexed BAM file.".yellow());

    println!("\n{} {} map -f reads.fastq -l INT -g genome -u ID -o out_dir [arguments]",
        "Usage:".bold(), super::PROGRAM);

    println!("\n{}", "Input/output arguments:".bold());
    println!("    {:KEY$} {:VAL$}  Reads in FASTQ format: plain, gzip compressed or in a tar archive.",
        "-f, --fastq".green(), "FILE".yellow());
    println!("    {:KEY$} {:VAL$}  Seed length for bowtie.",
        "-l, --length".green(), "INT".yellow());
    println!("    {:KEY$} {:VAL$}  Genome name, see {}.",
        "-g, --genome".green(), "STR".yellow(), const_format::concatcp!(super::PROGRAM, " genomes").underline());
    println!("    {:KEY$} {:VAL$}  Unique run name. Script is written to {}.",
        "-u, --unique".green(), "STR".yellow(), "out_dir/STR_bwt.sh".cyan());
    println!("    {:KEY$} {:VAL$}  Output directory for the final BAM files.",
        "-o, --output".green(), "DIR".yellow());

    println!("\n{}", "Configuration:".bold());
    println!("    {:KEY$} {:VAL$}  Configuration in JSON format, see {}.",
        "-c, --config".green(), "FILE".yellow(), const_format::concatcp!(super::PROGRAM, " config").underline());
    println!("    {:KEY$} {:VAL$}  Scratch directories are created here\n\
        {EMPTY}  [{}].",
        "    --scratch".green(), "DIR".yellow(), super::fmt_def(&def_config.scratch_parent));
    println!("    {:KEY$} {:VAL$}  Bowtie executable [{}].",
        "    --bowtie".green(), "EXE".yellow(), super::fmt_def(&def_config.aligner));
    println!("    {:KEY$} {:VAL$}  Samtools executable [{}].",
        "    --samtools".green(), "EXE".yellow(), super::fmt_def(&def_config.samtools));

    println!("\n{}", "Execution parameters:".bold());
    println!("    {:KEY$} {:VAL$}  Number of bowtie threads [{}].",
        "-@, --threads".green(), "INT".yellow(), super::fmt_def(defaults.threads));
    println!("    {:KEY$} {:VAL$}  Random seed for the scratch directory name.",
        "-s, --seed".green(), "INT".yellow());
    println!("    {:KEY$} {:VAL$}  Check that bowtie and samtools executables exist.",
        "    --check-tools".green(), super::flag());

    println!("\n{}", "Other parameters:".bold());
    println!("    {:KEY$} {:VAL$}  Show this help message.", "-h, --help".green(), "");
    println!("    {:KEY$} {:VAL$}  Show version.", "-V, --version".green(), "");
}

fn parse_args(argv: &[String]) -> Result<Args, lexopt::Error> {
    if argv.is_empty() {
        print_help();
        std::process::exit(1);
    }
    use lexopt::prelude::*;
    let mut args = Args::default();
    let mut parser = lexopt::Parser::from_args(argv);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('f') | Long("fastq") => args.fastq = Some(parser.value()?.parse()?),
            Short('l') | Long("length") => args.seed_len = Some(parser.value()?.parse()?),
            Short('g') | Long("genome") => args.genome = Some(parser.value()?.parse()?),
            Short('u') | Long("unique") => args.unique_id = Some(parser.value()?.parse()?),
            Short('o') | Long("output") => args.output = Some(parser.value()?.parse()?),

            Short('c') | Long("config") => args.config = Some(parser.value()?.parse()?),
            Long("scratch") => args.scratch = Some(parser.value()?.parse()?),
            Long("bowtie") => args.bowtie = Some(parser.value()?.parse()?),
            Long("samtools") => args.samtools = Some(parser.value()?.parse()?),
            Short('@') | Long("threads") => args.threads = parser.value()?.parse()?,
            Short('s') | Long("seed") => args.seed = Some(parser.value()?.parse()?),
            Long("check-tools") => args.check_tools = true,

            Short('V') | Long("version") => {
                super::print_version();
                std::process::exit(0);
            }
            Short('h') | Long("help") => {
                print_help();
                std::process::exit(0);
            }
            _ => Err(arg.unexpected())?,
        }
    }
    Ok(args)
}

/// Loads configuration and applies command-line overrides.
fn load_config(args: &Args) -> Result<Config, Error> {
    let mut config = match &args.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    if let Some(scratch) = &args.scratch {
        config.scratch_parent = scratch.clone();
    }
    if let Some(bowtie) = &args.bowtie {
        config.aligner = bowtie.clone();
    }
    if let Some(samtools) = &args.samtools {
        config.samtools = samtools.clone();
    }
    if args.check_tools {
        for exe in [&config.aligner, &config.samtools] {
            let path = ext::sys::find_exe(exe)?;
            log::debug!("Found {}", ext::fmt::path(&path));
        }
    }
    Ok(config)
}

/// Script is written to `<output>/<unique_id>_bwt.sh`.
fn script_path(output: &str, unique_id: &str) -> PathBuf {
    Path::new(output).join(format!("{}_bwt.sh", unique_id))
}

/// Builds alignment plan. Fails before anything is written if the genome is unknown.
fn create_plan(args: &Args, config: &Config) -> Result<Plan, Error> {
    // unwrap as required arguments were checked in `validate`.
    let fastq = args.fastq.as_deref().unwrap();
    let genome = args.genome.as_deref().unwrap();
    let index = config.bowtie_index(genome)?;
    let unique_id = args.unique_id.as_deref().filter(|s| !s.is_empty());

    let mut rng = init_rng(args.seed);
    let names = NameTable::resolve(fastq, genome, unique_id, &config.scratch_parent, args.output.as_deref().unwrap(),
        config.max_token, &mut rng);
    log::info!("Run {}: {} reads {}, genome {}", names.identity().bold(), InputFormat::classify(fastq),
        ext::fmt::path(Path::new(fastq)), genome);
    let params = AlignParams {
        index: index.to_owned(),
        seed_len: args.seed_len.unwrap(),
        threads: args.threads,
    };
    Ok(Plan::new(names, config.tools(), params))
}

pub(super) fn run(argv: &[String]) -> Result<(), Error> {
    let args = parse_args(argv)?.validate()?;
    let config = load_config(&args)?;
    let plan = create_plan(&args, &config)?;
    log::debug!("Scratch directory {}", plan.names().scratch_dir());

    let out_path = script_path(args.output.as_deref().unwrap(), args.unique_id.as_deref().unwrap());
    log::info!("Writing script to {}", ext::fmt::path(&out_path));
    let mut out = ext::sys::create_uncompressed(&out_path)?;
    plan.write(&mut out)?;
    log::info!("Success!");
    Ok(())
}
