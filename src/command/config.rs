//! Write default configuration.

use std::{
    io::Write,
    path::PathBuf,
};
use colored::Colorize;
use crate::{
    Error,
    err::add_path,
    ext,
    config::{Config, JsonSer},
};

struct Args {
    output: PathBuf,
    base: Option<PathBuf>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            output: PathBuf::from("-"),
            base: None,
        }
    }
}

fn print_help() {
    const KEY: usize = 16;
    const VAL: usize = 4;

    println!("{}", "Write configuration in JSON format.".yellow());
    println!("\n{} {} config [-o config.json] [arguments]",
        "Usage:".bold(), super::PROGRAM);

    println!("\n{}", "Arguments:".bold());
    println!("    {:KEY$} {:VAL$}  Output file [{}].",
        "-o, --output".green(), "FILE".yellow(), super::fmt_def("stdout"));
    println!("    {:KEY$} {:VAL$}  Start from this configuration instead of the default one.",
        "-c, --config".green(), "FILE".yellow());
    println!("    {:KEY$} {:VAL$}  Show this help message.", "-h, --help".green(), "");
}

fn parse_args(argv: &[String]) -> Result<Args, lexopt::Error> {
    use lexopt::prelude::*;
    let mut args = Args::default();
    let mut parser = lexopt::Parser::from_args(argv);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('o') | Long("output") => args.output = parser.value()?.parse()?,
            Short('c') | Long("config") => args.base = Some(parser.value()?.parse()?),
            Short('h') | Long("help") => {
                print_help();
                std::process::exit(0);
            }
            _ => Err(arg.unexpected())?,
        }
    }
    Ok(args)
}

pub(super) fn run(argv: &[String]) -> Result<(), Error> {
    let args = parse_args(argv)?;
    let config = match &args.base {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    let mut out = ext::sys::create_uncompressed(&args.output)?;
    config.save().write_pretty(&mut out, 4).map_err(add_path!(args.output))?;
    writeln!(out).map_err(add_path!(args.output))?;
    out.flush().map_err(add_path!(args.output))?;
    if args.output.as_os_str() != "-" {
        log::info!("Configuration written to {}", ext::fmt::path(&args.output));
    }
    Ok(())
}
