//! List available genomes.

use std::path::PathBuf;
use colored::Colorize;
use crate::{
    Error,
    config::Config,
};

fn print_help() {
    const KEY: usize = 16;
    const VAL: usize = 4;

    println!("{}", "List genomes and their bowtie indices.".yellow());
    println!("\n{} {} genomes [-c config.json]", "Usage:".bold(), super::PROGRAM);

    println!("\n{}", "Arguments:".bold());
    println!("    {:KEY$} {:VAL$}  Configuration in JSON format [{}].",
        "-c, --config".green(), "FILE".yellow(), super::fmt_def("default"));
    println!("    {:KEY$} {:VAL$}  Show this help message.", "-h, --help".green(), "");
}

fn parse_args(argv: &[String]) -> Result<Option<PathBuf>, lexopt::Error> {
    use lexopt::prelude::*;
    let mut config = None;
    let mut parser = lexopt::Parser::from_args(argv);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('c') | Long("config") => config = Some(parser.value()?.parse()?),
            Short('h') | Long("help") => {
                print_help();
                std::process::exit(0);
            }
            _ => Err(arg.unexpected())?,
        }
    }
    Ok(config)
}

pub(super) fn run(argv: &[String]) -> Result<(), Error> {
    let config = match parse_args(argv)? {
        Some(path) => Config::from_path(&path)?,
        None => Config::default(),
    };
    let mut empty = true;
    for (name, index) in config.genomes() {
        println!("{:<8}  {}", name.green(), index);
        empty = false;
    }
    if empty {
        log::warn!("Configuration contains no genomes");
    }
    Ok(())
}
