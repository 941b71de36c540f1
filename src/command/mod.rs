mod common;
mod map;
mod config;
mod genomes;

use colored::Colorize;

use crate::Error;
use common::{print_version, fmt_def, flag};

const PROGRAM: &'static str = env!("CARGO_PKG_NAME");

fn print_help() {
    print_version();
    println!("\n{} {} command [arguments]",
        "Usage:".bold(), PROGRAM);

    println!("\n{}", "[ Generating scripts ]".bold());
    println!("    {:<7}  Create a read alignment script for a single read file.", "map".red());

    println!("\n{}", "[ Configuration ]".bold());
    println!("    {:<7}  Write default configuration.", "config".red());
    println!("    {:<7}  List available genomes.", "genomes".red());

    println!("\n{}", "[ General help ]".bold());
    println!("    {:<7}  Show this help message.", "help".red());
    println!("    {:<7}  Show version.", "version".red());
}

pub fn run(argv: &[String]) -> Result<(), Error> {
    if argv.len() <= 1 {
        print_help();
        std::process::exit(1);
    }
    match &argv[1] as &str {
        "map" => map::run(&argv[2..])?,
        "config" => config::run(&argv[2..])?,
        "genomes" => genomes::run(&argv[2..])?,
        "help" | "h" | "--help" | "-h" => print_help(),
        "version" | "--version" | "-V" => print_version(),
        cmd => {
            log::error!("Unknown command {}", cmd.red());
            print_help();
            std::process::exit(1);
        }
    }
    Ok(())
}
