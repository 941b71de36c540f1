use std::fmt::Display;
use colored::{Colorize, ColoredString};

/// Print tool version and authors.
pub(super) fn print_version() {
    println!("{} {}", env!("CARGO_PKG_NAME").underline(), format!("v{}", env!("CARGO_PKG_VERSION")).green());
    let authors: Vec<_> = env!("CARGO_PKG_AUTHORS").split(':').collect();
    let n = authors.len();
    if n == 0 {
        return;
    }
    print!("Created by ");
    for (i, author) in authors.iter().enumerate() {
        if i == 0 {
            print!("{}", author.bright_blue());
        } else if i < n - 1 {
            print!(", {}", author.bright_blue());
        } else {
            print!(" and {}", author.bright_blue());
        }
    }
    println!();
}

/// Formats default value for the help message.
pub(super) fn fmt_def(val: impl Display) -> ColoredString {
    val.to_string().cyan()
}

/// Placeholder for flags without values.
pub(super) fn flag() -> &'static str {
    ""
}
