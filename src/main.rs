use colored::Colorize;
use std::process;

fn main() {
    if let Err(e) = rcomplete::cli::run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if rcomplete::error::is_input_error(&e) {
            eprintln!("See 'rcomplete --help' for usage.");
        }
        process::exit(1);
    }
}
