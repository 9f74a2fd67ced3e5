mod cli;

use colored::Colorize;
use tracing_subscriber::EnvFilter;

fn main() {
    let command_line_interface = cli::CommandLineInterface::load();
    init_tracing(command_line_interface.verbose());
    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

// stdout carries the generated output; diagnostics go to stderr.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
