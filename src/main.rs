//! sfs: fetch and check out a single git commit, nothing else

use clap::Parser;
use console::{style, Color};
use shallow_fetch_sha::cli::Cli;
use tracing_subscriber::EnvFilter;

fn init_tracing(silent: bool, verbose: bool) {
    // silent wins over verbose
    let filter = if silent {
        EnvFilter::new("off")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.silent, cli.verbose);

    if let Err(err) = cli.run() {
        eprintln!("{} {:#}", style("error:").fg(Color::Red).bold(), err);
        std::process::exit(1);
    }
}
