//! SigPad command line entry point.

use clap::Parser;
use sigpad_app::cli::{Cli, run};

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Running {:?}", cli.command);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
