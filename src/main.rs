mod args;
mod dashboard;

use clap::Parser;
use log::{debug, warn};

use crate::args::Args;

fn main() {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }
    debug!("args: {:?}", args);

    if let Err(e) = dashboard::run_dashboard(&args) {
        warn!("Error occurred {:?}", e);
        eprintln!("Error: {}", dashboard::describe_error(&e));
        std::process::exit(1);
    }
}
