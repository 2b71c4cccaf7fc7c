//! CLI entry point for brightness-rank mosaics and convergence animations

use clap::Parser;
use pixelmorph::io::cli::{Cli, CommandRunner};

fn main() -> pixelmorph::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let runner = CommandRunner::new(cli);
    runner.run()
}
