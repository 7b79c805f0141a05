use clap::Parser;
use std::env;

use tape_bf::commands::run::{self, RunArgs};
use tape_bf::logging;

#[derive(Parser, Debug)]
#[command(name = "bf", disable_help_flag = true)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,
}

fn main() {
    // We still pull the program name for help rendering consistency
    let program = env::args().next().unwrap_or_else(|| String::from("bf"));

    let cli = Cli::parse();
    logging::init(cli.run.verbose);

    let code = run::run(&program, cli.run);
    std::process::exit(code);
}
