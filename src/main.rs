use clap::Parser;

mod command_line;

use command_line::cli::{self, Cli};

fn main() {
    cli::init_logging();
    let args = Cli::parse();

    let code = match cli::run(&args) {
        Ok(code) => code,
        Err(err) => {
            log::error!("{err:#}");
            cli::EXIT_UNDECIDED
        }
    };
    std::process::exit(code);
}
