mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, update};
use ouiup_common::error::UpdateError;
use terminal::{logging, print};
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    if let Err(e) = logging::init(commands.quiet) {
        eprintln!("failed to set up logging: {e:#}");
        return ExitCode::FAILURE;
    }

    let cfg = commands.config();
    print::banner(cfg.no_banner, cfg.quiet);

    match update::update(&cfg, commands.no_root_check).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            let code = e.downcast_ref::<UpdateError>().map_or(1, UpdateError::exit_code);
            ExitCode::from(code)
        }
    }
}
