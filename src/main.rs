//! easypack CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use easypack::cli::{Cli, CommandDispatcher, Outcome};
use easypack::shell::is_ci;
use easypack::tools::Toolkit;
use easypack::ui::{create_ui, UserInterface};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` or `--verbose` sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("easypack=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("easypack=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: &Cli, ui: &mut dyn UserInterface) -> easypack::Result<ExitCode> {
    let defaults = cli.program_defaults()?;
    let dispatcher = CommandDispatcher::new(defaults, Toolkit::system_default());
    let result = dispatcher.dispatch(cli, ui)?;

    match result.outcome {
        Outcome::Completed => {}
        Outcome::Unimplemented(name) => {
            ui.warning(&format!("[{}] command not implemented", name));
        }
        Outcome::Terminate => std::process::exit(result.exit_code),
    }

    Ok(ExitCode::from(result.exit_code.clamp(0, 255) as u8))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug_logging());

    tracing::debug!("easypack starting with args: {:?}", cli);

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let mut ui = create_ui(!is_ci(), cli.output_mode());

    match run(&cli, ui.as_mut()) {
        Ok(code) => code,
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
