//! tfpub CLI entry point

#![allow(clippy::print_stdout, clippy::print_stderr)]

use tfpub::cli::{self, EXIT_OK, exit_code_for, render_error};
use tfpub::commands::Command;
use tfpub::tracing::{TracingConfig, TracingFormat, init_tracing};
use tracing::Instrument;

/// Exit code when the runtime cannot be created
const EXIT_RUNTIME: i32 = 1;

fn main() {
    // Tracing may be unusable during a panic, so write straight to stderr.
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    let cli = cli::parse();

    let tracing_config = TracingConfig {
        format: if cli.json {
            TracingFormat::Json
        } else {
            TracingFormat::Pretty
        },
        level: cli.level.into(),
        ..Default::default()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("{e:?}");
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Fatal error: Failed to create tokio runtime: {e}");
            std::process::exit(EXIT_RUNTIME);
        }
    };

    let json = cli.json;
    let command: Command = cli.command.into();
    let exit_code = rt.block_on(run(command, json));
    std::process::exit(exit_code);
}

async fn run(command: Command, json: bool) -> i32 {
    let span = tfpub::command_span!(command.name());

    match command.execute().instrument(span).await {
        Ok(Some(output)) => {
            println!("{output}");
            EXIT_OK
        }
        Ok(None) => EXIT_OK,
        Err(err) => {
            render_error(&err, json);
            exit_code_for(&err)
        }
    }
}
