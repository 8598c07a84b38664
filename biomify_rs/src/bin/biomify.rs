//! `biomify` command-line entry point.

use std::panic;
use std::process::ExitCode;

use clap::Parser;

use biomify::MigrateError;
use biomify::cli::{self, Cli};

fn install_broken_pipe_handler() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let is_broken = payload
            .downcast_ref::<&str>()
            .is_some_and(|s| s.contains("Broken pipe"))
            || payload
                .downcast_ref::<String>()
                .is_some_and(|s| s.contains("Broken pipe"));

        if is_broken {
            // Downstream closed the pipe (e.g. `biomify detect --json | head`).
            std::process::exit(0);
        }

        default_hook(info);
    }));
}

fn main() -> ExitCode {
    install_broken_pipe_handler();

    let args = Cli::parse();

    // Logs go to stderr; stdout carries reports and --json output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.parse().unwrap_or_default()),
        )
        .init();

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<MigrateError>() {
                Some(reported) => eprintln!("error: {}", reported),
                None => eprintln!("[biomify] unexpected error: {:?}", e),
            }
            ExitCode::FAILURE
        }
    }
}
