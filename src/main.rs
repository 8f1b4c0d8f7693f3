//! Toastwire CLI entry point

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use toastwire::cli::{
    app::{run, RunOutcome, EXIT_ERROR},
    args::{strip_activation_flag, Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use toastwire::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "toastwire=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let (args, relaunched) = strip_activation_flag(std::env::args_os());

    if args.len() <= 1 && !relaunched {
        if let Err(e) = Cli::command().print_help() {
            tracing::error!("Failed to print help: {}", e);
        }
        println!();
        return ExitCode::SUCCESS;
    }

    let mut cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => RunOutcome::UnhandledOption.into(),
            };
        }
    };

    if let Some(Commands::Config { action }) = cli.command.take() {
        let presenter = Presenter::new();
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    tracing::debug!(relaunched, "Starting toastwire");
    run(cli, relaunched).await
}
