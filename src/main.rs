use clap::{CommandFactory, Parser};
use clap_complete::generate;
use sourcemap_recover::cli::{Cli, Commands, RecoverArgs, Verbosity};
use sourcemap_recover::ui::formatter::Formatter;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn initialize_tracing(verbosity: Verbosity) {
    let log_level = verbosity.to_log_level();
    let fallback_filter = format!("sourcemap_recover={}", log_level);

    let use_json = std::env::var("SRCRECOVER_LOG_JSON").is_ok();

    if use_json {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| fallback_filter.clone().into()),
            )
            .with(json_layer)
            .init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| fallback_filter.into()),
            )
            .with(fmt_layer)
            .init();
    }
}

fn main() -> miette::Result<()> {
    Formatter::configure_colors_from_env();

    let cli = Cli::parse();
    let verbosity = cli.verbosity();

    initialize_tracing(verbosity);

    let config = sourcemap_recover::config::Config::load_or_default();

    match cli.command {
        Some(Commands::Recover(mut args)) => {
            args.merge_config(&config);
            sourcemap_recover::cli::commands::recover(args, &config)
        }
        Some(Commands::Completions(args)) => {
            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "srcrecover", &mut io::stdout());
            Ok(())
        }
        None => {
            if let Some(input) = cli.input {
                let mut args = RecoverArgs::from_input(input);
                args.merge_config(&config);
                sourcemap_recover::cli::commands::recover(args, &config)
            } else {
                let mut cmd = Cli::command();
                cmd.print_help().map_err(|e| miette::miette!(e))?;
                println!();
                Ok(())
            }
        }
    }
}
