use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::Config;
use crate::format::{CodeFormatter, FormatOptions, Semicolons};
use crate::recover::{GroupBy, NameBy, RecoverOptions};

#[derive(Parser)]
#[command(name = "srcrecover")]
#[command(about = "Recover original sources from minified JavaScript and its source map", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Minified JavaScript file, or a directory to scan for them
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recover original sources for a minified file or a directory of them
    Recover(RecoverArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Parser)]
pub struct RecoverArgs {
    /// Minified JavaScript file, or a directory to scan for them
    #[arg(short, long)]
    pub input: PathBuf,

    /// Line-grouping policy for reconstructed output
    #[arg(long, value_enum)]
    pub group_by: Option<GroupBy>,

    /// Naming policy for reconstructed output files
    #[arg(long, value_enum)]
    pub name_by: Option<NameBy>,

    /// Skip the formatting pass over reconstructed output
    #[arg(long)]
    pub no_format: bool,

    /// Formatter command line for reconstructed output (default: prettier)
    #[arg(long)]
    pub formatter: Option<String>,

    /// Print the batch summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl RecoverArgs {
    /// Bare input path with everything else deferred to config and defaults.
    pub fn from_input(input: PathBuf) -> Self {
        Self {
            input,
            group_by: None,
            name_by: None,
            no_format: false,
            formatter: None,
            json: false,
        }
    }

    /// Fill unset options from the config file. CLI flags win.
    pub fn merge_config(&mut self, config: &Config) {
        if self.group_by.is_none() {
            self.group_by = config.output.group_by;
        }
        if self.name_by.is_none() {
            self.name_by = config.output.name_by;
        }
        if self.formatter.is_none() {
            self.formatter = config.format.command.clone();
        }
        if config.format.enabled == Some(false) {
            self.no_format = true;
        }
    }

    /// Resolve into engine options.
    pub fn to_options(&self, config: &Config) -> RecoverOptions {
        let formatter = if self.no_format {
            None
        } else {
            let options = FormatOptions {
                semicolons: config.format.semicolons.unwrap_or(Semicolons::Omit),
                dialect: config
                    .format
                    .dialect
                    .clone()
                    .unwrap_or_else(|| "babel".to_string()),
            };
            let command = self
                .formatter
                .clone()
                .unwrap_or_else(|| "prettier".to_string());
            Some(CodeFormatter::new(command, options))
        };

        RecoverOptions {
            group_by: self.group_by.unwrap_or(GroupBy::OriginalLine),
            name_by: self.name_by.unwrap_or(NameBy::OriginalId),
            formatter,
        }
    }
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Console verbosity resolved from the -v/-q flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Trace,
}

impl Verbosity {
    /// Level string for the tracing env-filter fallback.
    pub fn to_log_level(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
            Verbosity::Trace => "trace",
        }
    }
}
