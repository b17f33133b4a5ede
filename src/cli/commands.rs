use crate::batch;
use crate::cli::args::RecoverArgs;
use crate::config::Config;
use crate::ui::formatter::Formatter;
use crate::Result;

fn print_info(message: impl AsRef<str>) {
    println!("{}", Formatter::info(message));
}

fn print_warning(message: impl AsRef<str>) {
    println!("{}", Formatter::warning(message));
}

/// Execute the recover command
pub fn recover(args: RecoverArgs, config: &Config) -> Result<()> {
    let options = args.to_options(config);

    if !args.json {
        print_info(format!("Recovering sources for {}", args.input.display()));
    }

    let summary = batch::recover_path(&args.input, &options)?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&summary).map_err(|e| miette::miette!(e))?;
        println!("{}", rendered);
    } else if summary.recovered == 0 && summary.total > 0 {
        print_warning("No sources recovered.");
    }

    Ok(())
}
