use clap::Parser;
use miette::Result;
use pxgov::cli::{Cli, Commands};
use pxgov::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Process(args) => pxgov::cli::process::run(args, &printer)?,
        Commands::Palette(args) => pxgov::cli::palette::run(args, &printer)?,
        Commands::Validate(args) => pxgov::cli::validate::run(args, &printer)?,
        Commands::Palettes => pxgov::cli::palettes::run(&printer)?,
        Commands::Completions(args) => pxgov::cli::completions::run(args)?,
    }

    Ok(())
}
