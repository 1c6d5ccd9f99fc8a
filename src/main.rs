use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use coach_fare::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    init_tracing();

    match args.get_command() {
        cli::Commands::Start => {
            commands::start::execute(args.config.clone()).await?;
        }
        cli::Commands::Quote(quote) => {
            commands::quote::execute(&args.config, quote)?;
        }
        cli::Commands::Reload { pid } => {
            commands::reload::execute(pid)?;
        }
        cli::Commands::Test => {
            commands::test::execute(&args.config)?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&args.config)?,
            cli::ConfigCommands::Validate => commands::config::validate(&args.config)?,
        },
        cli::Commands::Version => {
            println!("Coach Fare v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
