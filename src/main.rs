//! Tabular pipeline steps - main entry point

use clap::Parser;
use tabular_steps::cli::{cmd_list, cmd_run, Cli, Commands};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tabular_steps=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            step,
            input,
            output,
            arg,
            run_dir,
        } => {
            cmd_run(&step, &input, &output, &arg, run_dir.as_ref())?;
        }
        Commands::List => {
            cmd_list();
        }
    }

    Ok(())
}
