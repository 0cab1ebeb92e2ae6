//! Command-line interface
//!
//! Executes one step per invocation: CSV tables in, CSV tables out, with
//! step arguments bound from `key=value` pairs against the step's own
//! declarations.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

use crate::data::{save_csv, TableLoader};
use crate::error::{Result, StepError};
use crate::step::{LocalRun, RunContext, StepArgs};
use crate::steps;

fn dim(s: &str) -> ColoredString {
    s.truecolor(100, 100, 100)
}

fn ok(s: &str) -> ColoredString {
    s.truecolor(100, 210, 120)
}

fn step_ok(msg: &str) {
    println!("  {} {}", ok("✓"), msg);
}

#[derive(Parser)]
#[command(name = "tabular-steps")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tabular data-pipeline steps for a managed ML-training platform")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute a single step
    Run {
        /// Step name (see `list`)
        step: String,

        /// Input CSV tables, in the step's input order
        #[arg(short, long)]
        input: Vec<PathBuf>,

        /// Output CSV paths, one per produced table
        #[arg(short, long)]
        output: Vec<PathBuf>,

        /// Step arguments as key=value pairs
        #[arg(short, long)]
        arg: Vec<String>,

        /// Directory for run records; enables metric logging and model
        /// registration for steps that support it
        #[arg(long)]
        run_dir: Option<PathBuf>,
    },

    /// List registered steps and their arguments
    List,
}

/// Execute a named step against CSV tables on disk
pub fn cmd_run(
    step_name: &str,
    inputs: &[PathBuf],
    outputs: &[PathBuf],
    raw_args: &[String],
    run_dir: Option<&PathBuf>,
) -> Result<()> {
    let registry = steps::registry();
    let step = registry
        .iter()
        .find(|s| s.name() == step_name)
        .ok_or_else(|| StepError::ArgumentError(format!("unknown step: {step_name}")))?;

    if inputs.len() != step.n_inputs() {
        return Err(StepError::ArgumentError(format!(
            "{step_name} takes {} input tables, got {}",
            step.n_inputs(),
            inputs.len()
        )));
    }

    let pairs = parse_arg_pairs(raw_args)?;
    let args = StepArgs::bind(&step.arguments(), &pairs)?;

    let loader = TableLoader::new();
    let mut tables = Vec::with_capacity(inputs.len());
    for path in inputs {
        let table = loader.load_csv(path)?;
        step_ok(&format!(
            "loaded {} {}",
            path.display(),
            dim(&format!("({} rows)", table.height()))
        ));
        tables.push(table);
    }

    let mut run = match run_dir {
        Some(dir) => Some(LocalRun::new(dir)?),
        None => None,
    };

    let produced = step.run(
        tables,
        &args,
        run.as_mut().map(|r| r as &mut dyn RunContext),
    )?;
    step_ok(&format!("{step_name} produced {} table(s)", produced.len()));

    if outputs.len() != produced.len() {
        return Err(StepError::ArgumentError(format!(
            "{step_name} produced {} tables, got {} output paths",
            produced.len(),
            outputs.len()
        )));
    }
    for (mut table, path) in produced.into_iter().zip(outputs) {
        save_csv(&mut table, path)?;
        step_ok(&format!("wrote {}", path.display()));
    }

    if let Some(run) = run {
        let record = run.finish()?;
        step_ok(&format!("run {} recorded", dim(&record.run_id)));
    }

    Ok(())
}

/// Print every registered step with its argument declarations
pub fn cmd_list() {
    for step in steps::registry() {
        println!("{}", step.name().bold());
        println!("  {}", dim(&format!("inputs: {}", step.n_inputs())));
        for decl in step.arguments() {
            let mut line = format!("--arg {}=<{}>", decl.name, decl.arg_type.name());
            if decl.required {
                line.push_str(" (required)");
            }
            if let Some(default) = &decl.default {
                line.push_str(&format!(" [default: {default:?}]"));
            }
            println!("  {line}");
            println!("      {}", dim(&decl.help));
        }
        println!();
    }
}

fn parse_arg_pairs(raw: &[String]) -> Result<Vec<(String, String)>> {
    raw.iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| {
                    StepError::ArgumentError(format!("expected key=value, got: {pair}"))
                })
        })
        .collect()
}
