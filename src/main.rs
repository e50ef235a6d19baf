//! Partsim - interactive part inspector
//!
//! Lists the part catalog, prints pin tables and replays input traces.
//!
//! # Usage
//!
//! ```bash
//! partsim parts
//! partsim pins potentiometer --json
//! RUST_LOG=debug partsim run drag.trace
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;
use partsim::{
    error::{PartsError, Result},
    trace, PartKind, Workbench,
};

/// Interactive part models for circuit simulators
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// List available parts
    Parts,

    /// Print a part's pin table
    Pins {
        /// Part name (see `partsim parts`)
        #[arg(value_name = "PART")]
        part: String,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Replay an input trace and print value changes
    Run {
        /// Path to the trace file
        #[arg(value_name = "TRACE_FILE")]
        trace_file: PathBuf,

        /// Part to use when the trace has no `.part` directive
        #[arg(short, long)]
        part: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let mut out = io::stdout().lock();

    match args.command {
        Cmd::Parts => {
            for kind in PartKind::ALL {
                let tag = if kind.is_interactive() { "interactive" } else { "passive" };
                writeln!(out, "{:<22} {}", kind.name(), tag).map_err(output_error)?;
            }
        }

        Cmd::Pins { part, json } => {
            let kind = PartKind::from_name(&part)?;
            let part = kind.build(Default::default(), Default::default());
            if json {
                serde_json::to_writer_pretty(&mut out, part.pin_info().as_slice())?;
                writeln!(out).map_err(output_error)?;
            } else {
                for pin in part.pin_info() {
                    writeln!(out, "{}", pin).map_err(output_error)?;
                }
            }
        }

        Cmd::Run { trace_file, part } => {
            let ast = trace::parse_file(&trace_file)?;
            let fallback = part.as_deref().map(PartKind::from_name).transpose()?;
            let mut bench = Workbench::for_trace(&ast, fallback)?;
            info!("replaying {} on {}", trace_file.display(), bench.part().kind());

            for change in bench.run(&ast)? {
                writeln!(out, "line {:>4}: {}", change.line, change.value).map_err(output_error)?;
            }
            writeln!(out, "final value: {}", bench.part().value()).map_err(output_error)?;
        }
    }

    Ok(())
}

fn output_error(e: io::Error) -> PartsError {
    PartsError::OutputError {
        message: e.to_string(),
    }
}
