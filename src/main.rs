//   Copyright 2025 Dom Dwyer <dom@itsallbroken.com>
//
//   Licensed under the Apache License, Version 2.0 (the "License");
//   you may not use this file except in compliance with the License.
//   You may obtain a copy of the License at
//
//       http://www.apache.org/licenses/LICENSE-2.0
//
//   Unless required by applicable law or agreed to in writing, software
//   distributed under the License is distributed on an "AS IS" BASIS,
//   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//   See the License for the specific language governing permissions and
//   limitations under the License.

use clap::Parser;
use libmoltp::{encode, RawFormula};
use log::LevelFilter;
use thiserror::Error;

/// Theorem prover for quantified modal logic.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The formula to prove, in LaTeX notation.
    #[arg(required_unless_present = "stdin", conflicts_with = "stdin")]
    formula: Option<String>,

    /// Read the formula from stdin instead of the command line.
    #[arg(long)]
    stdin: bool,

    /// Identifier attached to the submitted formula by batch callers.
    #[arg(long, default_value_t = 0)]
    oid: i64,

    /// Emit the derivation as JSON instead of plain sequent lines.
    #[arg(short, long)]
    json: bool,

    /// Trace the proof search to stderr.
    #[arg(short, long)]
    debug: bool,
}

#[derive(Debug, Error)]
enum Error {
    #[error("failed to read formula from stdin: {0}")]
    ReadStdin(std::io::Error),

    #[error(transparent)]
    Prove(#[from] libmoltp::Error),

    #[error("failed to serialise derivation: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(match args.debug {
            true => LevelFilter::Debug,
            false => LevelFilter::Warn,
        })
        .init();

    let formula = match args.formula {
        Some(v) => v,
        None => std::io::read_to_string(std::io::stdin().lock()).map_err(Error::ReadStdin)?,
    };

    let raw = RawFormula {
        oid: args.oid,
        formula,
    };

    let solution = match libmoltp::prove(&raw) {
        Ok(v) => v,
        Err(e) => {
            // An exhausted search still carries the derivation it got to.
            if let libmoltp::Error::NoProofFound { solution } = &e {
                for s in solution {
                    eprintln!("{s}");
                }
            }
            return Err(e.into());
        }
    };

    if args.json {
        let wire: Vec<_> = solution.iter().map(encode).collect();
        println!("{}", serde_json::to_string(&wire)?);
        return Ok(());
    }

    for s in &solution {
        println!("{s}");
    }

    Ok(())
}
