//! Write the formula reference (EQUATIONS.md) from the equation registry.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-equations                 # writes calc_core/src/equations/EQUATIONS.md
//! cargo run --bin gen-equations -- docs/eq.md   # custom output path
//! cargo run --bin gen-equations -- --check      # exit 1 if the file is stale
//! ```

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use calc_core::equations::{generate_equations_markdown, Equation, ALL_EQUATIONS};

const DEFAULT_OUTPUT: &str = "calc_core/src/equations/EQUATIONS.md";

fn main() -> ExitCode {
    let mut check_only = false;
    let mut output = PathBuf::from(DEFAULT_OUTPUT);
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--check" => check_only = true,
            path => output = PathBuf::from(path),
        }
    }

    let markdown = generate_equations_markdown();

    if check_only {
        return match fs::read_to_string(&output) {
            Ok(existing) if existing == markdown => {
                println!("{} is up to date", output.display());
                ExitCode::SUCCESS
            }
            Ok(_) => {
                eprintln!("{} is stale; run gen-equations to refresh it", output.display());
                ExitCode::FAILURE
            }
            Err(e) => {
                eprintln!("Cannot read {}: {}", output.display(), e);
                ExitCode::FAILURE
            }
        };
    }

    match fs::write(&output, &markdown) {
        Ok(()) => {
            let categories = Equation::all_categories().len();
            println!(
                "Wrote {} equations in {} categories ({} bytes) to {}",
                ALL_EQUATIONS.len(),
                categories,
                markdown.len(),
                output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error writing {}: {}", output.display(), e);
            ExitCode::FAILURE
        }
    }
}
