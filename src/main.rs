//! ACH file checker CLI
//!
//! Decodes and validates a NACHA file, then prints a CSV listing of its
//! entries or, with `--reformat`, the file re-encoded in canonical form.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- payroll.ach > entries.csv
//! cargo run -- --reformat --bypass-origin payroll.ach > clean.ach
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use ach_engine::{reader, AchError, Result, Summary, ValidateOptions};
use log::warn;
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

struct Args {
    path: String,
    reformat: bool,
    options: ValidateOptions,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut path = None;
    let mut reformat = false;
    let mut options = ValidateOptions::default();
    for arg in args {
        match arg.as_str() {
            "--reformat" => reformat = true,
            "--bypass-origin" => options.bypass_origin_validation = true,
            "--bypass-destination" => options.bypass_destination_validation = true,
            "--require-aba-origin" => options.require_aba_origin = true,
            flag if flag.starts_with("--") => return Err(AchError::UnknownOption(flag.to_string())),
            _ => path = Some(arg),
        }
    }
    let path = path.ok_or(AchError::MissingArgument)?;
    Ok(Args {
        path,
        reformat,
        options,
    })
}

fn run() -> Result<()> {
    let args = parse_args(env::args().skip(1))?;

    let input = File::open(&args.path)?;
    let mut file = reader::read(BufReader::new(input))?;
    file.set_validation(args.options);
    if let Err(errs) = file.validate() {
        for err in &errs {
            warn!("{}", err);
        }
        return Err(errs.into());
    }

    let stdout = io::stdout();
    let handle = stdout.lock();
    if args.reformat {
        file.write(handle)?;
    } else {
        Summary::new(&file).write(handle)?;
    }

    Ok(())
}
