//! Loading the tree to analyze: notation text, a file, or stdin.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use aslc_compiler::{Analysis, AnalysisBuilder};

pub struct InputArgs {
    pub path: Option<PathBuf>,
    pub text: Option<String>,
    /// Input is a JSON tree rather than tree notation.
    pub json: bool,
    pub fuel: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("input is required: use a positional FILE, \"-\" for stdin, or -q/--text")]
    Missing,

    #[error("input cannot be empty")]
    Empty,

    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Analysis(#[from] aslc_compiler::Error),
}

/// Loaded input text and the name to show in diagnostics.
#[derive(Debug)]
pub struct Input {
    pub name: String,
    pub text: String,
}

pub fn load_input(path: Option<&Path>, text: Option<&str>) -> Result<Input, InputError> {
    if let Some(text) = text {
        return Ok(Input {
            name: "<text>".to_string(),
            text: text.to_string(),
        });
    }

    let Some(path) = path else {
        return Err(InputError::Missing);
    };
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| InputError::Read {
                path: "<stdin>".to_string(),
                source,
            })?;
        return Ok(Input {
            name: "<stdin>".to_string(),
            text: buf,
        });
    }

    let name = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: name.clone(),
        source,
    })?;
    Ok(Input { name, text })
}

/// Load the input and run the analysis over it.
pub fn analyze(args: &InputArgs, builder: AnalysisBuilder) -> Result<(Input, Analysis), InputError> {
    let input = load_input(args.path.as_deref(), args.text.as_deref())?;
    if input.text.trim().is_empty() {
        return Err(InputError::Empty);
    }

    log::debug!("analyzing {} ({} bytes)", input.name, input.text.len());
    let builder = builder.with_fuel(args.fuel);
    let analysis = if args.json {
        builder.from_json(&input.text)?
    } else {
        builder.parse(&input.text)?
    };
    Ok((input, analysis))
}

/// Print a load or analysis failure and exit.
pub fn fail(err: InputError, color: bool) -> ! {
    eprintln!("error: {err}");
    if let InputError::Analysis(aslc_compiler::Error::InternalConsistency { diagnostics, .. }) =
        &err
    {
        eprint!("{}", diagnostics.printer().colored(color).render());
        eprintln!();
    }
    std::process::exit(1);
}
