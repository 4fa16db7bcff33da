use std::fs;
use std::path::{Path, PathBuf};

use abibridge_lib::{Config, Target, compile};
use tracing::info;

use super::CliError;
use super::input::{abi_stem, default_namespace, read_abi};

pub struct GenerateArgs {
    pub abi_path: PathBuf,
    pub output: Option<PathBuf>,
    pub namespace: Option<String>,
    pub target: Target,
    pub pragma: Option<String>,
    pub rlp_dir: Option<String>,
    pub indent: Option<usize>,
    pub stdout: bool,
}

/// What a successful run produced.
#[derive(Debug, PartialEq, Eq)]
pub enum Generated {
    Printed(String),
    Written(PathBuf),
}

pub fn run(args: GenerateArgs) {
    match execute(&args) {
        Ok(Generated::Printed(code)) => print!("{}", code),
        Ok(Generated::Written(path)) => {
            info!(path = %path.display(), "wrote bindings");
            eprintln!("{}", written_message(&path));
        }
        Err(e) => super::fail(e),
    }
}

pub fn written_message(path: &Path) -> String {
    format!("wrote {}", path.display())
}

pub fn execute(args: &GenerateArgs) -> Result<Generated, CliError> {
    let abi = read_abi(&args.abi_path)?;
    let namespace = args
        .namespace
        .clone()
        .unwrap_or_else(|| default_namespace(&args.abi_path));
    let code = compile(&abi, &namespace, &config(args))?;

    if args.stdout {
        return Ok(Generated::Printed(code));
    }

    let path = output_path(&abi_stem(&args.abi_path), args.output.as_deref(), args.target);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| CliError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&path, code).map_err(|source| CliError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(Generated::Written(path))
}

fn config(args: &GenerateArgs) -> Config {
    let mut config = Config::new().target(args.target);
    if let Some(pragma) = &args.pragma {
        config = config.pragma(pragma.as_str());
    }
    if let Some(dir) = &args.rlp_dir {
        config = config.rlp_import_dir(dir.as_str());
    }
    if let Some(indent) = args.indent {
        config = config.indent(indent);
    }
    config
}

/// `OUT` with an extension is used as is; otherwise it is a directory
/// (default `./`) that receives `<stem>.<ext>`.
pub fn output_path(stem: &str, output: Option<&Path>, target: Target) -> PathBuf {
    let file_name = format!("{stem}.{}", target.extension());
    match output {
        Some(out) if out.extension().is_some() => out.to_path_buf(),
        Some(dir) => dir.join(file_name),
        None => Path::new(".").join(file_name),
    }
}
