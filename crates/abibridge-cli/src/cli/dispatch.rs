//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use abibridge_lib::Target;
use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::decode::DecodeArgs;
use crate::commands::encode::EncodeArgs;
use crate::commands::generate::GenerateArgs;
use crate::commands::types::TypesArgs;

pub struct GenerateParams {
    pub abi_path: PathBuf,
    pub output: Option<PathBuf>,
    pub namespace: Option<String>,
    pub target: Target,
    pub pragma: Option<String>,
    pub rlp_dir: Option<String>,
    pub indent: Option<usize>,
    pub stdout: bool,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            abi_path: abi_path(m),
            output: m.get_one::<PathBuf>("output").cloned(),
            namespace: m.get_one::<String>("namespace").cloned(),
            target: m.get_one::<Target>("target").copied().unwrap_or_default(),
            pragma: m.get_one::<String>("pragma").cloned(),
            rlp_dir: m.get_one::<String>("rlp_dir").cloned(),
            indent: m.get_one::<usize>("indent").copied(),
            stdout: m.get_flag("stdout"),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        Self {
            abi_path: p.abi_path,
            output: p.output,
            namespace: p.namespace,
            target: p.target,
            pragma: p.pragma,
            rlp_dir: p.rlp_dir,
            indent: p.indent,
            stdout: p.stdout,
        }
    }
}

pub struct TypesParams {
    pub abi_path: PathBuf,
    pub color: ColorChoice,
}

impl TypesParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            abi_path: abi_path(m),
            color: parse_color(m),
        }
    }
}

impl From<TypesParams> for TypesArgs {
    fn from(p: TypesParams) -> Self {
        Self {
            abi_path: p.abi_path,
            color: p.color.should_colorize(),
        }
    }
}

pub struct EncodeParams {
    pub abi_path: PathBuf,
    pub type_name: Option<String>,
    pub method: Option<String>,
    pub value: String,
}

impl EncodeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            abi_path: abi_path(m),
            type_name: m.get_one::<String>("type_name").cloned(),
            method: m.get_one::<String>("method").cloned(),
            value: m.get_one::<String>("value").cloned().unwrap_or_default(),
        }
    }
}

impl From<EncodeParams> for EncodeArgs {
    fn from(p: EncodeParams) -> Self {
        Self {
            abi_path: p.abi_path,
            type_name: p.type_name,
            method: p.method,
            value: p.value,
        }
    }
}

pub struct DecodeParams {
    pub abi_path: PathBuf,
    pub type_name: String,
    pub data: String,
    pub compact: bool,
}

impl DecodeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            abi_path: abi_path(m),
            type_name: m.get_one::<String>("type_name").cloned().unwrap_or_default(),
            data: m.get_one::<String>("data").cloned().unwrap_or_default(),
            compact: m.get_flag("compact"),
        }
    }
}

impl From<DecodeParams> for DecodeArgs {
    fn from(p: DecodeParams) -> Self {
        Self {
            abi_path: p.abi_path,
            type_name: p.type_name,
            data: p.data,
            compact: p.compact,
        }
    }
}

/// Number of `-v` flags given anywhere on the command line.
pub fn verbosity(m: &ArgMatches) -> u8 {
    m.get_count("verbose")
}

fn abi_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("abi_path")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("-"))
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
