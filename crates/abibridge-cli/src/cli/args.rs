//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use abibridge_lib::Target;
use clap::{Arg, ArgAction, value_parser};

/// ABI document (positional). `-` reads stdin.
pub fn abi_path_arg() -> Arg {
    Arg::new("abi_path")
        .value_name("ABI")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("ABI JSON file, or - for stdin")
}

/// Output file or directory (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("OUT")
        .value_parser(value_parser!(PathBuf))
        .help("Output file, or directory for <ABI stem>.sol/.hpp [default: ./]")
}

/// Library or namespace name (-n/--namespace).
pub fn namespace_arg() -> Arg {
    Arg::new("namespace")
        .short('n')
        .long("namespace")
        .value_name("NAME")
        .help("Library/namespace name (defaults to the ABI file stem)")
}

/// Render target (-t/--target).
pub fn target_arg() -> Arg {
    Arg::new("target")
        .short('t')
        .long("target")
        .value_name("TARGET")
        .default_value("solidity")
        .value_parser(|s: &str| s.parse::<Target>())
        .help("Output language: solidity or cpp")
}

/// Solidity version requirement (--pragma).
pub fn pragma_arg() -> Arg {
    Arg::new("pragma")
        .long("pragma")
        .value_name("VERSION")
        .help("Solidity version requirement [default: ^0.8.5]")
}

/// Import directory of the RLP helper libraries (--rlp-dir).
pub fn rlp_dir_arg() -> Arg {
    Arg::new("rlp_dir")
        .long("rlp-dir")
        .value_name("DIR")
        .help("Directory RLPEncode.sol and RLPReader.sol are imported from [default: ./]")
}

/// Indentation width (--indent).
pub fn indent_arg() -> Arg {
    Arg::new("indent")
        .long("indent")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Spaces per indentation level [default: 4]")
}

/// Print to stdout instead of writing a file (--stdout).
pub fn stdout_arg() -> Arg {
    Arg::new("stdout")
        .long("stdout")
        .action(ArgAction::SetTrue)
        .conflicts_with("output")
        .help("Print generated code instead of writing a file")
}

/// Type expression for encode/decode (--type).
pub fn type_arg() -> Arg {
    Arg::new("type_name")
        .long("type")
        .value_name("TYPE")
        .help("Type expression, e.g. 'map<uint32,string>' or a struct name")
}

/// Method whose call payload to encode (--method).
pub fn method_arg() -> Arg {
    Arg::new("method")
        .short('m')
        .long("method")
        .value_name("NAME")
        .conflicts_with("type_name")
        .help("Encode a call payload for this method; VALUE is the argument array")
}

/// JSON value to encode (--value).
pub fn value_arg() -> Arg {
    Arg::new("value")
        .long("value")
        .value_name("JSON")
        .required(true)
        .help("Value to encode, as JSON")
}

/// Hex data to decode (--data).
pub fn data_arg() -> Arg {
    Arg::new("data")
        .long("data")
        .value_name("HEX")
        .required(true)
        .help("RLP bytes to decode, hex with optional 0x prefix")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .global(true)
        .help("Colorize output")
}

/// Verbosity level (-v, -vv, -vvv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .global(true)
        .help("Log more (-v info, -vv debug, -vvv trace); ABIBRIDGE_LOG overrides")
}
