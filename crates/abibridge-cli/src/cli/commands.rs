//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("abibridge")
        .about("Compile contract ABI documents into cross-VM bindings")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .arg(color_arg())
        .subcommand(generate_command())
        .subcommand(types_command())
        .subcommand(encode_command())
        .subcommand(decode_command())
}

/// Render bindings for an ABI document.
pub fn generate_command() -> Command {
    Command::new("generate")
        .about("Generate Solidity or C++ bindings")
        .after_help(
            r#"EXAMPLES:
  abibridge generate token.abi.json                 # ./token.abi.sol
  abibridge generate token.json -t cpp -o include/  # include/token.hpp
  abibridge generate token.json -o Bridge.sol -n Bridge
  cat token.json | abibridge generate - --stdout"#,
        )
        .arg(abi_path_arg())
        .arg(output_arg())
        .arg(namespace_arg())
        .arg(target_arg())
        .arg(pragma_arg())
        .arg(rlp_dir_arg())
        .arg(indent_arg())
        .arg(stdout_arg())
}

/// List generated definitions and methods.
pub fn types_command() -> Command {
    Command::new("types")
        .about("List interned types in emission order, then methods")
        .arg(abi_path_arg())
}

/// Encode a JSON value with the reference codec.
pub fn encode_command() -> Command {
    Command::new("encode")
        .about("RLP-encode a JSON value against a type from the ABI")
        .after_help(
            r#"EXAMPLES:
  abibridge encode token.json --type 'map<uint32,string>' --value '[[1, "a"]]'
  abibridge encode token.json --type Message --value '{"head": "hi", "id": 7}'
  abibridge encode token.json -m transfer --value '["0x5b38da6a701c568545dcfcb03fcb875f56beddc4", 100]'"#,
        )
        .arg(abi_path_arg())
        .arg(type_arg().required_unless_present("method"))
        .arg(method_arg())
        .arg(value_arg())
}

/// Decode hex data with the reference codec.
pub fn decode_command() -> Command {
    Command::new("decode")
        .about("Decode RLP bytes into JSON against a type from the ABI")
        .arg(abi_path_arg())
        .arg(type_arg().required(true))
        .arg(data_arg())
        .arg(compact_arg())
}
