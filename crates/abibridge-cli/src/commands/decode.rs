use std::path::PathBuf;

use abibridge_lib::codec;

use super::CliError;
use super::input::load_contract;

pub struct DecodeArgs {
    pub abi_path: PathBuf,
    pub type_name: String,
    pub data: String,
    pub compact: bool,
}

pub fn run(args: DecodeArgs) {
    match execute(&args) {
        Ok(json) => println!("{}", json),
        Err(e) => super::fail(e),
    }
}

pub fn execute(args: &DecodeArgs) -> Result<String, CliError> {
    let mut contract = load_contract(&args.abi_path)?;
    let ty = contract.resolve_type(&args.type_name)?;

    let data = args.data.trim();
    let bytes = hex::decode(data.strip_prefix("0x").unwrap_or(data))?;
    let value = codec::decode(&contract.table, ty, &bytes)?;
    let json = value.to_json(&contract.table, ty)?;

    let text = if args.compact {
        serde_json::to_string(&json)?
    } else {
        serde_json::to_string_pretty(&json)?
    };
    Ok(text)
}
