use std::path::PathBuf;

use abibridge_lib::CodecError;
use abibridge_lib::codec::{self, Value};
use abibridge_lib::contract::Contract;

use super::CliError;
use super::input::load_contract;

pub struct EncodeArgs {
    pub abi_path: PathBuf,
    pub type_name: Option<String>,
    pub method: Option<String>,
    pub value: String,
}

pub fn run(args: EncodeArgs) {
    match execute(&args) {
        Ok(hex) => println!("{}", hex),
        Err(e) => super::fail(e),
    }
}

/// Encode and render as `0x`-prefixed hex.
pub fn execute(args: &EncodeArgs) -> Result<String, CliError> {
    let mut contract = load_contract(&args.abi_path)?;
    let json: serde_json::Value = serde_json::from_str(&args.value)?;

    let bytes = match &args.method {
        Some(method) => encode_call(&contract, method, &json)?,
        None => {
            let ty = contract.resolve_type(args.type_name.as_deref().unwrap_or_default())?;
            let value = Value::from_json(&contract.table, ty, &json)?;
            codec::encode(&contract.table, ty, &value)?
        }
    };
    Ok(format!("0x{}", hex::encode(bytes)))
}

fn encode_call(contract: &Contract, method: &str, json: &serde_json::Value) -> Result<Vec<u8>, CliError> {
    let function = contract
        .function(method)
        .ok_or_else(|| CodecError::UnknownMethod(method.to_string()))?;

    let items = match json.as_array() {
        Some(items) if items.len() == function.inputs.len() => items,
        _ => {
            return Err(CliError::Arguments {
                method: method.to_string(),
                expected: function.inputs.len(),
            });
        }
    };

    let args = function
        .inputs
        .iter()
        .zip(items)
        .map(|(param, item)| Value::from_json(&contract.table, param.ty, item))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(contract.encode_call(method, &args)?)
}
