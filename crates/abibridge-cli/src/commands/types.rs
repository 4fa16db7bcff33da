use std::path::PathBuf;

use abibridge_core::Colors;
use abibridge_lib::emit::listing;

use super::CliError;
use super::input::load_contract;

pub struct TypesArgs {
    pub abi_path: PathBuf,
    pub color: bool,
}

pub fn run(args: TypesArgs) {
    match execute(&args) {
        Ok(text) => print!("{}", text),
        Err(e) => super::fail(e),
    }
}

pub fn execute(args: &TypesArgs) -> Result<String, CliError> {
    let contract = load_contract(&args.abi_path)?;
    Ok(listing(&contract, Colors::new(args.color)))
}
