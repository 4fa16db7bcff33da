//! Source rendering.
//!
//! Output sections, in order:
//! 1. imports or includes
//! 2. forward declarations (C++ only)
//! 3. definitions and codecs, dependencies first
//! 4. one call stub per method

mod config;
mod cpp;
mod emitter;
mod listing;
mod solidity;


use tracing::debug;

pub use config::{Config, Target};
pub use listing::listing;

use crate::contract::Contract;
use emitter::Emitter;

/// Render a built contract for the configured target.
pub fn emit(contract: &Contract, config: &Config) -> String {
    let emitter = Emitter::new(contract, config);
    let output = match config.target {
        Target::Solidity => emitter.run(&solidity::Solidity),
        Target::Cpp => emitter.run(&cpp::Cpp),
    };
    debug!(
        backend = %config.target,
        lines = output.lines().count(),
        "rendered contract"
    );
    output
}
