//! Configuration: settings read once from the environment at startup,
//! plus the constants shared across layers.

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
