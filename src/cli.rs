//! CLI domain: parse, route, and output only.
//! Monitoring itself lives in `monitor`; printing goes through `report`.

mod output;
mod parse;
mod route;

pub use output::map_error;
pub use parse::Cli;
pub use route::{OutputFormat, RunContext};
