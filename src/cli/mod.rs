mod command;
mod runner;
mod util;

pub use command::Command;
pub use runner::{OutputMode, run, run_to, run_with_format};
pub use util::{parse_category, parse_export_format, parse_output_mode};
