mod command;
mod runner;

pub use command::Command;
pub use runner::{ComparisonRow, OutputMode, compare_policies, run, run_with_format};
