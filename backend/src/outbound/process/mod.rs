//! Child-process adapters.

mod script_runner;

pub use script_runner::{ProcessScriptRunner, ScriptCommand, ScriptLimits};
