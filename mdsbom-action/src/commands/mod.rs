//! Command handlers -- one module per subcommand

pub mod inputs;
pub mod render;
pub mod run;
