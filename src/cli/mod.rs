pub mod commands;

pub use commands::{ClaimArgs, Cli, Commands};
