//! Command-line interface module.

mod args;
pub mod fetch;
pub mod strip;

pub use args::{Cli, Commands, FetchArgs, StripArgs};
