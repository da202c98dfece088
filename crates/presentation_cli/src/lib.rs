//! WeatherFuse CLI
//!
//! Argument parsing, service wiring and output rendering for the
//! `weatherfuse` binary.

pub mod app;
pub mod cli;
pub mod render;

pub use cli::{Cli, Commands, OutputFormat};
pub use render::{ConsoleRenderer, JsonRenderer};
