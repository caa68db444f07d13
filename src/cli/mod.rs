//! Command Line Interface (CLI) layer for imgcompose.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the single-image subcommands
//! and directory batches. It wires user-provided options to the underlying
//! library functionality exposed via `imgcompose::api`.
//!
//! If you are embedding imgcompose into another application, prefer using
//! the high-level `imgcompose::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
