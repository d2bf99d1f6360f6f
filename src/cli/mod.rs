//! Command Line Interface (CLI) layer for imgcollage.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the `resize`, `batch`,
//! `collage` and `blank` subcommands. It wires user-provided options to the
//! library functionality exposed via `imgcollage::api`.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
