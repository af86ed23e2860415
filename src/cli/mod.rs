//! Command-line front end for the tictree engine
//!
//! Subcommands play interactively, analyze a single position or simulate
//! many games against a random opponent.

pub mod commands;
pub mod config;
pub mod logging;
pub mod output;
