//! Tic-tac-toe engine driven by a pre-computed game tree
//!
//! This crate provides:
//! - Board model and line-sum evaluation
//! - Arena-backed game tree with additive rank propagation and optional
//!   immediate-loss pruning
//! - Greedy move selection over the ranked children of a node
//! - A game session that walks the tree one ply at a time, reclaiming every
//!   branch that can no longer be reached
//! - Ports for move input and board rendering, with terminal, scripted and
//!   random adapters
//!
//! # Example
//!
//! ```
//! use tictree::{
//!     adapters::{NullRenderer, PreferenceMoves},
//!     config::TreeConfig,
//!     session::{Session, SessionDriver},
//! };
//!
//! let session = Session::new(TreeConfig::default());
//! let mut driver = SessionDriver::new(session, PreferenceMoves::ascending(), NullRenderer);
//! let report = driver.play()?;
//! assert!(report.status.is_terminal());
//! # Ok::<(), tictree::Error>(())
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod ports;
pub mod session;
pub mod tictactoe;
pub mod tree;

pub use error::{Error, Result};
