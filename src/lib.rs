//! Refine - terminal client for a prompt refinement service
//!
//! Takes an informal prompt typed into the TUI, sends it to a remote
//! refinement service, and displays the improved prompt together with a
//! structured analysis of what changed.
//!
//! # Core Concepts
//!
//! - **Submission lifecycle**: a single-flight state machine
//!   (Idle -> Submitting -> Success/Failed) owned by the TUI state.
//!   Exactly one request can be outstanding at a time.
//! - **Detail level**: user-selected verbosity target for refinement
//!   (simple / moderate / detailed).
//! - **Copy feedback**: transient "Copied!" acknowledgement that reverts
//!   on a timer, independent of the submission lifecycle.
//!
//! # Modules
//!
//! - `api` - wire types, error taxonomy, and the HTTP client
//! - `cli` - command line flags
//! - `config` - YAML configuration with fallback chain
//! - `tui` - terminal UI (state machine, event loop, rendering)
//! - `validate` - local prompt validation

pub mod api;
pub mod cli;
pub mod config;
pub mod tui;
pub mod validate;

pub use api::{ApiError, DetailLevel, HttpRefineClient, PromptSubmission, RefineClient, RefineResult};
pub use config::Config;
