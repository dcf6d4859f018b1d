//! Command modules for the BranchGuard CLI.
//!
//! Each submodule handles one command:
//!
//! - `protect_cmd`: batch branch protection enforcement

pub mod protect_cmd;
